use thiserror::Error;

/// Library-level error type.
/// Event handlers never let these escape; they call [`FolioError::log_degraded`] instead.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Missing mount point: {0}")]
    MissingMountPoint(&'static str),

    #[error("No download registered for record: {0}")]
    UnregisteredDownload(String),

    #[error("Viewer is not open")]
    NotOpen,

    #[error("Nothing is mounted in the viewer")]
    NothingMounted,

    #[error("Print window could not be opened")]
    PrintUnavailable,

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Content parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FolioError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            FolioError::RecordNotFound(_) => "RECORD_NOT_FOUND",
            FolioError::MissingMountPoint(_) => "MISSING_MOUNT_POINT",
            FolioError::UnregisteredDownload(_) => "UNREGISTERED_DOWNLOAD",
            FolioError::NotOpen => "NOT_OPEN",
            FolioError::NothingMounted => "NOTHING_MOUNTED",
            FolioError::PrintUnavailable => "PRINT_UNAVAILABLE",
            FolioError::InvalidContent(_) => "INVALID_CONTENT",
            FolioError::Json(_) => "CONTENT_PARSE_ERROR",
            FolioError::Io(_) => "IO_ERROR",
        }
    }

    /// Logs the error at the level its kind deserves and swallows it.
    ///
    /// Used at the top of every event handler so a failed action never breaks
    /// the interactions that follow it.
    pub fn log_degraded(&self) {
        let code = self.code();
        match self {
            FolioError::RecordNotFound(id) => {
                tracing::warn!(code, "Record '{id}' not found, showing error fragment");
            }
            FolioError::MissingMountPoint(what) => {
                tracing::debug!(code, "Mount point '{what}' absent, feature disabled");
            }
            FolioError::UnregisteredDownload(id) => {
                tracing::debug!(code, "No download file for '{id}', skipping");
            }
            FolioError::NotOpen | FolioError::NothingMounted => {
                tracing::debug!(code, "Ignoring action: {self}");
            }
            FolioError::PrintUnavailable => {
                tracing::warn!(code, "Print window blocked or unavailable");
            }
            FolioError::InvalidContent(_) | FolioError::Json(_) | FolioError::Io(_) => {
                tracing::error!(code, "{self}");
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
