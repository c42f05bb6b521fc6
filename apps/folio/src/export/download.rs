//! Download stand-in: maps a record id to a prepared static file.
//!
//! Nothing is generated here. The registry only knows which asset path
//! belongs to which record; the host turns a [`DownloadLink`] into an
//! anchor click (or its platform equivalent).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, Result};
use crate::models::RecordId;

/// A synthesized download request for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub href: String,
    /// Suggested file name: the last segment of `href`.
    pub file_name: String,
}

impl DownloadLink {
    pub fn for_path(path: &str) -> Self {
        let file_name = path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(path)
            .to_string();
        Self {
            href: path.to_string(),
            file_name,
        }
    }
}

/// Receives download requests from the viewer.
pub trait DownloadSink {
    fn start_download(&mut self, link: &DownloadLink);
}

/// Static id → file path table, loaded with the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadRegistry {
    files: BTreeMap<RecordId, String>,
}

impl DownloadRegistry {
    pub fn new(files: BTreeMap<RecordId, String>) -> Self {
        Self { files }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.files.contains_key(id)
    }

    pub fn path_for(&self, id: &str) -> Option<&str> {
        self.files.get(id).map(String::as_str)
    }

    /// Builds the link for `id`, or `UnregisteredDownload` when no file is mapped.
    pub fn link_for(&self, id: &str) -> Result<DownloadLink> {
        self.path_for(id)
            .map(DownloadLink::for_path)
            .ok_or_else(|| FolioError::UnregisteredDownload(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, &str)> {
        self.files.iter().map(|(id, path)| (id, path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
