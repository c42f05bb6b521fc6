use crate::export::{DownloadSink, PrintSurface};
use crate::models::RecordId;
use crate::render::Fragment;

/// What the surrounding page provides to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoints {
    /// Record ids of the member cards (each card's `data-resume`).
    pub member_cards: Vec<RecordId>,
    pub modal: bool,
    pub content: bool,
    pub close_control: bool,
    pub print_control: bool,
    pub download_control: bool,
}

/// The page the viewer drives. Implementations perform effects only;
/// every decision is made by the controller.
pub trait ViewerHost: PrintSurface + DownloadSink {
    fn mount_points(&self) -> MountPoints;

    /// Replaces the content container's children with `fragment` and tags the
    /// container with the requested record id.
    fn mount(&mut self, fragment: &Fragment, record: &RecordId);

    fn set_modal_visible(&mut self, visible: bool);

    /// Fades the content panel in or out.
    fn set_content_visible(&mut self, visible: bool);

    /// Suppresses or restores scrolling of the page behind the modal.
    fn set_background_scroll_locked(&mut self, locked: bool);

    fn set_download_enabled(&mut self, enabled: bool);
}
