//! Resume viewer: modal state machine, page host seam, event routing, and the
//! tokio-driven runtime that fires deferred transitions.

pub mod controller;
pub mod events;
pub mod host;
pub mod runtime;
pub mod state;

use std::sync::Arc;

use crate::config::ViewerTimings;
use crate::store::Content;

pub use controller::{OpenOutcome, ViewerController};
pub use events::{ClickTarget, Key, UiEvent};
pub use host::{MountPoints, ViewerHost};
pub use runtime::ViewerRuntime;
pub use state::{Deferred, Phase, Scheduled};

/// Page initializer for the resume feature.
///
/// Pages without the viewer's mount points are legitimate, so a missing
/// mount point yields `None` instead of an error.
pub fn init_resume_viewer<H: ViewerHost>(
    host: H,
    content: Arc<Content>,
    timings: ViewerTimings,
) -> Option<ViewerController<H>> {
    match ViewerController::attach(host, content, timings) {
        Ok(controller) => Some(controller),
        Err(err) => {
            err.log_degraded();
            None
        }
    }
}
