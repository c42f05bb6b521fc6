//! Viewer controller — owns the modal state machine and mediates
//! open / close / print / download.
//!
//! ```text
//!            open(id)                 close()
//!   Closed ───────────▶ Open ───────────────────▶ Closing
//!     ▲                 │  ▲ open(id2): replace      │
//!     │                 └──┘                         │ close delay
//!     └───────────────── settle ◀────────────────────┘
//!                         (then apply any queued open)
//! ```
//!
//! Timed steps are returned as [`Scheduled`] work instead of being slept on.
//! Whoever drives the controller (the tokio runtime, a browser timer shim,
//! or a test) calls [`ViewerController::fire`] when the delay has elapsed.
//! A zero delay is fired inline.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::config::ViewerTimings;
use crate::errors::{FolioError, Result};
use crate::export::{print_document, DownloadLink, PrintWindow};
use crate::models::RecordId;
use crate::render::{self, Fragment};
use crate::store::Content;
use crate::viewer::events::{self, Action, ClickTarget, UiEvent};
use crate::viewer::host::{MountPoints, ViewerHost};
use crate::viewer::state::{Deferred, Phase, Scheduled, ViewerState};

/// How an `open` request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Mounted,
    /// Unknown id: the not-found fragment was mounted instead.
    NotFound,
    /// Arrived while closing; will open once the close settles.
    Queued,
}

pub struct ViewerController<H: ViewerHost> {
    host: H,
    content: Arc<Content>,
    timings: ViewerTimings,
    mounts: MountPoints,
    state: ViewerState,
    mounted: Option<Fragment>,
    scheduled: Vec<Scheduled>,
    print_jobs: HashMap<u64, Box<dyn PrintWindow>>,
    next_ticket: u64,
}

impl<H: ViewerHost> ViewerController<H> {
    /// Binds the controller to a page, failing with `MissingMountPoint` when
    /// the page lacks member cards, the modal, or the content container.
    pub fn attach(host: H, content: Arc<Content>, timings: ViewerTimings) -> Result<Self> {
        let mounts = host.mount_points();
        if mounts.member_cards.is_empty() {
            return Err(FolioError::MissingMountPoint("member cards"));
        }
        if !mounts.modal {
            return Err(FolioError::MissingMountPoint("resume modal"));
        }
        if !mounts.content {
            return Err(FolioError::MissingMountPoint("resume content"));
        }

        info!(
            cards = mounts.member_cards.len(),
            records = content.store.len(),
            "Resume viewer attached"
        );

        Ok(Self {
            host,
            content,
            timings,
            mounts,
            state: ViewerState::default(),
            mounted: None,
            scheduled: Vec::new(),
            print_jobs: HashMap::new(),
            next_ticket: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn current_record(&self) -> Option<&RecordId> {
        self.state.current_record.as_ref()
    }

    pub fn mounted(&self) -> Option<&Fragment> {
        self.mounted.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Deferred work produced since the last call.
    pub fn take_scheduled(&mut self) -> Vec<Scheduled> {
        std::mem::take(&mut self.scheduled)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Event entry point
    // ────────────────────────────────────────────────────────────────────────

    /// Handles one UI event. Never fails: errors are logged and dropped so the
    /// next interaction still works.
    pub fn handle(&mut self, event: UiEvent) {
        if let UiEvent::Click(target) = &event {
            if !self.is_bound(target) {
                trace!(?target, "Click on an element without a listener");
                return;
            }
        }

        for action in events::resolve(&event, self.state.phase != Phase::Closed) {
            if let Err(err) = self.apply(action) {
                err.log_degraded();
            }
        }
    }

    fn is_bound(&self, target: &ClickTarget) -> bool {
        match target {
            ClickTarget::ViewControl(id) | ClickTarget::Card(id) => {
                self.mounts.member_cards.contains(id)
            }
            ClickTarget::CloseControl => self.mounts.close_control,
            ClickTarget::PrintControl => self.mounts.print_control,
            ClickTarget::DownloadControl => self.mounts.download_control,
            ClickTarget::Backdrop | ClickTarget::Panel => true,
        }
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Open(id) => {
                self.open(id.as_str());
            }
            Action::Close => {
                self.close();
            }
            Action::Print => self.print_current()?,
            Action::Download => {
                self.download_current()?;
            }
        }
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Transitions
    // ────────────────────────────────────────────────────────────────────────

    /// Shows the record `id`, replacing whatever is mounted.
    pub fn open(&mut self, id: &str) -> OpenOutcome {
        if self.state.phase == Phase::Closing {
            debug!("Open '{id}' queued until the close settles");
            self.state.queued_open = Some(RecordId::from(id));
            return OpenOutcome::Queued;
        }

        let (fragment, outcome) = match self.content.store.lookup(id) {
            Ok(record) => (render::render(record), OpenOutcome::Mounted),
            Err(err) => {
                err.log_degraded();
                (render::not_found(), OpenOutcome::NotFound)
            }
        };

        let record_id = RecordId::from(id);
        self.host.mount(&fragment, &record_id);
        self.host
            .set_download_enabled(self.content.downloads.contains(id));
        self.mounted = Some(fragment);
        self.state.current_record = Some(record_id);

        let was_open = self.state.is_open();
        self.state.phase = Phase::Open;
        let generation = self.state.advance();
        if !was_open {
            self.host.set_modal_visible(true);
            self.host.set_background_scroll_locked(true);
        }
        debug!(generation, ?outcome, "Viewer opened '{id}'");

        self.schedule(
            self.timings.reveal_delay,
            Deferred::Reveal { generation },
        );
        outcome
    }

    /// Starts closing. Returns `false` unless the viewer is open.
    ///
    /// While already closing, a close still cancels any queued open so the
    /// latest request decides what the user ends up seeing.
    pub fn close(&mut self) -> bool {
        if self.state.phase != Phase::Open {
            if let Some(id) = self.state.queued_open.take() {
                debug!("Queued open '{id}' cancelled by close");
            }
            trace!(phase = ?self.state.phase, "Close ignored");
            return false;
        }

        self.state.phase = Phase::Closing;
        let generation = self.state.advance();
        self.host.set_content_visible(false);
        debug!(generation, "Viewer closing");

        self.schedule(
            self.timings.close_delay,
            Deferred::SettleClose { generation },
        );
        true
    }

    /// Runs deferred work whose delay has elapsed. Stale work is ignored.
    pub fn fire(&mut self, action: Deferred) {
        match action {
            Deferred::Reveal { generation } => {
                if self.state.is_open() && generation == self.state.generation {
                    self.host.set_content_visible(true);
                } else {
                    trace!(generation, "Stale reveal dropped");
                }
            }
            Deferred::SettleClose { generation } => {
                if self.state.phase != Phase::Closing || generation != self.state.generation {
                    trace!(generation, "Stale close settle dropped");
                    return;
                }
                self.state.phase = Phase::Closed;
                self.host.set_modal_visible(false);
                self.host.set_background_scroll_locked(false);
                debug!(generation, "Viewer closed");

                if let Some(id) = self.state.queued_open.take() {
                    self.open(id.as_str());
                }
            }
            Deferred::Print { ticket } => {
                if let Some(mut window) = self.print_jobs.remove(&ticket) {
                    window.print();
                    window.close();
                    debug!(ticket, "Print job finished");
                }
            }
        }
    }

    fn schedule(&mut self, delay: std::time::Duration, action: Deferred) {
        if delay.is_zero() {
            self.fire(action);
        } else {
            self.scheduled.push(Scheduled { delay, action });
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Export
    // ────────────────────────────────────────────────────────────────────────

    /// Prints the mounted fragment through a fresh print window.
    pub fn print_current(&mut self) -> Result<()> {
        if !self.is_open() {
            return Err(FolioError::NotOpen);
        }
        let markup = self
            .mounted
            .as_ref()
            .ok_or(FolioError::NothingMounted)?
            .to_html();
        let document = print_document(&markup);

        let mut window = self
            .host
            .open_print_window()
            .ok_or(FolioError::PrintUnavailable)?;
        window.write(&document);

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.print_jobs.insert(ticket, window);
        debug!(ticket, bytes = document.len(), "Print document written");

        self.schedule(self.timings.print_delay, Deferred::Print { ticket });
        Ok(())
    }

    /// Starts the download of the file registered for the mounted record.
    pub fn download_current(&mut self) -> Result<DownloadLink> {
        if !self.is_open() {
            return Err(FolioError::NotOpen);
        }
        let id = self
            .state
            .current_record
            .as_ref()
            .ok_or(FolioError::NothingMounted)?;
        let link = self.content.downloads.link_for(id.as_str())?;
        self.host.start_download(&link);
        info!("Download started: {}", link.file_name);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::events::Key;
    use crate::viewer::testing::{bundled_controller, HostCall, RecordingHost, WindowCall};
    use std::time::Duration;

    fn slow_timings() -> ViewerTimings {
        ViewerTimings::default()
    }

    #[test]
    fn test_starts_closed() {
        let viewer = bundled_controller(ViewerTimings::immediate());
        assert_eq!(viewer.phase(), Phase::Closed);
        assert!(viewer.current_record().is_none());
    }

    #[test]
    fn test_open_mounts_record_and_locks_scroll() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        assert_eq!(viewer.open("joshua"), OpenOutcome::Mounted);

        let host = viewer.host();
        assert!(viewer.is_open());
        assert_eq!(viewer.current_record().map(RecordId::as_str), Some("joshua"));
        assert!(host.modal_visible && host.content_visible && host.scroll_locked);
        assert!(host.content_html.contains("Joshua Pius"));
        assert_eq!(host.current_resume.as_deref(), Some("joshua"));
    }

    #[test]
    fn test_reopen_replaces_content() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.open("joshua");
        viewer.open("giddy");

        let host = viewer.host();
        assert!(viewer.is_open());
        assert_eq!(viewer.current_record().map(RecordId::as_str), Some("giddy"));
        assert!(host.content_html.contains("Giddy Ivutha"));
        assert!(!host.content_html.contains("Joshua Pius"));

        let expected = {
            let content = crate::store::fixtures::bundled();
            render::render(content.store.lookup("giddy").unwrap()).to_html()
        };
        assert_eq!(host.content_html, expected);
        assert_eq!(
            host.count(|c| matches!(c, HostCall::ModalVisible(true))),
            1,
            "no flicker through a close"
        );
    }

    #[test]
    fn test_close_twice_is_noop() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.open("joshua");
        assert!(viewer.close());
        assert!(!viewer.close());
        assert_eq!(viewer.phase(), Phase::Closed);
        assert!(!viewer.host().modal_visible);
        assert!(!viewer.host().scroll_locked);
    }

    #[test]
    fn test_close_when_never_opened() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        assert!(!viewer.close());
        assert_eq!(viewer.phase(), Phase::Closed);
        assert!(viewer.host().calls.is_empty());
    }

    #[test]
    fn test_unknown_id_mounts_not_found_and_stays_open() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        assert_eq!(viewer.open("nonexistent"), OpenOutcome::NotFound);
        assert_eq!(viewer.phase(), Phase::Open);
        assert!(viewer.mounted().unwrap().is_not_found());
        assert!(viewer.host().content_html.contains("Resume not found"));
        assert!(!viewer.host().download_enabled);
    }

    #[test]
    fn test_close_is_timed() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        let reveal = viewer.take_scheduled();
        assert_eq!(reveal.len(), 1);
        assert_eq!(reveal[0].delay, Duration::from_millis(100));
        viewer.fire(reveal[0].action);
        assert!(viewer.host().content_visible);

        viewer.close();
        assert_eq!(viewer.phase(), Phase::Closing);
        assert!(!viewer.host().content_visible);
        assert!(viewer.host().modal_visible, "still fading out");

        let settle = viewer.take_scheduled();
        assert_eq!(settle[0].delay, Duration::from_millis(300));
        viewer.fire(settle[0].action);
        assert_eq!(viewer.phase(), Phase::Closed);
        assert!(!viewer.host().modal_visible);
    }

    #[test]
    fn test_open_during_closing_is_queued() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        viewer.take_scheduled();
        viewer.close();
        let settle = viewer.take_scheduled();

        assert_eq!(viewer.open("giddy"), OpenOutcome::Queued);
        assert_eq!(viewer.phase(), Phase::Closing);
        assert!(viewer.host().content_html.contains("Joshua Pius"));

        viewer.fire(settle[0].action);
        assert_eq!(viewer.phase(), Phase::Open);
        assert_eq!(viewer.current_record().map(RecordId::as_str), Some("giddy"));
        assert!(viewer.host().modal_visible && viewer.host().scroll_locked);
    }

    #[test]
    fn test_close_cancels_open_queued_during_closing() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        viewer.take_scheduled();
        viewer.close();
        let settle = viewer.take_scheduled();

        assert_eq!(viewer.open("giddy"), OpenOutcome::Queued);
        viewer.handle(UiEvent::Click(ClickTarget::CloseControl));
        viewer.fire(settle[0].action);

        assert_eq!(viewer.phase(), Phase::Closed);
        assert_eq!(viewer.current_record().map(RecordId::as_str), Some("joshua"));
        assert!(!viewer.host().modal_visible);
        assert!(viewer.take_scheduled().is_empty());
    }

    #[test]
    fn test_escape_during_closing_cancels_queued_open() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        viewer.take_scheduled();
        viewer.close();
        let settle = viewer.take_scheduled();

        viewer.handle(UiEvent::Click(ClickTarget::Card("giddy".into())));
        viewer.handle(UiEvent::KeyDown(Key::Escape));
        viewer.fire(settle[0].action);

        assert_eq!(viewer.phase(), Phase::Closed);
        assert_eq!(
            viewer.host().count(|c| matches!(c, HostCall::Mount { .. })),
            1
        );
    }

    #[test]
    fn test_stale_reveal_after_close_is_dropped() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        let reveal = viewer.take_scheduled();
        viewer.close();
        viewer.fire(reveal[0].action);
        assert!(!viewer.host().content_visible);
    }

    #[test]
    fn test_stale_settle_after_reopen_is_dropped() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("joshua");
        viewer.close();
        let first = viewer
            .take_scheduled()
            .into_iter()
            .find(|s| matches!(s.action, Deferred::SettleClose { .. }))
            .unwrap();
        viewer.fire(first.action);
        viewer.open("giddy");
        viewer.fire(first.action);
        assert_eq!(viewer.phase(), Phase::Open);
    }

    #[test]
    fn test_view_control_click_mounts_once() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.handle(UiEvent::Click(ClickTarget::ViewControl("kipkirui".into())));
        assert_eq!(viewer.host().count(|c| matches!(c, HostCall::Mount { .. })), 1);
        assert_eq!(viewer.current_record().map(RecordId::as_str), Some("kipkirui"));
    }

    #[test]
    fn test_escape_and_backdrop_close() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.handle(UiEvent::Click(ClickTarget::Card("benson".into())));
        viewer.handle(UiEvent::Click(ClickTarget::Panel));
        assert!(viewer.is_open());
        viewer.handle(UiEvent::KeyDown(Key::Escape));
        assert_eq!(viewer.phase(), Phase::Closed);

        viewer.handle(UiEvent::Click(ClickTarget::Card("benson".into())));
        viewer.handle(UiEvent::Click(ClickTarget::Backdrop));
        assert_eq!(viewer.phase(), Phase::Closed);
    }

    #[test]
    fn test_click_on_unknown_card_is_ignored() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.handle(UiEvent::Click(ClickTarget::Card("stranger".into())));
        assert_eq!(viewer.phase(), Phase::Closed);
    }

    #[test]
    fn test_print_writes_mounted_markup_then_prints() {
        let mut viewer = bundled_controller(slow_timings());
        viewer.open("gladys");
        viewer.take_scheduled();
        viewer.print_current().unwrap();

        let windows = viewer.host().windows.clone();
        {
            let log = windows.borrow();
            assert_eq!(log.len(), 1);
            match &log[0] {
                WindowCall::Write(doc) => {
                    assert!(doc.contains(&viewer.mounted().unwrap().to_html()));
                    assert!(doc.contains("@media print"));
                }
                other => panic!("expected write, got {other:?}"),
            }
        }

        let job = viewer.take_scheduled();
        assert_eq!(job[0].delay, Duration::from_millis(500));
        viewer.fire(job[0].action);
        assert_eq!(
            windows.borrow()[1..].to_vec(),
            vec![WindowCall::Print, WindowCall::Close]
        );
    }

    #[test]
    fn test_print_requires_open() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        assert!(matches!(viewer.print_current(), Err(FolioError::NotOpen)));
    }

    #[test]
    fn test_print_blocked_window_is_error_and_handler_survives() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.host_mut().block_print_windows = true;
        viewer.open("joshua");
        assert!(matches!(
            viewer.print_current(),
            Err(FolioError::PrintUnavailable)
        ));

        viewer.handle(UiEvent::Click(ClickTarget::PrintControl));
        viewer.handle(UiEvent::Click(ClickTarget::CloseControl));
        assert_eq!(viewer.phase(), Phase::Closed);
    }

    #[test]
    fn test_download_registered_file() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.open("giddy");
        assert!(viewer.host().download_enabled);
        let link = viewer.download_current().unwrap();
        assert_eq!(link.href, "resumes/gideon_resume.pdf");
        assert_eq!(link.file_name, "gideon_resume.pdf");
        assert_eq!(viewer.host().downloads, vec![link]);
    }

    #[test]
    fn test_download_unregistered_is_skipped() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.open("nonexistent");
        assert!(matches!(
            viewer.download_current(),
            Err(FolioError::UnregisteredDownload(_))
        ));
        viewer.handle(UiEvent::Click(ClickTarget::DownloadControl));
        assert!(viewer.host().downloads.is_empty());
        assert!(viewer.is_open());
    }

    #[test]
    fn test_download_after_close_rejected() {
        let mut viewer = bundled_controller(ViewerTimings::immediate());
        viewer.open("giddy");
        viewer.close();
        assert!(matches!(viewer.download_current(), Err(FolioError::NotOpen)));
    }

    #[test]
    fn test_attach_requires_mount_points() {
        let content = Arc::new(crate::store::fixtures::bundled());

        let no_cards = RecordingHost::with_cards(&[]);
        assert!(matches!(
            ViewerController::attach(no_cards, content.clone(), ViewerTimings::immediate()),
            Err(FolioError::MissingMountPoint("member cards"))
        ));

        let mut no_modal = RecordingHost::with_cards(&["joshua"]);
        no_modal.mount_points.modal = false;
        assert!(matches!(
            ViewerController::attach(no_modal, content, ViewerTimings::immediate()),
            Err(FolioError::MissingMountPoint("resume modal"))
        ));
    }
}
