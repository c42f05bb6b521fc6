//! Single-task event loop for the viewer.
//!
//! One task owns the controller, so there is no locking: UI events arrive over
//! an mpsc channel and deferred work is fired from the same loop once its
//! `tokio::time` deadline passes. Closing the sender stops intake; the loop
//! then drains outstanding timers and hands the controller back.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::viewer::controller::ViewerController;
use crate::viewer::events::UiEvent;
use crate::viewer::host::ViewerHost;
use crate::viewer::state::Deferred;

pub struct ViewerRuntime<H: ViewerHost> {
    controller: ViewerController<H>,
    events: mpsc::UnboundedReceiver<UiEvent>,
    timers: Vec<(Instant, Deferred)>,
}

impl<H: ViewerHost> ViewerRuntime<H> {
    pub fn new(controller: ViewerController<H>) -> (Self, mpsc::UnboundedSender<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = Self {
            controller,
            events: rx,
            timers: Vec::new(),
        };
        (runtime, tx)
    }

    pub async fn run(mut self) -> ViewerController<H> {
        let mut accepting = true;

        loop {
            let now = Instant::now();
            for scheduled in self.controller.take_scheduled() {
                self.timers.push((now + scheduled.delay, scheduled.action));
            }

            // Earliest deadline; ties keep scheduling order.
            let next = self
                .timers
                .iter()
                .enumerate()
                .min_by_key(|(idx, (at, _))| (*at, *idx))
                .map(|(idx, (at, _))| (idx, *at));

            if !accepting && next.is_none() {
                break;
            }
            let deadline = next.map(|(_, at)| at).unwrap_or(now);

            tokio::select! {
                event = self.events.recv(), if accepting => match event {
                    Some(event) => self.controller.handle(event),
                    None => {
                        debug!(pending = self.timers.len(), "Event channel closed, draining timers");
                        accepting = false;
                    }
                },
                _ = sleep_until(deadline), if next.is_some() => {
                    if let Some((idx, _)) = next {
                        let (_, action) = self.timers.remove(idx);
                        self.controller.fire(action);
                    }
                }
            }
        }

        self.controller
    }
}
