use std::time::Duration;

use crate::models::RecordId;

/// Visibility phase of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
    /// Fading out; becomes `Closed` when the close delay elapses.
    Closing,
}

/// Work the controller defers to a timer.
///
/// Reveal and settle carry the generation they were scheduled in. Any later
/// transition bumps the generation, which turns them into no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    Reveal { generation: u64 },
    SettleClose { generation: u64 },
    Print { ticket: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub action: Deferred,
}

/// The single mutable viewer state of a page session.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub phase: Phase,
    /// Id of the last mounted request; left in place on close.
    pub current_record: Option<RecordId>,
    pub generation: u64,
    /// Open request that arrived while closing; applied once the close settles.
    pub queued_open: Option<RecordId>,
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Starts a new transition and returns its generation.
    pub fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
