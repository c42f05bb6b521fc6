//! UI events and their translation into viewer actions.
//!
//! Clicks bubble from the innermost listener outwards, as on the page. A
//! listener may stop propagation, which is how a click on a card's view
//! control opens the record once instead of twice.

use crate::models::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The "view" control nested inside a member card.
    ViewControl(RecordId),
    /// Anywhere else on a member card.
    Card(RecordId),
    CloseControl,
    /// The modal overlay itself, outside the content panel.
    Backdrop,
    /// Inside the content panel.
    Panel,
    PrintControl,
    DownloadControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(ClickTarget),
    KeyDown(Key),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(RecordId),
    Close,
    Print,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Listener {
    ViewControl(RecordId),
    Card(RecordId),
    Close,
    Print,
    Download,
    /// Modal-level listener; closes only when the click landed on the overlay itself.
    Overlay { on_backdrop: bool },
}

impl Listener {
    fn respond(&self) -> (Option<Action>, Propagation) {
        match self {
            Listener::ViewControl(id) => (Some(Action::Open(id.clone())), Propagation::Stop),
            Listener::Card(id) => (Some(Action::Open(id.clone())), Propagation::Continue),
            Listener::Close => (Some(Action::Close), Propagation::Continue),
            Listener::Print => (Some(Action::Print), Propagation::Continue),
            Listener::Download => (Some(Action::Download), Propagation::Continue),
            Listener::Overlay { on_backdrop: true } => (Some(Action::Close), Propagation::Continue),
            Listener::Overlay { on_backdrop: false } => (None, Propagation::Continue),
        }
    }
}

/// Listeners a click on `target` reaches, innermost first.
fn bubble_path(target: &ClickTarget) -> Vec<Listener> {
    let inside_modal = Listener::Overlay { on_backdrop: false };
    match target {
        ClickTarget::ViewControl(id) => {
            vec![Listener::ViewControl(id.clone()), Listener::Card(id.clone())]
        }
        ClickTarget::Card(id) => vec![Listener::Card(id.clone())],
        ClickTarget::CloseControl => vec![Listener::Close, inside_modal],
        ClickTarget::Backdrop => vec![Listener::Overlay { on_backdrop: true }],
        ClickTarget::Panel => vec![inside_modal],
        ClickTarget::PrintControl => vec![Listener::Print, inside_modal],
        ClickTarget::DownloadControl => vec![Listener::Download, inside_modal],
    }
}

/// Resolves an event into the actions it triggers, in order.
///
/// `Escape` only maps to `Close` while the viewer is shown (open or closing).
pub fn resolve(event: &UiEvent, viewer_shown: bool) -> Vec<Action> {
    match event {
        UiEvent::Click(target) => {
            let mut actions = Vec::new();
            for listener in bubble_path(target) {
                let (action, propagation) = listener.respond();
                actions.extend(action);
                if propagation == Propagation::Stop {
                    break;
                }
            }
            actions
        }
        UiEvent::KeyDown(Key::Escape) if viewer_shown => vec![Action::Close],
        UiEvent::KeyDown(_) => Vec::new(),
    }
}
