//! UI events and their mapping to application actions.
//!
//! The rendering layer reports what the user did; this module decides which
//! action, if any, that becomes. Both the activation key and the submit
//! button funnel into the same `SubmitDraft` action.

use crate::app::AppAction;
use crate::types::{FilterMode, TodoId, TodoListAction};
use crate::view_model::ViewAction;

/// A key pressed while the draft input has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The activation key
    Enter,
    /// Escape
    Escape,
    /// A printable character
    Char(char),
}

/// Something the user did in the todo list UI
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// The draft input now holds this text
    DraftChanged(String),
    /// A key was pressed in the draft input
    KeyPressed(Key),
    /// An explicit submit control was activated
    SubmitClicked,
    /// A filter tab was clicked
    FilterClicked(FilterMode),
    /// An item's check button was clicked
    CheckClicked(TodoId),
    /// An item's remove button was clicked
    RemoveClicked(TodoId),
    /// The clear-completed button was clicked
    ClearCompletedClicked,
}

impl UiEvent {
    /// The action this event maps to, if any
    #[must_use]
    pub fn into_action(self) -> Option<AppAction> {
        let action = match self {
            Self::DraftChanged(text) => AppAction::View(ViewAction::SetDraft(text)),
            Self::KeyPressed(Key::Enter) | Self::SubmitClicked => {
                AppAction::View(ViewAction::SubmitDraft)
            },
            Self::KeyPressed(Key::Escape | Key::Char(_)) => return None,
            Self::FilterClicked(mode) => AppAction::View(ViewAction::SetFilter(mode)),
            Self::CheckClicked(id) => AppAction::List(TodoListAction::Toggle { id }),
            Self::RemoveClicked(id) => AppAction::List(TodoListAction::Remove { id }),
            Self::ClearCompletedClicked => AppAction::List(TodoListAction::ClearCompleted),
        };
        Some(action)
    }
}
