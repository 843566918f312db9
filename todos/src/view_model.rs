//! View-model for the todo list.
//!
//! Pure derivations (`filter`, `count_by`, [`TodosView::derive`]) turn the
//! canonical list into display data. [`ViewState`] holds the transient UI
//! state, the filter mode and the draft of the next item, which is never
//! persisted.
//!
//! Derivations are recomputed on every render; nothing here is cached.

use crate::types::{FilterMode, TodoItem, TodoListAction, TodoListState};
use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Items visible under `mode`, in their original order
#[must_use]
pub fn filter(mode: FilterMode, items: &[TodoItem]) -> Vec<&TodoItem> {
    items.iter().filter(|item| mode.admits(item)).collect()
}

/// Number of items whose done flag equals `done`
#[must_use]
pub fn count_by(done: bool, items: &[TodoItem]) -> usize {
    items.iter().filter(|item| item.done == done).count()
}

/// Transient UI state: the selected filter and the new-item draft
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Filter applied to the visible list
    pub filter: FilterMode,
    /// Text typed for the next item, not yet submitted
    pub draft: String,
}

impl ViewState {
    /// Creates a view state showing `filter` with an empty draft
    #[must_use]
    pub const fn with_filter(filter: FilterMode) -> Self {
        Self {
            filter,
            draft: String::new(),
        }
    }

    /// Replaces the filter mode
    pub const fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Replaces the draft, empty text included
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Turns a non-empty draft into an add request and empties the draft
    ///
    /// Returns `None` and leaves the state alone when the draft is empty.
    /// The draft is not trimmed.
    pub fn submit_draft(&mut self) -> Option<TodoListAction> {
        if self.draft.is_empty() {
            return None;
        }
        Some(TodoListAction::Add {
            title: std::mem::take(&mut self.draft),
        })
    }
}

/// Actions that drive [`ViewState`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// Select a filter tab
    SetFilter(FilterMode),
    /// The draft input changed
    SetDraft(String),
    /// Submit the draft as a new item
    SubmitDraft,
    /// Outgoing: the view asks the list to add an item
    ///
    /// Emitted by `SubmitDraft`; the parent reducer routes it to the list.
    AddRequested(TodoListAction),
}

/// Reducer for the transient view state
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewReducer;

impl ViewReducer {
    /// Creates a new `ViewReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ViewReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ViewAction::SetFilter(mode) => state.set_filter_mode(mode),
            ViewAction::SetDraft(text) => state.set_draft_text(text),
            ViewAction::SubmitDraft => {
                if let Some(request) = state.submit_draft() {
                    return smallvec![Effect::dispatch(ViewAction::AddRequested(request))];
                }
                tracing::trace!("Submit ignored: draft is empty");
            },
            // Handled by the parent
            ViewAction::AddRequested(_) => {},
        }

        smallvec![Effect::None]
    }
}

/// One filter tab in the footer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterTab {
    /// Mode the tab selects
    pub mode: FilterMode,
    /// Whether the tab is the current filter
    pub active: bool,
}

/// Everything a renderer needs to draw the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodosView {
    /// Items shown under the current filter
    pub items: Vec<TodoItem>,
    /// Items done, across the whole list
    pub done_count: usize,
    /// Items not done, across the whole list
    pub undone_count: usize,
    /// Current filter
    pub filter: FilterMode,
    /// Current draft
    pub draft: String,
    /// Filter tabs, in display order
    pub tabs: [FilterTab; 3],
    /// Whether the clear-completed button is shown
    pub show_clear_completed: bool,
}

impl TodosView {
    /// Derives the display data from the list and the view state
    #[must_use]
    pub fn derive(list: &TodoListState, view: &ViewState) -> Self {
        let done_count = count_by(true, &list.items);
        let undone_count = count_by(false, &list.items);

        Self {
            items: filter(view.filter, &list.items).into_iter().cloned().collect(),
            done_count,
            undone_count,
            filter: view.filter,
            draft: view.draft.clone(),
            tabs: FilterMode::ALL.map(|mode| FilterTab {
                mode,
                active: mode == view.filter,
            }),
            show_clear_completed: done_count > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;
    use todos_testing::{assertions, test_clock, ReducerTest};
    use todos_core::environment::Clock;
    use uuid::Uuid;

    fn item(n: u128, title: &str, done: bool) -> TodoItem {
        let mut item = TodoItem::new(
            TodoId::from_uuid(Uuid::from_u128(n)),
            title.to_string(),
            test_clock().now(),
        );
        item.done = done;
        item
    }

    fn sample() -> Vec<TodoItem> {
        vec![item(1, "a", false), item(2, "b", true), item(3, "c", true)]
    }

    #[test]
    fn filter_completed_keeps_done_items_in_order() {
        let items = sample();
        let titles: Vec<_> = filter(FilterMode::Completed, &items)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn filter_active_keeps_undone_items() {
        let items = sample();
        let visible = filter(FilterMode::Active, &items);
        assert_eq!(visible, vec![&items[0]]);
    }

    #[test]
    fn filter_all_is_identity() {
        let items = sample();
        let visible: Vec<TodoItem> = filter(FilterMode::All, &items).into_iter().cloned().collect();
        assert_eq!(visible, items);
    }

    #[test]
    fn filter_unknown_key_shows_everything() {
        let items = sample();
        assert_eq!(filter(FilterMode::from_key("someday"), &items).len(), 3);
    }

    #[test]
    fn count_by_sample() {
        let items = sample();
        assert_eq!(count_by(true, &items), 2);
        assert_eq!(count_by(false, &items), 1);
    }

    #[test]
    fn count_by_empty_is_zero() {
        assert_eq!(count_by(true, &[]), 0);
        assert_eq!(count_by(false, &[]), 0);
    }

    #[test]
    fn count_by_no_match_is_zero() {
        let items = vec![item(1, "a", false)];
        assert_eq!(count_by(true, &items), 0);
    }

    #[test]
    fn submit_draft_returns_request_and_clears() {
        let mut view = ViewState::default();
        view.set_draft_text("Buy milk");

        assert_eq!(
            view.submit_draft(),
            Some(TodoListAction::Add {
                title: "Buy milk".to_string()
            })
        );
        assert!(view.draft.is_empty());
    }

    #[test]
    fn submit_empty_draft_is_noop_and_reentrant() {
        let mut view = ViewState::with_filter(FilterMode::Active);

        assert_eq!(view.submit_draft(), None);
        assert_eq!(view.submit_draft(), None);
        assert_eq!(view, ViewState::with_filter(FilterMode::Active));
    }

    #[test]
    fn submit_whitespace_draft_is_not_trimmed() {
        let mut view = ViewState::default();
        view.set_draft_text("  ");

        assert_eq!(
            view.submit_draft(),
            Some(TodoListAction::Add {
                title: "  ".to_string()
            })
        );
    }

    #[test]
    fn filter_and_draft_are_independent() {
        let mut view = ViewState::default();
        view.set_draft_text("half typed");
        view.set_filter_mode(FilterMode::Completed);

        assert_eq!(view.draft, "half typed");
        view.set_draft_text("");
        assert_eq!(view.filter, FilterMode::Completed);
    }

    #[test]
    fn reducer_submit_dispatches_add_request() {
        ReducerTest::new(ViewReducer::new())
            .with_env(())
            .given_state(ViewState::default())
            .when_action(ViewAction::SetDraft("Walk dog".to_string()))
            .when_action(ViewAction::SubmitDraft)
            .then_state(|state| assert!(state.draft.is_empty()))
            .then_effects(|effects| {
                assertions::assert_dispatches(
                    effects,
                    &[ViewAction::AddRequested(TodoListAction::Add {
                        title: "Walk dog".to_string(),
                    })],
                );
            })
            .run();
    }

    #[test]
    fn reducer_submit_empty_draft_has_no_effects() {
        ReducerTest::new(ViewReducer::new())
            .with_env(())
            .given_state(ViewState::default())
            .when_action(ViewAction::SubmitDraft)
            .then_state(|state| assert_eq!(*state, ViewState::default()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn reducer_set_filter() {
        ReducerTest::new(ViewReducer::new())
            .with_env(())
            .given_state(ViewState::default())
            .when_action(ViewAction::SetFilter(FilterMode::Completed))
            .then_state(|state| assert_eq!(state.filter, FilterMode::Completed))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn derive_view_counts_whole_list_but_shows_filtered() {
        let list = TodoListState::with_items(sample());
        let view = TodosView::derive(&list, &ViewState::with_filter(FilterMode::Active));

        assert_eq!(view.items, vec![item(1, "a", false)]);
        assert_eq!(view.done_count, 2);
        assert_eq!(view.undone_count, 1);
        assert!(view.show_clear_completed);
    }

    #[test]
    fn derive_view_marks_exactly_one_tab() {
        let list = TodoListState::with_items(sample());
        for mode in FilterMode::ALL {
            let view = TodosView::derive(&list, &ViewState::with_filter(mode));
            let active: Vec<_> = view.tabs.iter().filter(|t| t.active).map(|t| t.mode).collect();
            assert_eq!(active, vec![mode]);
        }
    }

    #[test]
    fn derive_view_hides_clear_button_when_nothing_done() {
        let list = TodoListState::with_items(vec![item(1, "a", false)]);
        let view = TodosView::derive(&list, &ViewState::default());
        assert!(!view.show_clear_completed);
    }
}
