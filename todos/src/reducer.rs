//! Reducer logic for the todo list.
//!
//! The list is the store's canonical collection. Requests are applied in
//! place; requests naming an id that is no longer present are ignored so that
//! a stale view can never fail an interaction.

use crate::error::TodoError;
use crate::types::{TodoId, TodoItem, TodoListAction, TodoListState};
use std::sync::Arc;
use todos_core::{
    effect::Effect,
    environment::{Clock, IdGenerator, RandomIds, SystemClock},
    reducer::Reducer,
    smallvec, SmallVec,
};

/// Environment dependencies for the todo list reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh item ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random v4 ids
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIds))
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add(state: &mut TodoListState, title: String, env: &TodoEnvironment) -> Result<(), TodoError> {
        TodoListState::validate_title(&title)?;

        let id = TodoId::from_uuid(env.ids.next_id());
        if state.contains(&id) {
            return Err(TodoError::DuplicateId(id));
        }

        tracing::debug!(%id, "Todo added");
        state.items.push(TodoItem::new(id, title, env.clock.now()));
        Ok(())
    }

    fn remove(state: &mut TodoListState, id: TodoId) {
        if let Some(index) = state.items.iter().position(|item| item.id == id) {
            // Vec::remove shifts, keeping the remainder in order
            state.items.remove(index);
            tracing::debug!(%id, "Todo removed");
        } else {
            tracing::debug!(%id, "Remove ignored: todo not found");
        }
    }

    fn toggle(state: &mut TodoListState, id: TodoId) {
        if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
            item.toggle();
            tracing::debug!(%id, done = item.done, "Todo toggled");
        } else {
            tracing::debug!(%id, "Toggle ignored: todo not found");
        }
    }

    fn clear_completed(state: &mut TodoListState) {
        let before = state.items.len();
        state.items.retain(|item| !item.done);
        tracing::debug!(cleared = before - state.items.len(), "Completed todos cleared");
    }
}

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoListAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoListAction::Add { title } => match Self::add(state, title, env) {
                Ok(()) => state.last_error = None,
                Err(error) => {
                    tracing::warn!(%error, "Add rejected");
                    state.last_error = Some(error);
                },
            },
            TodoListAction::Remove { id } => {
                Self::remove(state, id);
                state.last_error = None;
            },
            TodoListAction::Toggle { id } => {
                Self::toggle(state, id);
                state.last_error = None;
            },
            TodoListAction::ClearCompleted => {
                Self::clear_completed(state);
                state.last_error = None;
            },
        }

        smallvec![Effect::None]
    }
}
