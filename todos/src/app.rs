//! Application composition: the todo list and its view behind one store.
//!
//! [`AppReducer`] embeds the list reducer and the view reducer. The view's
//! add requests are routed to the list, so the only way an item enters the
//! list is a `TodoListAction::Add` reduced by the list reducer.

use crate::config::TodosConfig;
use crate::error::TodoError;
use crate::events::UiEvent;
use crate::reducer::{TodoEnvironment, TodoListReducer};
use crate::types::{FilterMode, TodoId, TodoItem, TodoListAction, TodoListState};
use crate::view_model::{TodosView, ViewAction, ViewReducer, ViewState};
use async_trait::async_trait;
use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use todos_runtime::{Store, StoreConfig};
use tokio::sync::broadcast;

/// Combined state: canonical list plus transient view state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// The todo list
    pub list: TodoListState,
    /// Filter and draft
    pub view: ViewState,
}

impl AppState {
    /// Empty list shown under `filter`
    #[must_use]
    pub const fn with_filter(filter: FilterMode) -> Self {
        Self {
            list: TodoListState::new(),
            view: ViewState::with_filter(filter),
        }
    }

    /// Derives the display data
    #[must_use]
    pub fn view_data(&self) -> TodosView {
        TodosView::derive(&self.list, &self.view)
    }
}

/// Actions for the whole application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// A request for the todo list
    List(TodoListAction),
    /// A change to the view state
    View(ViewAction),
}

/// Reducer combining the list and view reducers
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer {
    list: TodoListReducer,
    view: ViewReducer,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            list: TodoListReducer::new(),
            view: ViewReducer::new(),
        }
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // The error, if any, describes the action being reduced now
        state.list.last_error = None;

        match action {
            AppAction::View(ViewAction::AddRequested(request)) => {
                smallvec![Effect::dispatch(AppAction::List(request))]
            },
            AppAction::View(action) => self
                .view
                .reduce(&mut state.view, action, &())
                .into_iter()
                .map(|effect| effect.map(AppAction::View))
                .collect(),
            AppAction::List(action) => self
                .list
                .reduce(&mut state.list, action, env)
                .into_iter()
                .map(|effect| effect.map(AppAction::List))
                .collect(),
        }
    }
}

/// The store contract the view depends on
///
/// Unknown ids are ignored by `remove` and `toggle`.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Appends a new item
    ///
    /// # Errors
    ///
    /// [`TodoError::InvalidInput`] for an empty title, [`TodoError::Store`]
    /// if the store is shut down.
    async fn add(&self, title: String) -> Result<(), TodoError>;

    /// Deletes the item with `id`, if present
    ///
    /// # Errors
    ///
    /// [`TodoError::Store`] if the store is shut down.
    async fn remove(&self, id: TodoId) -> Result<(), TodoError>;

    /// Flips the done flag of the item with `id`, if present
    ///
    /// # Errors
    ///
    /// [`TodoError::Store`] if the store is shut down.
    async fn toggle(&self, id: TodoId) -> Result<(), TodoError>;

    /// Deletes every done item
    ///
    /// # Errors
    ///
    /// [`TodoError::Store`] if the store is shut down.
    async fn clear_completed(&self) -> Result<(), TodoError>;

    /// Snapshot of all items, in order
    async fn list(&self) -> Vec<TodoItem>;
}

type AppStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// The running application: one store holding list and view state
#[derive(Clone)]
pub struct TodoApp {
    store: AppStore,
}

impl TodoApp {
    /// Creates an app with an empty list and default store settings
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        Self::with_state(AppState::default(), env, StoreConfig::default())
    }

    /// Creates an app configured from `config`
    #[must_use]
    pub fn from_config(env: TodoEnvironment, config: &TodosConfig) -> Self {
        Self::with_state(
            AppState::with_filter(config.default_filter),
            env,
            config.store_config(),
        )
    }

    /// Creates an app starting from `state`
    #[must_use]
    pub fn with_state(state: AppState, env: TodoEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(state, AppReducer::new(), env, config),
        }
    }

    /// Applies a UI event
    ///
    /// Events with no mapped action (keys other than Enter) do nothing.
    /// A submitted draft is cleared even when the list rejects the item.
    ///
    /// # Errors
    ///
    /// - The list's rejection of the request the event led to, such as
    ///   [`TodoError::DuplicateId`] for a submitted draft
    /// - [`TodoError::Store`] if the store is shut down or the dispatch chain
    ///   overflows
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, event: UiEvent) -> Result<(), TodoError> {
        match event.into_action() {
            Some(action) => self.send_checked(action).await,
            None => Ok(()),
        }
    }

    /// Current display data
    pub async fn view(&self) -> TodosView {
        self.store.state(AppState::view_data).await
    }

    /// Snapshot of the whole state
    pub async fn snapshot(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Subscribe to every processed action, e.g. to trigger a re-render
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AppAction> {
        self.store.subscribe_actions()
    }

    /// Stop accepting events
    pub fn shutdown(&self) {
        self.store.shutdown();
    }

    async fn send_checked(&self, action: AppAction) -> Result<(), TodoError> {
        let rejected = self
            .store
            .send_and_read(action, |s| s.list.last_error.clone())
            .await?;
        rejected.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for TodoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoApp").finish_non_exhaustive()
    }
}

#[async_trait]
impl TodoStore for TodoApp {
    async fn add(&self, title: String) -> Result<(), TodoError> {
        self.send_checked(AppAction::List(TodoListAction::Add { title })).await
    }

    async fn remove(&self, id: TodoId) -> Result<(), TodoError> {
        self.send_checked(AppAction::List(TodoListAction::Remove { id })).await
    }

    async fn toggle(&self, id: TodoId) -> Result<(), TodoError> {
        self.send_checked(AppAction::List(TodoListAction::Toggle { id })).await
    }

    async fn clear_completed(&self) -> Result<(), TodoError> {
        self.send_checked(AppAction::List(TodoListAction::ClearCompleted)).await
    }

    async fn list(&self) -> Vec<TodoItem> {
        self.store.state(|s| s.list.items.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Key;
    use std::sync::Arc;
    use todos_core::environment::Clock;
    use todos_runtime::StoreError;
    use todos_testing::{assertions, test_clock, ReducerTest, SequentialIds};
    use uuid::Uuid;

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()))
    }

    fn id(n: u128) -> TodoId {
        TodoId::from_uuid(Uuid::from_u128(n))
    }

    fn titles(items: &[TodoItem]) -> Vec<&str> {
        items.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_request_is_routed_to_the_list() {
        let request = TodoListAction::Add {
            title: "Buy milk".to_string(),
        };

        ReducerTest::new(AppReducer::new())
            .with_env(create_test_env())
            .given_state(AppState::default())
            .when_action(AppAction::View(ViewAction::AddRequested(request.clone())))
            .then_state(|state| assert!(state.list.is_empty()))
            .then_effects(move |effects| {
                assertions::assert_dispatches(effects, &[AppAction::List(request)]);
            })
            .run();
    }

    #[test]
    fn view_effects_are_lifted() {
        ReducerTest::new(AppReducer::new())
            .with_env(create_test_env())
            .given_state(AppState::default())
            .when_action(AppAction::View(ViewAction::SetDraft("x".to_string())))
            .when_action(AppAction::View(ViewAction::SubmitDraft))
            .then_effects(|effects| {
                assertions::assert_dispatches(
                    effects,
                    &[AppAction::View(ViewAction::AddRequested(TodoListAction::Add {
                        title: "x".to_string(),
                    }))],
                );
            })
            .run();
    }

    #[tokio::test]
    async fn submit_adds_item_and_clears_draft() {
        let app = TodoApp::new(create_test_env());

        app.handle(UiEvent::DraftChanged("Buy milk".to_string())).await.unwrap();
        app.handle(UiEvent::KeyPressed(Key::Enter)).await.unwrap();

        let state = app.snapshot().await;
        assert_eq!(titles(&state.list.items), vec!["Buy milk"]);
        assert!(state.view.draft.is_empty());
    }

    #[tokio::test]
    async fn submit_button_and_enter_behave_the_same() {
        let app = TodoApp::new(create_test_env());

        app.handle(UiEvent::DraftChanged("one".to_string())).await.unwrap();
        app.handle(UiEvent::SubmitClicked).await.unwrap();
        app.handle(UiEvent::DraftChanged("two".to_string())).await.unwrap();
        app.handle(UiEvent::KeyPressed(Key::Enter)).await.unwrap();

        assert_eq!(titles(&app.list().await), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn submit_empty_draft_issues_no_add() {
        let app = TodoApp::new(create_test_env());
        let mut rx = app.subscribe();

        app.handle(UiEvent::KeyPressed(Key::Enter)).await.unwrap();
        app.handle(UiEvent::KeyPressed(Key::Enter)).await.unwrap();

        assert_eq!(app.snapshot().await, AppState::default());
        while let Ok(action) = rx.try_recv() {
            assert!(!matches!(action, AppAction::List(_)), "unexpected {action:?}");
        }
    }

    #[tokio::test]
    async fn other_keys_do_nothing() {
        let app = TodoApp::new(create_test_env());
        app.handle(UiEvent::DraftChanged("draft".to_string())).await.unwrap();
        app.handle(UiEvent::KeyPressed(Key::Char('a'))).await.unwrap();

        let state = app.snapshot().await;
        assert!(state.list.is_empty());
        assert_eq!(state.view.draft, "draft");
    }

    #[tokio::test]
    async fn store_contract_example() {
        let app = TodoApp::new(create_test_env());
        app.add("a".to_string()).await.unwrap();
        app.add("b".to_string()).await.unwrap();
        app.add("c".to_string()).await.unwrap();
        app.toggle(id(2)).await.unwrap();
        app.toggle(id(3)).await.unwrap();

        // Absent id: unchanged, no error
        let before = app.list().await;
        app.remove(id(99)).await.unwrap();
        assert_eq!(app.list().await, before);

        app.toggle(id(2)).await.unwrap();
        let items = app.list().await;
        assert_eq!(titles(&items), vec!["a", "b", "c"]);
        assert_eq!(
            items.iter().map(|t| t.done).collect::<Vec<_>>(),
            vec![false, false, true]
        );

        app.clear_completed().await.unwrap();
        assert_eq!(titles(&app.list().await), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn add_empty_title_is_invalid_input() {
        let app = TodoApp::new(create_test_env());

        let result = app.add(String::new()).await;
        assert!(matches!(result, Err(TodoError::InvalidInput(_))));
        assert!(app.list().await.is_empty());

        // A later valid add succeeds
        app.add("ok".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn submit_rejected_by_list_is_reported() {
        // The generator's first id is already taken
        let state = AppState {
            list: TodoListState::with_items(vec![TodoItem::new(
                id(1),
                "existing".to_string(),
                test_clock().now(),
            )]),
            view: ViewState::default(),
        };
        let app = TodoApp::with_state(state, create_test_env(), StoreConfig::default());

        app.handle(UiEvent::DraftChanged("dup".to_string())).await.unwrap();
        let result = app.handle(UiEvent::KeyPressed(Key::Enter)).await;

        assert_eq!(result, Err(TodoError::DuplicateId(id(1))));
        let state = app.snapshot().await;
        assert_eq!(titles(&state.list.items), vec!["existing"]);
        assert!(state.view.draft.is_empty());

        // The next event starts clean
        app.handle(UiEvent::DraftChanged("next".to_string())).await.unwrap();
        assert_eq!(app.snapshot().await.list.last_error, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_adds_each_get_their_own_result() {
        const ROUNDS: usize = 500;
        let app = TodoApp::new(create_test_env());

        let empty = {
            let app = app.clone();
            tokio::spawn(async move {
                let mut accepted = 0;
                for _ in 0..ROUNDS {
                    if app.add(String::new()).await.is_ok() {
                        accepted += 1;
                    }
                }
                accepted
            })
        };
        let valid = {
            let app = app.clone();
            tokio::spawn(async move {
                let mut rejected = 0;
                for _ in 0..ROUNDS {
                    if app.add("x".to_string()).await.is_err() {
                        rejected += 1;
                    }
                }
                rejected
            })
        };

        assert_eq!(empty.await.unwrap(), 0);
        assert_eq!(valid.await.unwrap(), 0);
        assert_eq!(app.list().await.len(), ROUNDS);
    }

    #[tokio::test]
    async fn view_reflects_filter_and_counts() {
        let app = TodoApp::new(create_test_env());
        app.add("a".to_string()).await.unwrap();
        app.add("b".to_string()).await.unwrap();
        app.handle(UiEvent::CheckClicked(id(1))).await.unwrap();
        app.handle(UiEvent::FilterClicked(FilterMode::Active)).await.unwrap();

        let view = app.view().await;
        assert_eq!(titles(&view.items), vec!["b"]);
        assert_eq!(view.done_count, 1);
        assert_eq!(view.undone_count, 1);
        assert!(view.show_clear_completed);

        app.handle(UiEvent::ClearCompletedClicked).await.unwrap();
        app.handle(UiEvent::RemoveClicked(id(2))).await.unwrap();
        assert!(app.list().await.is_empty());
    }

    #[tokio::test]
    async fn from_config_uses_default_filter() {
        let config = TodosConfig {
            default_filter: FilterMode::Completed,
            ..TodosConfig::default()
        };
        let app = TodoApp::from_config(create_test_env(), &config);

        assert_eq!(app.view().await.filter, FilterMode::Completed);
    }

    #[tokio::test]
    async fn shutdown_rejects_events() {
        let app = TodoApp::new(create_test_env());
        app.shutdown();

        let result = app.handle(UiEvent::ClearCompletedClicked).await;
        assert_eq!(result, Err(TodoError::Store(StoreError::ShutdownInProgress)));
        assert_eq!(
            app.add("late".to_string()).await,
            Err(TodoError::Store(StoreError::ShutdownInProgress))
        );
    }
}
