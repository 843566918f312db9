//! A filterable todo list driven by a reducer store.
//!
//! The list is the single source of truth. The view keeps only a filter and
//! a draft, derives everything it shows from the list, and asks the list to
//! add items through a delegated action. It demonstrates:
//!
//! - Ordered list state with add, remove, toggle and clear-completed
//! - A view-model with fail-open filter parsing
//! - Composing two reducers behind one [`TodoApp`] store
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use todos::{FilterMode, Key, TodoApp, TodoEnvironment, TodoStore, UiEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = TodoApp::new(TodoEnvironment::production());
//!
//! // Type a title and press Enter
//! app.handle(UiEvent::DraftChanged("Buy milk".to_string())).await?;
//! app.handle(UiEvent::KeyPressed(Key::Enter)).await?;
//!
//! // Or go through the store contract directly
//! app.add("Walk dog".to_string()).await?;
//!
//! // Check the first item and show only what is left
//! let first = app.list().await[0].id;
//! app.toggle(first).await?;
//! app.handle(UiEvent::FilterClicked(FilterMode::Active)).await?;
//!
//! let view = app.view().await;
//! println!("{} of {} left", view.undone_count, view.done_count + view.undone_count);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod i18n;
pub mod reducer;
pub mod render;
pub mod types;
pub mod view_model;

// Re-export commonly used types
pub use app::{AppAction, AppReducer, AppState, TodoApp, TodoStore};
pub use config::{ConfigError, TodosConfig};
pub use error::TodoError;
pub use events::{Key, UiEvent};
pub use i18n::{MessageId, Messages};
pub use reducer::{TodoEnvironment, TodoListReducer};
pub use types::{FilterMode, TodoId, TodoItem, TodoListAction, TodoListState};
pub use view_model::{count_by, filter, TodosView, ViewAction, ViewReducer, ViewState};
