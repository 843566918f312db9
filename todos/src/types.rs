//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items that can be added, toggled,
//! removed one by one, or cleared of everything already done.

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Fresh ids come from the environment's `IdGenerator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, fixed at creation
    pub title: String,
    /// Whether the todo is done
    pub done: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, not yet done, todo item
    #[must_use]
    pub const fn new(id: TodoId, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at,
        }
    }

    /// Flips the done flag
    pub const fn toggle(&mut self) {
        self.done = !self.done;
    }
}

/// Display filter over the item collection
///
/// Parsing never fails: any key other than `"active"` or `"completed"`
/// selects [`FilterMode::All`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterMode {
    /// Every item
    #[default]
    All,
    /// Items not done yet
    Active,
    /// Items already done
    Completed,
}

impl FilterMode {
    /// All modes, in the order the filter tabs are shown
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Resolves a filter key, falling back to `All` for unknown keys
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "all" => Self::All,
            "active" => Self::Active,
            "completed" => Self::Completed,
            other => {
                tracing::debug!(key = other, "Unknown filter key, showing all items");
                Self::All
            },
        }
    }

    /// The key this mode is parsed from
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether an item is visible under this mode
    #[must_use]
    pub const fn admits(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.done,
            Self::Completed => item.done,
        }
    }
}

impl From<&str> for FilterMode {
    fn from(key: &str) -> Self {
        Self::from_key(key)
    }
}

impl From<String> for FilterMode {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.key().to_string()
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The canonical, ordered todo collection
///
/// Items keep insertion order; removals never reorder the remainder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    /// All todos, in insertion order
    pub items: Vec<TodoItem>,
    /// Error from the last rejected action (if any)
    pub last_error: Option<TodoError>,
}

impl TodoListState {
    /// Creates a new empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_error: None,
        }
    }

    /// Creates a list holding `items`, in the given order
    #[must_use]
    pub const fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            last_error: None,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Checks that a title may be added
    ///
    /// Only the empty string is rejected. Whitespace is content.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidInput`] for an empty title.
    pub fn validate_title(title: &str) -> Result<(), TodoError> {
        if title.is_empty() {
            return Err(TodoError::InvalidInput(
                "Todo title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Requests the todo list accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoListAction {
    /// Append a new item with a fresh id
    Add {
        /// Title of the new todo
        title: String,
    },

    /// Delete an item; unknown ids are ignored
    Remove {
        /// Todo to delete
        id: TodoId,
    },

    /// Flip an item's done flag; unknown ids are ignored
    Toggle {
        /// Todo to toggle
        id: TodoId,
    },

    /// Delete every done item
    ClearCompleted,
}
