//! Localized labels for the todo list.
//!
//! Messages are looked up by id under the `todos.components.todos` prefix.
//! Templates may reference parameters as `{name}`; the undone counter uses
//! `{itemCount}`.

use crate::config::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Key prefix shared by every todo list message
pub const MESSAGE_PREFIX: &str = "todos.components.todos";

/// Labels the todo list displays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// "All" filter tab
    All,
    /// "Active" filter tab
    Active,
    /// "Completed" filter tab
    Completed,
    /// Clear-completed button
    ClearCompleted,
    /// Draft input placeholder
    Placeholder,
    /// Undone counter, takes `itemCount`
    Undone,
}

impl MessageId {
    /// Short id, as used in catalog keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::ClearCompleted => "clear_completed",
            Self::Placeholder => "placeholder",
            Self::Undone => "undone",
        }
    }

    /// Full catalog key
    #[must_use]
    pub fn key(self) -> String {
        format!("{MESSAGE_PREFIX}.{}", self.as_str())
    }
}

/// Catalog of message templates keyed by full message key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
    catalog: HashMap<String, String>,
}

impl Messages {
    /// Built-in English catalog
    #[must_use]
    pub fn english() -> Self {
        let catalog = [
            (MessageId::All, "All"),
            (MessageId::Active, "Active"),
            (MessageId::Completed, "Completed"),
            (MessageId::ClearCompleted, "Clear completed"),
            (MessageId::Placeholder, "What needs to be done?"),
            (MessageId::Undone, "{itemCount} items left"),
        ]
        .into_iter()
        .map(|(id, text)| (id.key(), text.to_string()))
        .collect();

        Self { catalog }
    }

    /// English catalog overlaid with the entries of a JSON object
    ///
    /// The JSON must be a flat object of message key to template.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Catalog`] if the text is not such an object.
    pub fn english_with_overrides(json: &str) -> Result<Self, ConfigError> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut messages = Self::english();
        messages.catalog.extend(overrides);
        Ok(messages)
    }

    /// English catalog overlaid with a JSON catalog file
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Catalog`] if it is not a flat JSON object of strings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded message catalog");
        Self::english_with_overrides(&json)
    }

    /// The template for `id`, or its key when the catalog lacks it
    #[must_use]
    pub fn text(&self, id: MessageId) -> String {
        let key = id.key();
        match self.catalog.get(&key) {
            Some(template) => template.clone(),
            None => {
                tracing::debug!(%key, "Missing message");
                key
            },
        }
    }

    /// The template for `id` with each `{name}` replaced by its value
    #[must_use]
    pub fn format(&self, id: MessageId, params: &[(&str, String)]) -> String {
        params.iter().fold(self.text(id), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }

    /// The undone counter for `count` items
    #[must_use]
    pub fn undone(&self, count: usize) -> String {
        self.format(MessageId::Undone, &[("itemCount", count.to_string())])
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}
