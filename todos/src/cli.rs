//! Line-oriented terminal input.
//!
//! Each input line becomes zero or more [`UiEvent`]s. Plain text types the
//! draft and presses Enter; commands start with `:`. Item numbers refer to
//! the list as last rendered.

use crate::events::{Key, UiEvent};
use crate::types::{FilterMode, TodoItem};
use thiserror::Error;

/// Help text for the terminal front end
pub const HELP: &str = "\
commands:
  <text>            type <text> and press Enter (adds an item)
  <empty line>      press Enter on the current draft
  :draft <text>     type <text> without submitting
  :all :active :completed
  :filter <key>     select a filter (unknown keys show all)
  :toggle N         check/uncheck item N
  :rm N             remove item N
  :clear            clear completed items
  :help             show this help
  :quit             exit";

/// Input that could not be turned into events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// The command is not known
    #[error("Unknown command: {0} (try :help)")]
    UnknownCommand(String),

    /// The command needs an item number
    #[error("{0} needs an item number")]
    MissingIndex(&'static str),

    /// No visible item has this number
    #[error("No item numbered {0}")]
    NoSuchItem(String),
}

/// What an input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Apply these events in order
    Events(Vec<UiEvent>),
    /// Print the help text
    Help,
    /// Leave the program
    Quit,
}

/// Parse one input line against the currently visible items
///
/// Only the line terminator is stripped; surrounding whitespace is part of
/// the typed text.
///
/// # Errors
///
/// [`CliError`] for unknown commands or item numbers that are not visible.
pub fn parse_line(line: &str, visible: &[TodoItem]) -> Result<Input, CliError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        let mut events = Vec::with_capacity(2);
        if !line.is_empty() {
            events.push(UiEvent::DraftChanged(line.to_string()));
        }
        events.push(UiEvent::KeyPressed(Key::Enter));
        return Ok(Input::Events(events));
    };

    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, Some(arg)),
        None => (command, None),
    };

    let event = match name {
        "q" | "quit" => return Ok(Input::Quit),
        "h" | "help" => return Ok(Input::Help),
        "draft" => UiEvent::DraftChanged(arg.unwrap_or_default().to_string()),
        "all" | "active" | "completed" => UiEvent::FilterClicked(FilterMode::from_key(name)),
        "filter" => UiEvent::FilterClicked(FilterMode::from_key(arg.unwrap_or_default().trim())),
        "toggle" => UiEvent::CheckClicked(lookup("toggle", arg, visible)?.id),
        "rm" => UiEvent::RemoveClicked(lookup("rm", arg, visible)?.id),
        "clear" => UiEvent::ClearCompletedClicked,
        other => return Err(CliError::UnknownCommand(format!(":{other}"))),
    };

    Ok(Input::Events(vec![event]))
}

fn lookup<'a>(
    command: &'static str,
    arg: Option<&str>,
    visible: &'a [TodoItem],
) -> Result<&'a TodoItem, CliError> {
    let arg = arg.map(str::trim).filter(|a| !a.is_empty());
    let Some(arg) = arg else {
        return Err(CliError::MissingIndex(command));
    };

    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| visible.get(index))
        .ok_or_else(|| CliError::NoSuchItem(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;
    use chrono::Utc;
    use uuid::Uuid;

    fn visible() -> Vec<TodoItem> {
        vec![
            TodoItem::new(TodoId::from_uuid(Uuid::from_u128(1)), "a".to_string(), Utc::now()),
            TodoItem::new(TodoId::from_uuid(Uuid::from_u128(2)), "b".to_string(), Utc::now()),
        ]
    }

    #[test]
    fn text_types_and_submits() {
        assert_eq!(
            parse_line("Buy milk\n", &[]),
            Ok(Input::Events(vec![
                UiEvent::DraftChanged("Buy milk".to_string()),
                UiEvent::KeyPressed(Key::Enter),
            ]))
        );
    }

    #[test]
    fn whitespace_is_kept() {
        assert_eq!(
            parse_line("   \r\n", &[]),
            Ok(Input::Events(vec![
                UiEvent::DraftChanged("   ".to_string()),
                UiEvent::KeyPressed(Key::Enter),
            ]))
        );
    }

    #[test]
    fn empty_line_only_presses_enter() {
        assert_eq!(
            parse_line("\n", &[]),
            Ok(Input::Events(vec![UiEvent::KeyPressed(Key::Enter)]))
        );
    }

    #[test]
    fn filters() {
        assert_eq!(
            parse_line(":active", &[]),
            Ok(Input::Events(vec![UiEvent::FilterClicked(FilterMode::Active)]))
        );
        assert_eq!(
            parse_line(":filter nonsense", &[]),
            Ok(Input::Events(vec![UiEvent::FilterClicked(FilterMode::All)]))
        );
    }

    #[test]
    fn item_numbers_resolve_to_visible_ids() {
        let items = visible();
        assert_eq!(
            parse_line(":toggle 2", &items),
            Ok(Input::Events(vec![UiEvent::CheckClicked(items[1].id)]))
        );
        assert_eq!(
            parse_line(":rm 1", &items),
            Ok(Input::Events(vec![UiEvent::RemoveClicked(items[0].id)]))
        );
    }

    #[test]
    fn bad_item_numbers() {
        let items = visible();
        assert_eq!(
            parse_line(":toggle 3", &items),
            Err(CliError::NoSuchItem("3".to_string()))
        );
        assert_eq!(
            parse_line(":rm 0", &items),
            Err(CliError::NoSuchItem("0".to_string()))
        );
        assert_eq!(parse_line(":rm", &items), Err(CliError::MissingIndex("rm")));
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_line(":quit", &[]), Ok(Input::Quit));
        assert_eq!(parse_line(":help", &[]), Ok(Input::Help));
        assert_eq!(
            parse_line(":clear", &[]),
            Ok(Input::Events(vec![UiEvent::ClearCompletedClicked]))
        );
        assert_eq!(
            parse_line(":draft half done", &[]),
            Ok(Input::Events(vec![UiEvent::DraftChanged("half done".to_string())]))
        );
        assert_eq!(
            parse_line(":frobnicate", &[]),
            Err(CliError::UnknownCommand(":frobnicate".to_string()))
        );
    }
}
