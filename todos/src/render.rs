//! Plain-text rendering of [`TodosView`].

use crate::i18n::{MessageId, Messages};
use crate::types::FilterMode;
use crate::view_model::TodosView;

const fn tab_label(mode: FilterMode) -> MessageId {
    match mode {
        FilterMode::All => MessageId::All,
        FilterMode::Active => MessageId::Active,
        FilterMode::Completed => MessageId::Completed,
    }
}

/// Renders the list as text
///
/// Items are numbered from 1 in display order; the numbers are how the
/// terminal front end addresses them.
#[must_use]
pub fn render(view: &TodosView, messages: &Messages) -> String {
    let mut out = String::new();

    if view.draft.is_empty() {
        out.push_str(&format!("> ({})\n", messages.text(MessageId::Placeholder)));
    } else {
        out.push_str(&format!("> {}\n", view.draft));
    }

    for (index, item) in view.items.iter().enumerate() {
        let check = if item.done { 'x' } else { ' ' };
        out.push_str(&format!("{:>3}. [{check}] {}\n", index + 1, item.title));
    }

    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|tab| {
            let label = messages.text(tab_label(tab.mode));
            if tab.active { format!("[{label}]") } else { label }
        })
        .collect();

    out.push_str(&messages.undone(view.undone_count));
    out.push_str("   ");
    out.push_str(&tabs.join(" "));
    if view.show_clear_completed {
        out.push_str("   ");
        out.push_str(&messages.text(MessageId::ClearCompleted));
    }
    out.push('\n');

    out
}
