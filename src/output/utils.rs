//! Shared helpers for the report formatters

use serde_json::Value;

use crate::object_diff::Change;

/// Render a JSON value on one line, cut to `max_width` characters if given.
pub fn compact_value(value: &Value, max_width: Option<usize>) -> String {
    let text = value.to_string();
    match max_width {
        Some(max) if text.chars().count() > max => {
            let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
            cut.push('…');
            cut
        }
        _ => text,
    }
}

/// Symbol shown in front of a classified change.
pub fn change_symbol(change: &Change) -> char {
    match change {
        Change::Added { .. } => '+',
        Change::Removed { .. } => '-',
        Change::Modified { .. } => '~',
        Change::Unchanged { .. } => '=',
    }
}

/// One-line description of a change, e.g. `2 -> 3` or `4`.
pub fn describe_change(change: &Change, max_width: Option<usize>) -> String {
    match change {
        Change::Modified { value_1, value_2 } => format!(
            "{} -> {}",
            compact_value(value_1, max_width),
            compact_value(value_2, max_width)
        ),
        Change::Added { value } | Change::Removed { value } | Change::Unchanged { value } => {
            compact_value(value, max_width)
        }
    }
}

/// Pluralize a count, e.g. `1 file` / `2 files`.
pub fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}
