//! Formatting toolbar: inserts markdown markers around a text selection.
//!
//! Positions are character offsets, matching a textarea's selection model.
//! No attempt is made to detect nested or conflicting markers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatCommand {
    Bold,
    Italic,
    #[serde(alias = "h2")]
    Heading2,
    #[serde(alias = "h3")]
    Heading3,
    #[serde(alias = "ul")]
    UnorderedListItem,
    #[serde(alias = "ol")]
    OrderedListItem,
}

impl FormatCommand {
    /// Opening and closing markers. Line-level commands start with a newline
    /// so they always open a fresh line.
    fn markers(self) -> (&'static str, &'static str) {
        match self {
            FormatCommand::Bold => ("**", "**"),
            FormatCommand::Italic => ("*", "*"),
            FormatCommand::Heading2 => ("\n## ", ""),
            FormatCommand::Heading3 => ("\n### ", ""),
            FormatCommand::UnorderedListItem => ("\n- ", ""),
            FormatCommand::OrderedListItem => ("\n1. ", ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResult {
    pub text: String,
    pub cursor: usize,
}

/// Wraps or prefixes `text[selection_start..selection_end]` and returns the new
/// text with the cursor placed right after the inserted content.
///
/// Out-of-range offsets are clamped to the text length; a reversed selection
/// is normalized.
pub fn apply_format(
    command: FormatCommand,
    text: &str,
    selection_start: usize,
    selection_end: usize,
) -> FormatResult {
    let len = text.chars().count();
    let (start, end) = {
        let a = selection_start.min(len);
        let b = selection_end.min(len);
        (a.min(b), a.max(b))
    };

    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    let (open, close) = command.markers();

    let mut formatted = String::with_capacity(text.len() + open.len() + close.len());
    formatted.push_str(&text[..start_byte]);
    formatted.push_str(open);
    formatted.push_str(&text[start_byte..end_byte]);
    formatted.push_str(close);
    formatted.push_str(&text[end_byte..]);

    FormatResult {
        text: formatted,
        cursor: end + open.chars().count() + close.chars().count(),
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
