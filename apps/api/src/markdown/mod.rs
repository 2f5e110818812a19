//! Markdown formatter: turns the toolbar's markdown subset into sanitized HTML.
//!
//! Two independent stages: `pulldown-cmark` parses and emits HTML, then a
//! [`Sanitizer`] decides what of that HTML may be trusted. Only the sanitizer
//! can mint a [`SafeHtml`], so templates cannot insert unsanitized markup.
//!
//! Supported subset: `**bold**`, `*italic*`, `## h2`, `### h3`, `- ` and `1. `
//! list lines. A single newline is a line break, not a new paragraph.

pub mod sanitize;

use std::sync::Arc;

use pulldown_cmark::{html, Event, Options, Parser};
use serde::Serialize;

pub use sanitize::{select_sanitizer, Sanitizer, SanitizerPreference};

/// HTML that has passed through a [`Sanitizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders markdown-bearing fields. Cheap to clone; the sanitizer is shared.
#[derive(Clone)]
pub struct MarkdownFormatter {
    sanitizer: Arc<dyn Sanitizer>,
}

impl MarkdownFormatter {
    pub fn new(sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { sanitizer }
    }

    pub fn sanitizer_name(&self) -> &'static str {
        self.sanitizer.name()
    }

    /// Never fails: empty input gives empty output, malformed markdown comes
    /// back as literal text.
    pub fn render(&self, source: &str) -> SafeHtml {
        if source.is_empty() {
            return SafeHtml::default();
        }
        let html = markdown_to_html(source);
        self.sanitizer.sanitize(&html)
    }
}

/// Unsanitized markdown → HTML conversion with soft breaks promoted to `<br />`.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
