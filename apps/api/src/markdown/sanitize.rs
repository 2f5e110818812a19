//! HTML sanitizers for rendered markdown.
//!
//! The variant is chosen once at startup by [`select_sanitizer`]; nothing
//! downstream checks which one it got.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::SafeHtml;

pub trait Sanitizer: Send + Sync {
    fn name(&self) -> &'static str;
    fn sanitize(&self, html: &str) -> SafeHtml;
}

/// Crude fallback: escapes `<`, `>`, `"` and `'` across the whole rendered
/// string. It does NOT strip tags. Markup produced by the markdown stage is
/// escaped along with everything else and shows up as literal text, so
/// output over-escapes rather than under-sanitizes. `&` is left alone.
pub struct EscapeOnlySanitizer;

impl Sanitizer for EscapeOnlySanitizer {
    fn name(&self) -> &'static str {
        "escape-only"
    }

    fn sanitize(&self, html: &str) -> SafeHtml {
        SafeHtml(escape_metacharacters(html))
    }
}

pub fn escape_metacharacters(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Allowlist sanitizer backed by `ammonia`: keeps formatting tags, drops
/// `<script>`/`<style>` with their content, event-handler attributes and
/// non-allowlisted URL schemes such as `javascript:`.
#[cfg(feature = "html-sanitizer")]
pub struct AllowlistSanitizer;

#[cfg(feature = "html-sanitizer")]
impl Sanitizer for AllowlistSanitizer {
    fn name(&self) -> &'static str {
        "allowlist"
    }

    fn sanitize(&self, html: &str) -> SafeHtml {
        SafeHtml(ammonia::clean(html))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizerPreference {
    /// Use the allowlist sanitizer when compiled in, else escape-only.
    #[default]
    Auto,
    EscapeOnly,
}

impl FromStr for SanitizerPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(SanitizerPreference::Auto),
            "escape" | "escape-only" => Ok(SanitizerPreference::EscapeOnly),
            other => Err(format!("unknown sanitizer '{other}' (expected auto or escape)")),
        }
    }
}

pub fn select_sanitizer(preference: SanitizerPreference) -> Arc<dyn Sanitizer> {
    match preference {
        SanitizerPreference::EscapeOnly => {
            info!("Markdown sanitizer forced to escape-only");
            Arc::new(EscapeOnlySanitizer)
        }
        SanitizerPreference::Auto => rich_or_fallback(),
    }
}

#[cfg(feature = "html-sanitizer")]
fn rich_or_fallback() -> Arc<dyn Sanitizer> {
    Arc::new(AllowlistSanitizer)
}

#[cfg(not(feature = "html-sanitizer"))]
fn rich_or_fallback() -> Arc<dyn Sanitizer> {
    tracing::warn!("html-sanitizer feature not compiled in; markdown output will be escape-only");
    Arc::new(EscapeOnlySanitizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownFormatter;

    const SCRIPT: &str = "<script>alert(1)</script>";

    #[test]
    fn test_escape_only_neutralizes_script() {
        let formatter = MarkdownFormatter::new(Arc::new(EscapeOnlySanitizer));
        let html = formatter.render(SCRIPT);
        assert!(!html.as_str().contains("<script"));
        assert!(html.as_str().contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escape_only_escapes_markdown_tags_too() {
        let formatter = MarkdownFormatter::new(Arc::new(EscapeOnlySanitizer));
        let html = formatter.render("**bold**");
        assert_eq!(html.as_str(), "&lt;p&gt;&lt;strong&gt;bold&lt;/strong&gt;&lt;/p&gt;\n");
    }

    #[test]
    fn test_escape_metacharacters_leaves_ampersand() {
        assert_eq!(
            escape_metacharacters(r#"a & "b" 'c'"#),
            "a & &quot;b&quot; &#039;c&#039;"
        );
    }

    #[test]
    fn test_preference_parsing() {
        assert_eq!("auto".parse(), Ok(SanitizerPreference::Auto));
        assert_eq!("ESCAPE".parse(), Ok(SanitizerPreference::EscapeOnly));
        assert!("dompurify".parse::<SanitizerPreference>().is_err());
    }

    #[test]
    fn test_forced_escape_only() {
        let sanitizer = select_sanitizer(SanitizerPreference::EscapeOnly);
        assert_eq!(sanitizer.name(), "escape-only");
    }

    #[cfg(feature = "html-sanitizer")]
    mod allowlist {
        use super::*;

        fn formatter() -> MarkdownFormatter {
            MarkdownFormatter::new(Arc::new(AllowlistSanitizer))
        }

        #[test]
        fn test_auto_prefers_allowlist() {
            assert_eq!(select_sanitizer(SanitizerPreference::Auto).name(), "allowlist");
        }

        #[test]
        fn test_script_removed_entirely() {
            let html = formatter().render(&format!("Hello\n\n{SCRIPT}"));
            assert!(!html.as_str().contains("<script"));
            assert!(!html.as_str().contains("alert(1)"));
            assert!(html.as_str().contains("Hello"));
        }

        #[test]
        fn test_event_handlers_and_javascript_urls_removed() {
            let html = formatter().render(
                "<img src=\"x.png\" onerror=\"alert(1)\"> [click](javascript:alert(1))",
            );
            assert!(!html.as_str().contains("onerror"));
            assert!(!html.as_str().contains("javascript:"));
        }

        #[test]
        fn test_formatting_tags_survive() {
            let html = formatter().render("## Lead\n- **Shipped** it\n- *fast*");
            assert!(html.as_str().contains("<h2>Lead</h2>"));
            assert!(html.as_str().contains("<strong>Shipped</strong>"));
            assert!(html.as_str().contains("<em>fast</em>"));
        }
    }
}
