//! Template renderers: pure functions from a [`ResumeDocument`] to a
//! [`VisualDocument`].
//!
//! All three layouts read the same data and differ only in ordering and
//! typography. Sections without content are left out entirely. Free text goes
//! through the [`MarkdownFormatter`]; nothing here interprets markdown itself.

pub mod classic;
pub mod handlers;
pub mod minimal;
pub mod modern;
mod parts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::markdown::{MarkdownFormatter, SafeHtml};
use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl Template {
    #[cfg(test)]
    pub const ALL: [Template; 3] = [Template::Modern, Template::Classic, Template::Minimal];

    pub fn as_str(self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Minimal => "minimal",
        }
    }

    fn stylesheet(self) -> &'static str {
        match self {
            Template::Modern => modern::STYLESHEET,
            Template::Classic => classic::STYLESHEET,
            Template::Minimal => minimal::STYLESHEET,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Template::Modern),
            "classic" => Ok(Template::Classic),
            "minimal" => Ok(Template::Minimal),
            other => Err(format!("unknown template '{other}'")),
        }
    }
}

/// Renders `document` with `template`.
pub fn render(
    document: &ResumeDocument,
    template: Template,
    markdown: &MarkdownFormatter,
) -> VisualDocument {
    let root = match template {
        Template::Modern => modern::render(document, markdown),
        Template::Classic => classic::render(document, markdown),
        Template::Minimal => minimal::render(document, markdown),
    };
    VisualDocument { template, root }
}

// ────────────────────────────────────────────────────────────────────────────
// Visual tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Plain text; escaped on output.
    Text(String),
    /// Sanitized markup from the markdown formatter; written verbatim.
    Markup(SafeHtml),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<SafeHtml> for Node {
    fn from(html: SafeHtml) -> Self {
        Node::Markup(html)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub class: &'static str,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class,
            children: Vec::new(),
        }
    }

    pub fn with(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Concatenated text of this subtree; markup contributes its raw source.
    #[cfg(test)]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    #[cfg(test)]
    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(el) => el.collect_text(out),
                Node::Text(text) => out.push_str(text),
                Node::Markup(html) => out.push_str(html.as_str()),
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.class.is_empty() {
            out.push_str(" class=\"");
            out.push_str(self.class);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Markup(html) => out.push_str(html.as_str()),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    fn find_all<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                el.find_all(tag, found);
            }
        }
    }
}

/// The output of a template renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDocument {
    pub template: Template,
    pub root: Element,
}

impl VisualDocument {
    /// HTML fragment for embedding in a preview pane.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(4096);
        self.root.write_html(&mut out);
        out
    }

    /// Complete HTML page with the template's stylesheet inlined.
    pub fn to_page(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_html(title),
            self.template.stylesheet(),
            self.to_html()
        )
    }

    /// Headings of every rendered section, in order.
    #[cfg(test)]
    pub fn section_titles(&self) -> Vec<String> {
        let mut sections = Vec::new();
        self.root.find_all("section", &mut sections);
        sections
            .into_iter()
            .filter_map(|section| {
                section.children.iter().find_map(|child| match child {
                    Node::Element(el) if el.tag == "h2" => Some(el.text_content()),
                    _ => None,
                })
            })
            .collect()
    }

    pub fn section_count(&self) -> usize {
        let mut sections = Vec::new();
        self.root.find_all("section", &mut sections);
        sections.len()
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::markdown::sanitize::EscapeOnlySanitizer;
    use crate::models::resume::{Experience, Skills};

    fn formatter() -> MarkdownFormatter {
        MarkdownFormatter::new(crate::markdown::select_sanitizer(Default::default()))
    }

    fn acme() -> Experience {
        Experience {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "Jan 2020".into(),
            end_date: "Present".into(),
            ..Experience::default()
        }
    }

    #[test]
    fn test_empty_document_renders_no_sections() {
        let doc = ResumeDocument::default();
        for template in Template::ALL {
            let out = render(&doc, template, &formatter());
            assert_eq!(out.section_count(), 0, "{template}");
            assert!(out.section_titles().is_empty());
        }
    }

    #[test]
    fn test_sections_present_iff_content() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(acme());
        for template in Template::ALL {
            let out = render(&doc, template, &formatter());
            assert_eq!(out.section_count(), 1, "{template}");
        }

        doc.personal_info.summary = "Builder of things".into();
        doc.skills = Skills::default();
        doc.skills.other_skills = "Mentoring".into();
        let modern = render(&doc, Template::Modern, &formatter());
        assert_eq!(
            modern.section_titles(),
            vec!["Professional Summary", "Work Experience", "Skills"]
        );
        let classic = render(&doc, Template::Classic, &formatter());
        assert_eq!(
            classic.section_titles(),
            vec!["PROFESSIONAL SUMMARY", "WORK EXPERIENCE", "SKILLS"]
        );
        // minimal has an untitled summary section
        let minimal = render(&doc, Template::Minimal, &formatter());
        assert_eq!(minimal.section_count(), 3);
        assert_eq!(minimal.section_titles(), vec!["EXPERIENCE", "SKILLS"]);
    }

    #[test]
    fn test_empty_skill_categories_produce_no_skills_section() {
        let mut doc = ResumeDocument::default();
        doc.skills.add_category("Languages");
        for template in Template::ALL {
            assert_eq!(render(&doc, template, &formatter()).section_count(), 0);
        }
    }

    #[test]
    fn test_minimal_scenario_on_empty_document() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(acme());
        let out = render(&doc, Template::Minimal, &formatter());
        let html = out.to_html();
        assert_eq!(out.section_titles(), vec!["EXPERIENCE"]);
        assert!(html.contains("Acme"));
        assert!(html.contains("Engineer"));
        assert!(html.contains("Jan 2020 - Present"));
        assert!(!html.contains("EDUCATION"));
    }

    #[test]
    fn test_minimal_scenario_on_sample_document_keeps_seed_education() {
        let mut doc = ResumeDocument::sample();
        doc.experience.push(acme());
        let out = render(&doc, Template::Minimal, &formatter());
        let titles = out.section_titles();
        assert!(titles.contains(&"EXPERIENCE".to_string()));
        assert!(titles.contains(&"EDUCATION".to_string()));
        assert!(out.to_html().contains("Jan 2020 - Present"));
    }

    #[test]
    fn test_render_is_deterministic_and_leaves_document_alone() {
        let doc = ResumeDocument::sample();
        let before = doc.clone();
        for template in Template::ALL {
            let mut first = render(&doc, template, &formatter());
            let second = render(&doc, template, &formatter());
            assert_eq!(first, second);
            first.root.children.clear();
            assert_eq!(doc, before);
        }
    }

    #[test]
    fn test_plain_fields_are_escaped() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "<script>alert(1)</script>".into();
        for template in Template::ALL {
            let html = render(&doc, template, &formatter()).to_html();
            assert!(!html.contains("<script>"), "{template}");
        }
    }

    #[test]
    fn test_script_in_description_never_executes_under_either_sanitizer() {
        let mut doc = ResumeDocument::default();
        let mut entry = acme();
        entry.description = "<script>alert(1)</script>".into();
        doc.experience.push(entry);
        let fallback = MarkdownFormatter::new(Arc::new(EscapeOnlySanitizer));
        for markdown in [formatter(), fallback] {
            for template in Template::ALL {
                let html = render(&doc, template, &markdown).to_html();
                assert!(!html.contains("<script"), "{template}");
            }
        }
    }

    #[test]
    fn test_page_inlines_stylesheet() {
        let doc = ResumeDocument::sample();
        let page = render(&doc, Template::Classic, &formatter()).to_page("John & Co");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>John &amp; Co</title>"));
        assert!(page.contains("font-family"));
    }

    #[test]
    fn test_template_parsing() {
        assert_eq!("Minimal".parse::<Template>(), Ok(Template::Minimal));
        assert!("fancy".parse::<Template>().is_err());
        assert_eq!(serde_json::to_string(&Template::Classic).unwrap(), "\"classic\"");
    }
}
