//! Pieces shared by the three layouts.

use crate::markdown::MarkdownFormatter;
use crate::models::resume::{Education, PersonalInfo, Project, ResumeDocument};

use super::Element;

/// Non-empty contact fields in display order.
pub(super) fn contact_items(info: &PersonalInfo) -> Vec<&str> {
    [
        &info.email,
        &info.phone,
        &info.location,
        &info.website,
        &info.linkedin,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|s| !s.is_empty())
    .collect()
}

pub(super) fn date_range(start: &str, end: &str) -> String {
    format!("{start} - {end}")
}

/// Projects show dates only when at least one is set; the end is optional.
pub(super) fn project_dates(project: &Project) -> Option<String> {
    match (project.start_date.as_str(), project.end_date.as_str()) {
        ("", "") => None,
        (start, "") => Some(start.to_string()),
        (start, end) => Some(format!("{start} - {end}")),
    }
}

/// `Degree, Field of Study` with the field omitted when empty.
pub(super) fn degree_line(education: &Education) -> String {
    if education.field_of_study.is_empty() {
        education.degree.clone()
    } else {
        format!("{}, {}", education.degree, education.field_of_study)
    }
}

/// A block holding rendered markdown, or `None` for an empty source.
pub(super) fn markdown_block(
    markdown: &MarkdownFormatter,
    class: &'static str,
    source: &str,
) -> Option<Element> {
    if source.is_empty() {
        return None;
    }
    Some(Element::new("div", class).with(markdown.render(source)))
}

pub(super) fn has_summary(document: &ResumeDocument) -> bool {
    !document.personal_info.summary.is_empty()
}

/// `(category, "a, b, c")` for every category that has skills.
pub(super) fn skill_lines(document: &ResumeDocument) -> Vec<(&str, String)> {
    document
        .skills
        .non_empty_categories()
        .map(|c| (c.name.as_str(), c.skills.join(", ")))
        .collect()
}

pub(super) fn other_skills(document: &ResumeDocument) -> Option<&str> {
    let text = document.skills.other_skills.as_str();
    (!text.trim().is_empty()).then_some(text)
}

/// Section wrapper with an optional heading.
pub(super) fn section(
    class: &'static str,
    heading_class: &'static str,
    heading: Option<&str>,
) -> Element {
    let mut section = Element::new("section", class);
    if let Some(title) = heading {
        section.push(Element::new("h2", heading_class).with(title));
    }
    section
}
