//! Minimal layout: no borders, untitled summary, organization first.

use crate::markdown::MarkdownFormatter;
use crate::models::resume::ResumeDocument;

use super::parts::{
    contact_items, date_range, degree_line, has_summary, markdown_block, other_skills,
    project_dates, section, skill_lines,
};
use super::Element;

pub const STYLESHEET: &str = "\
.resume-minimal{font-family:system-ui,sans-serif;max-width:800px;margin:0 auto;color:#374151}\
.resume-minimal .header{margin-bottom:2rem}\
.resume-minimal h1{font-size:1.5rem;font-weight:700;color:#111827;margin:0}\
.resume-minimal .contact{display:flex;flex-wrap:wrap;gap:.25rem .75rem;margin-top:.75rem;font-size:.875rem;color:#6b7280}\
.resume-minimal section{margin-bottom:2rem}\
.resume-minimal .section-title{font-size:1rem;font-weight:700;color:#111827;margin-bottom:1rem}\
.resume-minimal .entry{margin-bottom:1.5rem}\
.resume-minimal .entry-row{display:flex;justify-content:space-between;align-items:baseline}\
.resume-minimal .subtitle{font-style:italic;color:#4b5563}\
.resume-minimal .dates,.resume-minimal .description,.resume-minimal .skill-line{font-size:.875rem}";

const TITLE: &str = "section-title";

pub fn render(document: &ResumeDocument, markdown: &MarkdownFormatter) -> Element {
    let info = &document.personal_info;
    let mut root = Element::new("div", "resume resume-minimal");

    let mut header =
        Element::new("header", "header").with(Element::new("h1", "name").with(info.name.as_str()));
    if !info.title.is_empty() {
        header.push(Element::new("p", "title").with(info.title.as_str()));
    }
    let contacts = contact_items(info);
    if !contacts.is_empty() {
        let mut contact = Element::new("div", "contact");
        for (i, item) in contacts.into_iter().enumerate() {
            let text = if i == 0 {
                item.to_string()
            } else {
                format!("• {item}")
            };
            contact.push(Element::new("div", "").with(text));
        }
        header.push(contact);
    }
    root.push(header);

    if has_summary(document) {
        let mut summary = section("summary", TITLE, None);
        if let Some(body) = markdown_block(markdown, "summary-body", &info.summary) {
            summary.push(body);
        }
        root.push(summary);
    }

    if !document.experience.is_empty() {
        let mut experience = section("experience", TITLE, Some("EXPERIENCE"));
        for exp in &document.experience {
            let mut entry = Element::new("div", "entry").with(headline(
                &exp.company,
                Some(date_range(&exp.start_date, &exp.end_date)),
            ));
            entry.push(subtitle(joined(&exp.position, &exp.location)));
            if let Some(body) = markdown_block(markdown, "description", &exp.description) {
                entry.push(body);
            }
            experience.push(entry);
        }
        root.push(experience);
    }

    if !document.education.is_empty() {
        let mut education = section("education", TITLE, Some("EDUCATION"));
        for edu in &document.education {
            let mut entry = Element::new("div", "entry").with(headline(
                &edu.institution,
                Some(date_range(&edu.start_date, &edu.end_date)),
            ));
            entry.push(subtitle(joined(&degree_line(edu), &edu.location)));
            if let Some(body) = markdown_block(markdown, "description", &edu.description) {
                entry.push(body);
            }
            education.push(entry);
        }
        root.push(education);
    }

    if !document.projects.is_empty() {
        let mut projects = section("projects", TITLE, Some("PROJECTS"));
        for project in &document.projects {
            let mut entry =
                Element::new("div", "entry").with(headline(&project.name, project_dates(project)));
            if !project.technologies.is_empty() || !project.link.is_empty() {
                entry.push(subtitle(joined(&project.technologies, &project.link)));
            }
            if let Some(body) = markdown_block(markdown, "description", &project.description) {
                entry.push(body);
            }
            projects.push(entry);
        }
        root.push(projects);
    }

    if !document.skills.is_empty() {
        let mut skills = section("skills", TITLE, Some("SKILLS"));
        for (category, list) in skill_lines(document) {
            skills.push(
                Element::new("p", "skill-line")
                    .with(Element::new("strong", "").with(format!("{category}:")))
                    .with(format!(" {list}")),
            );
        }
        if let Some(other) = other_skills(document) {
            skills.push(Element::new("p", "skill-line").with(other));
        }
        root.push(skills);
    }

    root
}

fn headline(title: &str, dates: Option<String>) -> Element {
    let mut row = Element::new("div", "entry-row").with(Element::new("h3", "headline").with(title));
    if let Some(dates) = dates {
        row.push(Element::new("span", "dates").with(dates));
    }
    row
}

fn subtitle(text: String) -> Element {
    Element::new("p", "subtitle").with(text)
}

/// `lead | tail`, dropping the separator when either side is empty.
fn joined(lead: &str, tail: &str) -> String {
    match (lead.is_empty(), tail.is_empty()) {
        (_, true) => lead.to_string(),
        (true, false) => tail.to_string(),
        (false, false) => format!("{lead} | {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_separator() {
        assert_eq!(joined("Engineer", "Berlin"), "Engineer | Berlin");
        assert_eq!(joined("Engineer", ""), "Engineer");
        assert_eq!(joined("", "github.com/x"), "github.com/x");
    }
}
