//! Modern layout: sans-serif, left-aligned header, underlined section titles,
//! position before company.

use crate::markdown::MarkdownFormatter;
use crate::models::resume::ResumeDocument;

use super::parts::{
    contact_items, date_range, degree_line, has_summary, markdown_block, other_skills,
    project_dates, section, skill_lines,
};
use super::Element;

pub const STYLESHEET: &str = "\
.resume-modern{font-family:system-ui,sans-serif;max-width:800px;margin:0 auto;color:#374151}\
.resume-modern h1{font-size:1.875rem;font-weight:700;color:#1f2937;margin:0}\
.resume-modern .title{font-size:1.125rem;color:#4b5563;margin-top:.25rem}\
.resume-modern .contact{display:flex;flex-wrap:wrap;gap:.25rem 1rem;margin-top:.75rem;font-size:.875rem}\
.resume-modern .section-title{font-size:1.125rem;font-weight:600;color:#1f2937;border-bottom:1px solid #d1d5db;padding-bottom:.25rem}\
.resume-modern .entry{margin-bottom:1rem}\
.resume-modern .entry-row{display:flex;justify-content:space-between;align-items:baseline}\
.resume-modern .dates,.resume-modern .location{font-size:.875rem;color:#4b5563}\
.resume-modern .description{margin-top:.5rem;font-size:.875rem}\
.resume-modern .skills-grid{display:grid;grid-template-columns:1fr 1fr;gap:.5rem 1rem}";

const TITLE: &str = "section-title";

pub fn render(document: &ResumeDocument, markdown: &MarkdownFormatter) -> Element {
    let info = &document.personal_info;
    let mut root = Element::new("div", "resume resume-modern");

    let mut header =
        Element::new("header", "header").with(Element::new("h1", "name").with(info.name.as_str()));
    if !info.title.is_empty() {
        header.push(Element::new("p", "title").with(info.title.as_str()));
    }
    let contacts = contact_items(info);
    if !contacts.is_empty() {
        let mut contact = Element::new("div", "contact");
        for item in contacts {
            contact.push(Element::new("div", "").with(item));
        }
        header.push(contact);
    }
    root.push(header);

    if has_summary(document) {
        let mut summary = section("summary", TITLE, Some("Professional Summary"));
        if let Some(body) = markdown_block(markdown, "summary-body", &info.summary) {
            summary.push(body);
        }
        root.push(summary);
    }

    if !document.experience.is_empty() {
        let mut experience = section("experience", TITLE, Some("Work Experience"));
        for exp in &document.experience {
            let mut entry = Element::new("div", "entry")
                .with(
                    Element::new("div", "entry-row")
                        .with(Element::new("h3", "position").with(exp.position.as_str()))
                        .with(
                            Element::new("span", "dates")
                                .with(date_range(&exp.start_date, &exp.end_date)),
                        ),
                );
            let mut row = Element::new("div", "entry-row")
                .with(Element::new("p", "company").with(exp.company.as_str()));
            if !exp.location.is_empty() {
                row.push(Element::new("p", "location").with(exp.location.as_str()));
            }
            entry.push(row);
            if let Some(body) = markdown_block(markdown, "description", &exp.description) {
                entry.push(body);
            }
            experience.push(entry);
        }
        root.push(experience);
    }

    if !document.education.is_empty() {
        let mut education = section("education", TITLE, Some("Education"));
        for edu in &document.education {
            let mut entry = Element::new("div", "entry").with(
                Element::new("div", "entry-row")
                    .with(Element::new("h3", "degree").with(degree_line(edu)))
                    .with(
                        Element::new("span", "dates")
                            .with(date_range(&edu.start_date, &edu.end_date)),
                    ),
            );
            let mut row = Element::new("div", "entry-row")
                .with(Element::new("p", "institution").with(edu.institution.as_str()));
            if !edu.location.is_empty() {
                row.push(Element::new("p", "location").with(edu.location.as_str()));
            }
            entry.push(row);
            if let Some(body) = markdown_block(markdown, "description", &edu.description) {
                entry.push(body);
            }
            education.push(entry);
        }
        root.push(education);
    }

    if !document.projects.is_empty() {
        let mut projects = section("projects", TITLE, Some("Projects"));
        for project in &document.projects {
            let mut heading = Element::new("div", "entry-row")
                .with(Element::new("h3", "project-name").with(project.name.as_str()));
            if let Some(dates) = project_dates(project) {
                heading.push(Element::new("span", "dates").with(dates));
            }
            let mut entry = Element::new("div", "entry").with(heading);
            if !project.technologies.is_empty() {
                entry.push(labelled("Technologies:", &project.technologies));
            }
            if !project.link.is_empty() {
                entry.push(labelled("Link:", &project.link));
            }
            if let Some(body) = markdown_block(markdown, "description", &project.description) {
                entry.push(body);
            }
            projects.push(entry);
        }
        root.push(projects);
    }

    if !document.skills.is_empty() {
        let mut skills = section("skills", TITLE, Some("Skills"));
        let lines = skill_lines(document);
        if !lines.is_empty() {
            let mut grid = Element::new("div", "skills-grid");
            for (category, list) in lines {
                grid.push(
                    Element::new("div", "skill-category")
                        .with(Element::new("h3", "category").with(category))
                        .with(Element::new("p", "skill-list").with(list)),
                );
            }
            skills.push(grid);
        }
        if let Some(other) = other_skills(document) {
            skills.push(
                Element::new("div", "other-skills")
                    .with(Element::new("h3", "category").with("Additional Skills"))
                    .with(Element::new("p", "").with(other)),
            );
        }
        root.push(skills);
    }

    root
}

fn labelled(label: &str, value: &str) -> Element {
    Element::new("p", "detail")
        .with(Element::new("span", "label").with(label))
        .with(format!(" {value}"))
}
