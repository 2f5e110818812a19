//! Classic layout: serif, centered header and section titles, uppercase headings.

use crate::markdown::MarkdownFormatter;
use crate::models::resume::ResumeDocument;

use super::parts::{
    contact_items, date_range, degree_line, has_summary, markdown_block, other_skills,
    project_dates, section, skill_lines,
};
use super::Element;

pub const STYLESHEET: &str = "\
.resume-classic{font-family:Georgia,'Times New Roman',serif;max-width:800px;margin:0 auto;color:#374151}\
.resume-classic .header{text-align:center;margin-bottom:1.5rem}\
.resume-classic h1{font-size:1.5rem;font-weight:700;text-transform:uppercase;letter-spacing:.05em;margin:0}\
.resume-classic .title{font-size:1.125rem;margin:.25rem 0 .5rem}\
.resume-classic .contact{display:flex;flex-wrap:wrap;justify-content:center;gap:.25rem 1rem;font-size:.875rem}\
.resume-classic .section-title{font-size:1.125rem;font-weight:700;text-align:center;border-bottom:2px solid #d1d5db;padding-bottom:.25rem}\
.resume-classic .entry{margin-bottom:1.25rem}\
.resume-classic .entry-row{display:flex;justify-content:space-between;align-items:baseline}\
.resume-classic .organization{font-style:italic}\
.resume-classic .dates,.resume-classic .location,.resume-classic .description{font-size:.875rem}\
.resume-classic .skills-grid{display:grid;grid-template-columns:1fr 1fr;gap:.75rem 1rem}";

const TITLE: &str = "section-title";

pub fn render(document: &ResumeDocument, markdown: &MarkdownFormatter) -> Element {
    let info = &document.personal_info;
    let mut root = Element::new("div", "resume resume-classic");

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
        let mut summary = section("summary", TITLE, Some("PROFESSIONAL SUMMARY"));
        if let Some(body) = markdown_block(markdown, "summary-body", &info.summary) {
            summary.push(body);
        }
        root.push(summary);
    }

    if !document.experience.is_empty() {
        let mut experience = section("experience", TITLE, Some("WORK EXPERIENCE"));
        for exp in &document.experience {
            let mut entry = Element::new("div", "entry").with(headline(
                exp.position.as_str(),
                Some(date_range(&exp.start_date, &exp.end_date)),
            ));
            entry.push(byline(&exp.company, &exp.location));
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
                &degree_line(edu),
                Some(date_range(&edu.start_date, &edu.end_date)),
            ));
            entry.push(byline(&edu.institution, &edu.location));
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
            if !project.technologies.is_empty() {
                entry.push(detail("Technologies:", &project.technologies));
            }
            if !project.link.is_empty() {
                entry.push(detail("Link:", &project.link));
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

fn headline(title: &str, dates: Option<String>) -> Element {
    let mut row = Element::new("div", "entry-row").with(Element::new("h3", "headline").with(title));
    if let Some(dates) = dates {
        row.push(Element::new("span", "dates").with(dates));
    }
    row
}

fn byline(organization: &str, location: &str) -> Element {
    let mut row =
        Element::new("div", "entry-row").with(Element::new("p", "organization").with(organization));
    if !location.is_empty() {
        row.push(Element::new("p", "location").with(location));
    }
    row
}

fn detail(label: &str, value: &str) -> Element {
    Element::new("p", "detail")
        .with(Element::new("strong", "").with(label))
        .with(format!(" {value}"))
}
