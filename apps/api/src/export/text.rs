//! Plain-text export.
//!
//! Emphasis markers are dropped rather than rendered so the result reads as
//! prose. Other markdown (headings, list dashes) passes through untouched.

use std::fmt::Write;

use crate::models::resume::ResumeDocument;

/// Serializes the document as flat text: header, then summary, experience,
/// education, projects and skills in that fixed order.
pub fn to_plain_text(document: &ResumeDocument) -> String {
    let info = &document.personal_info;
    let mut out = String::new();

    out.push_str(&info.name);
    out.push('\n');
    push_line(&mut out, &info.title);
    let contact: Vec<&str> = [&info.email, &info.phone, &info.location]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    out.push_str(&contact.join(" "));
    out.push('\n');
    push_line(&mut out, &info.website);
    push_line(&mut out, &info.linkedin);
    out.push('\n');

    if !info.summary.is_empty() {
        out.push_str("PROFESSIONAL SUMMARY\n");
        out.push_str(&strip_emphasis_markers(&info.summary));
        out.push_str("\n\n");
    }

    if !document.experience.is_empty() {
        out.push_str("EXPERIENCE\n");
        for exp in &document.experience {
            let _ = writeln!(out, "{}", exp.position);
            let _ = writeln!(
                out,
                "{} | {} - {}",
                exp.company, exp.start_date, exp.end_date
            );
            push_line(&mut out, &exp.location);
            push_description(&mut out, &exp.description);
            out.push('\n');
        }
    }

    if !document.education.is_empty() {
        out.push_str("EDUCATION\n");
        for edu in &document.education {
            out.push_str(&edu.degree);
            if !edu.field_of_study.is_empty() {
                let _ = write!(out, ", {}", edu.field_of_study);
            }
            out.push('\n');
            let _ = writeln!(
                out,
                "{} | {} - {}",
                edu.institution, edu.start_date, edu.end_date
            );
            push_line(&mut out, &edu.location);
            push_description(&mut out, &edu.description);
            out.push('\n');
        }
    }

    if !document.projects.is_empty() {
        out.push_str("PROJECTS\n");
        for project in &document.projects {
            let _ = writeln!(out, "{}", project.name);
            if !project.start_date.is_empty() || !project.end_date.is_empty() {
                let _ = writeln!(out, "{} - {}", project.start_date, project.end_date);
            }
            if !project.technologies.is_empty() {
                let _ = writeln!(out, "Technologies: {}", project.technologies);
            }
            if !project.link.is_empty() {
                let _ = writeln!(out, "Link: {}", project.link);
            }
            push_description(&mut out, &project.description);
            out.push('\n');
        }
    }

    if !document.skills.is_empty() {
        out.push_str("SKILLS\n");
        for category in document.skills.non_empty_categories() {
            let _ = writeln!(out, "{}: {}", category.name, category.skills.join(", "));
        }
        push_line(&mut out, &document.skills.other_skills);
    }

    out
}

/// Removes `**` and `*` literally.
pub fn strip_emphasis_markers(text: &str) -> String {
    text.replace('*', "")
}

fn push_line(out: &mut String, value: &str) {
    if !value.is_empty() {
        out.push_str(value);
        out.push('\n');
    }
}

fn push_description(out: &mut String, description: &str) {
    if !description.is_empty() {
        out.push_str(&strip_emphasis_markers(description));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Project};

    #[test]
    fn test_no_emphasis_markers_survive() {
        let mut doc = ResumeDocument::sample();
        doc.personal_info.summary = "**Bold** and *soft* claims".into();
        doc.experience[0].description = "- Shipped **fast**\n- *Carefully*".into();
        let text = to_plain_text(&doc);
        assert!(!text.contains('*'));
        assert!(text.contains("Bold and soft claims"));
        assert!(text.contains("- Shipped fast"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let text = to_plain_text(&ResumeDocument::sample());
        let positions: Vec<usize> = [
            "PROFESSIONAL SUMMARY",
            "EXPERIENCE",
            "EDUCATION",
            "PROJECTS",
            "SKILLS",
        ]
        .iter()
        .map(|heading| text.find(heading).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_entry_layout() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Ada".into();
        doc.personal_info.email = "ada@example.com".into();
        doc.personal_info.location = "London".into();
        doc.experience.push(Experience {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "Jan 2020".into(),
            end_date: "Present".into(),
            ..Experience::default()
        });
        doc.projects.push(Project {
            name: "Engine".into(),
            technologies: "Rust".into(),
            ..Project::default()
        });
        let text = to_plain_text(&doc);
        assert!(text.starts_with("Ada\nada@example.com London\n\n"));
        assert!(text.contains("EXPERIENCE\nEngineer\nAcme | Jan 2020 - Present\n\n"));
        assert!(text.contains("PROJECTS\nEngine\nTechnologies: Rust\n\n"));
        assert!(!text.contains("SKILLS"));
        assert!(!text.contains("EDUCATION"));
    }
}
