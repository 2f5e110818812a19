use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The structured résumé content every editor mutates and every template reads.
///
/// Free-text fields (`summary`, every `description`) hold raw markdown source.
/// Rendering always starts from that source; no HTML is ever stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
    pub start_date: String,
    pub end_date: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// One named skill category with its ordered skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Skills held as a single ordered list of categories, so a category name and
/// its skill list can never drift apart.
///
/// On the wire this is still `{categories, skillsByCategory, otherSkills}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SkillsWire", into = "SkillsWire")]
pub struct Skills {
    categories: Vec<SkillCategory>,
    pub other_skills: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SkillsWire {
    categories: Vec<String>,
    skills_by_category: BTreeMap<String, Vec<String>>,
    other_skills: String,
}

impl From<SkillsWire> for Skills {
    fn from(mut wire: SkillsWire) -> Self {
        let mut categories: Vec<SkillCategory> = Vec::with_capacity(wire.categories.len());
        for name in wire.categories {
            if categories.iter().any(|c| c.name == name) {
                continue;
            }
            let skills = wire.skills_by_category.remove(&name).unwrap_or_default();
            categories.push(SkillCategory { name, skills });
        }
        Skills {
            categories,
            other_skills: wire.other_skills,
        }
    }
}

impl From<Skills> for SkillsWire {
    fn from(skills: Skills) -> Self {
        let mut wire = SkillsWire {
            other_skills: skills.other_skills,
            ..SkillsWire::default()
        };
        for category in skills.categories {
            wire.categories.push(category.name.clone());
            wire.skills_by_category.insert(category.name, category.skills);
        }
        wire
    }
}

impl Skills {
    pub fn new(categories: Vec<SkillCategory>, other_skills: impl Into<String>) -> Self {
        let mut skills = Skills {
            categories: Vec::new(),
            other_skills: other_skills.into(),
        };
        for category in categories {
            if !skills.add_category(&category.name) {
                continue;
            }
            if let Some(added) = skills.categories.last_mut() {
                added.skills = category.skills;
            }
        }
        skills
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Appends an empty category. Blank or duplicate names are ignored.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains_category(name) {
            return false;
        }
        self.categories.push(SkillCategory {
            name: name.to_string(),
            skills: Vec::new(),
        });
        true
    }

    /// Removes a category together with its skills.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        self.categories.len() != before
    }

    /// Appends a skill to an existing category. Returns `None` when the
    /// category does not exist, `Some(false)` when the skill was blank.
    pub fn add_skill(&mut self, category: &str, skill: &str) -> Option<bool> {
        let entry = self.categories.iter_mut().find(|c| c.name == category)?;
        let skill = skill.trim();
        if skill.is_empty() {
            return Some(false);
        }
        entry.skills.push(skill.to_string());
        Some(true)
    }

    /// Removes the skill at `index`. Returns `None` when the category does not
    /// exist, `Some(false)` when the index is out of range.
    pub fn remove_skill(&mut self, category: &str, index: usize) -> Option<bool> {
        let entry = self.categories.iter_mut().find(|c| c.name == category)?;
        if index >= entry.skills.len() {
            return Some(false);
        }
        entry.skills.remove(index);
        Some(true)
    }

    /// Categories that actually carry skills, in user order.
    pub fn non_empty_categories(&self) -> impl Iterator<Item = &SkillCategory> {
        self.categories.iter().filter(|c| !c.skills.is_empty())
    }

    /// True when there is nothing a renderer could show.
    pub fn is_empty(&self) -> bool {
        self.non_empty_categories().next().is_none() && self.other_skills.trim().is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Seed data
// ────────────────────────────────────────────────────────────────────────────

impl ResumeDocument {
    /// The sample document new editing sessions start from.
    pub fn sample() -> Self {
        ResumeDocument {
            personal_info: PersonalInfo {
                name: "John Doe".into(),
                title: "Software Engineer".into(),
                email: "john.doe@example.com".into(),
                phone: "(123) 456-7890".into(),
                location: "San Francisco, CA".into(),
                website: "johndoe.dev".into(),
                linkedin: "linkedin.com/in/johndoe".into(),
                summary: "Experienced software engineer with a passion for building scalable web \
                          applications and solving complex problems. Skilled in JavaScript, \
                          TypeScript, React, and Node.js."
                    .into(),
            },
            education: vec![Education {
                institution: "University of California, Berkeley".into(),
                degree: "Bachelor of Science".into(),
                field_of_study: "Computer Science".into(),
                start_date: "Aug 2016".into(),
                end_date: "May 2020".into(),
                location: "Berkeley, CA".into(),
                description: "Relevant coursework: Data Structures, Algorithms, Database Systems, \
                              Web Development, Machine Learning"
                    .into(),
            }],
            experience: vec![
                Experience {
                    company: "Tech Solutions Inc.".into(),
                    position: "Senior Software Engineer".into(),
                    start_date: "Jun 2022".into(),
                    end_date: "Present".into(),
                    location: "San Francisco, CA".into(),
                    description: "- Led the development of a customer-facing dashboard using React and TypeScript\n\
                                  - Implemented RESTful APIs using Node.js and Express\n\
                                  - Collaborated with cross-functional teams to deliver features on time\n\
                                  - Mentored junior developers and conducted code reviews"
                        .into(),
                },
                Experience {
                    company: "Web Innovations".into(),
                    position: "Software Engineer".into(),
                    start_date: "Jul 2020".into(),
                    end_date: "May 2022".into(),
                    location: "San Francisco, CA".into(),
                    description: "- Developed and maintained front-end applications using React\n\
                                  - Worked with backend team to integrate APIs\n\
                                  - Improved application performance by 30%\n\
                                  - Participated in agile development processes"
                        .into(),
                },
            ],
            projects: vec![
                Project {
                    name: "E-commerce Platform".into(),
                    description: "Built a full-stack e-commerce platform with React, Node.js, and \
                                  MongoDB. Implemented features like user authentication, product \
                                  catalog, shopping cart, and payment processing."
                        .into(),
                    technologies: "React, Node.js, Express, MongoDB, Stripe".into(),
                    link: "github.com/johndoe/ecommerce".into(),
                    start_date: "Jan 2022".into(),
                    end_date: "Apr 2022".into(),
                },
                Project {
                    name: "Task Management App".into(),
                    description: "Developed a task management application with drag-and-drop \
                                  functionality, user authentication, and real-time updates."
                        .into(),
                    technologies: "React, Firebase, Material UI".into(),
                    link: "github.com/johndoe/task-manager".into(),
                    start_date: "Sep 2021".into(),
                    end_date: "Dec 2021".into(),
                },
            ],
            skills: Skills::new(
                vec![
                    category(
                        "Programming Languages",
                        &["JavaScript", "TypeScript", "Python", "HTML", "CSS"],
                    ),
                    category(
                        "Frameworks & Libraries",
                        &["React", "Node.js", "Express", "Next.js", "Redux", "Tailwind CSS"],
                    ),
                    category(
                        "Tools & Platforms",
                        &["Git", "GitHub", "AWS", "Docker", "Jest", "Webpack"],
                    ),
                ],
                "Agile Methodologies, CI/CD, RESTful APIs, GraphQL, Database Design",
            ),
        }
    }
}

fn category(name: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        name: name.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_uses_camel_case_wire_names() {
        let doc = ResumeDocument::sample();
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert_eq!(
            value["education"][0]["fieldOfStudy"],
            json!("Computer Science")
        );
        assert_eq!(value["skills"]["categories"][0], json!("Programming Languages"));
        assert_eq!(
            value["skills"]["skillsByCategory"]["Tools & Platforms"][0],
            json!("Git")
        );
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let doc: ResumeDocument =
            serde_json::from_value(json!({"personalInfo": {"name": "Ada"}})).unwrap();
        assert_eq!(doc.personal_info.name, "Ada");
        assert!(doc.experience.is_empty());
        assert!(doc.skills.categories().is_empty());
    }

    #[test]
    fn test_skills_wire_missing_key_becomes_empty_and_orphans_drop() {
        let skills: Skills = serde_json::from_value(json!({
            "categories": ["Languages", "Tools", "Languages"],
            "skillsByCategory": {"Languages": ["Rust"], "Orphan": ["x"]},
            "otherSkills": ""
        }))
        .unwrap();
        let names: Vec<_> = skills.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Languages", "Tools"]);
        assert!(skills.category("Tools").unwrap().skills.is_empty());
        assert!(!skills.contains_category("Orphan"));
    }

    #[test]
    fn test_remove_category_drops_its_skills_only() {
        let mut skills = ResumeDocument::sample().skills;
        assert!(skills.remove_category("Programming Languages"));
        assert!(!skills.contains_category("Programming Languages"));
        let wire = serde_json::to_value(&skills).unwrap();
        assert!(wire["skillsByCategory"].get("Programming Languages").is_none());
        assert_eq!(skills.category("Tools & Platforms").unwrap().skills.len(), 6);
        assert_eq!(skills.categories().len(), 2);
    }

    #[test]
    fn test_add_category_rejects_blank_and_duplicate() {
        let mut skills = Skills::default();
        assert!(!skills.add_category("   "));
        assert!(skills.add_category("Languages"));
        assert!(!skills.add_category("Languages"));
        assert_eq!(skills.categories().len(), 1);
    }

    #[test]
    fn test_skill_edits_report_unknown_category() {
        let mut skills = Skills::default();
        assert_eq!(skills.add_skill("Nope", "Rust"), None);
        skills.add_category("Languages");
        assert_eq!(skills.add_skill("Languages", " "), Some(false));
        assert_eq!(skills.add_skill("Languages", "Rust"), Some(true));
        assert_eq!(skills.remove_skill("Languages", 3), Some(false));
        assert_eq!(skills.remove_skill("Languages", 0), Some(true));
    }

    #[test]
    fn test_skills_with_only_empty_categories_is_empty() {
        let mut skills = Skills::default();
        skills.add_category("Languages");
        assert!(skills.is_empty());
        skills.other_skills = "Mentoring".into();
        assert!(!skills.is_empty());
    }
}
