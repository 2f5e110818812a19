//! Ordered entry lists (education, experience, projects) and their transient
//! "expanded entry" state.
//!
//! The expanded index lives beside the list, not inside the document, and is
//! adjusted by the same call that mutates the list so it keeps pointing at the
//! same logical entry.

use serde::{Deserialize, Serialize};

use crate::models::resume::{Education, Experience, PersonalInfo, Project};

/// An entry type that can be edited field by field.
pub trait SectionEntry: Default {
    type Field: Copy;

    /// The markdown-bearing description field.
    const DESCRIPTION: Self::Field;

    fn field_mut(&mut self, field: Self::Field) -> &mut String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    #[serde(alias = "project")]
    Projects,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Title,
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    Summary,
}

impl PersonalInfo {
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Title => &mut self.title,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Website => &mut self.website,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Summary => &mut self.summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Institution,
    Degree,
    FieldOfStudy,
    StartDate,
    EndDate,
    Location,
    Description,
}

impl SectionEntry for Education {
    type Field = EducationField;
    const DESCRIPTION: EducationField = EducationField::Description;

    fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::Institution => &mut self.institution,
            EducationField::Degree => &mut self.degree,
            EducationField::FieldOfStudy => &mut self.field_of_study,
            EducationField::StartDate => &mut self.start_date,
            EducationField::EndDate => &mut self.end_date,
            EducationField::Location => &mut self.location,
            EducationField::Description => &mut self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    StartDate,
    EndDate,
    Location,
    Description,
}

impl SectionEntry for Experience {
    type Field = ExperienceField;
    const DESCRIPTION: ExperienceField = ExperienceField::Description;

    fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Position => &mut self.position,
            ExperienceField::StartDate => &mut self.start_date,
            ExperienceField::EndDate => &mut self.end_date,
            ExperienceField::Location => &mut self.location,
            ExperienceField::Description => &mut self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Name,
    Description,
    Technologies,
    Link,
    StartDate,
    EndDate,
}

impl SectionEntry for Project {
    type Field = ProjectField;
    const DESCRIPTION: ProjectField = ProjectField::Description;

    fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Name => &mut self.name,
            ProjectField::Description => &mut self.description,
            ProjectField::Technologies => &mut self.technologies,
            ProjectField::Link => &mut self.link,
            ProjectField::StartDate => &mut self.start_date,
            ProjectField::EndDate => &mut self.end_date,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ListEditor
// ────────────────────────────────────────────────────────────────────────────

/// Tracks which entry of one list is expanded. Starts with the first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListEditor {
    expanded: Option<usize>,
}

impl Default for ListEditor {
    fn default() -> Self {
        Self { expanded: Some(0) }
    }
}

impl ListEditor {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Appends a blank entry and expands it.
    pub fn add<T: Default>(&mut self, items: &mut Vec<T>) {
        items.push(T::default());
        self.expanded = Some(items.len() - 1);
    }

    /// Removes the entry at `index`, or returns `None` when out of range.
    pub fn remove<T>(&mut self, items: &mut Vec<T>, index: usize) -> Option<T> {
        if index >= items.len() {
            return None;
        }
        let removed = items.remove(index);
        self.expanded = match self.expanded {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        Some(removed)
    }

    /// Sets one field of the entry at `index`. Returns false when out of range.
    pub fn update<T: SectionEntry>(
        &self,
        items: &mut [T],
        index: usize,
        field: T::Field,
        value: String,
    ) -> bool {
        match items.get_mut(index) {
            Some(entry) => {
                *entry.field_mut(field) = value;
                true
            }
            None => false,
        }
    }

    /// Swaps the entry with its predecessor. The first entry cannot move up.
    pub fn move_up<T>(&mut self, items: &mut [T], index: usize) -> bool {
        if index == 0 || index >= items.len() {
            return false;
        }
        self.swap(items, index, index - 1);
        true
    }

    /// Swaps the entry with its successor. The last entry cannot move down.
    pub fn move_down<T>(&mut self, items: &mut [T], index: usize) -> bool {
        if index >= items.len() || index + 1 == items.len() {
            return false;
        }
        self.swap(items, index, index + 1);
        true
    }

    /// Expands `index`, or collapses it when it is already expanded.
    /// Returns false when out of range.
    pub fn toggle<T>(&mut self, items: &[T], index: usize) -> bool {
        if index >= items.len() {
            return false;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        true
    }

    fn swap<T>(&mut self, items: &mut [T], from: usize, to: usize) {
        items.swap(from, to);
        if self.expanded == Some(from) {
            self.expanded = Some(to);
        } else if self.expanded == Some(to) {
            self.expanded = Some(from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<&'static str> {
        vec!["A", "B", "C"]
    }

    #[test]
    fn test_move_up_swaps_with_predecessor() {
        let mut items = abc();
        assert!(ListEditor::default().move_up(&mut items, 1));
        assert_eq!(items, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_move_down_swaps_with_successor() {
        let mut items = abc();
        assert!(ListEditor::default().move_down(&mut items, 1));
        assert_eq!(items, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_out_of_range_moves_are_noops() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        assert!(!editor.move_up(&mut items, 0));
        assert!(!editor.move_down(&mut items, 2));
        assert!(!editor.move_down(&mut items, 7));
        assert_eq!(items, abc());
        assert_eq!(editor.expanded(), Some(0));
    }

    #[test]
    fn test_expanded_follows_moved_entry() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        editor.toggle(&items, 1);
        editor.move_down(&mut items, 1);
        assert_eq!(editor.expanded(), Some(2));
        editor.move_up(&mut items, 2);
        assert_eq!(editor.expanded(), Some(1));
        // moving a neighbour past the expanded entry shifts it the other way
        editor.move_up(&mut items, 2);
        assert_eq!(editor.expanded(), Some(2));
        assert_eq!(items[2], "B");
    }

    #[test]
    fn test_add_appends_blank_and_expands_it() {
        let mut items: Vec<Experience> = vec![Experience::default()];
        let mut editor = ListEditor::default();
        editor.add(&mut items);
        assert_eq!(items.len(), 2);
        assert_eq!(editor.expanded(), Some(1));
    }

    #[test]
    fn test_remove_expanded_entry_clears_expansion() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        editor.toggle(&items, 1);
        assert_eq!(editor.remove(&mut items, 1), Some("B"));
        assert_eq!(editor.expanded(), None);
    }

    #[test]
    fn test_remove_before_expanded_keeps_same_logical_entry() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        editor.toggle(&items, 2);
        editor.remove(&mut items, 0);
        assert_eq!(editor.expanded(), Some(1));
        assert_eq!(items[1], "C");
    }

    #[test]
    fn test_remove_after_expanded_leaves_it_alone() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        editor.remove(&mut items, 2);
        assert_eq!(editor.expanded(), Some(0));
        assert_eq!(editor.remove(&mut items, 5), None);
    }

    #[test]
    fn test_update_sets_named_field() {
        let mut items = vec![Project::default()];
        let editor = ListEditor::default();
        assert!(editor.update(&mut items, 0, ProjectField::Link, "example.com".into()));
        assert_eq!(items[0].link, "example.com");
        assert!(!editor.update(&mut items, 1, ProjectField::Name, "x".into()));
    }

    #[test]
    fn test_toggle_collapses_expanded() {
        let items = abc();
        let mut editor = ListEditor::default();
        assert!(editor.toggle(&items, 0));
        assert_eq!(editor.expanded(), None);
        assert!(editor.toggle(&items, 2));
        assert_eq!(editor.expanded(), Some(2));
    }

    #[test]
    fn test_toggle_past_end_keeps_expansion() {
        let items = abc();
        let mut editor = ListEditor::default();
        assert!(!editor.toggle(&items, 3));
        assert!(!editor.toggle(&items, usize::MAX));
        assert_eq!(editor.expanded(), Some(0));
    }

    #[test]
    fn test_move_with_maximum_index_is_noop() {
        let mut items = abc();
        let mut editor = ListEditor::default();
        assert!(!editor.move_down(&mut items, usize::MAX));
        assert!(!editor.move_up(&mut items, usize::MAX));
        assert_eq!(items, abc());
        assert_eq!(editor.expanded(), Some(0));
    }

    #[test]
    fn test_field_names_match_document_wire_names() {
        let field: EducationField = serde_json::from_str("\"fieldOfStudy\"").unwrap();
        assert_eq!(field, EducationField::FieldOfStudy);
        let section: Section = serde_json::from_str("\"project\"").unwrap();
        assert_eq!(section, Section::Projects);
    }
}
