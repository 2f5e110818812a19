//! One editing session: a document, its template, the transient list state and
//! a scratch mirror that receives every change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::sections::{
    EducationField, ExperienceField, ListEditor, PersonalField, ProjectField, Section,
    SectionEntry,
};
use crate::editor::skills::SkillsEditor;
use crate::editor::toolbar::{apply_format, FormatCommand};
use crate::editor::EditError;
use crate::models::resume::ResumeDocument;
use crate::scratch::ScratchMirror;
use crate::templates::Template;

/// Starting content for a new session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    #[default]
    Sample,
    Empty,
}

impl Seed {
    pub fn document(self) -> ResumeDocument {
        match self {
            Seed::Sample => ResumeDocument::sample(),
            Seed::Empty => ResumeDocument::default(),
        }
    }
}

/// A markdown-bearing field of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextTarget {
    Summary,
    Education { index: usize },
    Experience { index: usize },
    Project { index: usize },
}

/// A single user action against the session's document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    SetPersonal {
        field: PersonalField,
        value: String,
    },
    AddEntry {
        section: Section,
    },
    RemoveEntry {
        section: Section,
        index: usize,
    },
    MoveUp {
        section: Section,
        index: usize,
    },
    MoveDown {
        section: Section,
        index: usize,
    },
    ToggleEntry {
        section: Section,
        index: usize,
    },
    UpdateEducation {
        index: usize,
        field: EducationField,
        value: String,
    },
    UpdateExperience {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    UpdateProject {
        index: usize,
        field: ProjectField,
        value: String,
    },
    Format {
        target: TextTarget,
        command: FormatCommand,
        selection_start: usize,
        selection_end: usize,
    },
    AddCategory {
        name: String,
    },
    RemoveCategory {
        name: String,
    },
    SelectCategory {
        name: String,
    },
    AddSkill {
        category: String,
        skill: String,
    },
    RemoveSkill {
        category: String,
        index: usize,
    },
    SetOtherSkills {
        value: String,
    },
    SetTemplate {
        template: Template,
    },
}

/// What an operation hands back besides the new state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpOutcome {
    /// Cursor position after a `format` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpandedEntries {
    pub education: Option<usize>,
    pub experience: Option<usize>,
    pub projects: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub record_id: Option<Uuid>,
    pub document: ResumeDocument,
    pub template: Template,
    pub expanded: ExpandedEntries,
    pub selected_category: Option<String>,
}

enum ListOp {
    Add,
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    Toggle(usize),
}

pub struct EditingSession {
    id: Uuid,
    record_id: Option<Uuid>,
    document: ResumeDocument,
    template: Template,
    education: ListEditor,
    experience: ListEditor,
    projects: ListEditor,
    skills: SkillsEditor,
    mirror: ScratchMirror,
}

impl EditingSession {
    /// Starts a session and writes its initial state to scratch storage.
    pub fn new(
        id: Uuid,
        document: ResumeDocument,
        template: Template,
        record_id: Option<Uuid>,
        mirror: ScratchMirror,
    ) -> Self {
        let session = Self {
            id,
            record_id,
            document,
            template,
            education: ListEditor::default(),
            experience: ListEditor::default(),
            projects: ListEditor::default(),
            skills: SkillsEditor::default(),
            mirror,
        };
        session.mirror.save_document(&session.document);
        session.mirror.save_template(session.template);
        session.mirror.save_record_link(session.record_id);
        session
    }

    /// Rebuilds a session from whatever its scratch mirror holds. A missing or
    /// unreadable document means there is nothing to restore.
    pub fn restore(id: Uuid, mirror: ScratchMirror) -> Option<Self> {
        let document = mirror.load_document()?;
        let template = mirror.load_template().unwrap_or_default();
        let record_id = mirror.load_record_link();
        Some(Self {
            id,
            record_id,
            document,
            template,
            education: ListEditor::default(),
            experience: ListEditor::default(),
            projects: ListEditor::default(),
            skills: SkillsEditor::default(),
            mirror,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record_id(&self) -> Option<Uuid> {
        self.record_id
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn template(&self) -> Template {
        self.template
    }

    /// Links the session to a saved record, or unlinks it.
    pub fn set_record_id(&mut self, record_id: Option<Uuid>) {
        self.record_id = record_id;
        self.mirror.save_record_link(record_id);
    }

    /// Swaps in a whole new document (JSON restore). List state starts over.
    pub fn replace_document(&mut self, document: ResumeDocument) {
        self.document = document;
        self.education = ListEditor::default();
        self.experience = ListEditor::default();
        self.projects = ListEditor::default();
        self.skills = SkillsEditor::default();
        self.mirror.save_document(&self.document);
    }

    /// Applies one operation. On error the document is left as it was.
    pub fn apply(&mut self, op: EditOp) -> Result<OpOutcome, EditError> {
        let mut outcome = OpOutcome::default();
        match op {
            EditOp::SetPersonal { field, value } => {
                *self.document.personal_info.field_mut(field) = value;
            }
            EditOp::AddEntry { section } => self.list_op(section, ListOp::Add)?,
            EditOp::RemoveEntry { section, index } => {
                self.list_op(section, ListOp::Remove(index))?
            }
            EditOp::MoveUp { section, index } => self.list_op(section, ListOp::MoveUp(index))?,
            EditOp::MoveDown { section, index } => {
                self.list_op(section, ListOp::MoveDown(index))?
            }
            EditOp::ToggleEntry { section, index } => {
                self.list_op(section, ListOp::Toggle(index))?
            }
            EditOp::UpdateEducation {
                index,
                field,
                value,
            } => update_entry(
                &self.education,
                &mut self.document.education,
                Section::Education,
                index,
                field,
                value,
            )?,
            EditOp::UpdateExperience {
                index,
                field,
                value,
            } => update_entry(
                &self.experience,
                &mut self.document.experience,
                Section::Experience,
                index,
                field,
                value,
            )?,
            EditOp::UpdateProject {
                index,
                field,
                value,
            } => update_entry(
                &self.projects,
                &mut self.document.projects,
                Section::Projects,
                index,
                field,
                value,
            )?,
            EditOp::Format {
                target,
                command,
                selection_start,
                selection_end,
            } => {
                let field = self.text_field(target)?;
                let result = apply_format(command, field.as_str(), selection_start, selection_end);
                *field = result.text;
                outcome.cursor = Some(result.cursor);
            }
            EditOp::AddCategory { name } => {
                self.skills.add_category(&mut self.document.skills, &name);
            }
            EditOp::RemoveCategory { name } => {
                self.skills.remove_category(&mut self.document.skills, &name);
            }
            EditOp::SelectCategory { name } => {
                self.skills.select_category(&self.document.skills, &name)?;
                return Ok(outcome);
            }
            EditOp::AddSkill { category, skill } => {
                self.skills
                    .add_skill(&mut self.document.skills, &category, &skill)?;
            }
            EditOp::RemoveSkill { category, index } => {
                self.skills
                    .remove_skill(&mut self.document.skills, &category, index)?;
            }
            EditOp::SetOtherSkills { value } => self.document.skills.other_skills = value,
            EditOp::SetTemplate { template } => {
                self.template = template;
                self.mirror.save_template(template);
                return Ok(outcome);
            }
        }
        self.mirror.save_document(&self.document);
        Ok(outcome)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            record_id: self.record_id,
            document: self.document.clone(),
            template: self.template,
            expanded: ExpandedEntries {
                education: self.education.expanded(),
                experience: self.experience.expanded(),
                projects: self.projects.expanded(),
            },
            selected_category: self.skills.selected().map(str::to_string),
        }
    }

    fn list_op(&mut self, section: Section, op: ListOp) -> Result<(), EditError> {
        match section {
            Section::Education => run_list_op(
                &mut self.education,
                &mut self.document.education,
                section,
                op,
            ),
            Section::Experience => run_list_op(
                &mut self.experience,
                &mut self.document.experience,
                section,
                op,
            ),
            Section::Projects => run_list_op(
                &mut self.projects,
                &mut self.document.projects,
                section,
                op,
            ),
        }
    }

    fn text_field(&mut self, target: TextTarget) -> Result<&mut String, EditError> {
        let doc = &mut self.document;
        match target {
            TextTarget::Summary => Ok(&mut doc.personal_info.summary),
            TextTarget::Education { index } => {
                description_of(&mut doc.education, Section::Education, index)
            }
            TextTarget::Experience { index } => {
                description_of(&mut doc.experience, Section::Experience, index)
            }
            TextTarget::Project { index } => {
                description_of(&mut doc.projects, Section::Projects, index)
            }
        }
    }
}

fn run_list_op<T: SectionEntry>(
    editor: &mut ListEditor,
    items: &mut Vec<T>,
    section: Section,
    op: ListOp,
) -> Result<(), EditError> {
    let len = items.len();
    let out_of_range = |index| EditError::IndexOutOfRange {
        section: section.label(),
        index,
        len,
    };
    match op {
        ListOp::Add => editor.add(items),
        ListOp::Remove(index) => {
            editor.remove(items, index).ok_or_else(|| out_of_range(index))?;
        }
        ListOp::MoveUp(index) => {
            editor.move_up(items, index);
        }
        ListOp::MoveDown(index) => {
            editor.move_down(items, index);
        }
        ListOp::Toggle(index) => {
            if !editor.toggle(items.as_slice(), index) {
                return Err(out_of_range(index));
            }
        }
    }
    Ok(())
}

fn update_entry<T: SectionEntry>(
    editor: &ListEditor,
    items: &mut [T],
    section: Section,
    index: usize,
    field: T::Field,
    value: String,
) -> Result<(), EditError> {
    let len = items.len();
    if editor.update(items, index, field, value) {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange {
            section: section.label(),
            index,
            len,
        })
    }
}

fn description_of<T: SectionEntry>(
    items: &mut [T],
    section: Section,
    index: usize,
) -> Result<&mut String, EditError> {
    let len = items.len();
    items
        .get_mut(index)
        .map(|entry| entry.field_mut(T::DESCRIPTION))
        .ok_or(EditError::IndexOutOfRange {
            section: section.label(),
            index,
            len,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::scratch::memory::MemoryScratchStore;
    use crate::scratch::ScratchStore;

    fn session_with(store: Arc<MemoryScratchStore>, document: ResumeDocument) -> EditingSession {
        let id = Uuid::new_v4();
        EditingSession::new(
            id,
            document,
            Template::Modern,
            None,
            ScratchMirror::new(store, id),
        )
    }

    fn empty_session() -> EditingSession {
        session_with(Arc::new(MemoryScratchStore::default()), ResumeDocument::default())
    }

    fn op(value: serde_json::Value) -> EditOp {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ops_deserialize_from_tagged_json() {
        assert_eq!(
            op(json!({"op": "move_up", "section": "experience", "index": 1})),
            EditOp::MoveUp {
                section: Section::Experience,
                index: 1
            }
        );
        assert_eq!(
            op(json!({
                "op": "format",
                "target": {"kind": "experience", "index": 0},
                "command": "bold",
                "selection_start": 6,
                "selection_end": 11
            })),
            EditOp::Format {
                target: TextTarget::Experience { index: 0 },
                command: FormatCommand::Bold,
                selection_start: 6,
                selection_end: 11
            }
        );
    }

    #[test]
    fn test_acme_scenario_through_operations() {
        let mut session = empty_session();
        session
            .apply(EditOp::AddEntry {
                section: Section::Experience,
            })
            .unwrap();
        for (field, value) in [
            (ExperienceField::Company, "Acme"),
            (ExperienceField::Position, "Engineer"),
            (ExperienceField::StartDate, "Jan 2020"),
            (ExperienceField::EndDate, "Present"),
        ] {
            session
                .apply(EditOp::UpdateExperience {
                    index: 0,
                    field,
                    value: value.into(),
                })
                .unwrap();
        }
        let exp = &session.document().experience[0];
        assert_eq!(exp.company, "Acme");
        assert_eq!(exp.end_date, "Present");
        assert_eq!(session.snapshot().expanded.experience, Some(0));
    }

    #[test]
    fn test_format_on_description_returns_cursor() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(Default::default());
        doc.experience[0].description = "hello world".into();
        let mut session = session_with(Arc::new(MemoryScratchStore::default()), doc);
        let outcome = session
            .apply(EditOp::Format {
                target: TextTarget::Experience { index: 0 },
                command: FormatCommand::Bold,
                selection_start: 6,
                selection_end: 11,
            })
            .unwrap();
        assert_eq!(outcome.cursor, Some(15));
        assert_eq!(session.document().experience[0].description, "hello **world**");
    }

    #[test]
    fn test_out_of_range_update_is_an_error_and_changes_nothing() {
        let mut session = empty_session();
        let before = session.document().clone();
        let err = session
            .apply(EditOp::UpdateProject {
                index: 3,
                field: ProjectField::Name,
                value: "x".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                section: "projects",
                index: 3,
                len: 0
            }
        );
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_out_of_range_move_is_a_noop() {
        let mut session = session_with(
            Arc::new(MemoryScratchStore::default()),
            ResumeDocument::sample(),
        );
        let before = session.document().clone();
        session
            .apply(EditOp::MoveUp {
                section: Section::Education,
                index: 0,
            })
            .unwrap();
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_every_change_is_mirrored() {
        let store = Arc::new(MemoryScratchStore::default());
        let mut session = session_with(store.clone(), ResumeDocument::default());
        session
            .apply(EditOp::SetPersonal {
                field: PersonalField::Name,
                value: "Ada".into(),
            })
            .unwrap();
        session
            .apply(EditOp::SetTemplate {
                template: Template::Classic,
            })
            .unwrap();

        let mirror = ScratchMirror::new(store, session.id());
        let restored = mirror.load_document().unwrap();
        assert_eq!(restored.personal_info.name, "Ada");
        assert_eq!(mirror.load_template(), Some(Template::Classic));
    }

    #[test]
    fn test_restore_from_scratch() {
        let store = Arc::new(MemoryScratchStore::default());
        let record = Uuid::new_v4();
        let mut session = session_with(store.clone(), ResumeDocument::sample());
        session.set_record_id(Some(record));
        let id = session.id();

        let restored = EditingSession::restore(id, ScratchMirror::new(store.clone(), id)).unwrap();
        assert_eq!(restored.document(), &ResumeDocument::sample());
        assert_eq!(restored.record_id(), Some(record));

        store
            .set(&format!("{id}/{}", crate::scratch::DOCUMENT_KEY), "garbage")
            .unwrap();
        assert!(EditingSession::restore(id, ScratchMirror::new(store, id)).is_none());
    }

    #[test]
    fn test_mirror_failure_does_not_fail_the_edit() {
        let mut session = session_with(
            Arc::new(MemoryScratchStore::failing()),
            ResumeDocument::default(),
        );
        session
            .apply(EditOp::SetOtherSkills {
                value: "Mentoring".into(),
            })
            .unwrap();
        assert_eq!(session.document().skills.other_skills, "Mentoring");
    }

    #[test]
    fn test_skill_category_lifecycle() {
        let mut session = empty_session();
        session
            .apply(EditOp::AddCategory {
                name: "Languages".into(),
            })
            .unwrap();
        assert_eq!(
            session.snapshot().selected_category.as_deref(),
            Some("Languages")
        );
        session
            .apply(EditOp::AddSkill {
                category: "Languages".into(),
                skill: "Rust".into(),
            })
            .unwrap();
        assert_eq!(
            session.apply(EditOp::AddSkill {
                category: "Tools".into(),
                skill: "Git".into(),
            }),
            Err(EditError::UnknownCategory("Tools".into()))
        );
        session
            .apply(EditOp::RemoveCategory {
                name: "Languages".into(),
            })
            .unwrap();
        let snapshot = session.snapshot();
        assert!(snapshot.document.skills.categories().is_empty());
        assert_eq!(snapshot.selected_category, None);
    }

    #[test]
    fn test_replace_document_resets_list_state() {
        let mut session = empty_session();
        session
            .apply(EditOp::ToggleEntry {
                section: Section::Education,
                index: 0,
            })
            .unwrap_err();
        session.replace_document(ResumeDocument::sample());
        session
            .apply(EditOp::ToggleEntry {
                section: Section::Education,
                index: 0,
            })
            .unwrap();
        assert_eq!(session.snapshot().expanded.education, None);
        session.replace_document(ResumeDocument::sample());
        assert_eq!(session.snapshot().expanded.education, Some(0));
    }
}
