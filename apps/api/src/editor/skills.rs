use serde::Serialize;

use crate::editor::EditError;
use crate::models::resume::Skills;

/// Skills section editing state: which category is selected for adding skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillsEditor {
    selected: Option<String>,
}

impl SkillsEditor {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Adds and selects a new category. Blank or existing names are a no-op.
    pub fn add_category(&mut self, skills: &mut Skills, name: &str) -> bool {
        if !skills.add_category(name) {
            return false;
        }
        self.selected = Some(name.trim().to_string());
        true
    }

    /// Removes a category and its skills; clears the selection if it pointed there.
    pub fn remove_category(&mut self, skills: &mut Skills, name: &str) -> bool {
        let removed = skills.remove_category(name);
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        removed
    }

    pub fn select_category(&mut self, skills: &Skills, name: &str) -> Result<(), EditError> {
        if !skills.contains_category(name) {
            return Err(EditError::UnknownCategory(name.to_string()));
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    pub fn add_skill(
        &self,
        skills: &mut Skills,
        category: &str,
        skill: &str,
    ) -> Result<bool, EditError> {
        skills
            .add_skill(category, skill)
            .ok_or_else(|| EditError::UnknownCategory(category.to_string()))
    }

    pub fn remove_skill(
        &self,
        skills: &mut Skills,
        category: &str,
        index: usize,
    ) -> Result<(), EditError> {
        let len = skills
            .category(category)
            .map(|c| c.skills.len())
            .ok_or_else(|| EditError::UnknownCategory(category.to_string()))?;
        match skills.remove_skill(category, index) {
            Some(true) => Ok(()),
            _ => Err(EditError::IndexOutOfRange {
                section: "skills",
                index,
                len,
            }),
        }
    }
}
