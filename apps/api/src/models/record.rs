use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::templates::Template;

/// Raw `resumes` table row.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub resume_data: Value,
    pub template: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted, owned résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub resume_data: ResumeDocument,
    pub template: Template,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Public records are readable by anyone; private ones only by their owner.
    pub fn is_visible_to(&self, user_id: Option<Uuid>) -> bool {
        self.is_public || user_id.is_some_and(|id| self.is_owned_by(id))
    }
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        let resume_data = serde_json::from_value(row.resume_data).unwrap_or_else(|e| {
            warn!("Resume {} has unreadable data, using an empty document: {e}", row.id);
            ResumeDocument::default()
        });
        let template = row.template.parse().unwrap_or_else(|_| {
            warn!(
                "Resume {} has unknown template '{}', falling back to modern",
                row.id, row.template
            );
            Template::default()
        });
        ResumeRecord {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            resume_data,
            template,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
