//! Record store: owned, persisted résumés.
//!
//! Writes are owner-gated by filtering on `id AND user_id`. A write that
//! matches no row is [`StoreError::NoMatchingRow`], never a silent success.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::record::ResumeRecord;
use crate::models::resume::ResumeDocument;
use crate::templates::Template;

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no resume matches that id for this owner")]
    NoMatchingRow,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not encode resume data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything a create or update writes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFields {
    pub title: String,
    pub description: Option<String>,
    pub data: ResumeDocument,
    pub template: Template,
    pub is_public: bool,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, owner: Uuid, fields: ResumeFields) -> Result<ResumeRecord, StoreError>;

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: ResumeFields,
    ) -> Result<ResumeRecord, StoreError>;

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), StoreError>;

    /// Most recently updated first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<ResumeRecord>, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;
}
