use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ResumeFields, ResumeStore, StoreError};
use crate::models::record::ResumeRecord;

/// Process-local record store, used when no database is configured and in
/// tests. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<Vec<Stored>>,
}

struct Stored {
    record: ResumeRecord,
    /// Breaks `updated_at` ties so ordering follows write order.
    revision: u64,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_revision(records: &[Stored]) -> u64 {
    records.iter().map(|s| s.revision).max().unwrap_or(0) + 1
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, owner: Uuid, fields: ResumeFields) -> Result<ResumeRecord, StoreError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            user_id: owner,
            title: fields.title,
            description: fields.description,
            resume_data: fields.data,
            template: fields.template,
            is_public: fields.is_public,
            created_at: now,
            updated_at: now,
        };
        let mut records = self.records.write().await;
        let revision = next_revision(&records);
        records.push(Stored {
            record: record.clone(),
            revision,
        });
        Ok(record)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: ResumeFields,
    ) -> Result<ResumeRecord, StoreError> {
        let mut records = self.records.write().await;
        let revision = next_revision(&records);
        let stored = records
            .iter_mut()
            .find(|s| s.record.id == id && s.record.user_id == owner)
            .ok_or(StoreError::NoMatchingRow)?;
        let record = &mut stored.record;
        record.title = fields.title;
        record.description = fields.description;
        record.resume_data = fields.data;
        record.template = fields.template;
        record.is_public = fields.is_public;
        record.updated_at = Utc::now();
        stored.revision = revision;
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|s| !(s.record.id == id && s.record.user_id == owner));
        if records.len() == before {
            return Err(StoreError::NoMatchingRow);
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let records = self.records.read().await;
        let mut owned: Vec<&Stored> = records
            .iter()
            .filter(|s| s.record.user_id == owner)
            .collect();
        owned.sort_by(|a, b| {
            b.record
                .updated_at
                .cmp(&a.record.updated_at)
                .then(b.revision.cmp(&a.revision))
        });
        Ok(owned.into_iter().map(|s| s.record.clone()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|s| s.record.id == id)
            .map(|s| s.record.clone()))
    }
}
