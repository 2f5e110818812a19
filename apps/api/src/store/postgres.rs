use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{ResumeFields, ResumeStore, StoreError};
use crate::models::record::{ResumeRecord, ResumeRow};

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, owner: Uuid, fields: ResumeFields) -> Result<ResumeRecord, StoreError> {
        let data = serde_json::to_value(&fields.data)?;
        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes (user_id, title, description, resume_data, template, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(data)
        .bind(fields.template.as_str())
        .bind(fields.is_public)
        .fetch_one(&self.pool)
        .await?;
        debug!("Created resume {} for {owner}", row.id);
        Ok(row.into())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: ResumeFields,
    ) -> Result<ResumeRecord, StoreError> {
        let data = serde_json::to_value(&fields.data)?;
        let row: Option<ResumeRow> = sqlx::query_as(
            r#"
            UPDATE resumes
            SET title = $3, description = $4, resume_data = $5, template = $6,
                is_public = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(data)
        .bind(fields.template.as_str())
        .bind(fields.is_public)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ResumeRecord::from).ok_or(StoreError::NoMatchingRow)
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NoMatchingRow);
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeRecord::from))
    }
}
