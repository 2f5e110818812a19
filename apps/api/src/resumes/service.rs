//! Record operations with the permission rules applied.
//!
//! Store failures are logged and reported with a generic message; the caller's
//! document is never touched by a failed write.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::record::ResumeRecord;
use crate::models::resume::ResumeDocument;
use crate::store::{ResumeFields, ResumeStore, StoreError};
use crate::templates::Template;

pub const NOT_VISIBLE: &str = "Resume not found or you don't have permission to view it";

/// Title and visibility supplied with a save.
#[derive(Debug, Clone)]
pub struct SaveDetails {
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
}

fn store_failure(action: &str, e: StoreError) -> AppError {
    tracing::error!("Record store failed to {action}: {e}");
    AppError::Collaborator(format!("Failed to {action}"))
}

fn fields(
    details: SaveDetails,
    data: ResumeDocument,
    template: Template,
) -> Result<ResumeFields, AppError> {
    let title = details.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("A title is required".to_string()));
    }
    Ok(ResumeFields {
        title: title.to_string(),
        description: details
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        data,
        template,
        is_public: details.is_public,
    })
}

/// Creates a record, or updates `record_id` when given. Updates only succeed
/// for the owner.
pub async fn save(
    store: &dyn ResumeStore,
    owner: Uuid,
    record_id: Option<Uuid>,
    details: SaveDetails,
    data: ResumeDocument,
    template: Template,
) -> Result<ResumeRecord, AppError> {
    let fields = fields(details, data, template)?;
    match record_id {
        None => store
            .create(owner, fields)
            .await
            .map_err(|e| store_failure("save resume", e)),
        Some(id) => match store.update(id, owner, fields).await {
            Ok(record) => Ok(record),
            Err(StoreError::NoMatchingRow) => Err(AppError::Forbidden(
                "You don't have permission to update this resume".to_string(),
            )),
            Err(e) => Err(store_failure("update resume", e)),
        },
    }
}

pub async fn delete(store: &dyn ResumeStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    match store.delete(id, owner).await {
        Ok(()) => Ok(()),
        Err(StoreError::NoMatchingRow) => Err(AppError::Forbidden(
            "You don't have permission to delete this resume".to_string(),
        )),
        Err(e) => Err(store_failure("delete resume", e)),
    }
}

pub async fn list(store: &dyn ResumeStore, owner: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
    store
        .list_by_owner(owner)
        .await
        .map_err(|e| store_failure("load resumes", e))
}

/// Public records, or private ones viewed by their owner. Anything else is
/// indistinguishable from a missing record.
pub async fn get_visible(
    store: &dyn ResumeStore,
    viewer: Option<Uuid>,
    id: Uuid,
) -> Result<ResumeRecord, AppError> {
    let record = store
        .get_by_id(id)
        .await
        .map_err(|e| store_failure("load resume", e))?;
    record
        .filter(|r| r.is_visible_to(viewer))
        .ok_or_else(|| AppError::NotFound(NOT_VISIBLE.to_string()))
}

/// A record the caller may edit.
pub async fn get_owned(
    store: &dyn ResumeStore,
    owner: Uuid,
    id: Uuid,
) -> Result<ResumeRecord, AppError> {
    let record = get_visible(store, Some(owner), id).await?;
    if !record.is_owned_by(owner) {
        return Err(AppError::Forbidden(
            "You don't have permission to edit this resume".to_string(),
        ));
    }
    Ok(record)
}
