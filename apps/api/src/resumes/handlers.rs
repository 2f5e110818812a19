use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::editor::SessionSnapshot;
use crate::errors::AppError;
use crate::models::record::ResumeRecord;
use crate::resumes::service;
use crate::state::AppState;
use crate::templates;

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let user = user.require("view your resumes")?;
    let records = service::list(state.store.as_ref(), user.id).await?;
    Ok(Json(records))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = service::get_visible(state.store.as_ref(), user.id(), id).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user = user.require("delete a resume")?;
    service::delete(state.store.as_ref(), user.id, id).await?;
    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let record = service::get_visible(state.store.as_ref(), user.id(), id).await?;
    let visual = templates::render(&record.resume_data, record.template, &state.markdown);
    Ok(Html(visual.to_page(&record.title)))
}

/// POST /api/v1/resumes/:id/edit
///
/// Opens the record in a session linked to it, so saving updates the record.
pub async fn handle_edit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let user = user.require("edit a resume")?;
    let record = service::get_owned(state.store.as_ref(), user.id, id).await?;
    let snapshot = state
        .sessions
        .open(record.resume_data, record.template, Some(record.id))
        .await;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// POST /api/v1/resumes/:id/duplicate
///
/// Opens a copy of the record's data and template in an unlinked session.
pub async fn handle_duplicate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let record = service::get_visible(state.store.as_ref(), user.id(), id).await?;
    let snapshot = state
        .sessions
        .open(record.resume_data, record.template, None)
        .await;
    Ok((StatusCode::CREATED, Json(snapshot)))
}
