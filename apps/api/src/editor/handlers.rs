use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::editor::session::{EditingSession, Seed};
use crate::editor::{EditOp, SessionSnapshot};
use crate::errors::AppError;
use crate::export::{self, ExportKind};
use crate::models::record::ResumeRecord;
use crate::resumes::service::{self, SaveDetails};
use crate::state::AppState;
use crate::templates::{self, Template};

#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    #[serde(default)]
    pub seed: Seed,
    #[serde(default)]
    pub template: Template,
}

#[derive(Serialize)]
pub struct OpResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    pub session: SessionSnapshot,
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub template: Option<Template>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

async fn with_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut EditingSession) -> R,
) -> Result<R, AppError> {
    state
        .sessions
        .with_session(id, f)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Editing session {id} not found")))
}

fn attachment(kind: ExportKind, body: impl IntoResponse) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_filename(kind, Utc::now())
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, kind.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<NewSessionRequest>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let snapshot = state
        .sessions
        .open(req.seed.document(), req.template, None)
        .await;
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = with_session(&state, id, |s| s.snapshot()).await?;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/ops
pub async fn handle_apply_op(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(op): Json<EditOp>,
) -> Result<Json<OpResponse>, AppError> {
    let result = with_session(&state, id, |s| {
        s.apply(op).map(|outcome| OpResponse {
            cursor: outcome.cursor,
            session: s.snapshot(),
        })
    })
    .await?;
    Ok(Json(result?))
}

/// POST /api/v1/sessions/:id/import
///
/// Replaces the document with an uploaded JSON backup. An unreadable backup
/// leaves the session untouched.
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<SessionSnapshot>, AppError> {
    let document = export::from_json(&body).ok_or_else(|| {
        AppError::UnprocessableEntity("The uploaded file is not a valid resume backup".to_string())
    })?;
    let snapshot = with_session(&state, id, |s| {
        s.replace_document(document);
        s.snapshot()
    })
    .await?;
    info!("Imported resume backup into session {id}");
    Ok(Json(snapshot))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let (document, template) =
        with_session(&state, id, |s| (s.document().clone(), s.template())).await?;
    let template = query.template.unwrap_or(template);
    let title = page_title(&document.personal_info.name);
    let visual = templates::render(&document, template, &state.markdown);
    debug!(
        "Previewing session {id} with {} template ({} sections)",
        template.as_str(),
        visual.section_count()
    );
    Ok(Html(visual.to_page(&title)))
}

/// GET /api/v1/sessions/:id/export/txt
pub async fn handle_export_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let text = with_session(&state, id, |s| export::to_plain_text(s.document())).await?;
    Ok(attachment(ExportKind::Text, text))
}

/// GET /api/v1/sessions/:id/export/json
pub async fn handle_export_json(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let json = with_session(&state, id, |s| export::to_json(s.document()))
        .await?
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(attachment(ExportKind::Json, json))
}

/// GET /api/v1/sessions/:id/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let exporter = state.pdf.clone().ok_or_else(|| {
        AppError::Unavailable("PDF export is not configured on this server".to_string())
    })?;
    let (document, template) =
        with_session(&state, id, |s| (s.document().clone(), s.template())).await?;
    let page = templates::render(&document, template, &state.markdown)
        .to_page(&page_title(&document.personal_info.name));
    let bytes = exporter.export(&page).await.map_err(|e| {
        tracing::error!("PDF export for session {id} failed: {e}");
        AppError::Collaborator("Failed to export PDF".to_string())
    })?;
    Ok(attachment(ExportKind::Pdf, bytes))
}

/// POST /api/v1/sessions/:id/save
///
/// Creates a record, or updates the one the session was opened from.
pub async fn handle_save(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let user = user.require("save a resume")?;
    let (document, template, record_id) = with_session(&state, id, |s| {
        (s.document().clone(), s.template(), s.record_id())
    })
    .await?;

    let details = SaveDetails {
        title: req.title,
        description: req.description,
        is_public: req.is_public,
    };
    let record = service::save(
        state.store.as_ref(),
        user.id,
        record_id,
        details,
        document,
        template,
    )
    .await?;

    if record_id.is_none() {
        with_session(&state, id, |s| s.set_record_id(Some(record.id))).await?;
        info!("Session {id} saved as new resume {}", record.id);
        Ok((StatusCode::CREATED, Json(record)))
    } else {
        info!("Session {id} updated resume {}", record.id);
        Ok((StatusCode::OK, Json(record)))
    }
}

fn page_title(name: &str) -> String {
    if name.trim().is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    }
}
