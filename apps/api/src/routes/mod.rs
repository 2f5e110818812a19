pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::editor::handlers as sessions;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::templates::handlers as render;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-out", post(auth::handle_sign_out))
        // Stateless formatting and rendering
        .route("/api/v1/markdown", post(render::handle_markdown))
        .route("/api/v1/format", post(render::handle_format))
        .route("/api/v1/render", post(render::handle_render))
        // Editing sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .route("/api/v1/sessions/:id/ops", post(sessions::handle_apply_op))
        .route("/api/v1/sessions/:id/import", post(sessions::handle_import))
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_preview))
        .route(
            "/api/v1/sessions/:id/export/txt",
            get(sessions::handle_export_text),
        )
        .route(
            "/api/v1/sessions/:id/export/json",
            get(sessions::handle_export_json),
        )
        .route(
            "/api/v1/sessions/:id/export/pdf",
            get(sessions::handle_export_pdf),
        )
        .route("/api/v1/sessions/:id/save", post(sessions::handle_save))
        // Saved resumes
        .route("/api/v1/resumes", get(resumes::handle_list))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get).delete(resumes::handle_delete),
        )
        .route("/api/v1/resumes/:id/preview", get(resumes::handle_preview))
        .route("/api/v1/resumes/:id/edit", post(resumes::handle_edit))
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate),
        )
        .with_state(state)
}
