use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};

use crate::editor::toolbar::{apply_format, FormatCommand, FormatResult};
use crate::markdown::SafeHtml;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;
use crate::templates::{self, Template};

#[derive(Deserialize)]
pub struct MarkdownRequest {
    #[serde(default)]
    pub source: String,
}

#[derive(Serialize)]
pub struct MarkdownResponse {
    pub html: SafeHtml,
    pub sanitizer: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub command: FormatCommand,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub selection_start: usize,
    #[serde(default)]
    pub selection_end: usize,
}

#[derive(Deserialize)]
pub struct RenderRequest {
    pub document: ResumeDocument,
    #[serde(default)]
    pub template: Template,
    /// Whole HTML page with the stylesheet, instead of a bare fragment.
    #[serde(default)]
    pub page: bool,
}

/// POST /api/v1/markdown
pub async fn handle_markdown(
    State(state): State<AppState>,
    Json(req): Json<MarkdownRequest>,
) -> Json<MarkdownResponse> {
    Json(MarkdownResponse {
        html: state.markdown.render(&req.source),
        sanitizer: state.markdown.sanitizer_name(),
    })
}

/// POST /api/v1/format
pub async fn handle_format(Json(req): Json<FormatRequest>) -> Json<FormatResult> {
    Json(apply_format(
        req.command,
        &req.text,
        req.selection_start,
        req.selection_end,
    ))
}

/// POST /api/v1/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Html<String> {
    let visual = templates::render(&req.document, req.template, &state.markdown);
    if req.page {
        let title = req.document.personal_info.name.clone();
        Html(visual.to_page(&title))
    } else {
        Html(visual.to_html())
    }
}
