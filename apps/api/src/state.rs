use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::editor::SessionRegistry;
use crate::export::PdfExporter;
use crate::markdown::MarkdownFormatter;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is constructed in `main` and passed in here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: Arc<SessionRegistry>,
    pub markdown: MarkdownFormatter,
    /// `None` when no rasterizer is configured; paged export is then unavailable.
    pub pdf: Option<Arc<PdfExporter>>,
}
