mod auth;
mod config;
mod db;
mod editor;
mod errors;
mod export;
mod markdown;
mod models;
mod resumes;
mod routes;
mod scratch;
mod state;
mod store;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{AuthEvent, AuthProvider, HttpAuthProvider};
use crate::config::Config;
use crate::db::create_pool;
use crate::editor::SessionRegistry;
use crate::export::{HttpRasterizer, LopdfPageWriter, PdfExporter};
use crate::markdown::{select_sanitizer, MarkdownFormatter};
use crate::routes::build_router;
use crate::scratch::FileScratchStore;
use crate::state::AppState;
use crate::store::{MemoryResumeStore, PgResumeStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Record persistence: PostgreSQL when configured, otherwise in memory
    let store: Arc<dyn ResumeStore> = match &config.database_url {
        Some(url) => Arc::new(PgResumeStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; saved resumes will be lost on restart");
            Arc::new(MemoryResumeStore::new())
        }
    };

    // Auth collaborator
    let auth = Arc::new(HttpAuthProvider::new(
        &config.auth_url,
        config.auth_api_key.clone(),
    )?);
    spawn_auth_logger(auth.as_ref());
    info!("Auth client initialized ({})", config.auth_url);

    // Editing sessions mirror into the scratch directory
    let scratch = Arc::new(FileScratchStore::new(config.scratch_dir.clone()));
    let sessions = Arc::new(SessionRegistry::new(scratch, config.session_idle));
    info!(
        "Scratch storage at {}; sessions idle for {}s leave memory",
        config.scratch_dir.display(),
        config.session_idle.as_secs()
    );

    let markdown = MarkdownFormatter::new(select_sanitizer(config.sanitizer));
    info!("Markdown sanitizer: {}", markdown.sanitizer_name());

    let pdf = match &config.rasterizer_url {
        Some(url) => {
            let rasterizer = Arc::new(HttpRasterizer::new(url.clone())?);
            info!("PDF export enabled (rasterizer: {url})");
            Some(Arc::new(PdfExporter::new(
                rasterizer,
                Arc::new(LopdfPageWriter),
            )))
        }
        None => {
            info!("RASTERIZER_URL not set; PDF export disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        store,
        auth,
        sessions,
        markdown,
        pdf,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Logs every sign-in and sign-out the auth collaborator reports.
fn spawn_auth_logger(auth: &dyn AuthProvider) {
    let mut events = auth.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AuthEvent::SignedIn(user)) => info!("User {} signed in", user.id),
                Ok(AuthEvent::SignedOut) => info!("User signed out"),
                Err(RecvError::Lagged(skipped)) => warn!("Missed {skipped} auth events"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}
