//! HTTP surface for docsight: upload, analyze and search over an in-memory
//! document store.

pub mod analyze_client;
pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use analyze_client::AnalyzeClient;
use config::{MAX_ANALYZE_BODY_BYTES, MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES, ServerConfig};
use handlers::{
    AppState, get_document, handle_analyze, handle_search, handle_status, handle_upload,
    list_documents, method_not_allowed,
};

impl AppState {
    /// Prepares the upload directory, an empty store and the analyze client.
    pub async fn from_config(config: ServerConfig) -> anyhow::Result<Self> {
        let (repository, uploads) = docsight_db::initialize_db(&config.upload_dir).await?;
        let analyzer = AnalyzeClient::from_config(&config)?;
        match &analyzer {
            AnalyzeClient::InProcess => tracing::info!("Uploads are analyzed in-process"),
            AnalyzeClient::Remote { endpoint, .. } => {
                tracing::info!("Uploads are analyzed via {endpoint}")
            }
        }
        Ok(Self {
            repository,
            uploads,
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/search",
            get(handle_search).fallback(method_not_allowed),
        )
        .route(
            "/api/analyze",
            post(handle_analyze)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(MAX_ANALYZE_BODY_BYTES)),
        )
        .route(
            "/api/upload",
            post(handle_upload)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route(
            "/api/documents",
            get(list_documents).fallback(method_not_allowed),
        )
        .route(
            "/api/documents/{id}",
            get(get_document).fallback(method_not_allowed),
        )
        .route("/api/status", get(handle_status).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
