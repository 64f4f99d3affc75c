// HTTP routes configuration

use super::handlers::{
    analyze_handler, analyze_url_handler, health_handler, metrics_handler, samples_handler,
    status_handler,
};
use super::middleware::{request_id_layers, track_metrics};
use super::ui::index_handler;
use crate::config::AppConfig;
use crate::error::{Result, VisionError};
use crate::vision::VisionClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Azure caps analysis images at 20MB; leave a little headroom for uploads.
const MAX_UPLOAD_BYTES: usize = 24 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: Option<Arc<VisionClient>>,
}

impl AppState {
    /// The Vision client, or `NotConfigured` when credentials are missing.
    pub fn client(&self) -> Result<&Arc<VisionClient>> {
        self.client.as_ref().ok_or(VisionError::NotConfigured)
    }
}

pub fn create_router(config: AppConfig, client: Option<Arc<VisionClient>>) -> Result<Router> {
    let state = AppState { config, client };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/status", get(status_handler))
        .route("/api/samples", get(samples_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze-url", post(analyze_url_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(axum::middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
