// Error types for vizor

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Azure AI Vision is not configured (set AZURE_VISION_ENDPOINT and AZURE_VISION_KEY)")]
    NotConfigured,

    #[error("Vision API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert VisionError to HTTP responses for Axum
impl IntoResponse for VisionError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            VisionError::NotConfigured => {
                (StatusCode::SERVICE_UNAVAILABLE, "not_configured", self.to_string())
            }
            VisionError::Api { .. } => {
                (StatusCode::BAD_GATEWAY, "api_error", self.to_string())
            }
            VisionError::Network(_) => (
                StatusCode::BAD_GATEWAY,
                "network_error",
                "Could not reach the Azure AI Vision service".to_string(),
            ),
            VisionError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", self.to_string())
            }
            VisionError::Config(_) | VisionError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", self.to_string())
            }
            VisionError::Render(_) | VisionError::Image(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "render_error", self.to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", self.to_string()),
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
