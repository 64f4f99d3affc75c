// HTTP request handlers

use super::routes::AppState;
use crate::error::Result;
use crate::metrics::gather_metrics;
use crate::render::{self, overlay, RenderedResult};
use crate::vision::models::AnalysisResult;
use crate::vision::{default_features, Feature};
use axum::extract::{Query, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check Azure credentials
    let credentials_check = if state.config.vision.is_configured() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Endpoint: {}", state.config.vision.endpoint),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "AZURE_VISION_ENDPOINT / AZURE_VISION_KEY not set".to_string(),
        }
    };
    checks.insert("credentials".to_string(), credentials_check);

    // Check configuration
    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("API version: {}", state.config.vision.api_version),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for the Prometheus scrape endpoint
pub async fn metrics_handler() -> String {
    gather_metrics()
}

/// Connection state reported to the UI. The subscription key is never echoed.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub api_version: String,
}

pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let configured = state.config.vision.is_configured();
    Json(StatusResponse {
        configured,
        endpoint: configured.then(|| state.config.vision.endpoint.clone()),
        api_version: state.config.vision.api_version.clone(),
    })
}

/// A sample image the UI offers when the presenter has nothing at hand.
#[derive(Debug, Clone, Serialize)]
pub struct SampleImage {
    pub name: &'static str,
    pub url: &'static str,
}

const SAMPLE_IMAGES: &[SampleImage] = &[
    SampleImage {
        name: "Office Scene",
        url: "https://learn.microsoft.com/en-us/azure/ai-services/computer-vision/media/quickstarts/presentation.png",
    },
    SampleImage {
        name: "Street View",
        url: "https://raw.githubusercontent.com/Azure-Samples/cognitive-services-sample-data-files/master/ComputerVision/Images/landmark.jpg",
    },
    SampleImage {
        name: "Handwritten Text",
        url: "https://raw.githubusercontent.com/Azure-Samples/cognitive-services-sample-data-files/master/ComputerVision/Images/handwritten_text.jpg",
    },
    SampleImage {
        name: "Printed Text",
        url: "https://raw.githubusercontent.com/Azure-Samples/cognitive-services-sample-data-files/master/ComputerVision/Images/printed_text.jpg",
    },
];

pub async fn samples_handler() -> Json<&'static [SampleImage]> {
    Json(SAMPLE_IMAGES)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Comma-separated feature names; defaults to the workshop set.
    pub features: Option<String>,
    /// Whether to render bounding-box overlays (default true).
    pub overlay: Option<bool>,
}

/// Overlay images as `data:` URIs, plus the color legend in detection order.
#[derive(Debug, Serialize, Default)]
pub struct Overlays {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub summary: RenderedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlays: Option<Overlays>,
    /// The upstream response exactly as returned, for the JSON inspector.
    pub raw: serde_json::Value,
}

/// Handler for POST /api/analyze: raw image bytes in, analysis out.
pub async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>> {
    let client = state.client()?;
    let features = parse_features(params.features.as_deref())?;

    info!(
        "Analyzing uploaded image ({} bytes, features: {})",
        body.len(),
        Feature::join(&features)
    );

    let raw = client.analyze_json(&body, &features).await?;
    let result: AnalysisResult = serde_json::from_value(raw.clone())?;
    let summary = render::render(&result);

    let overlays = if params.overlay.unwrap_or(true) {
        build_overlays(&body, &result)
    } else {
        None
    };

    Ok(Json(AnalyzeResponse { summary, overlays, raw }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
    /// Feature names; defaults to the workshop set.
    pub features: Option<Vec<String>>,
    /// Whether to render bounding-box overlays (default true).
    pub overlay: Option<bool>,
}

/// Handler for POST /api/analyze-url: analyze a publicly reachable image.
///
/// The image is additionally downloaded so overlays can be drawn; a failed
/// download degrades to a result without overlays, never to an error.
pub async fn analyze_url_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeUrlRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let client = state.client()?;
    let features = match &req.features {
        Some(names) => {
            let mut features = Vec::with_capacity(names.len());
            for name in names {
                features.push(name.parse::<Feature>()?);
            }
            features
        }
        None => default_features(),
    };

    info!(
        "Analyzing image URL (features: {})",
        Feature::join(&features)
    );

    let raw = client.analyze_url_json(&req.url, &features).await?;
    let result: AnalysisResult = serde_json::from_value(raw.clone())?;
    let summary = render::render(&result);

    let overlays = if req.overlay.unwrap_or(true) {
        match client.fetch_image(&req.url).await {
            Ok(image) => build_overlays(&image, &result),
            Err(e) => {
                warn!("Could not fetch image for overlays: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(Json(AnalyzeResponse { summary, overlays, raw }))
}

fn parse_features(csv: Option<&str>) -> Result<Vec<Feature>> {
    match csv {
        Some(csv) => {
            let features = Feature::parse_list(csv)?;
            if features.is_empty() {
                Ok(default_features())
            } else {
                Ok(features)
            }
        }
        None => Ok(default_features()),
    }
}

/// Draw whichever overlays the result supports. A failed render is logged
/// and skipped; the analysis itself has already succeeded.
fn build_overlays(image: &[u8], result: &AnalysisResult) -> Option<Overlays> {
    let mut overlays = Overlays::default();
    let mut any = false;

    if let Some(objects) = result.objects_result.as_ref().filter(|o| !o.values.is_empty()) {
        match overlay::draw_object_boxes(image, &objects.values) {
            Ok(png) => {
                overlays.objects = Some(overlay::to_data_uri(&png));
                overlays.colors = (0..objects.values.len()).map(overlay::palette_color).collect();
                any = true;
            }
            Err(e) => warn!("Object overlay failed: {}", e),
        }
    }

    if let Some(people) = result.people_result.as_ref().filter(|p| !p.values.is_empty()) {
        match overlay::draw_people_boxes(image, &people.values) {
            Ok(png) => {
                overlays.people = Some(overlay::to_data_uri(&png));
                any = true;
            }
            Err(e) => warn!("People overlay failed: {}", e),
        }
    }

    if let Some(read) = result.read_result.as_ref().filter(|r| !r.blocks.is_empty()) {
        match overlay::draw_read_polygons(image, read) {
            Ok(png) => {
                overlays.read = Some(overlay::to_data_uri(&png));
                any = true;
            }
            Err(e) => warn!("Text overlay failed: {}", e),
        }
    }

    any.then_some(overlays)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features_defaults_when_absent() {
        let features = parse_features(None).unwrap();
        assert_eq!(features, default_features());
    }

    #[test]
    fn test_parse_features_defaults_when_blank() {
        let features = parse_features(Some("")).unwrap();
        assert_eq!(features, default_features());
    }

    #[test]
    fn test_parse_features_keeps_requested_subset() {
        let features = parse_features(Some("caption,read")).unwrap();
        assert_eq!(features, vec![Feature::Caption, Feature::Read]);
    }

    #[test]
    fn test_build_overlays_empty_result_is_none() {
        let result = AnalysisResult::default();
        assert!(build_overlays(&[1, 2, 3], &result).is_none());
    }
}
