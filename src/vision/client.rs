// Azure AI Vision API client

use super::models::AnalysisResult;
use super::Feature;
use crate::config::VisionConfig;
use crate::error::{Result, VisionError};
use crate::metrics;
use reqwest::Client;
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the Azure AI Vision Image Analysis 4.0 API.
///
/// One synchronous call per user action: no retries, no backoff, no
/// caching. Non-success statuses and transport failures are surfaced to
/// the caller as distinct error variants.
#[derive(Debug)]
pub struct VisionClient {
    http_client: Client,
    config: VisionConfig,
    analyze_endpoint: String,
}

impl VisionClient {
    /// Create a new Vision client.
    ///
    /// Fails with [`VisionError::NotConfigured`] when the endpoint or key
    /// is missing, so an unconfigured process can never issue a call.
    pub fn new(config: &VisionConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(VisionError::NotConfigured);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| VisionError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        // Endpoint was normalized at config load; concatenate blindly.
        let analyze_endpoint = format!("{}/computervision/imageanalysis:analyze", config.endpoint);

        Ok(Self {
            http_client,
            config: config.clone(),
            analyze_endpoint,
        })
    }

    /// The configured endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Analyze raw image bytes, returning the response JSON as-is.
    ///
    /// The raw value is kept so the UI's inspector can show upstream
    /// fields the typed model does not know about.
    pub async fn analyze_json(
        &self,
        image: &[u8],
        features: &[Feature],
    ) -> Result<serde_json::Value> {
        if image.is_empty() {
            return Err(VisionError::InvalidRequest("Image data is empty".to_string()));
        }
        let request = self
            .analyze_request(features)?
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec());

        self.dispatch(request, features).await
    }

    /// Analyze a publicly reachable image URL, returning the response JSON.
    pub async fn analyze_url_json(
        &self,
        image_url: &str,
        features: &[Feature],
    ) -> Result<serde_json::Value> {
        if image_url.trim().is_empty() {
            return Err(VisionError::InvalidRequest("Image URL is empty".to_string()));
        }
        let request = self
            .analyze_request(features)?
            .header("Content-Type", "application/json")
            .json(&json!({ "url": image_url }));

        self.dispatch(request, features).await
    }

    /// Analyze raw image bytes into the typed result.
    pub async fn analyze(&self, image: &[u8], features: &[Feature]) -> Result<AnalysisResult> {
        let raw = self.analyze_json(image, features).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Analyze an image URL into the typed result.
    pub async fn analyze_url(&self, image_url: &str, features: &[Feature]) -> Result<AnalysisResult> {
        let raw = self.analyze_url_json(image_url, features).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Download an image so overlays can be drawn in URL mode.
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(image_url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::InvalidRequest(format!(
                "Failed to fetch image URL (HTTP {})",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        Ok(bytes.to_vec())
    }

    fn analyze_request(&self, features: &[Feature]) -> Result<reqwest::RequestBuilder> {
        if features.is_empty() {
            return Err(VisionError::InvalidRequest(
                "At least one analysis feature must be selected".to_string(),
            ));
        }

        Ok(self
            .http_client
            .post(&self.analyze_endpoint)
            .query(&[
                ("api-version", self.config.api_version.as_str()),
                ("features", &Feature::join(features)),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.config.key))
    }

    /// Send one request and triage the outcome. Exactly one attempt.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        features: &[Feature],
    ) -> Result<serde_json::Value> {
        debug!("Calling imageanalysis:analyze with features: {}", Feature::join(features));

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_vision_call(0, start.elapsed().as_secs_f64());
                return Err(classify_transport_error(e));
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;
        metrics::record_vision_call(status.as_u16(), start.elapsed().as_secs_f64());

        if status.as_u16() != 200 {
            error!("Vision API error: HTTP {} - {}", status, body);
            return Err(VisionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Vision response: {}", e);
            VisionError::Api {
                status: status.as_u16(),
                body: format!("Response parsing error: {}", e),
            }
        })?;

        debug!("Vision API call completed in {:?}", start.elapsed());
        Ok(value)
    }
}

/// Map reqwest transport failures (timeout, DNS, connection refused) to the
/// network error variant, distinct from upstream API errors.
fn classify_transport_error(e: reqwest::Error) -> VisionError {
    if e.is_timeout() {
        VisionError::Network(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        VisionError::Network(format!("Connection failed: {}", e))
    } else {
        VisionError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_configuration() {
        let config = VisionConfig::default();
        assert!(matches!(
            VisionClient::new(&config),
            Err(VisionError::NotConfigured)
        ));
    }

    #[test]
    fn test_analyze_url_is_built_from_endpoint() {
        let config = VisionConfig {
            endpoint: "https://demo.cognitiveservices.azure.com".to_string(),
            key: "0123456789abcdef".to_string(),
            ..Default::default()
        };

        let client = VisionClient::new(&config).unwrap();
        assert_eq!(
            client.analyze_endpoint,
            "https://demo.cognitiveservices.azure.com/computervision/imageanalysis:analyze"
        );
    }
}
