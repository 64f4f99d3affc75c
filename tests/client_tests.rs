// Vision client tests against a mock upstream

use mockito::{Matcher, Server};
use vizor::config::VisionConfig;
use vizor::error::VisionError;
use vizor::vision::{Feature, VisionClient};

fn test_config(endpoint: &str) -> VisionConfig {
    VisionConfig {
        endpoint: endpoint.trim_end_matches('/').to_string(),
        key: "test-key".to_string(),
        ..Default::default()
    }
}

const IMAGE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn test_analyze_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api-version".into(), "2024-02-01".into()),
            Matcher::UrlEncoded("features".into(), "caption,tags".into()),
        ]))
        .match_header("ocp-apim-subscription-key", "test-key")
        .match_header("content-type", "application/octet-stream")
        .with_status(200)
        .with_body(
            r#"{"captionResult":{"text":"a cat","confidence":0.9},
                "tagsResult":{"values":[{"name":"cat","confidence":0.95}]}}"#,
        )
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let result = client
        .analyze(IMAGE, &[Feature::Caption, Feature::Tags])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.caption_result.unwrap().text, "a cat");
    assert_eq!(result.tags_result.unwrap().values[0].name, "cat");
}

#[tokio::test]
async fn test_analyze_sends_exact_feature_subset() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::UrlEncoded(
            "features".into(),
            "read,denseCaptions,people".into(),
        ))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    client
        .analyze(IMAGE, &[Feature::Read, Feature::DenseCaptions, Feature::People])
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_yields_api_error_with_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Access denied due to invalid subscription key")
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let error = client.analyze(IMAGE, &[Feature::Caption]).await.unwrap_err();

    match error {
        VisionError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid subscription key"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_throttled_yields_api_error_with_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("Rate limit is exceeded")
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let error = client.analyze(IMAGE, &[Feature::Caption]).await.unwrap_err();

    match error {
        VisionError::Api { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("Rate limit"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_yields_network_error() {
    // Nothing listens on this port
    let client = VisionClient::new(&test_config("http://127.0.0.1:9")).unwrap();
    let error = client.analyze(IMAGE, &[Feature::Caption]).await.unwrap_err();

    assert!(matches!(error, VisionError::Network(_)));
}

#[tokio::test]
async fn test_analyze_url_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::UrlEncoded("features".into(), "caption".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "url": "https://example.com/cat.jpg"
        })))
        .with_status(200)
        .with_body(r#"{"captionResult":{"text":"a cat","confidence":0.9}}"#)
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let result = client
        .analyze_url("https://example.com/cat.jpg", &[Feature::Caption])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.caption_result.unwrap().text, "a cat");
}

#[tokio::test]
async fn test_empty_image_is_rejected_before_any_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let error = client.analyze(&[], &[Feature::Caption]).await.unwrap_err();

    assert!(matches!(error, VisionError::InvalidRequest(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_feature_set_is_rejected_before_any_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/computervision/imageanalysis:analyze")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = VisionClient::new(&test_config(&server.url())).unwrap();
    let error = client.analyze(IMAGE, &[]).await.unwrap_err();

    assert!(matches!(error, VisionError::InvalidRequest(_)));
    mock.assert_async().await;
}

#[test]
fn test_unconfigured_client_cannot_be_built() {
    // Missing endpoint and key: construction refuses, so no network call
    // can ever be attempted by an unconfigured process.
    let error = VisionClient::new(&VisionConfig::default()).unwrap_err();
    assert!(matches!(error, VisionError::NotConfigured));
}
