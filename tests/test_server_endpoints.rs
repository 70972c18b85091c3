//! Integration tests for the HTTP surface
//!
//! Drives the full warp route tree with a mocked generation provider and
//! asserts on response shapes, rejection behavior, and request isolation.

use std::sync::Arc;
use std::time::Duration;
use studygen::agents::AgentExecutor;
use studygen::pipeline::StudyPipeline;
use studygen::server::{routes, BANNER};
use studygen::testing::mocks::RecordingProvider;
use warp::http::StatusCode;

fn filter_over(
    provider: Arc<RecordingProvider>,
) -> impl warp::Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    routes(Arc::new(StudyPipeline::new(AgentExecutor::new(
        provider,
        "mock-model".to_string(),
        Some(0.3),
        None,
    ))))
}

#[tokio::test]
async fn test_root_route_returns_liveness_banner() {
    let filter = filter_over(Arc::new(RecordingProvider::default()));

    let response = warp::test::request()
        .method("GET")
        .path("/")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["message"], BANNER);
}

#[tokio::test]
async fn test_health_route_reports_ok() {
    let filter = filter_over(Arc::new(RecordingProvider::default()));

    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_metrics_route_returns_snapshot() {
    let filter = filter_over(Arc::new(RecordingProvider::default()));

    let response = warp::test::request()
        .method("GET")
        .path("/metrics")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body.get("requests").is_some());
    assert!(body.get("generation").is_some());
    assert!(body.get("uptime_seconds").is_some());
}

#[tokio::test]
async fn test_summarize_returns_summary_field() {
    let provider = Arc::new(RecordingProvider::new(vec![
        "SUMMARY-MARKER-9X".to_string()
    ]));
    let filter = filter_over(provider.clone());

    let response = warp::test::request()
        .method("POST")
        .path("/summarize")
        .json(&serde_json::json!({"text": "cells divide by mitosis"}))
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["summary"], "SUMMARY-MARKER-9X");
    assert_eq!(provider.call_count().await, 1);
}

#[tokio::test]
async fn test_generate_study_material_returns_three_fields() {
    let provider = Arc::new(RecordingProvider::new(vec![
        "TOPICS-MARKER".to_string(),
        "NOTES-MARKER".to_string(),
        "MCQS-MARKER".to_string(),
    ]));
    let filter = filter_over(provider.clone());

    let response = warp::test::request()
        .method("POST")
        .path("/generate_study_material")
        .json(&serde_json::json!({"text": "some chapter", "num_mcqs": 3}))
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["topics"], "TOPICS-MARKER");
    assert_eq!(body["notes"], "NOTES-MARKER");
    assert_eq!(body["mcqs"], "MCQS-MARKER");
    assert_eq!(body.as_object().unwrap().len(), 3);

    // The requested count reached the MCQ stage instruction
    let requests = provider.recorded_requests().await;
    assert!(requests[2].messages[1]
        .content
        .contains("Create around 3 MCQs."));
}

#[tokio::test]
async fn test_missing_text_field_is_rejected_before_any_generation() {
    let provider = Arc::new(RecordingProvider::default());
    let filter = filter_over(provider.clone());

    let response = warp::test::request()
        .method("POST")
        .path("/generate_study_material")
        .json(&serde_json::json!({"num_mcqs": 5}))
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count().await, 0);
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected_before_any_generation() {
    let provider = Arc::new(RecordingProvider::default());
    let filter = filter_over(provider.clone());

    let response = warp::test::request()
        .method("POST")
        .path("/summarize")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count().await, 0);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_as_opaque_server_error() {
    let provider = Arc::new(RecordingProvider::with_failure());
    let filter = filter_over(provider);

    let response = warp::test::request()
        .method("POST")
        .path("/summarize")
        .json(&serde_json::json!({"text": "anything"}))
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["error"], "generation failed");
}

#[tokio::test]
async fn test_partial_stage_success_still_fails_the_whole_request() {
    let provider = Arc::new(RecordingProvider::failing_after(vec![
        "TOPICS".to_string(),
        "NOTES".to_string(),
    ]));
    let filter = filter_over(provider.clone());

    let response = warp::test::request()
        .method("POST")
        .path("/generate_study_material")
        .json(&serde_json::json!({"text": "chapter"}))
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body.get("topics").is_none());
    assert!(body.get("notes").is_none());
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_own_results() {
    let provider = Arc::new(RecordingProvider::echoing_with_delay(
        Duration::from_millis(50),
    ));
    let filter = filter_over(provider);

    let request_a = warp::test::request()
        .method("POST")
        .path("/summarize")
        .json(&serde_json::json!({"text": "alpha-marker chapter"}))
        .reply(&filter);
    let request_b = warp::test::request()
        .method("POST")
        .path("/summarize")
        .json(&serde_json::json!({"text": "beta-marker chapter"}))
        .reply(&filter);

    let (response_a, response_b) = futures::join!(request_a, request_b);

    assert_eq!(response_a.status(), StatusCode::OK);
    assert_eq!(response_b.status(), StatusCode::OK);

    let body_a: serde_json::Value = serde_json::from_slice(response_a.body()).unwrap();
    let body_b: serde_json::Value = serde_json::from_slice(response_b.body()).unwrap();

    let summary_a = body_a["summary"].as_str().unwrap();
    let summary_b = body_b["summary"].as_str().unwrap();

    assert!(summary_a.contains("alpha-marker"));
    assert!(!summary_a.contains("beta-marker"));
    assert!(summary_b.contains("beta-marker"));
    assert!(!summary_b.contains("alpha-marker"));
}

#[tokio::test]
async fn test_cross_origin_request_is_allowed() {
    let filter = filter_over(Arc::new(RecordingProvider::default()));

    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .header("origin", "https://example.com")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_preflight_request_is_answered() {
    let filter = filter_over(Arc::new(RecordingProvider::default()));

    let response = warp::test::request()
        .method("OPTIONS")
        .path("/summarize")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-methods"));
}
