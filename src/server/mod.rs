//! HTTP/JSON surface for the study material service
//!
//! Routes are plain warp filters over a shared pipeline handle. Request
//! bodies are validated by deserialization before any generation call is
//! attempted; upstream generation failures surface as opaque server errors.

use crate::error::{sanitize_error_message, ErrorBody, ServiceError};
use crate::llm::provider::LlmError;
use crate::observability::metrics::metrics;
use crate::pipeline::{StudyPipeline, DEFAULT_NUM_MCQS};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, Instrument};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Liveness banner returned on the root route
pub const BANNER: &str = "Study Material Generator API is running";

/// Request body for the summarization flow
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// Response body for the summarization flow
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Request body for the study material flow
#[derive(Debug, Clone, Deserialize)]
pub struct StudyMaterialRequest {
    pub text: String,
    /// Requested MCQ count; passed through to the prompt unvalidated
    #[serde(default = "default_num_mcqs")]
    pub num_mcqs: i64,
}

fn default_num_mcqs() -> i64 {
    DEFAULT_NUM_MCQS
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
}

/// Build the complete route tree over a shared pipeline
pub fn routes(
    pipeline: Arc<StudyPipeline>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let root = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&MessageResponse {
            message: BANNER.to_string(),
        })
    });

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&HealthResponse {
                status: "ok".to_string(),
            })
        });

    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&metrics().get_metrics()));

    let summarize = warp::path("summarize")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_pipeline(pipeline.clone()))
        .and_then(handle_summarize);

    let generate = warp::path("generate_study_material")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_pipeline(pipeline))
        .and_then(handle_generate_study_material);

    // Permissive CORS, a development default rather than a security boundary
    let cors = warp::cors()
        .allow_any_origin()
        .allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization", "accept", "origin"]);

    root.or(health)
        .or(metrics_route)
        .or(summarize)
        .or(generate)
        .recover(handle_rejection)
        .with(cors)
        .recover(handle_cors_rejection)
}

fn with_pipeline(
    pipeline: Arc<StudyPipeline>,
) -> impl Filter<Extract = (Arc<StudyPipeline>,), Error = Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}

async fn handle_summarize(
    request: SummarizeRequest,
    pipeline: Arc<StudyPipeline>,
) -> Result<impl Reply, Rejection> {
    metrics().record_request_received();

    let span = crate::request_span!(endpoint = "summarize");
    match pipeline.summarize(&request.text).instrument(span).await {
        Ok(summary) => {
            metrics().record_request_completed();
            Ok(warp::reply::with_status(
                warp::reply::json(&SummarizeResponse { summary }),
                StatusCode::OK,
            ))
        }
        Err(e) => Ok(generation_error_reply(e)),
    }
}

async fn handle_generate_study_material(
    request: StudyMaterialRequest,
    pipeline: Arc<StudyPipeline>,
) -> Result<impl Reply, Rejection> {
    metrics().record_request_received();

    let span = crate::request_span!(endpoint = "generate_study_material");
    match pipeline
        .generate_study_material(&request.text, request.num_mcqs)
        .instrument(span)
        .await
    {
        Ok(material) => {
            metrics().record_request_completed();
            Ok(warp::reply::with_status(
                warp::reply::json(&material),
                StatusCode::OK,
            ))
        }
        Err(e) => Ok(generation_error_reply(e)),
    }
}

/// Turn an upstream generation failure into an opaque server error
///
/// The detailed cause goes to the logs only; clients get a generic body
/// with no structured error codes.
fn generation_error_reply(e: LlmError) -> warp::reply::WithStatus<warp::reply::Json> {
    metrics().record_request_failed();
    let service_error = ServiceError::from(e);
    error!(
        error = %sanitize_error_message(&service_error.to_string()),
        "Generation request failed"
    );
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: "generation failed".to_string(),
        }),
        service_error.status_code(),
    )
}

/// Map warp rejections to JSON error bodies
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        metrics().record_request_rejected();
        (
            StatusCode::BAD_REQUEST,
            format!("invalid request body: {body_error}"),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        metrics().record_request_rejected();
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported media type".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        metrics().record_request_rejected();
        (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { error: message }),
        status,
    ))
}

/// Map CORS rejections raised by the wrapping layer
async fn handle_cors_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let status = if err.find::<warp::filters::cors::CorsForbidden>().is_some() {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: "request forbidden".to_string(),
        }),
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentExecutor;
    use crate::testing::mocks::RecordingProvider;

    fn test_pipeline(provider: Arc<RecordingProvider>) -> Arc<StudyPipeline> {
        Arc::new(StudyPipeline::new(AgentExecutor::new(
            provider,
            "mock-model".to_string(),
            None,
            None,
        )))
    }

    #[tokio::test]
    async fn test_root_returns_banner() {
        let filter = routes(test_pipeline(Arc::new(RecordingProvider::default())));

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
    async fn test_health_returns_ok_status() {
        let filter = routes(test_pipeline(Arc::new(RecordingProvider::default())));

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let filter = routes(test_pipeline(Arc::new(RecordingProvider::default())));

        let response = warp::test::request()
            .method("GET")
            .path("/nope")
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_num_mcqs_defaults_when_absent() {
        let provider = Arc::new(RecordingProvider::new(vec![
            "T".to_string(),
            "N".to_string(),
            "M".to_string(),
        ]));
        let filter = routes(test_pipeline(provider.clone()));

        let response = warp::test::request()
            .method("POST")
            .path("/generate_study_material")
            .json(&serde_json::json!({"text": "chapter"}))
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let requests = provider.recorded_requests().await;
        assert!(requests[2].messages[1]
            .content
            .contains(&format!("Create around {DEFAULT_NUM_MCQS} MCQs.")));
    }
}
