//! HTTP route handlers.
//!
//! - `POST /mutant`: `200` for mutant, `403` for human, `400` for invalid dna.
//! - `GET /stats`: aggregate counts and ratio.
//! - `GET /health`: liveness probe.

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use mutant::core::types::Stats;
use mutant::service::{CheckError, Checked};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/mutant", post(check_mutant))
        .route("/stats", get(get_stats))
}

#[derive(Debug, Deserialize)]
pub struct DnaRequest {
    pub dna: Vec<String>,
}

/// JSON body returned with every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub timestamp: String,
}

/// Handler error rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        if err.is_client_error() {
            return ApiError::bad_request(err.to_string());
        }
        warn!(error = %err, "dna check failed");
        ApiError::internal("failed to record verdict")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (self.status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

/// POST /mutant - classify a dna sample.
async fn check_mutant(
    State(state): State<AppState>,
    payload: Result<Json<DnaRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    // Scanning is CPU-bound and the file store writes synchronously.
    let service = state.service.clone();
    let checked: Checked = tokio::task::spawn_blocking(move || service.check(&request.dna))
        .await
        .map_err(|err| {
            warn!(error = %err, "dna check task failed");
            ApiError::internal("dna check task failed")
        })??;

    debug!(
        fingerprint = %checked.fingerprint,
        verdict = checked.verdict.label(),
        cached = checked.cached,
        "dna checked"
    );
    if checked.verdict.is_mutant() {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::FORBIDDEN)
    }
}

/// GET /stats - mutant/human counts and ratio.
async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let stats = state.service.stats().map_err(|err| {
        warn!(error = %err, "stats failed");
        ApiError::internal("failed to read stats")
    })?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use mutant::io::store::{JsonFileStore, MemoryStore};
    use mutant::service::MutantService;
    use tower::ServiceExt;

    use super::*;

    const MUTANT: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
    const HUMAN: [&str; 6] = ["ATGCGA", "CAGTGC", "TTATTT", "AGACGG", "GCGTCA", "TCACTG"];

    fn state() -> AppState {
        AppState::new(MutantService::new(Box::new(MemoryStore::new()), 1000))
    }

    fn request(rows: &[&str]) -> Result<Json<DnaRequest>, JsonRejection> {
        Ok(Json(DnaRequest {
            dna: rows.iter().map(|row| row.to_string()).collect(),
        }))
    }

    async fn submit(state: &AppState, rows: &[&str]) -> Response {
        check_mutant(State(state.clone()), request(rows))
            .await
            .into_response()
    }

    /// Send a raw request through the full router.
    async fn send(request: Request<Body>) -> Response {
        router()
            .with_state(state())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    fn post_mutant(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/mutant");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).expect("request")
    }

    async fn assert_bad_request(response: Response) {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.status, 400);
        assert!(!body.message.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse body")
    }

    #[tokio::test]
    async fn mutant_returns_ok() {
        let response = submit(&state(), &MUTANT).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn human_returns_forbidden() {
        let response = submit(&state(), &HUMAN).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_dna_returns_bad_request_with_message() {
        let response = submit(&state(), &["ATGX", "CAGT"]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.status, 400);
        assert!(body.message.contains("only A, T, C and G are allowed"));
        assert!(!body.timestamp.is_empty());
    }

    #[tokio::test]
    async fn empty_dna_returns_bad_request() {
        let response = submit(&state(), &[]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.message, "dna must not be empty");
    }

    #[tokio::test]
    async fn valid_json_through_router_is_classified() {
        let response = send(post_mutant(
            Some("application/json"),
            r#"{"dna":["ATGCGA","CAGTGC","TTATGT","AGAAGG","CCCCTA","TCACTG"]}"#,
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_returns_bad_request() {
        let response = send(post_mutant(Some("application/json"), r#"{"dna": ["#)).await;
        assert_bad_request(response).await;
    }

    #[tokio::test]
    async fn missing_content_type_returns_bad_request() {
        let response = send(post_mutant(None, r#"{"dna":["AAAA","TTTT","CCCC","GGGG"]}"#)).await;
        assert_bad_request(response).await;
    }

    #[tokio::test]
    async fn body_without_dna_field_returns_bad_request() {
        let response = send(post_mutant(
            Some("application/json"),
            r#"{"rows":["AAAA","TTTT","CCCC","GGGG"]}"#,
        ))
        .await;
        assert_bad_request(response).await;
    }

    #[tokio::test]
    async fn stats_count_distinct_samples() {
        let state = state();
        submit(&state, &MUTANT).await;
        submit(&state, &MUTANT).await;
        submit(&state, &HUMAN).await;
        submit(&state, &["ACGT", "TGCA", "ACGT", "TGCA"]).await;

        let response = get_stats(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let stats: serde_json::Value = body_json(response).await;
        assert_eq!(
            stats,
            serde_json::json!({
                "count_mutant_dna": 1,
                "count_human_dna": 2,
                "ratio": 0.5
            })
        );
    }

    #[tokio::test]
    async fn stats_ratio_is_null_without_humans() {
        let state = state();
        submit(&state, &MUTANT).await;
        let stats: serde_json::Value =
            body_json(get_stats(State(state)).await.into_response()).await;
        assert_eq!(stats["ratio"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn verdicts_survive_restart_with_file_store() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("verdicts.json");
        let open = || {
            let store = JsonFileStore::open(&path).expect("open store");
            AppState::new(MutantService::new(Box::new(store), 1000))
        };

        submit(&open(), &MUTANT).await;
        let stats: Stats = body_json(get_stats(State(open())).await.into_response()).await;
        assert_eq!(stats.count_mutant_dna, 1);
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }
}
