//! API handlers for the validation server
//!
//! - `GET /health`
//! - `GET /api/rules`
//! - `POST /api/validate`
//! - `POST /api/parse`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use brd_parser::{DocumentParser, ParseOutcome};
use serde::{Deserialize, Serialize};
use shared_types::{ExtractionSummary, ParsedDocument, ValidationResult, ValidationSummary};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use validation_engine::{ReportMetrics, RuleInfo, ValidationEngine};

use crate::error::ServerError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<DocumentParser>,
    pub engine: ValidationEngine,
    pub max_content_bytes: usize,
}

/// Request body limit for a given `content` limit, leaving room for JSON
/// escaping and the other request fields
pub fn body_limit(max_content_bytes: usize) -> usize {
    max_content_bytes.saturating_mul(2).saturating_add(64 * 1024)
}

/// Router with every endpoint and the shared middleware
pub fn router(state: AppState) -> Router {
    let request_limit = body_limit(state.max_content_bytes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/rules", get(handle_list_rules))
        .route("/api/validate", post(handle_validate))
        .route("/api/parse", post(handle_parse))
        .layer(DefaultBodyLimit::max(request_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "brd-validator",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct RulesResponse {
    pub success: bool,
    pub rules: Vec<RuleInfo>,
    pub count: usize,
}

/// Handler: GET /api/rules
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<RulesResponse> {
    let rules = state.engine.registry().describe();
    let count = rules.len();
    Json(RulesResponse {
        success: true,
        rules,
        count,
    })
}

/// Body of both POST endpoints
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    /// Free text, or a JSON document when `structured` is set
    pub content: String,
    #[serde(default)]
    pub structured: bool,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub document: ParsedDocument,
    pub parsing_errors: Vec<String>,
    pub extraction: ExtractionSummary,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub valid: bool,
    pub document: ParsedDocument,
    pub parsing_errors: Vec<String>,
    pub extraction: ExtractionSummary,
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
    pub metrics: ReportMetrics,
}

/// Unwrap the JSON body and enforce the `content` size limit
fn read_request(
    payload: Result<Json<DocumentRequest>, JsonRejection>,
    limit: usize,
) -> Result<DocumentRequest, ServerError> {
    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::BodyTooLarge {
                limit: body_limit(limit),
            }
        } else {
            ServerError::InvalidRequest(rejection.body_text())
        }
    })?;

    let size = req.content.len();
    if size > limit {
        return Err(ServerError::PayloadTooLarge { size, limit });
    }
    Ok(req)
}

/// Handler: POST /api/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>, ServerError> {
    let req = read_request(payload, state.max_content_bytes)?;
    debug!(bytes = req.content.len(), structured = req.structured, "Parse request");

    let parser = Arc::clone(&state.parser);
    let outcome =
        tokio::task::spawn_blocking(move || parser.parse(&req.content, req.structured)).await?;

    let extraction = outcome.extraction_summary();
    let ParseOutcome {
        document,
        parsing_errors,
    } = outcome;

    Ok(Json(ParseResponse {
        success: true,
        document,
        parsing_errors,
        extraction,
    }))
}

/// Handler: POST /api/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ServerError> {
    let req = read_request(payload, state.max_content_bytes)?;
    info!(bytes = req.content.len(), structured = req.structured, "Validate request");

    let parser = Arc::clone(&state.parser);
    let engine = state.engine.clone();
    let (outcome, report) = tokio::task::spawn_blocking(move || {
        let outcome = parser.parse(&req.content, req.structured);
        let report = engine.validate(&outcome.document);
        (outcome, report)
    })
    .await?;

    let extraction = outcome.extraction_summary();
    let metrics = report.metrics();
    let valid = report.is_document_valid();
    let (results, summary) = report.into_parts();

    Ok(Json(ValidateResponse {
        success: true,
        valid,
        document: outcome.document,
        parsing_errors: outcome.parsing_errors,
        extraction,
        results,
        summary,
        metrics,
    }))
}
