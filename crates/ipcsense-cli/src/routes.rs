//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ipcsense_classifiers::{suggest_sections, SectionSuggestion};
use ipcsense_core::AnalysisOutcome;
use ipcsense_llm::{describe_failure, parse_llm_prediction, CaseReport, LlmPrediction};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::fir::{FirDraft, FirRequest};
use crate::server::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/analyze", post(analyze))
        .route("/api/predict-ipc", post(predict_ipc))
        .route("/api/predict-llm", post(predict_llm))
        .route("/api/generate-fir", post(generate_fir))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    case_text: String,
}

async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    if req.case_text.trim().is_empty() {
        return Err(AppError::InvalidRequest("Description is required".to_string()));
    }

    let outcome = state.analyzer.analyze(&req.case_text).await;
    if outcome.is_error() {
        warn!("Analysis returned a failure result");
    }
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
struct SuggestRequest {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize)]
struct SuggestResponse {
    predictions: Vec<SectionSuggestion>,
}

async fn predict_ipc(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    if req.description.is_empty() {
        return Err(AppError::InvalidRequest("Description is required".to_string()));
    }

    let predictions = suggest_sections(&state.suggester, &req.description);
    metrics::counter!("ipcsense_suggestions_total").increment(1);
    Ok(Json(SuggestResponse { predictions }))
}

#[derive(Debug, Serialize)]
struct PredictionDebug {
    raw_response: String,
    model_name: String,
    prompt: String,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    case_text: String,
    #[serde(flatten)]
    prediction: LlmPrediction,
    debug: PredictionDebug,
}

async fn predict_llm(
    State(state): State<AppState>,
    Json(report): Json<CaseReport>,
) -> Result<Json<PredictionResponse>, AppError> {
    if !report.is_complete() {
        return Err(AppError::InvalidRequest("Missing required fields".to_string()));
    }

    let prompt = report.prompt();
    info!("Requesting LLM prediction from model '{}'", state.llm.model());
    let raw_response = state.llm.generate(&prompt).await.map_err(|e| {
        error!("LLM request failed: {}", e);
        AppError::Upstream(describe_failure(&e))
    })?;

    Ok(Json(PredictionResponse {
        case_text: report.case_description,
        prediction: parse_llm_prediction(&raw_response),
        debug: PredictionDebug {
            raw_response,
            model_name: state.llm.model().to_string(),
            prompt,
        },
    }))
}

async fn generate_fir(
    State(state): State<AppState>,
    Json(req): Json<FirRequest>,
) -> Result<Json<FirDraft>, AppError> {
    let outcome = state.analyzer.analyze(&req.analysis_input()).await;
    let draft = req.draft(&outcome).map_err(|details| {
        error!("FIR analysis failed: {}", details);
        AppError::FirFailed(details)
    })?;
    Ok(Json(draft))
}

/// Handler errors
#[derive(Debug)]
enum AppError {
    InvalidRequest(String),
    Upstream(String),
    FirFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Upstream(msg) => {
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": msg }))).into_response()
            }
            AppError::FirFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to generate FIR draft",
                    "details": details,
                })),
            )
                .into_response(),
        }
    }
}
