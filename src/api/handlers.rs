use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::model::Label;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint.
///
/// Reports whether the classifier artifact loaded at startup. 200 when the
/// service can predict, 500 when it is running degraded.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.service.is_ready() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                message: "service is running".to_string(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "error".to_string(),
                message: "classifier artifact is not loaded".to_string(),
            }),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Classify one review.
///
/// The `Json` extractor is taken as a `Result` so that every malformed body
/// (syntax error, wrong type, missing field) maps to 400 rather than axum's
/// default 422.
pub async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    // Fail fast when the artifact never loaded, before looking at the body
    if !state.service.is_ready() {
        return Err(AppError::ModelUnavailable(
            state
                .service
                .load_error()
                .unwrap_or("classifier not loaded")
                .to_string(),
        ));
    }

    let Json(request) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    request.validate()?;

    let prediction = state.service.predict(&request.review)?;

    tracing::info!(
        label = %prediction.label,
        confidence = prediction.confidence,
        processing_time = prediction.processing_time,
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        label: prediction.label,
        confidence: prediction.confidence,
        processing_time: prediction.processing_time,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, message = "review must not be empty"))]
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: Label,
    pub confidence: f64,
    pub processing_time: f64,
}
