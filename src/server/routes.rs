//! API route handlers

use crate::domain::model::{ErrorResponse, HealthResponse, PredictionResponse};
use crate::domain::ports::ModelMetadata;
use crate::server::AppState;
use crate::utils::error::ServeError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

/// 500 時回給呼叫端的固定訊息，內部細節只寫 log
const INTERNAL_ERROR_MESSAGE: &str = "prediction failed";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn bad_request(error: String, field: Option<&str>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error,
                field: field.map(str::to_string),
            },
        }
    }
}

impl From<ServeError> for ApiError {
    fn from(err: ServeError) -> Self {
        if err.is_client_error() {
            tracing::info!("Rejected request: {}", err);
            return Self::bad_request(err.to_string(), err.field());
        }

        let cause = std::error::Error::source(&err).map(|source| source.to_string());
        tracing::error!(
            category = ?err.category(),
            severity = ?err.severity(),
            cause = cause.as_deref().unwrap_or("none"),
            "❌ Prediction failed: {}",
            err
        );
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                field: None,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::info!("Rejected request body: {}", rejection.body_text());
        Self::bad_request(
            format!("Invalid request payload: {}", rejection.body_text()),
            None,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(payload) = payload?;
    let result = state.service.predict_payload(&payload)?;

    Ok(Json(result.into()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.service.store();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        estimator: store.estimator().kind().to_string(),
        loaded_at: store.loaded_at(),
    })
}
