//! Parameterized fidelity endpoint: applies the configured coefficients to
//! one latency/horizon observation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use upp_scoring::fidelity::checked_metric;

use super::FailureResponse;
use crate::state::AppState;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct FidelityRequest {
    /// Observed latency in milliseconds.
    #[serde(rename = "latency_L")]
    pub latency: Option<f64>,
    /// Adjusted time horizon in milliseconds (must be positive).
    #[serde(rename = "adjusted_T")]
    pub horizon: Option<f64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FidelityResponse {
    pub success: bool,
    pub fidelity: f64,
}

#[utoipa::path(
    post,
    path = "/upp-fidelity",
    tag = "Scoring",
    request_body = FidelityRequest,
    responses(
        (status = 200, description = "Computed fidelity", body = FidelityResponse),
        (status = 500, description = "Malformed input", body = FailureResponse)
    )
)]
pub async fn fidelity(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FidelityRequest>, JsonRejection>,
) -> Result<Json<FidelityResponse>, (StatusCode, Json<FailureResponse>)> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return Err(failure(rejection.to_string())),
    };

    let (Some(latency), Some(horizon)) = (req.latency, req.horizon) else {
        return Err(failure(
            "missing required fields: latency_L and adjusted_T are required".to_string(),
        ));
    };

    let fidelity =
        checked_metric(latency, horizon, &state.fidelity).map_err(|e| failure(e.to_string()))?;

    Ok(Json(FidelityResponse {
        success: true,
        fidelity,
    }))
}

fn failure(error: String) -> (StatusCode, Json<FailureResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::new(error)),
    )
}
