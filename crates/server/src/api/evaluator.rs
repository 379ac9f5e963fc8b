//! Strategy evaluation endpoint: ranks the fixed strategy set over
//! synthetic or caller-observed samples.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use upp_core::{MetricSample, Strategy};
use upp_scoring::strategy::evaluator;
use upp_scoring::{StrategyResult, DEFAULT_ITERATIONS};

use super::FailureResponse;
use crate::state::AppState;

/// Upper bound on requested draws per strategy.
const MAX_ITERATIONS: usize = 100_000;

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    /// Observed samples to resample instead of synthetic generation.
    #[schema(value_type = Option<Vec<Object>>)]
    pub real_data: Option<Vec<MetricSample>>,
    /// Draws per strategy (default 1000).
    pub iterations: Option<usize>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EvaluateResponse {
    pub success: bool,
    pub recommendation: String,
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<StrategyResult>,
    pub summary: EvaluationSummary,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub best_strategy: String,
    pub combined_score: f64,
    pub avg_response_time: f64,
    pub avg_energy_cost: f64,
}

#[utoipa::path(
    post,
    path = "/upp-evaluator",
    tag = "Evaluation",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Ranked strategy results", body = EvaluateResponse),
        (status = 500, description = "Evaluation failed", body = FailureResponse)
    )
)]
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, (StatusCode, Json<FailureResponse>)> {
    // An unparsable body degrades to an all-synthetic run with defaults.
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(
                "unparsable evaluation request ({}) — falling back to synthetic run",
                rejection
            );
            EvaluateRequest::default()
        }
    };

    let iterations = req
        .iterations
        .unwrap_or(DEFAULT_ITERATIONS)
        .clamp(1, MAX_ITERATIONS);
    let mut rng = StdRng::from_entropy();

    let evaluation = evaluator::evaluate(
        &mut rng,
        &Strategy::ALL,
        req.real_data.as_deref(),
        iterations,
        &state.weights,
    )
    .map_err(|e| failure(e.to_string()))?;

    let Some(best) = evaluation.best() else {
        return Err(failure("evaluation produced no results".to_string()));
    };
    let summary = EvaluationSummary {
        best_strategy: best.strategy.clone(),
        combined_score: best.combined_score,
        avg_response_time: best.avg_response_time,
        avg_energy_cost: best.avg_energy_cost,
    };

    Ok(Json(EvaluateResponse {
        success: true,
        recommendation: evaluation.recommendation.clone(),
        results: evaluation.results,
        summary,
    }))
}

fn failure(error: String) -> (StatusCode, Json<FailureResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::new(error)),
    )
}
