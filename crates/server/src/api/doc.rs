//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "upp-engine API",
        version = "0.1.0",
        description = "Stateless engagement scoring and strategy evaluation services.",
    ),
    tags(
        (name = "Health", description = "Server liveness"),
        (name = "Scoring", description = "Engagement decision and fidelity metric"),
        (name = "Evaluation", description = "Strategy ranking over synthetic or observed samples"),
    ),
    paths(
        crate::api::health::health,
        crate::api::decision::decide,
        crate::api::fidelity::fidelity,
        crate::api::evaluator::evaluate,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::FailureResponse,
        crate::api::health::HealthResponse,
        crate::api::decision::DecisionRequest,
        crate::api::decision::DecisionResponse,
        crate::api::fidelity::FidelityRequest,
        crate::api::fidelity::FidelityResponse,
        crate::api::evaluator::EvaluateRequest,
        crate::api::evaluator::EvaluateResponse,
        crate::api::evaluator::EvaluationSummary,
    ))
)]
pub struct ApiDoc;
