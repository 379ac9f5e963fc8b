//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area; shared response
//! types live here in mod.rs.

mod decision;
pub mod doc;
mod evaluator;
mod fidelity;
mod health;

use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

/// Generic failure body for the decision endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure body for the success-flagged endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by router registration.

pub use decision::decide;
pub use evaluator::evaluate;
pub use fidelity::fidelity;
pub use health::health;
