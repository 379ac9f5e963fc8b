//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single
//! `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::state::AppState;
use crate::{api, live};

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/upp-decision", post(api::decide))
        .route("/upp-fidelity", post(api::fidelity))
        .route("/upp-evaluator", post(api::evaluate))
        .route("/ws", get(live::ws_upgrade))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
