//! Offer decision endpoint: scores one interaction sample against the
//! current wall clock and decides whether to surface the offer.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use upp_core::{GeoContext, InteractionSample};
use upp_scoring::engagement;
use upp_scoring::Decision;

use super::ErrorResponse;
use crate::live::OfferEvent;
use crate::state::AppState;

/// Offer type attached to every triggered decision.
const OFFER_TYPE: &str = "UPP_DISCOUNT";

/// Header carrying the CDN-resolved visitor city.
const GEO_CITY_HEADER: &str = "x-geo-city";

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DecisionRequest {
    /// Client timestamp in ms since the epoch.
    pub t_client: Option<i64>,
    /// Pointer velocity in px/ms.
    pub v: Option<f64>,
    /// Hovered element tag.
    #[serde(default)]
    pub hover: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(tag = "action")]
pub enum DecisionResponse {
    #[serde(rename = "TRIGGER_OFFER")]
    TriggerOffer {
        #[serde(rename = "type")]
        offer_type: &'static str,
        value: String,
        confidence: f64,
    },
    #[serde(rename = "MONITOR")]
    Monitor,
}

fn geo_from_headers(headers: &HeaderMap) -> GeoContext {
    GeoContext {
        city: headers
            .get(GEO_CITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
    }
}

#[utoipa::path(
    post,
    path = "/upp-decision",
    tag = "Scoring",
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Decision for this sample", body = DecisionResponse),
        (status = 500, description = "Malformed input", body = ErrorResponse)
    )
)]
pub async fn decide(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<DecisionRequest>, JsonRejection>,
) -> Result<Json<DecisionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return Err(invalid(rejection.to_string())),
    };

    let (Some(t_client), Some(v)) = (req.t_client, req.v) else {
        return Err(invalid(
            "missing required fields: t_client and v are required".to_string(),
        ));
    };

    let sample = InteractionSample {
        t_client,
        v,
        hover: req.hover.unwrap_or_default(),
    };
    let geo = geo_from_headers(&headers);
    let now_ms = Utc::now().timestamp_millis();

    let decision =
        engagement::evaluate(&sample, now_ms, &geo).map_err(|e| invalid(e.to_string()))?;

    match decision {
        Decision::TriggerOffer {
            confidence,
            latency_ms,
        } => {
            let value = format!(
                "system_grant: 10% OFF<br>latency_comp: {}ms",
                latency_ms as i64
            );
            debug!(
                "offer triggered (confidence {:.2}, latency {}ms)",
                confidence, latency_ms
            );
            state.offers.publish(OfferEvent {
                offer_type: OFFER_TYPE.to_string(),
                value: value.clone(),
                confidence,
                latency_ms,
            });
            Ok(Json(DecisionResponse::TriggerOffer {
                offer_type: OFFER_TYPE,
                value,
                confidence,
            }))
        }
        Decision::Monitor => Ok(Json(DecisionResponse::Monitor)),
    }
}

fn invalid(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error }))
}
