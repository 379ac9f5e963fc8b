//! Engagement scoring: decide per interaction sample whether to surface
//! the offer or keep monitoring.

use upp_core::{GeoContext, InteractionSample, UppError};

/// Standard hesitation window in milliseconds.
pub const TASK_HORIZON_MS: f64 = 1500.0;
/// Horizon widening applied when geolocation is unresolved.
pub const GEO_PENALTY_MS: f64 = 200.0;
/// Combined signal required to fire the offer (strictly greater-than).
pub const CONVERSION_THRESHOLD: f64 = 7.5;

/// Velocity below this reads as extreme focus (almost stopped).
const FOCUS_VELOCITY: f64 = 0.05;
/// Velocity below this, and above `FOCUS_VELOCITY`, reads as hesitation.
const HESITATION_VELOCITY: f64 = 0.2;

const FOCUS_BONUS: f64 = 6.0;
const HESITATION_BONUS: f64 = 4.0;
const INTENT_BONUS: f64 = 4.0;

/// Outcome of one engagement evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Surface the offer, carrying the combined signal and observed latency.
    TriggerOffer { confidence: f64, latency_ms: f64 },
    /// Signal too weak — keep monitoring.
    Monitor,
}

/// Latency between client timestamp and server clock, clamped at zero to
/// tolerate client clocks running ahead.
pub fn latency_correction(now_ms: i64, t_client_ms: i64) -> f64 {
    (now_ms - t_client_ms).max(0) as f64
}

/// Hesitation window, widened when the visitor's location is unresolved.
pub fn adjusted_horizon(geo: &GeoContext) -> f64 {
    if geo.is_unknown() {
        TASK_HORIZON_MS + GEO_PENALTY_MS
    } else {
        TASK_HORIZON_MS
    }
}

/// Fidelity = max(0, 1 - L/T): 1.0 at zero latency, 0.0 at or beyond the
/// horizon. `horizon_ms` must be positive.
pub fn fidelity(latency_ms: f64, horizon_ms: f64) -> f64 {
    debug_assert!(horizon_ms > 0.0);
    (1.0 - latency_ms / horizon_ms).max(0.0)
}

/// Additive interest heuristic over velocity and hover target. The hover
/// bonus stacks on top of whichever velocity band applies.
pub fn interest_score(velocity: f64, hover: &str) -> f64 {
    let mut interest = 0.0;
    if velocity < FOCUS_VELOCITY {
        interest += FOCUS_BONUS;
    } else if velocity < HESITATION_VELOCITY {
        interest += HESITATION_BONUS;
    }
    if hover == "BUTTON" || hover == "A" {
        interest += INTENT_BONUS;
    }
    interest
}

/// Evaluate one interaction sample against the current wall clock.
///
/// Pure in its three inputs: no state survives the call.
pub fn evaluate(
    sample: &InteractionSample,
    now_ms: i64,
    geo: &GeoContext,
) -> Result<Decision, UppError> {
    if !sample.v.is_finite() || sample.v < 0.0 {
        return Err(UppError::InvalidInput(format!(
            "velocity must be a non-negative number, got {}",
            sample.v
        )));
    }

    let latency = latency_correction(now_ms, sample.t_client);
    let horizon = adjusted_horizon(geo);
    let signal = interest_score(sample.v, &sample.hover) * fidelity(latency, horizon);

    if signal > CONVERSION_THRESHOLD {
        Ok(Decision::TriggerOffer {
            confidence: (signal * 100.0).round() / 100.0,
            latency_ms: latency,
        })
    } else {
        Ok(Decision::Monitor)
    }
}
