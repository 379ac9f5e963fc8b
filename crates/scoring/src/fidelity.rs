//! Parameterized variant of the fidelity formula.
//!
//! Computes `max(0, constant1 - (L / T) * scaleFactor)` with coefficients
//! injected from configuration. Kept separate from `engagement::fidelity`:
//! the two are deployed as A/B variants and may diverge via config.

use upp_core::config::FidelityConstants;
use upp_core::UppError;

/// The externally tunable fidelity metric. With the default `{1, 1}`
/// constants it agrees with `engagement::fidelity`.
pub fn proprietary_metric(latency_ms: f64, horizon_ms: f64, constants: &FidelityConstants) -> f64 {
    (constants.constant1 - (latency_ms / horizon_ms) * constants.scale_factor).max(0.0)
}

/// Validate raw endpoint inputs before applying the metric.
pub fn checked_metric(
    latency_ms: f64,
    horizon_ms: f64,
    constants: &FidelityConstants,
) -> Result<f64, UppError> {
    if !latency_ms.is_finite() || latency_ms < 0.0 {
        return Err(UppError::InvalidInput(format!(
            "latency_L must be a non-negative number, got {}",
            latency_ms
        )));
    }
    if !horizon_ms.is_finite() || horizon_ms <= 0.0 {
        return Err(UppError::InvalidInput(format!(
            "adjusted_T must be a positive number, got {}",
            horizon_ms
        )));
    }
    Ok(proprietary_metric(latency_ms, horizon_ms, constants))
}
