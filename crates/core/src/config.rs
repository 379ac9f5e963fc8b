use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Numeric weights degrade to their default on parse failure, with a warning.
fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    match profiled_env_opt(profile, key) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("{} is not a number ({:?}) — using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub fidelity: FidelityConstants,
    pub weights: ScoreWeights,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `UPP_PROFILE`. When set (e.g. `PROD`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("UPP_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            fidelity: FidelityConstants::from_env_profiled(p),
            weights: ScoreWeights::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:    host={}, port={}", self.server.host, self.server.port);
        tracing::info!(
            "  fidelity:  constant1={}, scale_factor={}",
            self.fidelity.constant1,
            self.fidelity.scale_factor
        );
        tracing::info!(
            "  weights:   reward={}, latency={}, sustainability={}",
            self.weights.reward,
            self.weights.latency,
            self.weights.sustainability
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 3001),
        }
    }
}

// ── Fidelity constants ────────────────────────────────────────

/// Coefficients of the parameterized fidelity metric, read once at startup
/// from the JSON-encoded `SECRET_CONSTANTS` env var. Unset or malformed
/// values fall back to `{1, 1}` with a warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FidelityConstants {
    pub constant1: f64,
    #[serde(rename = "scaleFactor")]
    pub scale_factor: f64,
}

impl Default for FidelityConstants {
    fn default() -> Self {
        Self { constant1: 1.0, scale_factor: 1.0 }
    }
}

impl FidelityConstants {
    fn from_env_profiled(p: &str) -> Self {
        match profiled_env_opt(p, "SECRET_CONSTANTS") {
            Some(raw) => Self::parse(&raw),
            None => Self::default(),
        }
    }

    /// Parse the JSON payload, warning and substituting defaults on failure.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<FidelityConstants>(raw) {
            Ok(c) if c.constant1.is_finite() && c.scale_factor.is_finite() => c,
            Ok(_) => {
                tracing::warn!("SECRET_CONSTANTS contains non-finite values — using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Could not parse SECRET_CONSTANTS ({}) — using defaults", e);
                Self::default()
            }
        }
    }
}

// ── Combined-score weights ────────────────────────────────────

/// Weights of the strategy evaluator's combined score. Each defaults to 1,
/// preserving the unweighted formula when unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub reward: f64,
    pub latency: f64,
    pub sustainability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { reward: 1.0, latency: 1.0, sustainability: 1.0 }
    }
}

impl ScoreWeights {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            reward: profiled_env_f64(p, "UPP_REWARD_WEIGHT", 1.0),
            latency: profiled_env_f64(p, "UPP_LATENCY_WEIGHT", 1.0),
            sustainability: profiled_env_f64(p, "UPP_SUSTAINABILITY_WEIGHT", 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_parse_valid_json() {
        let c = FidelityConstants::parse(r#"{"constant1": 2.5, "scaleFactor": 0.5}"#);
        assert_eq!(c.constant1, 2.5);
        assert_eq!(c.scale_factor, 0.5);
    }

    #[test]
    fn constants_default_on_malformed_json() {
        let c = FidelityConstants::parse("not json at all");
        assert_eq!(c.constant1, 1.0);
        assert_eq!(c.scale_factor, 1.0);
    }

    #[test]
    fn constants_default_on_wrong_shape() {
        let c = FidelityConstants::parse(r#"{"constant1": "two"}"#);
        assert_eq!(c.constant1, 1.0);
        assert_eq!(c.scale_factor, 1.0);
    }

    #[test]
    fn constants_ignore_extra_fields() {
        let c = FidelityConstants::parse(r#"{"constant1": 3.0, "scaleFactor": 1.5, "note": "x"}"#);
        assert_eq!(c.constant1, 3.0);
        assert_eq!(c.scale_factor, 1.5);
    }

    #[test]
    fn weights_default_to_one() {
        let w = ScoreWeights::default();
        assert_eq!((w.reward, w.latency, w.sustainability), (1.0, 1.0, 1.0));
    }
}
