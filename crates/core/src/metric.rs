use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of caching/routing strategies compared by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    CacheFirst,
    DbPriority,
    EdgeCompute,
    Hybrid,
}

impl Strategy {
    /// Evaluation order — ties on the combined score resolve to the
    /// earliest entry.
    pub const ALL: [Strategy; 4] = [
        Strategy::CacheFirst,
        Strategy::DbPriority,
        Strategy::EdgeCompute,
        Strategy::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::CacheFirst => "cache-first",
            Strategy::DbPriority => "db-priority",
            Strategy::EdgeCompute => "edge-compute",
            Strategy::Hybrid => "hybrid",
        }
    }

    pub fn from_name(name: &str) -> Option<Strategy> {
        Strategy::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observed (or synthesized) performance sample for a strategy.
///
/// Strategy identity stays a plain string at the wire level: callers may
/// submit names outside the known set, which simply never match any
/// evaluated strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub strategy: String,
    pub response_time_ms: f64,
    pub energy_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricSample {
    pub fn new(strategy: impl Into<String>, response_time_ms: f64, energy_cost: f64) -> Self {
        Self {
            strategy: strategy.into(),
            response_time_ms,
            energy_cost,
            timestamp: None,
        }
    }

    /// A sample is usable when both observations are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.response_time_ms.is_finite()
            && self.response_time_ms > 0.0
            && self.energy_cost.is_finite()
            && self.energy_cost > 0.0
    }
}
