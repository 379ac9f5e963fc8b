use upp_core::config::{FidelityConstants, ScoreWeights};

use crate::live::OfferFeed;

/// Process-wide read-only configuration plus the live offer feed.
///
/// Both scoring services are stateless; nothing here mutates after startup
/// except the feed's subscriber set.
pub struct AppState {
    pub fidelity: FidelityConstants,
    pub weights: ScoreWeights,
    pub offers: OfferFeed,
}

impl AppState {
    pub fn from_config(config: &upp_core::Config) -> Self {
        Self {
            fidelity: config.fidelity,
            weights: config.weights,
            offers: OfferFeed::new(),
        }
    }
}
