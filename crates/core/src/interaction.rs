use serde::{Deserialize, Serialize};

/// One visitor interaction sample reported by the in-page sensor.
///
/// Ephemeral — exists only for the duration of a single decision request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSample {
    /// Client-side timestamp in milliseconds since the epoch.
    pub t_client: i64,
    /// Pointer velocity in pixels per millisecond (non-negative).
    pub v: f64,
    /// Tag name of the hovered element ("BUTTON", "A", "DIV", ...).
    pub hover: String,
}

/// Geolocation context attached to a decision request.
///
/// Edge runtimes forward the resolved city; when it is absent or the
/// literal "Unknown", the scorer widens the hesitation window to absorb
/// network-distance risk.
#[derive(Debug, Clone, Default)]
pub struct GeoContext {
    pub city: Option<String>,
}

impl GeoContext {
    pub fn known(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self.city.as_deref() {
            None | Some("") | Some("Unknown") => true,
            Some(_) => false,
        }
    }
}
