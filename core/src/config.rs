//! Session configuration — the home coordinate and simulation constants.
//!
//! These are tunables rather than embedded literals so sessions and
//! tests can run against arbitrary home locations.

use crate::error::SecurityResult;
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// The fixed home coordinate, configured once at session start.
    pub home: Coordinate,
    /// Distance below which a position classifies as Home, in kilometers.
    pub home_radius_km: f64,
    /// Degrees added to both axes by the "simulate away" action.
    pub away_offset_deg: f64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            home: Coordinate::new(37.7749, -122.4194),
            home_radius_km: 0.1,
            away_offset_deg: 0.05,
        }
    }
}

impl SecurityConfig {
    /// Load from a JSON file.
    pub fn load(path: &str) -> SecurityResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The canned position produced by the "simulate away" action.
    pub fn away_coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.home.latitude + self.away_offset_deg,
            self.home.longitude + self.away_offset_deg,
        )
    }
}
