//! Session state — the user-visible toggles plus the derived location.

use crate::config::SecurityConfig;
use crate::geo::{self, Coordinate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmState {
    Armed,
    Disarmed,
}

impl ArmState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Armed => Self::Disarmed,
            Self::Disarmed => Self::Armed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraState {
    Active,
    Inactive,
}

impl CameraState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Home,
    Away,
}

/// The current simulated position and its classification against home.
///
/// RULE: `status` is derived from `current` — it is never set directly.
/// Every position change goes through `LocationState::classify`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub status: LocationStatus,
    pub current: Coordinate,
    pub distance_km: f64,
}

impl LocationState {
    /// Classify a position against the configured home coordinate.
    pub fn classify(config: &SecurityConfig, position: Coordinate) -> Self {
        let distance_km = geo::haversine(config.home, position);
        let status = if distance_km <= config.home_radius_km {
            LocationStatus::Home
        } else {
            LocationStatus::Away
        };
        Self {
            status,
            current: position,
            distance_km,
        }
    }
}

/// All mutable state owned by one panel session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub arm: ArmState,
    pub camera: CameraState,
    pub location: LocationState,
}

impl SessionState {
    /// Session-start defaults: disarmed, camera inactive, at home.
    pub fn initial(config: &SecurityConfig) -> Self {
        Self {
            arm: ArmState::Disarmed,
            camera: CameraState::Inactive,
            location: LocationState::classify(config, config.home),
        }
    }

    /// The debug line the panel shows under the simulation buttons.
    pub fn location_debug(&self) -> String {
        let c = self.location.current;
        match self.location.status {
            LocationStatus::Home => {
                format!("Home Location: Lat {}, Lon {}", c.latitude, c.longitude)
            }
            LocationStatus::Away => {
                format!("Away Location: Lat {}, Lon {}", c.latitude, c.longitude)
            }
        }
    }
}
