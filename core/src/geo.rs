//! Geographic primitives — coordinates and great-circle distance.
//!
//! RULE: Everything here is pure. No state, no I/O, no logging.

use crate::error::{SecurityError, SecurityResult};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in decimal degrees. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Range-checked constructor for untrusted input boundaries.
    ///
    /// The session itself accepts any pair — the location-provider
    /// contract leaves validation to callers. Use this where input
    /// crosses a trust boundary, e.g. the runner's IPC loop.
    pub fn validated(latitude: f64, longitude: f64) -> SecurityResult<Self> {
        if !(latitude.abs() <= 90.0 && longitude.abs() <= 180.0) {
            return Err(SecurityError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }
}

/// Great-circle distance between two coordinates, in kilometers.
///
/// Haversine formula on a sphere of radius 6371 km. Symmetric, zero for
/// equal inputs, non-negative for all finite inputs. NaN/inf inputs
/// propagate NaN rather than erroring.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
