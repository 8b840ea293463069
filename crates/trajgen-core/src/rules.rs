//! Feasibility limits applied when validating candidate paths.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityLimits {
    /// Maximum allowed curvature (rad per unit length)
    pub max_curvature: f64,
    /// Minimum allowed altitude
    pub min_altitude: f64,
    /// Maximum allowed altitude
    pub max_altitude: f64,
}

impl Default for ValidityLimits {
    fn default() -> Self {
        Self {
            max_curvature: 0.5,
            min_altitude: 0.0,
            max_altitude: 500.0,
        }
    }
}

impl ValidityLimits {
    pub fn altitude_in_range(&self, altitude: f64) -> bool {
        altitude >= self.min_altitude && altitude <= self.max_altitude
    }
}
