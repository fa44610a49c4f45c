//! Simulated device identity and location.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Placeholder used for both device ids unless configured otherwise.
pub const DEFAULT_DEVICE_ID: &str = "default";

// ============================================================================
// DeviceIdentity
// ============================================================================

/// Model and instance ids the assistant sees for the simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    pub model_id: String,
    pub instance_id: String,
}

impl DeviceIdentity {
    pub fn new(model_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_ID, DEFAULT_DEVICE_ID)
    }
}

// ============================================================================
// LatLng
// ============================================================================

/// Device coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either coordinate is out of range
    /// or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::validation(format!(
                "Latitude out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::validation(format!(
                "Longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for LatLng {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| DomainError::parse(format!("Expected 'lat,lng', got '{s}'")))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| DomainError::parse(format!("Invalid latitude '{lat}': {e}")))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| DomainError::parse(format!("Invalid longitude '{lng}': {e}")))?;
        Self::new(latitude, longitude)
    }
}
