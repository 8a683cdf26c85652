//! Small value types shared by the services and the HTTP layer.

use serde::{Deserialize, Serialize};

pub use crate::entities::{EngineType, OnlineStatus, RecordStatus};
use crate::errors::domain::{DomainError, ValidationKind};

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MIN_LATITUDE: f64 = -90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;
    pub const MIN_LONGITUDE: f64 = -180.0;

    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(Self::MIN_LATITUDE..=Self::MAX_LATITUDE).contains(&latitude)
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidCoordinate,
                format!("latitude must be between -90 and 90, got {latitude}"),
            ));
        }
        if !longitude.is_finite()
            || !(Self::MIN_LONGITUDE..=Self::MAX_LONGITUDE).contains(&longitude)
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidCoordinate,
                format!("longitude must be between -180 and 180, got {longitude}"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Requested change to a driver/car pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverAction {
    Select,
    Deselect,
}
