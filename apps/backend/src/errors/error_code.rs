//! Error codes for the fleet backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the fleet backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Coordinate outside latitude/longitude bounds
    InvalidCoordinate,
    /// Path or query parameter could not be parsed
    InvalidParameter,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Driver not found
    DriverNotFound,
    /// Car not found
    CarNotFound,
    /// General not found error
    NotFound,

    // Uniqueness conflicts
    /// Username already registered to another driver
    UniqueUsername,
    /// License plate already registered to another car
    UniqueLicensePlate,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Assignment state machine
    /// Driver already holds a car
    DriverAlreadyHasACar,
    /// Car already assigned to another driver
    CarAlreadyInUse,
    /// Driver is not online
    DriverNotOnline,
    /// Car is not assigned to the driver
    CarNotAssignedToDriver,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate => "INVALID_COORDINATE",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::DriverNotFound => "DRIVER_NOT_FOUND",
            Self::CarNotFound => "CAR_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueUsername => "UNIQUE_USERNAME",
            Self::UniqueLicensePlate => "UNIQUE_LICENSE_PLATE",
            Self::Conflict => "CONFLICT",

            Self::DriverAlreadyHasACar => "DRIVER_ALREADY_HAS_A_CAR",
            Self::CarAlreadyInUse => "CAR_ALREADY_IN_USE",
            Self::DriverNotOnline => "DRIVER_NOT_ONLINE",
            Self::CarNotAssignedToDriver => "CAR_NOT_ASSIGNED_TO_DRIVER",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
