//! DTOs for drivers_sea adapter.

use time::OffsetDateTime;

use crate::entities::drivers::OnlineStatus;

/// DTO for inserting a driver row.
#[derive(Debug, Clone)]
pub struct DriverCreate {
    pub username: String,
    pub password: String,
    pub online_status: OnlineStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl DriverCreate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            online_status: OnlineStatus::Offline,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_online_status(mut self, status: OnlineStatus) -> Self {
        self.online_status = status;
        self
    }

    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// DTO for a location write; `at` becomes `coordinate_updated_at`.
#[derive(Debug, Clone, Copy)]
pub struct DriverLocationUpdate {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub at: OffsetDateTime,
}
