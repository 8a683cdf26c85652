//! DTOs for cars_sea adapter.

use crate::entities::cars::EngineType;

/// DTO for inserting a car row.
#[derive(Debug, Clone)]
pub struct CarCreate {
    pub license_plate: String,
    pub seat_count: i32,
    pub convertible: bool,
    pub rating: Option<f64>,
    pub engine_type: EngineType,
    pub manufacturer: String,
}

impl CarCreate {
    pub fn new(
        license_plate: impl Into<String>,
        seat_count: i32,
        engine_type: EngineType,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            seat_count,
            convertible: false,
            rating: None,
            engine_type,
            manufacturer: manufacturer.into(),
        }
    }

    pub fn with_convertible(mut self, convertible: bool) -> Self {
        self.convertible = convertible;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Mutable car attributes. `None` leaves a column untouched;
/// `rating: Some(None)` clears the rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarUpdate {
    pub seat_count: Option<i32>,
    pub convertible: Option<bool>,
    pub rating: Option<Option<f64>>,
    pub engine_type: Option<EngineType>,
}

impl CarUpdate {
    pub fn is_empty(&self) -> bool {
        self.seat_count.is_none()
            && self.convertible.is_none()
            && self.rating.is_none()
            && self.engine_type.is_none()
    }
}
