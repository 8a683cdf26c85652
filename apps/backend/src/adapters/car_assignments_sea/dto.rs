//! DTOs for car_assignments_sea adapter.

/// DTO for inserting an assignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentCreate {
    pub driver_id: i64,
    pub car_id: i64,
}

impl AssignmentCreate {
    pub fn new(driver_id: i64, car_id: i64) -> Self {
        Self { driver_id, car_id }
    }
}
