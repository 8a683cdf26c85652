//! Repository functions for the domain layer.

pub mod car_assignments;
pub mod cars;
pub mod drivers;
