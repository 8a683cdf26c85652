//! SeaORM adapters, one module per table.

pub mod car_assignments_sea;
pub mod cars_sea;
pub mod drivers_sea;
