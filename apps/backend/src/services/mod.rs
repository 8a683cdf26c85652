pub mod cars;
pub mod drivers;
