//! Domain layer: pure fleet rules, no IO.

pub mod assignment;
pub mod driver_filter;
pub mod values;

pub use assignment::{evaluate, AssignmentError, CarSnapshot, DriverSnapshot, Transition};
pub use driver_filter::{filter_drivers, partition, CarFilter, CarHolder, DriverPartition};
pub use values::{DriverAction, EngineType, GeoCoordinate, OnlineStatus, RecordStatus};
