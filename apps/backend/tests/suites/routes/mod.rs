pub mod handler_drivers;
pub mod healthcheck;
