//! Test helpers shared by the fleet backend integration suites.
//!
//! Logging bootstrap, unique fixture values, and assertions for the
//! problem-details error contract.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
