//! Driver/car assignment state machine.
//!
//! Guards are evaluated against a snapshot of the pair and yield the
//! [`Transition`] the caller must apply. Evaluation never touches the store.
//!
//! SELECT guard order:
//! 1. driver already holds a car -> [`AssignmentError::DriverAlreadyHasACar`]
//! 2. car held by another driver -> [`AssignmentError::CarAlreadyInUse`]
//! 3. driver not ONLINE -> [`AssignmentError::DriverNotOnline`]
//!
//! DESELECT succeeds only when the driver currently holds exactly this car.

use thiserror::Error;

use crate::domain::values::{DriverAction, OnlineStatus};

/// Driver side of the pair as seen at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSnapshot {
    pub id: i64,
    pub online_status: OnlineStatus,
    pub car_id: Option<i64>,
}

/// Car side of the pair as seen at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSnapshot {
    pub id: i64,
    pub driver_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Assign { driver_id: i64, car_id: i64 },
    Release { driver_id: i64, car_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("This driver is already assigned a car")]
    DriverAlreadyHasACar { driver_id: i64 },
    #[error("Car with id {car_id} is already assigned to another driver")]
    CarAlreadyInUse { car_id: i64 },
    #[error("Cannot assign the car as driver with id {driver_id} is not online")]
    DriverNotOnline { driver_id: i64 },
    #[error("This car is not assigned to this driver")]
    CarNotAssignedToDriver { driver_id: i64, car_id: i64 },
}

pub fn evaluate(
    action: DriverAction,
    driver_id: i64,
    car_id: i64,
    driver: &DriverSnapshot,
    car: &CarSnapshot,
) -> Result<Transition, AssignmentError> {
    match action {
        DriverAction::Select => {
            if driver.car_id.is_some() {
                return Err(AssignmentError::DriverAlreadyHasACar { driver_id });
            }
            if car.driver_id.is_some_and(|holder| holder != driver.id) {
                return Err(AssignmentError::CarAlreadyInUse { car_id });
            }
            if driver.online_status != OnlineStatus::Online {
                return Err(AssignmentError::DriverNotOnline { driver_id });
            }
            Ok(Transition::Assign {
                driver_id: driver.id,
                car_id: car.id,
            })
        }
        DriverAction::Deselect => {
            if driver.car_id == Some(car_id) && driver.id == driver_id {
                Ok(Transition::Release {
                    driver_id: driver.id,
                    car_id,
                })
            } else {
                Err(AssignmentError::CarNotAssignedToDriver { driver_id, car_id })
            }
        }
    }
}
