//! Car lifecycle: create, read, update of mutable attributes, soft delete.

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::adapters::cars_sea::{CarCreate, CarUpdate};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::car_assignments;
use crate::repos::cars::{self, Car};

#[derive(Debug, Clone, Copy, Default)]
pub struct CarService;

impl CarService {
    pub fn new() -> Self {
        Self
    }

    /// Car by id, including soft-deleted ones.
    pub async fn find<C: ConnectionTrait>(&self, conn: &C, car_id: i64) -> Result<Car, DomainError> {
        cars::require_car(conn, car_id).await
    }

    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        dto: CarCreate,
    ) -> Result<Car, DomainError> {
        match cars::create_car(conn, dto).await {
            Ok(car) => {
                info!(car_id = car.id, license_plate = %car.license_plate, "car created");
                Ok(car)
            }
            Err(e @ DomainError::Conflict(ConflictKind::UniqueLicensePlate, _)) => {
                warn!(error = %e, "car creation rejected: duplicate license plate");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Marks the car DELETED. An active assignment is left untouched.
    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, car_id: i64) -> Result<(), DomainError> {
        cars::mark_deleted(conn, car_id).await?;
        info!(car_id, "car soft-deleted");
        Ok(())
    }

    /// Only seat count, convertible, rating and engine type are mutable.
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        car_id: i64,
        dto: CarUpdate,
    ) -> Result<Car, DomainError> {
        let car = cars::update_car(conn, car_id, dto).await?;
        info!(car_id, "car updated");
        Ok(car)
    }

    /// Driver currently holding the car, if any.
    pub async fn assigned_driver<C: ConnectionTrait>(
        &self,
        conn: &C,
        car_id: i64,
    ) -> Result<Option<i64>, DomainError> {
        cars::require_car(conn, car_id).await?;
        Ok(car_assignments::find_by_car(conn, car_id)
            .await?
            .map(|a| a.driver_id))
    }
}
