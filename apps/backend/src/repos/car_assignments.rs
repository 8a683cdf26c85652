//! Assignment repository: the single source of the driver/car relationship.

use sea_orm::ConnectionTrait;

use crate::adapters::car_assignments_sea::{self as assignments_adapter, AssignmentCreate};
use crate::domain::assignment::AssignmentError;
use crate::entities::car_assignments;
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, PartialEq)]
pub struct CarAssignment {
    pub id: i64,
    pub driver_id: i64,
    pub car_id: i64,
    pub assigned_at: time::OffsetDateTime,
}

impl From<car_assignments::Model> for CarAssignment {
    fn from(model: car_assignments::Model) -> Self {
        Self {
            id: model.id,
            driver_id: model.driver_id,
            car_id: model.car_id,
            assigned_at: model.assigned_at,
        }
    }
}

pub async fn find_by_driver<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
) -> Result<Option<CarAssignment>, DomainError> {
    let row = assignments_adapter::find_by_driver(conn, driver_id).await?;
    Ok(row.map(CarAssignment::from))
}

pub async fn find_by_car<C: ConnectionTrait>(
    conn: &C,
    car_id: i64,
) -> Result<Option<CarAssignment>, DomainError> {
    let row = assignments_adapter::find_by_car(conn, car_id).await?;
    Ok(row.map(CarAssignment::from))
}

/// Insert the pairing. A unique violation means another request took the
/// driver or the car first and is reported as the matching guard failure.
pub async fn assign<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
    car_id: i64,
) -> Result<CarAssignment, DomainError> {
    match assignments_adapter::create_assignment(conn, AssignmentCreate::new(driver_id, car_id))
        .await
    {
        Ok(row) => Ok(CarAssignment::from(row)),
        Err(e) => Err(match DomainError::from(e) {
            DomainError::Conflict(ConflictKind::DriverAssignmentTaken, _) => {
                AssignmentError::DriverAlreadyHasACar { driver_id }.into()
            }
            DomainError::Conflict(ConflictKind::CarAssignmentTaken, _) => {
                AssignmentError::CarAlreadyInUse { car_id }.into()
            }
            other => other,
        }),
    }
}

/// Delete the pairing; nothing to delete means the car was not this driver's.
pub async fn release<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
    car_id: i64,
) -> Result<(), DomainError> {
    let rows = assignments_adapter::delete_assignment(conn, driver_id, car_id).await?;
    if rows == 0 {
        return Err(AssignmentError::CarNotAssignedToDriver { driver_id, car_id }.into());
    }
    Ok(())
}
