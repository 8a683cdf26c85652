//! Car repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::car_assignments_sea as assignments_adapter;
use crate::adapters::cars_sea::{self as cars_adapter, CarCreate, CarUpdate};
use crate::domain::values::{EngineType, RecordStatus};
use crate::entities::cars;
use crate::errors::domain::DomainError;

/// Car domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i64,
    pub license_plate: String,
    pub seat_count: i32,
    pub convertible: bool,
    pub rating: Option<f64>,
    pub engine_type: EngineType,
    pub manufacturer: String,
    pub status: RecordStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    /// Derived from the assignment table
    pub driver_id: Option<i64>,
}

impl Car {
    fn from_model(model: cars::Model, driver_id: Option<i64>) -> Self {
        Self {
            id: model.id,
            license_plate: model.license_plate,
            seat_count: model.seat_count,
            convertible: model.convertible,
            rating: model.rating,
            engine_type: model.engine_type,
            manufacturer: model.manufacturer,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            driver_id,
        }
    }
}

async fn assigned_driver_id<C: ConnectionTrait>(
    conn: &C,
    car_id: i64,
) -> Result<Option<i64>, DomainError> {
    Ok(assignments_adapter::find_by_car(conn, car_id)
        .await?
        .map(|a| a.driver_id))
}

pub async fn find_car<C: ConnectionTrait>(
    conn: &C,
    car_id: i64,
) -> Result<Option<Car>, DomainError> {
    let Some(model) = cars_adapter::find_by_id(conn, car_id).await? else {
        return Ok(None);
    };
    let driver_id = assigned_driver_id(conn, car_id).await?;
    Ok(Some(Car::from_model(model, driver_id)))
}

pub async fn require_car<C: ConnectionTrait>(conn: &C, car_id: i64) -> Result<Car, DomainError> {
    find_car(conn, car_id)
        .await?
        .ok_or_else(|| DomainError::car_not_found(car_id))
}

pub async fn create_car<C: ConnectionTrait>(conn: &C, dto: CarCreate) -> Result<Car, DomainError> {
    let model = cars_adapter::create_car(conn, dto).await?;
    Ok(Car::from_model(model, None))
}

pub async fn update_car<C: ConnectionTrait>(
    conn: &C,
    car_id: i64,
    dto: CarUpdate,
) -> Result<Car, DomainError> {
    let model = cars_adapter::update_car(conn, car_id, dto)
        .await?
        .ok_or_else(|| DomainError::car_not_found(car_id))?;
    let driver_id = assigned_driver_id(conn, car_id).await?;
    Ok(Car::from_model(model, driver_id))
}

pub async fn mark_deleted<C: ConnectionTrait>(conn: &C, car_id: i64) -> Result<(), DomainError> {
    let rows = cars_adapter::set_record_status(conn, car_id, RecordStatus::Deleted).await?;
    if rows == 0 {
        return Err(DomainError::car_not_found(car_id));
    }
    Ok(())
}
