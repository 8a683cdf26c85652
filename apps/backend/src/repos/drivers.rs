//! Driver repository functions (generic over ConnectionTrait).
//!
//! The assigned car is not a driver column; it is joined in from
//! `car_assignments` on every read.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::car_assignments_sea as assignments_adapter;
use crate::adapters::drivers_sea::{self as drivers_adapter, DriverCreate, DriverLocationUpdate};
use crate::domain::driver_filter::CarHolder;
use crate::domain::values::{GeoCoordinate, OnlineStatus, RecordStatus};
use crate::entities::drivers;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Driver domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub online_status: OnlineStatus,
    pub coordinate: Option<GeoCoordinate>,
    pub status: RecordStatus,
    pub created_at: time::OffsetDateTime,
    pub coordinate_updated_at: Option<time::OffsetDateTime>,
    /// Derived from the assignment table
    pub car_id: Option<i64>,
}

impl CarHolder for Driver {
    fn car_id(&self) -> Option<i64> {
        self.car_id
    }
}

fn to_domain(model: drivers::Model, car_id: Option<i64>) -> Result<Driver, DomainError> {
    let coordinate = match (model.latitude, model.longitude) {
        (Some(lat), Some(lon)) => Some(GeoCoordinate::new(lat, lon).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Stored coordinate for driver {} is out of range", model.id),
            )
        })?),
        _ => None,
    };

    Ok(Driver {
        id: model.id,
        username: model.username,
        password: model.password,
        online_status: model.online_status,
        coordinate,
        status: model.status,
        created_at: model.created_at,
        coordinate_updated_at: model.coordinate_updated_at,
        car_id,
    })
}

/// Attach assignments with chunked batch lookups, keeping input order.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<drivers::Model>,
) -> Result<Vec<Driver>, DomainError> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let cars_by_driver: HashMap<i64, i64> = assignments_adapter::find_by_drivers(conn, &ids)
        .await?
        .into_iter()
        .map(|a| (a.driver_id, a.car_id))
        .collect();

    models
        .into_iter()
        .map(|m| {
            let car_id = cars_by_driver.get(&m.id).copied();
            to_domain(m, car_id)
        })
        .collect()
}

pub async fn find_driver<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
) -> Result<Option<Driver>, DomainError> {
    let Some(model) = drivers_adapter::find_by_id(conn, driver_id).await? else {
        return Ok(None);
    };
    let car_id = assignments_adapter::find_by_driver(conn, driver_id)
        .await?
        .map(|a| a.car_id);
    to_domain(model, car_id).map(Some)
}

/// Like [`find_driver`] but missing rows are `NotFound`.
pub async fn require_driver<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
) -> Result<Driver, DomainError> {
    find_driver(conn, driver_id)
        .await?
        .ok_or_else(|| DomainError::driver_not_found(driver_id))
}

pub async fn list_drivers<C: ConnectionTrait>(conn: &C) -> Result<Vec<Driver>, DomainError> {
    let models = drivers_adapter::find_all(conn).await?;
    hydrate(conn, models).await
}

pub async fn list_by_online_status<C: ConnectionTrait>(
    conn: &C,
    status: OnlineStatus,
) -> Result<Vec<Driver>, DomainError> {
    let models = drivers_adapter::find_by_online_status(conn, status).await?;
    hydrate(conn, models).await
}

pub async fn create_driver<C: ConnectionTrait>(
    conn: &C,
    dto: DriverCreate,
) -> Result<Driver, DomainError> {
    let model = drivers_adapter::create_driver(conn, dto).await?;
    to_domain(model, None)
}

pub async fn mark_deleted<C: ConnectionTrait>(conn: &C, driver_id: i64) -> Result<(), DomainError> {
    let rows = drivers_adapter::set_record_status(conn, driver_id, RecordStatus::Deleted).await?;
    if rows == 0 {
        return Err(DomainError::driver_not_found(driver_id));
    }
    Ok(())
}

pub async fn update_location<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
    coordinate: GeoCoordinate,
) -> Result<(), DomainError> {
    let rows = drivers_adapter::update_location(
        conn,
        DriverLocationUpdate {
            id: driver_id,
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            at: time::OffsetDateTime::now_utc(),
        },
    )
    .await?;
    if rows == 0 {
        return Err(DomainError::driver_not_found(driver_id));
    }
    Ok(())
}

pub async fn update_online_status<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
    status: OnlineStatus,
) -> Result<Driver, DomainError> {
    let rows = drivers_adapter::update_online_status(conn, driver_id, status).await?;
    if rows == 0 {
        return Err(DomainError::driver_not_found(driver_id));
    }
    require_driver(conn, driver_id).await
}
