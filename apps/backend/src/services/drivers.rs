//! Driver lifecycle, location and status updates, and car assignment.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::adapters::drivers_sea::DriverCreate;
use crate::domain::assignment::{evaluate, CarSnapshot, DriverSnapshot, Transition};
use crate::domain::driver_filter::{partition, DriverPartition};
use crate::domain::values::{DriverAction, GeoCoordinate, OnlineStatus};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::car_assignments;
use crate::repos::drivers::{self, Driver};
use crate::services::cars::CarService;

#[derive(Debug, Clone, Copy, Default)]
pub struct DriverService {
    cars: CarService,
}

impl DriverService {
    pub fn new(cars: CarService) -> Self {
        Self { cars }
    }

    /// Driver by id, including soft-deleted ones.
    pub async fn find<C: ConnectionTrait>(
        &self,
        conn: &C,
        driver_id: i64,
    ) -> Result<Driver, DomainError> {
        drivers::require_driver(conn, driver_id).await
    }

    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        dto: DriverCreate,
    ) -> Result<Driver, DomainError> {
        if let (Some(lat), Some(lon)) = (dto.latitude, dto.longitude) {
            GeoCoordinate::new(lat, lon)?;
        }
        let username = dto.username.clone();
        match drivers::create_driver(conn, dto).await {
            Ok(driver) => {
                info!(driver_id = driver.id, "driver created");
                Ok(driver)
            }
            Err(e @ DomainError::Conflict(ConflictKind::UniqueUsername, _)) => {
                warn!(username = %Redacted(&username), "driver creation rejected: duplicate username");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Marks the driver DELETED. Any held car stays assigned.
    pub async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        driver_id: i64,
    ) -> Result<(), DomainError> {
        drivers::mark_deleted(conn, driver_id).await?;
        info!(driver_id, "driver soft-deleted");
        Ok(())
    }

    pub async fn update_location<C: ConnectionTrait>(
        &self,
        conn: &C,
        driver_id: i64,
        longitude: f64,
        latitude: f64,
    ) -> Result<(), DomainError> {
        let coordinate = GeoCoordinate::new(latitude, longitude)?;
        drivers::update_location(conn, driver_id, coordinate).await?;
        debug!(driver_id, latitude, longitude, "driver location updated");
        Ok(())
    }

    pub async fn update_online_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        driver_id: i64,
        status: OnlineStatus,
    ) -> Result<Driver, DomainError> {
        let driver = drivers::update_online_status(conn, driver_id, status).await?;
        info!(driver_id, online_status = ?status, "driver online status changed");
        Ok(driver)
    }

    /// Equality filter on online status. Soft-deleted drivers are included.
    pub async fn find_by_online_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        status: OnlineStatus,
    ) -> Result<Vec<Driver>, DomainError> {
        drivers::list_by_online_status(conn, status).await
    }

    /// Apply SELECT or DESELECT to the (driver, car) pair.
    ///
    /// Both records must exist (driver checked first). Guards run against the
    /// current assignment state; on success exactly one assignment row is
    /// inserted or deleted. Must run inside the caller's transaction.
    pub async fn assign_or_unassign_car<C: ConnectionTrait>(
        &self,
        conn: &C,
        driver_id: i64,
        car_id: i64,
        action: DriverAction,
    ) -> Result<(), DomainError> {
        let driver = drivers::require_driver(conn, driver_id).await?;
        let car = self.cars.find(conn, car_id).await?;

        let driver_snapshot = DriverSnapshot {
            id: driver.id,
            online_status: driver.online_status,
            car_id: driver.car_id,
        };
        let car_snapshot = CarSnapshot {
            id: car.id,
            driver_id: car.driver_id,
        };

        let transition = evaluate(action, driver_id, car_id, &driver_snapshot, &car_snapshot)
            .inspect_err(|rejection| {
                info!(driver_id, car_id, action = ?action, "{rejection}");
            })?;

        match transition {
            Transition::Assign { driver_id, car_id } => {
                car_assignments::assign(conn, driver_id, car_id).await?;
                info!(driver_id, car_id, "car assigned to driver");
            }
            Transition::Release { driver_id, car_id } => {
                car_assignments::release(conn, driver_id, car_id).await?;
                info!(driver_id, car_id, "car released by driver");
            }
        }
        Ok(())
    }

    /// Partition of every stored driver, regardless of status or deletion.
    pub async fn drivers_with_and_without_cars<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<DriverPartition<Driver>, DomainError> {
        let all = drivers::list_drivers(conn).await?;
        Ok(partition(all))
    }
}
