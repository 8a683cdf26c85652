use backend_test_support::unique_helpers::{unique_license_plate, unique_username};
use fleet_backend::adapters::cars_sea::CarCreate;
use fleet_backend::adapters::drivers_sea::DriverCreate;
use fleet_backend::domain::values::{EngineType, OnlineStatus};
use fleet_backend::repos::cars::Car;
use fleet_backend::repos::drivers::Driver;
use fleet_backend::{AppError, CarService, DriverService};
use sea_orm::ConnectionTrait;

pub fn driver_service() -> DriverService {
    DriverService::new(CarService::new())
}

/// Create a driver with a unique username and the given online status.
pub async fn create_test_driver(
    conn: &impl ConnectionTrait,
    online_status: OnlineStatus,
) -> Result<Driver, AppError> {
    let dto = DriverCreate::new(unique_username("driver"), "s3cret-pass")
        .with_online_status(online_status);
    Ok(driver_service().create(conn, dto).await?)
}

pub async fn create_online_driver(conn: &impl ConnectionTrait) -> Result<Driver, AppError> {
    create_test_driver(conn, OnlineStatus::Online).await
}

/// Create a four-seat electric car with a unique plate.
pub async fn create_test_car(conn: &impl ConnectionTrait) -> Result<Car, AppError> {
    let dto = CarCreate::new(unique_license_plate(), 4, EngineType::Electric, "Tesla");
    Ok(CarService::new().create(conn, dto).await?)
}
