use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::adapters::drivers_sea::DriverCreate;
use crate::db::txn::with_txn;
use crate::domain::driver_filter::DriverPartition;
use crate::domain::values::{DriverAction, GeoCoordinate, OnlineStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Validate, ValidatedJson};
use crate::repos::drivers::Driver;
use crate::services::cars::CarService;
use crate::services::drivers::DriverService;
use crate::state::app_state::AppState;

fn driver_service() -> DriverService {
    DriverService::new(CarService::new())
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outbound driver view. The password is never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: i64,
    pub username: String,
    pub online_status: OnlineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<CoordinateDto>,
    pub deleted: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_id: Option<i64>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            username: driver.username,
            online_status: driver.online_status,
            coordinate: driver.coordinate.map(|c| CoordinateDto {
                latitude: c.latitude(),
                longitude: c.longitude(),
            }),
            deleted: driver.status.is_deleted(),
            created_at: rfc3339(driver.created_at),
            coordinate_updated_at: driver.coordinate_updated_at.map(rfc3339),
            car_id: driver.car_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPartitionResponse {
    pub drivers_with_cars: Vec<DriverResponse>,
    pub drivers_without_cars: Vec<DriverResponse>,
}

impl From<DriverPartition<Driver>> for DriverPartitionResponse {
    fn from(p: DriverPartition<Driver>) -> Self {
        Self {
            drivers_with_cars: p.with_cars.into_iter().map(DriverResponse::from).collect(),
            drivers_without_cars: p
                .without_cars
                .into_iter()
                .map(DriverResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub online_status: Option<OnlineStatus>,
    #[serde(default)]
    pub coordinate: Option<CoordinateDto>,
}

impl Validate for CreateDriverRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "username must not be blank",
            ));
        }
        if self.password.is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "password must not be empty",
            ));
        }
        if let Some(c) = self.coordinate {
            GeoCoordinate::new(c.latitude, c.longitude)?;
        }
        Ok(())
    }
}

impl From<CreateDriverRequest> for DriverCreate {
    fn from(req: CreateDriverRequest) -> Self {
        let mut dto = DriverCreate::new(req.username.trim(), req.password)
            .with_online_status(req.online_status.unwrap_or(OnlineStatus::Offline));
        if let Some(c) = req.coordinate {
            dto = dto.with_coordinate(c.latitude, c.longitude);
        }
        dto
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub online_status: OnlineStatus,
}

impl Validate for UpdateDriverRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineStatusQuery {
    pub online_status: OnlineStatus,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverActionQuery {
    pub driver_action: DriverAction,
}

async fn get_driver(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let driver_id = path.into_inner();
    let driver = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .find(txn, driver_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DriverResponse::from(driver)))
}

async fn create_driver(
    body: ValidatedJson<CreateDriverRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = DriverCreate::from(body.into_inner());
    let driver = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .create(txn, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(DriverResponse::from(driver)))
}

async fn update_driver(
    path: web::Path<i64>,
    body: ValidatedJson<UpdateDriverRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let driver_id = path.into_inner();
    let status = body.online_status;
    let driver = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .update_online_status(txn, driver_id, status)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DriverResponse::from(driver)))
}

async fn delete_driver(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let driver_id = path.into_inner();
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .delete(txn, driver_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn update_location(
    path: web::Path<i64>,
    query: web::Query<LocationQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let driver_id = path.into_inner();
    let LocationQuery {
        longitude,
        latitude,
    } = query.into_inner();
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .update_location(txn, driver_id, longitude, latitude)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn find_by_online_status(
    query: web::Query<OnlineStatusQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let status = query.online_status;
    let drivers = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .find_by_online_status(txn, status)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let body: Vec<DriverResponse> = drivers.into_iter().map(DriverResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn assign_or_unassign_car(
    path: web::Path<(i64, i64)>,
    query: web::Query<DriverActionQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (driver_id, car_id) = path.into_inner();
    let action = query.driver_action;
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .assign_or_unassign_car(txn, driver_id, car_id, action)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn drivers_with_and_without_cars(
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let partition = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            driver_service()
                .drivers_with_and_without_cars(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DriverPartitionResponse::from(partition)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segment before `/{id}` so it is not parsed as an id.
    cfg.route(
        "/driversWithAndWithoutCars",
        web::get().to(drivers_with_and_without_cars),
    )
    .route("", web::get().to(find_by_online_status))
    .route("", web::post().to(create_driver))
    .route("/{id}", web::get().to(get_driver))
    .route("/{id}", web::put().to(update_driver))
    .route("/{id}", web::delete().to(delete_driver))
    .route("/{id}/location", web::put().to(update_location))
    .route(
        "/{driver_id}/car/{car_id}",
        web::put().to(assign_or_unassign_car),
    );
}
