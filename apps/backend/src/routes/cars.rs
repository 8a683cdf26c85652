use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::adapters::cars_sea::{CarCreate, CarUpdate};
use crate::db::txn::with_txn;
use crate::domain::values::EngineType;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Validate, ValidatedJson};
use crate::repos::cars::Car;
use crate::services::cars::CarService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub license_plate: String,
    pub seat_count: i32,
    pub convertible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub engine_type: EngineType,
    pub manufacturer: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            license_plate: car.license_plate,
            seat_count: car.seat_count,
            convertible: car.convertible,
            rating: car.rating,
            engine_type: car.engine_type,
            manufacturer: car.manufacturer,
            deleted: car.status.is_deleted(),
            driver_id: car.driver_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub license_plate: String,
    pub seat_count: i32,
    #[serde(default)]
    pub convertible: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    pub engine_type: EngineType,
    pub manufacturer: String,
}

fn check_rating(rating: Option<f64>) -> Result<(), AppError> {
    match rating {
        Some(r) if !r.is_finite() || r < 0.0 => Err(AppError::invalid(
            ErrorCode::ValidationError,
            "rating must be a non-negative number",
        )),
        _ => Ok(()),
    }
}

fn check_seat_count(seat_count: i32) -> Result<(), AppError> {
    if seat_count < 1 {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "seatCount must be at least 1",
        ));
    }
    Ok(())
}

impl Validate for CreateCarRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.license_plate.trim().is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "licensePlate must not be blank",
            ));
        }
        if self.manufacturer.trim().is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "manufacturer must not be blank",
            ));
        }
        check_seat_count(self.seat_count)?;
        check_rating(self.rating)
    }
}

impl From<CreateCarRequest> for CarCreate {
    fn from(req: CreateCarRequest) -> Self {
        Self {
            license_plate: req.license_plate.trim().to_string(),
            seat_count: req.seat_count,
            convertible: req.convertible,
            rating: req.rating,
            engine_type: req.engine_type,
            manufacturer: req.manufacturer,
        }
    }
}

/// Partial update. Identity, license plate and manufacturer are not
/// updatable and are ignored if sent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[serde(default)]
    pub seat_count: Option<i32>,
    #[serde(default)]
    pub convertible: Option<bool>,
    // None = keep, Some(None) = clear, Some(Some(v)) = set
    #[serde(default, with = "double_option")]
    pub rating: Option<Option<f64>>,
    #[serde(default)]
    pub engine_type: Option<EngineType>,
}

impl Validate for UpdateCarRequest {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(seat_count) = self.seat_count {
            check_seat_count(seat_count)?;
        }
        check_rating(self.rating.flatten())
    }
}

impl From<UpdateCarRequest> for CarUpdate {
    fn from(req: UpdateCarRequest) -> Self {
        Self {
            seat_count: req.seat_count,
            convertible: req.convertible,
            rating: req.rating,
            engine_type: req.engine_type,
        }
    }
}

async fn get_car(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let car_id = path.into_inner();
    let car = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            CarService::new()
                .find(txn, car_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CarResponse::from(car)))
}

async fn create_car(
    body: ValidatedJson<CreateCarRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let dto = CarCreate::from(body.into_inner());
    let car = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            CarService::new()
                .create(txn, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CarResponse::from(car)))
}

async fn update_car(
    path: web::Path<i64>,
    body: ValidatedJson<UpdateCarRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let car_id = path.into_inner();
    let dto = CarUpdate::from(body.into_inner());
    let car = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            CarService::new()
                .update(txn, car_id, dto)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CarResponse::from(car)))
}

async fn delete_car(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let car_id = path.into_inner();
    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            CarService::new()
                .delete(txn, car_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_car))
        .route("/{id}", web::get().to(get_car))
        .route("/{id}", web::put().to(update_car))
        .route("/{id}", web::delete().to(delete_car));
}
