//! SeaORM adapter for the car_assignments table.
//!
//! Inserts rely on the unique indexes on `driver_id` and `car_id`; a racing
//! insert surfaces as a unique violation for the repo to translate.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::car_assignments;

pub mod dto;

pub use dto::AssignmentCreate;

pub async fn find_by_driver<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
) -> Result<Option<car_assignments::Model>, sea_orm::DbErr> {
    car_assignments::Entity::find()
        .filter(car_assignments::Column::DriverId.eq(driver_id))
        .one(conn)
        .await
}

pub async fn find_by_car<C: ConnectionTrait>(
    conn: &C,
    car_id: i64,
) -> Result<Option<car_assignments::Model>, sea_orm::DbErr> {
    car_assignments::Entity::find()
        .filter(car_assignments::Column::CarId.eq(car_id))
        .one(conn)
        .await
}

/// Driver ids bound per `IN (...)` query. Postgres caps a statement at
/// 65535 bind parameters and SQLite builds default to 32766.
pub const LOOKUP_CHUNK: usize = 500;

/// Batch lookup for a list of drivers, issued `LOOKUP_CHUNK` ids at a time.
pub async fn find_by_drivers<C: ConnectionTrait>(
    conn: &C,
    driver_ids: &[i64],
) -> Result<Vec<car_assignments::Model>, sea_orm::DbErr> {
    let mut found = Vec::new();
    for chunk in driver_ids.chunks(LOOKUP_CHUNK) {
        let rows = car_assignments::Entity::find()
            .filter(car_assignments::Column::DriverId.is_in(chunk.iter().copied()))
            .all(conn)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

pub async fn create_assignment<C: ConnectionTrait>(
    conn: &C,
    dto: AssignmentCreate,
) -> Result<car_assignments::Model, sea_orm::DbErr> {
    let assignment_active = car_assignments::ActiveModel {
        id: NotSet,
        driver_id: Set(dto.driver_id),
        car_id: Set(dto.car_id),
        assigned_at: Set(time::OffsetDateTime::now_utc()),
    };

    assignment_active.insert(conn).await
}

/// Removes the row pairing exactly this driver and car; returns rows deleted.
pub async fn delete_assignment<C: ConnectionTrait>(
    conn: &C,
    driver_id: i64,
    car_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = car_assignments::Entity::delete_many()
        .filter(car_assignments::Column::DriverId.eq(driver_id))
        .filter(car_assignments::Column::CarId.eq(car_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
