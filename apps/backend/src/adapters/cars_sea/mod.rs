//! SeaORM adapter for the cars table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, Set,
};

use crate::entities::cars;
use crate::entities::record_status::RecordStatus;

pub mod dto;

pub use dto::{CarCreate, CarUpdate};

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<cars::Model>, sea_orm::DbErr> {
    cars::Entity::find_by_id(id).one(conn).await
}

pub async fn create_car<C: ConnectionTrait>(
    conn: &C,
    dto: CarCreate,
) -> Result<cars::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let car_active = cars::ActiveModel {
        id: NotSet,
        license_plate: Set(dto.license_plate),
        seat_count: Set(dto.seat_count),
        convertible: Set(dto.convertible),
        rating: Set(dto.rating),
        engine_type: Set(dto.engine_type),
        manufacturer: Set(dto.manufacturer),
        status: Set(RecordStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };

    car_active.insert(conn).await
}

/// Applies `dto` to the row; `Ok(None)` when the id is unknown.
pub async fn update_car<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    dto: CarUpdate,
) -> Result<Option<cars::Model>, sea_orm::DbErr> {
    let Some(existing) = cars::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };
    if dto.is_empty() {
        return Ok(Some(existing));
    }

    let mut car_active = existing.into_active_model();
    if let Some(seat_count) = dto.seat_count {
        car_active.seat_count = Set(seat_count);
    }
    if let Some(convertible) = dto.convertible {
        car_active.convertible = Set(convertible);
    }
    if let Some(rating) = dto.rating {
        car_active.rating = Set(rating);
    }
    if let Some(engine_type) = dto.engine_type {
        car_active.engine_type = Set(engine_type);
    }
    car_active.updated_at = Set(time::OffsetDateTime::now_utc());

    car_active.update(conn).await.map(Some)
}

pub async fn set_record_status<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    status: RecordStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = cars::Entity::update_many()
        .set(cars::ActiveModel {
            status: Set(status),
            updated_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        })
        .filter(cars::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
