//! SeaORM adapter for the drivers table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::drivers::{self, OnlineStatus};
use crate::entities::record_status::RecordStatus;

pub mod dto;

pub use dto::{DriverCreate, DriverLocationUpdate};

// Adapter functions return DbErr; repos map to DomainError.

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<drivers::Model>, sea_orm::DbErr> {
    drivers::Entity::find_by_id(id).one(conn).await
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<drivers::Model>, sea_orm::DbErr> {
    drivers::Entity::find()
        .order_by_asc(drivers::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_online_status<C: ConnectionTrait>(
    conn: &C,
    status: OnlineStatus,
) -> Result<Vec<drivers::Model>, sea_orm::DbErr> {
    drivers::Entity::find()
        .filter(drivers::Column::OnlineStatus.eq(status))
        .order_by_asc(drivers::Column::Id)
        .all(conn)
        .await
}

pub async fn create_driver<C: ConnectionTrait>(
    conn: &C,
    dto: DriverCreate,
) -> Result<drivers::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let has_coordinate = dto.latitude.is_some() && dto.longitude.is_some();
    let driver_active = drivers::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        password: Set(dto.password),
        online_status: Set(dto.online_status),
        latitude: Set(dto.latitude),
        longitude: Set(dto.longitude),
        status: Set(RecordStatus::Active),
        created_at: Set(now),
        coordinate_updated_at: Set(has_coordinate.then_some(now)),
    };

    driver_active.insert(conn).await
}

/// Returns the number of rows touched (0 when the id is unknown).
pub async fn set_record_status<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    status: RecordStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = drivers::Entity::update_many()
        .set(drivers::ActiveModel {
            status: Set(status),
            ..Default::default()
        })
        .filter(drivers::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_location<C: ConnectionTrait>(
    conn: &C,
    dto: DriverLocationUpdate,
) -> Result<u64, sea_orm::DbErr> {
    let result = drivers::Entity::update_many()
        .set(drivers::ActiveModel {
            latitude: Set(Some(dto.latitude)),
            longitude: Set(Some(dto.longitude)),
            coordinate_updated_at: Set(Some(dto.at)),
            ..Default::default()
        })
        .filter(drivers::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_online_status<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    status: OnlineStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = drivers::Entity::update_many()
        .set(drivers::ActiveModel {
            online_status: Set(status),
            ..Default::default()
        })
        .filter(drivers::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
