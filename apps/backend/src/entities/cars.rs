use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::record_status::RecordStatus;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    #[sea_orm(string_value = "ELECTRIC")]
    Electric,
    #[sea_orm(string_value = "GAS")]
    Gas,
    #[sea_orm(string_value = "HYBRID")]
    Hybrid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "license_plate", unique)]
    pub license_plate: String,
    #[sea_orm(column_name = "seat_count")]
    pub seat_count: i32,
    pub convertible: bool,
    pub rating: Option<f64>,
    #[sea_orm(column_name = "engine_type")]
    pub engine_type: EngineType,
    pub manufacturer: String,
    pub status: RecordStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::car_assignments::Entity")]
    CarAssignment,
}

impl Related<super::car_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
