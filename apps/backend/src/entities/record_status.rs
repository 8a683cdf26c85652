use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Record lifecycle marker; deletion is soft and rows stay addressable by id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

impl RecordStatus {
    pub fn is_deleted(self) -> bool {
        matches!(self, RecordStatus::Deleted)
    }
}
