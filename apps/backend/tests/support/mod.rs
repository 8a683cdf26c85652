#![allow(dead_code)]

pub mod factory;

use fleet_backend::infra::state::build_state;
use fleet_backend::state::app_state::AppState;
use fleet_backend::{AppError, DbKind, RuntimeEnv};

/// Fresh in-memory SQLite store with the schema applied.
///
/// Every call yields an isolated database, so tests never see each
/// other's rows.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_env(RuntimeEnv::Test)
        .build()
        .await
}
