use migration::{migrate, MigrationCommand};
use tracing::info;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_kind: Option<DbKind>,
    runtime_env: RuntimeEnv,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: None,
            runtime_env: RuntimeEnv::Prod,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_env(mut self, runtime_env: RuntimeEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    /// Connects and, for SQLite kinds, brings the schema up to date.
    /// Postgres schemas are managed out of band with `migration-cli`.
    pub async fn build(self) -> Result<AppState, AppError> {
        let Some(kind) = self.db_kind else {
            return Ok(AppState::without_db());
        };

        let conn = connect_db(kind, self.runtime_env).await?;
        if kind.is_sqlite() {
            migrate(&conn, MigrationCommand::Up).await?;
            info!(db_kind = ?kind, "sqlite schema migrated");
        }
        Ok(AppState::new(conn))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
