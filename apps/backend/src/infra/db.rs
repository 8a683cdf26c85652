use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

/// Open a connection pool for `kind`. Does not run migrations.
pub async fn connect_db(kind: DbKind, runtime_env: RuntimeEnv) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind, runtime_env)?;
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        // Every pooled connection to `sqlite::memory:` is a separate database,
        // so the pool must hold exactly one and never recycle it.
        DbKind::SqliteMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        DbKind::SqliteFile => {
            opts.max_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(16).min_connections(1);
        }
    }

    let conn = Database::connect(opts).await?;
    info!(db_kind = ?kind, env = ?runtime_env, "database connected");
    Ok(conn)
}
