use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which backing store to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL via `POSTGRES_*` and `APP_DB_*`
    Postgres,
    /// SQLite file at `FLEET_SQLITE_PATH`
    SqliteFile,
    /// Private in-memory SQLite database (tests, local runs)
    SqliteMemory,
}

impl DbKind {
    /// Reads `FLEET_DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("FLEET_DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(DbKind::Postgres),
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown FLEET_DB_KIND '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

/// Runtime environment; selects the database name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` naming guard
    Test,
}

/// Builds a connection URL for `kind` from environment variables.
pub fn db_url(kind: DbKind, runtime_env: RuntimeEnv) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::SqliteFile => {
            let path = sqlite_path(runtime_env)?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(runtime_env)?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

fn db_name(runtime_env: RuntimeEnv) -> Result<String, AppError> {
    match runtime_env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn sqlite_path(runtime_env: RuntimeEnv) -> Result<String, AppError> {
    let path = env::var("FLEET_SQLITE_PATH").unwrap_or_else(|_| match runtime_env {
        RuntimeEnv::Prod => "fleet.sqlite".to_string(),
        RuntimeEnv::Test => "fleet_test.sqlite".to_string(),
    });
    if path.trim().is_empty() {
        return Err(AppError::config("FLEET_SQLITE_PATH must not be empty"));
    }
    Ok(path)
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
