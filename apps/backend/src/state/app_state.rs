use sea_orm::DatabaseConnection;

/// Shared per-worker application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Absent when the service is started without a store (health-only tests)
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    pub fn without_db() -> Self {
        Self { db: None }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
