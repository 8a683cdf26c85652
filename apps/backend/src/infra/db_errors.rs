//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos funnel every error through
//! [`map_db_err`] so services only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn conflict_for_sqlite_column(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "drivers.username" => Some((ConflictKind::UniqueUsername, "Username already taken")),
        "cars.license_plate" => Some((
            ConflictKind::UniqueLicensePlate,
            "License plate already registered",
        )),
        "car_assignments.driver_id" => Some((
            ConflictKind::DriverAssignmentTaken,
            "Driver already has a car",
        )),
        "car_assignments.car_id" => Some((
            ConflictKind::CarAssignmentTaken,
            "Car is already assigned to another driver",
        )),
        _ => None,
    }
}

fn conflict_for_postgres_constraint(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("idx_drivers_username_unique") {
        return conflict_for_sqlite_column("drivers.username");
    }
    if error_msg.contains("idx_cars_license_plate_unique") {
        return conflict_for_sqlite_column("cars.license_plate");
    }
    if error_msg.contains("idx_car_assignments_driver_unique") {
        return conflict_for_sqlite_column("car_assignments.driver_id");
    }
    if error_msg.contains("idx_car_assignments_car_unique") {
        return conflict_for_sqlite_column("car_assignments.car_id");
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        sea_orm::DbErr::RecordNotUpdated => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        let known = extract_sqlite_table_column(&error_msg)
            .and_then(conflict_for_sqlite_column)
            .or_else(|| conflict_for_postgres_constraint(&error_msg));
        if let Some((kind, detail)) = known {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
