//! Path and query extraction failures rendered as problem details.

use actix_web::error::{PathError, QueryPayloadError};
use actix_web::{web, HttpRequest};
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "invalid path parameter");
    AppError::bad_request(ErrorCode::InvalidParameter, format!("Invalid path parameter: {err}"))
        .into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(query = %req.query_string(), error = %err, "invalid query string");
    AppError::bad_request(ErrorCode::InvalidParameter, format!("Invalid query parameter: {err}"))
        .into()
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}
