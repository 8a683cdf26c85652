use actix_web::http::StatusCode;
use actix_web::test;
use fleet_backend::infra::state::build_state;
use fleet_backend::AppError;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

#[actix_web::test]
async fn health_reports_database_and_migrations() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    let migrations = body["migrations"].as_str().expect("migrations string");
    assert!(migrations.starts_with('m'), "unexpected version {migrations}");
    assert!(body["time"].is_string());
    assert!(body["app_version"].is_string());

    Ok(())
}

#[actix_web::test]
async fn health_without_database_still_answers() -> Result<(), AppError> {
    let app = create_test_app(build_state().build().await?).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
    assert_eq!(body["migrations"], "unknown");

    Ok(())
}
