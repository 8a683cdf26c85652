use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::{unique_license_plate, unique_username};
use fleet_backend::AppError;
use serde_json::{json, Value};

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

fn driver_body(username: &str, online_status: &str) -> Value {
    json!({
        "username": username,
        "password": "hunter2-but-longer",
        "onlineStatus": online_status,
    })
}

fn car_body() -> Value {
    json!({
        "licensePlate": unique_license_plate(),
        "seatCount": 4,
        "engineType": "ELECTRIC",
        "manufacturer": "Volkswagen",
    })
}

#[actix_web::test]
async fn create_and_get_driver() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;
    let username = unique_username("route");

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(json!({
            "username": username,
            "password": "pw",
            "coordinate": { "latitude": 48.137, "longitude": 11.575 },
        }))
        .to_request();
    let created = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(created["username"], username.as_str());
    assert_eq!(created["onlineStatus"], "OFFLINE");
    assert_eq!(created["deleted"], false);
    assert_eq!(created["coordinate"]["latitude"], 48.137);
    assert!(created.get("password").is_none(), "password must not be exposed");
    assert!(created.get("carId").is_none());

    let id = created["id"].as_i64().expect("numeric id");
    let req = test::TestRequest::get()
        .uri(&format!("/drivers/{id}"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["username"], username.as_str());

    Ok(())
}

#[actix_web::test]
async fn duplicate_username_returns_conflict() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;
    let username = unique_username("twice");

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&username, "ONLINE"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&username, "OFFLINE"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNIQUE_USERNAME",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn invalid_coordinate_on_create_is_rejected() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(json!({
            "username": unique_username("lost"),
            "password": "pw",
            "coordinate": { "latitude": 120.0, "longitude": 0.0 },
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_COORDINATE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn location_update_then_read_back() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&unique_username("mover"), "ONLINE"))
        .to_request();
    let created = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{id}/location?longitude=2.3522&latitude=48.8566"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/drivers/{id}"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["coordinate"]["latitude"], 48.8566);
    assert_eq!(fetched["coordinate"]["longitude"], 2.3522);
    assert!(fetched["coordinateUpdatedAt"].is_string());

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{id}/location?longitude=200&latitude=0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_COORDINATE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn online_status_update_and_listing() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&unique_username("sleepy"), "OFFLINE"))
        .to_request();
    let created = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::get()
        .uri("/drivers?onlineStatus=ONLINE")
        .to_request();
    let listed = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(listed, json!([]));

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{id}"))
        .set_json(json!({ "onlineStatus": "ONLINE" }))
        .to_request();
    let updated = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(updated["onlineStatus"], "ONLINE");

    let req = test::TestRequest::get()
        .uri("/drivers?onlineStatus=ONLINE")
        .to_request();
    let listed = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let listed = listed.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id);

    let req = test::TestRequest::get()
        .uri("/drivers?onlineStatus=SLEEPING")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PARAMETER",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn select_and_deselect_over_http() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&unique_username("pilot"), "ONLINE"))
        .to_request();
    let driver = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let driver_id = driver["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::post()
        .uri("/cars")
        .set_json(car_body())
        .to_request();
    let car = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let car_id = car["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{driver_id}/car/{car_id}?driverAction=SELECT"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/drivers/{driver_id}"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["carId"], car_id);

    let req = test::TestRequest::get()
        .uri(&format!("/cars/{car_id}"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["driverId"], driver_id);

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{driver_id}/car/{car_id}?driverAction=SELECT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "DRIVER_ALREADY_HAS_A_CAR",
        StatusCode::CONFLICT,
        Some("This driver is already assigned a car"),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{driver_id}/car/{car_id}?driverAction=DESELECT"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{driver_id}/car/{car_id}?driverAction=DESELECT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "CAR_NOT_ASSIGNED_TO_DRIVER",
        StatusCode::BAD_REQUEST,
        Some("This car is not assigned to this driver"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn select_guard_failures_map_to_problem_codes() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let mut ids = Vec::new();
    for status in ["ONLINE", "ONLINE", "OFFLINE"] {
        let req = test::TestRequest::post()
            .uri("/drivers")
            .set_json(driver_body(&unique_username("guard"), status))
            .to_request();
        let driver = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
        ids.push(driver["id"].as_i64().expect("numeric id"));
    }
    let (holder, rival, offline) = (ids[0], ids[1], ids[2]);

    let mut car_ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/cars")
            .set_json(car_body())
            .to_request();
        let car = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
        car_ids.push(car["id"].as_i64().expect("numeric id"));
    }
    let (taken, free) = (car_ids[0], car_ids[1]);

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{holder}/car/{taken}?driverAction=SELECT"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{rival}/car/{taken}?driverAction=SELECT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "CAR_ALREADY_IN_USE",
        StatusCode::CONFLICT,
        Some(&format!("Car with id {taken} is already assigned to another driver")),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{offline}/car/{free}?driverAction=SELECT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "DRIVER_NOT_ONLINE",
        StatusCode::BAD_REQUEST,
        Some(&format!("driver with id {offline} is not online")),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{rival}/car/{free}?driverAction=PARK"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PARAMETER",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/drivers/{rival}/car/999999?driverAction=SELECT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "CAR_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("999999"),
    )
    .await;

    Ok(())
}

#[actix_web::test]
async fn partition_endpoint_groups_drivers() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get()
        .uri("/drivers/driversWithAndWithoutCars")
        .to_request();
    let empty = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(
        empty,
        json!({ "driversWithCars": [], "driversWithoutCars": [] })
    );

    let mut driver_ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/drivers")
            .set_json(driver_body(&unique_username("split"), "ONLINE"))
            .to_request();
        let driver = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
        driver_ids.push(driver["id"].as_i64().expect("numeric id"));
    }
    let req = test::TestRequest::post()
        .uri("/cars")
        .set_json(car_body())
        .to_request();
    let car = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let car_id = car["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::put()
        .uri(&format!(
            "/drivers/{}/car/{car_id}?driverAction=SELECT",
            driver_ids[0]
        ))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/drivers/driversWithAndWithoutCars")
        .to_request();
    let split = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    let with_cars = split["driversWithCars"].as_array().expect("array");
    let without_cars = split["driversWithoutCars"].as_array().expect("array");
    assert_eq!(with_cars.len(), 1);
    assert_eq!(with_cars[0]["id"], driver_ids[0]);
    assert_eq!(with_cars[0]["carId"], car_id);
    assert_eq!(without_cars.len(), 1);
    assert_eq!(without_cars[0]["id"], driver_ids[1]);

    Ok(())
}

#[actix_web::test]
async fn delete_is_soft() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/drivers")
        .set_json(driver_body(&unique_username("gone"), "ONLINE"))
        .to_request();
    let driver = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let id = driver["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::delete()
        .uri(&format!("/drivers/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/drivers/{id}"))
        .to_request();
    let fetched = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["deleted"], true);

    let req = test::TestRequest::delete()
        .uri("/drivers/987654")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "DRIVER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Could not find driver with id: 987654"),
    )
    .await;

    Ok(())
}
