use backend_test_support::unique_helpers::unique_username;
use fleet_backend::adapters::car_assignments_sea::LOOKUP_CHUNK;
use fleet_backend::adapters::drivers_sea::DriverCreate;
use fleet_backend::db::txn::with_txn;
use fleet_backend::domain::values::{DriverAction, OnlineStatus};
use fleet_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use fleet_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{
    create_online_driver, create_test_car, create_test_driver, driver_service,
};

#[tokio::test]
async fn create_then_find_driver() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let username = unique_username("alice");
            let dto = DriverCreate::new(username.clone(), "pw-alice").with_coordinate(52.52, 13.405);
            let created = driver_service().create(txn, dto).await?;

            assert!(created.id > 0);
            assert_eq!(created.username, username);
            assert_eq!(created.online_status, OnlineStatus::Offline);
            assert!(!created.status.is_deleted());
            assert_eq!(created.car_id, None);

            let found = driver_service().find(txn, created.id).await?;
            assert_eq!(found.password, "pw-alice");
            let coordinate = found.coordinate.expect("coordinate stored");
            assert_eq!(coordinate.latitude(), 52.52);
            assert_eq!(coordinate.longitude(), 13.405);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let username = unique_username("dup");
            driver_service()
                .create(txn, DriverCreate::new(username.clone(), "one"))
                .await?;

            let err = driver_service()
                .create(txn, DriverCreate::new(username, "two"))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DomainError::Conflict(ConflictKind::UniqueUsername, _)
            ));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn create_rejects_out_of_range_coordinate() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let dto = DriverCreate::new(unique_username("bad"), "pw").with_coordinate(91.0, 0.0);
            let err = driver_service().create(txn, dto).await.unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidCoordinate, _)
            ));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn find_unknown_driver_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let err = driver_service().find(txn, 424_242).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Driver, _)));
            assert!(err.to_string().contains("424242"));

            let err = driver_service().delete(txn, 424_242).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Driver, _)));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn location_update_sets_coordinate_and_timestamp() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let driver = create_online_driver(txn).await?;
            assert!(driver.coordinate.is_none());
            assert!(driver.coordinate_updated_at.is_none());

            driver_service()
                .update_location(txn, driver.id, -74.006, 40.7128)
                .await?;

            let driver = driver_service().find(txn, driver.id).await?;
            let coordinate = driver.coordinate.expect("coordinate set");
            assert_eq!(coordinate.latitude(), 40.7128);
            assert_eq!(coordinate.longitude(), -74.006);
            let updated_at = driver.coordinate_updated_at.expect("timestamp set");
            assert!(updated_at >= driver.created_at);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn location_update_validates_before_lookup() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let driver = create_online_driver(txn).await?;

            let err = driver_service()
                .update_location(txn, driver.id, 181.0, 0.0)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidCoordinate, _)
            ));

            let err = driver_service()
                .update_location(txn, 777_777, 10.0, 10.0)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Driver, _)));

            // Rejected writes leave the row untouched
            let driver = driver_service().find(txn, driver.id).await?;
            assert!(driver.coordinate.is_none());

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn online_status_update_round_trips() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let driver = create_test_driver(txn, OnlineStatus::Offline).await?;

            let updated = driver_service()
                .update_online_status(txn, driver.id, OnlineStatus::Online)
                .await?;
            assert_eq!(updated.online_status, OnlineStatus::Online);

            let err = driver_service()
                .update_online_status(txn, 555_555, OnlineStatus::Online)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Driver, _)));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn find_by_online_status_filters_and_includes_deleted() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let online = create_online_driver(txn).await?;
            let online_deleted = create_online_driver(txn).await?;
            let offline = create_test_driver(txn, OnlineStatus::Offline).await?;
            driver_service().delete(txn, online_deleted.id).await?;

            let found = driver_service()
                .find_by_online_status(txn, OnlineStatus::Online)
                .await?;
            let ids: Vec<i64> = found.iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![online.id, online_deleted.id]);

            let found = driver_service()
                .find_by_online_status(txn, OnlineStatus::Offline)
                .await?;
            let ids: Vec<i64> = found.iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![offline.id]);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn soft_deleted_driver_remains_retrievable() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let driver = create_online_driver(txn).await?;
            driver_service().delete(txn, driver.id).await?;

            let found = driver_service().find(txn, driver.id).await?;
            assert!(found.status.is_deleted());
            assert_eq!(found.username, driver.username);

            // Deleting twice is harmless
            driver_service().delete(txn, driver.id).await?;

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn partition_splits_on_current_assignment() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let service = driver_service();

            let empty = service.drivers_with_and_without_cars(txn).await?;
            assert!(empty.with_cars.is_empty());
            assert!(empty.without_cars.is_empty());

            let with_car = create_online_driver(txn).await?;
            let without_car = create_online_driver(txn).await?;
            let offline = create_test_driver(txn, OnlineStatus::Offline).await?;
            let car = create_test_car(txn).await?;
            service
                .assign_or_unassign_car(txn, with_car.id, car.id, DriverAction::Select)
                .await?;
            service.delete(txn, offline.id).await?;

            let split = service.drivers_with_and_without_cars(txn).await?;
            let with_ids: Vec<i64> = split.with_cars.iter().map(|d| d.id).collect();
            let without_ids: Vec<i64> = split.without_cars.iter().map(|d| d.id).collect();
            assert_eq!(with_ids, vec![with_car.id]);
            assert_eq!(without_ids, vec![without_car.id, offline.id]);
            assert_eq!(split.with_cars[0].car_id, Some(car.id));

            service
                .assign_or_unassign_car(txn, with_car.id, car.id, DriverAction::Deselect)
                .await?;
            let split = service.drivers_with_and_without_cars(txn).await?;
            assert!(split.with_cars.is_empty());
            assert_eq!(split.without_cars.len(), 3);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn listings_hydrate_cars_across_lookup_chunks() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let service = driver_service();
            let mut drivers = Vec::with_capacity(LOOKUP_CHUNK + 2);
            for _ in 0..LOOKUP_CHUNK + 2 {
                drivers.push(create_online_driver(txn).await?);
            }
            let first = drivers[0].id;
            let last = drivers[LOOKUP_CHUNK + 1].id;

            let first_car = create_test_car(txn).await?;
            let last_car = create_test_car(txn).await?;
            service
                .assign_or_unassign_car(txn, first, first_car.id, DriverAction::Select)
                .await?;
            service
                .assign_or_unassign_car(txn, last, last_car.id, DriverAction::Select)
                .await?;

            let split = service.drivers_with_and_without_cars(txn).await?;
            let with_ids: Vec<(i64, Option<i64>)> =
                split.with_cars.iter().map(|d| (d.id, d.car_id)).collect();
            assert_eq!(
                with_ids,
                vec![(first, Some(first_car.id)), (last, Some(last_car.id))]
            );
            assert_eq!(split.without_cars.len(), LOOKUP_CHUNK);

            let online = service
                .find_by_online_status(txn, OnlineStatus::Online)
                .await?;
            assert_eq!(online.len(), LOOKUP_CHUNK + 2);
            let hydrated = online.iter().filter(|d| d.car_id.is_some()).count();
            assert_eq!(hydrated, 2);
            assert_eq!(online[LOOKUP_CHUNK + 1].car_id, Some(last_car.id));

            Ok::<_, AppError>(())
        })
    })
    .await
}
