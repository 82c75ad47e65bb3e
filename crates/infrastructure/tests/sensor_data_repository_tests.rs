//! Integration tests for SqliteSensorDataRepository, the sensor catalog and
//! controllers

use chrono::{Duration, TimeZone, Utc};
use domain::sensor::{
    SensorDataFilter, SensorDataRepository, SensorDataScope, SensorReading, SensorTypeRepository,
};
use domain::{
    ControllerRepository, ErrorKind, PlantChange, PlantGroupChange, PlantGroupRepository,
    PlantRepository,
};
use infrastructure::{
    Database, DatabaseConfig, SqliteControllerRepository, SqlitePlantGroupRepository,
    SqlitePlantRepository, SqliteSensorDataRepository, SqliteSensorTypeRepository,
};

async fn create_test_database() -> Database {
    Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database")
}

/// Setup test controller (required for foreign key)
async fn setup_controller(database: &Database, plant_group: i64) -> String {
    let uuid = uuid::Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO CONTROLLER (UUID, PLANT_GROUP) VALUES (?, ?)")
        .bind(&uuid)
        .bind(plant_group)
        .execute(database.pool())
        .await
        .expect("Failed to setup controller");
    uuid
}

/// Insert a reading with an explicit timestamp, bypassing the write path
async fn insert_reading(database: &Database, controller: &str, sensor: &str, value: f64, at: &str) {
    sqlx::query(
        "INSERT INTO SENSOR_DATA (CONTROLLER, SENSOR, VALUE, TIMESTAMP) VALUES (?, ?, ?, ?)",
    )
    .bind(controller)
    .bind(sensor)
    .bind(value)
    .bind(at)
    .execute(database.pool())
    .await
    .expect("Failed to insert reading");
}

/// Two groups with one plant each. Returns (group a, group b, plant in a).
async fn setup_groups(database: &Database) -> (i64, i64, i64) {
    let mut session = database.session().await.unwrap();
    let (a, b) = {
        let mut groups = SqlitePlantGroupRepository::new(&mut session).unwrap();
        let a = groups.create(&PlantGroupChange::new("Succulents")).await.unwrap();
        let b = groups.create(&PlantGroupChange::new("Herbs")).await.unwrap();
        (a.id, b.id)
    };
    let mut plants = SqlitePlantRepository::new(&mut session).unwrap();
    let plant = plants.create(&PlantChange::new("Cactus1", a)).await.unwrap();
    (a, b, plant.id)
}

#[tokio::test]
async fn test_save_and_read_last_day() {
    let database = create_test_database().await;
    let (group, _, plant) = setup_groups(&database).await;
    let controller = setup_controller(&database, group).await;
    let old = (Utc::now() - Duration::days(2)).format("%Y-%m-%d %H:%M:%S").to_string();
    insert_reading(&database, &controller, "moisture", 12.0, &old).await;

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();

    let saved = repo
        .save(SensorReading::new(&controller, "moisture", 31.5))
        .await
        .expect("Failed to save reading");
    assert_eq!(saved.value, 31.5);
    assert!(!saved.timestamp.is_empty());

    let filter = SensorDataFilter::last_day("moisture", SensorDataScope::Plant(plant), Utc::now());
    let readings = repo.get_all(&filter).await.expect("Failed to read");

    // The two day old reading is outside the default window
    assert_eq!(readings, vec![saved]);
}

#[tokio::test]
async fn test_time_window_is_inclusive() {
    let database = create_test_database().await;
    let (group, _, _) = setup_groups(&database).await;
    let controller = setup_controller(&database, group).await;
    for (value, at) in [
        (1.0, "2023-05-19 23:59:59"),
        (2.0, "2023-05-20 00:00:00"),
        (3.0, "2023-05-20 12:00:00"),
        (4.0, "2023-05-21 00:00:00"),
        (5.0, "2023-05-21 00:00:01"),
    ] {
        insert_reading(&database, &controller, "humidity", value, at).await;
    }

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();

    let from = Utc.with_ymd_and_hms(2023, 5, 20, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2023, 5, 21, 0, 0, 0).unwrap();
    let filter = SensorDataFilter::last_day("humidity", SensorDataScope::PlantGroup(group), to)
        .between(from, to);

    let values: Vec<f64> = repo
        .get_all(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.value)
        .collect();
    assert_eq!(values, vec![2.0, 3.0, 4.0]);
}

#[tokio::test]
async fn test_scope_and_sensor_filtering() {
    let database = create_test_database().await;
    let (group_a, group_b, plant_a) = setup_groups(&database).await;
    let controller_a = setup_controller(&database, group_a).await;
    let controller_b = setup_controller(&database, group_b).await;
    let at = "2023-05-20 08:00:00";
    insert_reading(&database, &controller_a, "moisture", 10.0, at).await;
    insert_reading(&database, &controller_a, "temperature", 21.0, at).await;
    insert_reading(&database, &controller_b, "moisture", 99.0, at).await;

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();
    let to = Utc.with_ymd_and_hms(2023, 5, 20, 12, 0, 0).unwrap();

    // By plant resolves to the plant's group
    let by_plant = SensorDataFilter::last_day("moisture", SensorDataScope::Plant(plant_a), to);
    let readings = repo.get_all(&by_plant).await.unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].controller, controller_a);
    assert_eq!(readings[0].value, 10.0);
    assert_eq!(readings[0].timestamp, at);

    let by_group = SensorDataFilter::last_day("moisture", SensorDataScope::PlantGroup(group_b), to);
    let readings = repo.get_all(&by_group).await.unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].value, 99.0);
}

#[tokio::test]
async fn test_read_by_unknown_plant() {
    let database = create_test_database().await;
    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();

    let filter = SensorDataFilter::last_day("moisture", SensorDataScope::Plant(77), Utc::now());
    let err = repo.get_all(&filter).await.expect_err("Plant does not exist");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_save_rejects_unknown_references() {
    let database = create_test_database().await;
    let (group, _, _) = setup_groups(&database).await;
    let controller = setup_controller(&database, group).await;

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();

    let err = repo
        .save(SensorReading::new(&controller, "co2", 400.0))
        .await
        .expect_err("Unknown sensor type");
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let err = repo
        .save(SensorReading::new("no-such-controller", "moisture", 1.0))
        .await
        .expect_err("Unknown controller");
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}

#[tokio::test]
async fn test_save_all_is_best_effort() {
    let database = create_test_database().await;
    let (group, _, _) = setup_groups(&database).await;
    let controller = setup_controller(&database, group).await;

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorDataRepository::new(&mut session).unwrap();

    let errors = repo
        .save_all(vec![
            SensorReading::new(&controller, "moisture", 30.0),
            SensorReading::new(&controller, "co2", 410.0),
            SensorReading::new(&controller, "moisture", 32.0),
        ])
        .await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::ValidationFailed);

    let filter =
        SensorDataFilter::last_day("moisture", SensorDataScope::PlantGroup(group), Utc::now());
    let values: Vec<f64> = repo
        .get_all(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.value)
        .collect();
    assert_eq!(values, vec![30.0, 32.0]);

    assert!(repo.save_all(Vec::new()).await.is_empty());
}

#[tokio::test]
async fn test_sensor_catalog() {
    let database = create_test_database().await;
    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorTypeRepository::new(&mut session).unwrap();

    let names: Vec<_> = repo
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["brightness", "humidity", "moisture", "temperature"]);
}

#[tokio::test]
async fn test_catalog_from_config() {
    let mut config = DatabaseConfig::in_memory();
    config.sensor_types = vec![domain::sensor::SensorType::new("ph", "pH")];
    let database = Database::connect(&config).await.unwrap();

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteSensorTypeRepository::new(&mut session).unwrap();
    let types = repo.get_all().await.unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].unit, "pH");
}

#[tokio::test]
async fn test_controllers() {
    let database = create_test_database().await;
    let (group, _, _) = setup_groups(&database).await;
    let controller = setup_controller(&database, group).await;
    insert_reading(&database, &controller, "moisture", 1.0, "2023-05-20 08:00:00").await;
    insert_reading(&database, &controller, "moisture", 2.0, "2023-05-20 09:00:00").await;
    insert_reading(&database, &controller, "brightness", 300.0, "2023-05-20 09:00:00").await;

    let mut session = database.session().await.unwrap();
    let mut repo = SqliteControllerRepository::new(&mut session).unwrap();

    assert_eq!(repo.get_all_uuids().await.unwrap(), vec![controller.clone()]);

    let found = repo.get_by_uuid(&controller).await.unwrap();
    assert_eq!(found.plant_group, group);
    assert_eq!(found.sensors, vec!["brightness", "moisture"]);

    let err = repo.get_by_uuid("unknown").await.expect_err("No such controller");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
