use super::error::db_error;
use domain::DomainError;
use domain::sensor::SensorType;
use sqlx::SqlitePool;
use tracing::debug;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS SENSOR_TYPE (
        NAME TEXT PRIMARY KEY,
        UNIT TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS PLANT_GROUP (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        NAME TEXT NOT NULL,
        DESCRIPTION TEXT
    )",
    "CREATE TABLE IF NOT EXISTS PLANT (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        PLANT_GROUP INTEGER NOT NULL REFERENCES PLANT_GROUP (ID),
        DESCRIPTION TEXT,
        NAME TEXT NOT NULL,
        SPECIES TEXT,
        LOCATION TEXT
    )",
    "CREATE TABLE IF NOT EXISTS CARE_TIPS (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        PLANT_GROUP INTEGER NOT NULL REFERENCES PLANT_GROUP (ID),
        TIP TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS ADDITIONAL_CARE_TIPS (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        PLANT INTEGER NOT NULL REFERENCES PLANT (ID),
        TIP TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS SENSOR_RANGE (
        PLANT_GROUP INTEGER NOT NULL REFERENCES PLANT_GROUP (ID),
        SENSOR TEXT NOT NULL REFERENCES SENSOR_TYPE (NAME),
        MIN REAL NOT NULL,
        MAX REAL NOT NULL,
        UNIQUE (PLANT_GROUP, SENSOR)
    )",
    "CREATE TABLE IF NOT EXISTS CONTROLLER (
        UUID TEXT PRIMARY KEY,
        PLANT_GROUP INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS SENSOR_DATA (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        CONTROLLER TEXT NOT NULL REFERENCES CONTROLLER (UUID),
        SENSOR TEXT NOT NULL REFERENCES SENSOR_TYPE (NAME),
        VALUE REAL NOT NULL,
        TIMESTAMP TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS IDX_SENSOR_DATA_LOOKUP
        ON SENSOR_DATA (SENSOR, TIMESTAMP)",
];

/// Create missing tables and make sure the sensor catalog contains `catalog`.
///
/// Idempotent: existing tables and catalog rows are left untouched.
pub(crate) async fn initialize(pool: &SqlitePool, catalog: &[SensorType]) -> Result<(), DomainError> {
    for statement in TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(db_error)?;
    }

    for sensor_type in catalog {
        sqlx::query("INSERT OR IGNORE INTO SENSOR_TYPE (NAME, UNIT) VALUES (?, ?)")
            .bind(&sensor_type.name)
            .bind(&sensor_type.unit)
            .execute(pool)
            .await
            .map_err(db_error)?;
    }

    debug!("Schema ready, {} catalog sensor types ensured", catalog.len());
    Ok(())
}
