use super::error::db_error;
use super::{Session, finish};
use async_trait::async_trait;
use chrono::Utc;
use domain::DomainError;
use domain::sensor::{
    SensorData, SensorDataFilter, SensorDataRepository, SensorDataScope, SensorReading,
    format_timestamp,
};
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, warn};

/// SQLite implementation of SensorDataRepository
pub struct SqliteSensorDataRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteSensorDataRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self::from_connection(session.connection()?))
    }

    pub(crate) fn from_connection(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Readings are stored per controller; controllers belong to a group.
    async fn resolve_plant_group(&mut self, scope: SensorDataScope) -> Result<i64, DomainError> {
        match scope {
            SensorDataScope::PlantGroup(id) => Ok(id),
            SensorDataScope::Plant(id) => {
                sqlx::query_scalar::<_, i64>("SELECT PLANT_GROUP FROM PLANT WHERE ID = ?")
                    .bind(id)
                    .fetch_optional(&mut *self.conn)
                    .await
                    .map_err(db_error)?
                    .ok_or_else(|| DomainError::not_found("Plant", id))
            }
        }
    }

    async fn insert(conn: &mut SqliteConnection, data: &SensorData) -> Result<(), DomainError> {
        let known_sensor: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM SENSOR_TYPE WHERE NAME = ?)")
                .bind(&data.sensor)
                .fetch_one(&mut *conn)
                .await
                .map_err(db_error)?;
        if !known_sensor {
            return Err(DomainError::validation(format!(
                "unknown sensor type {}",
                data.sensor
            )));
        }

        let known_controller: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM CONTROLLER WHERE UUID = ?)")
                .bind(&data.controller)
                .fetch_one(&mut *conn)
                .await
                .map_err(db_error)?;
        if !known_controller {
            return Err(DomainError::validation(format!(
                "unknown controller {}",
                data.controller
            )));
        }

        sqlx::query(
            "INSERT INTO SENSOR_DATA (CONTROLLER, SENSOR, VALUE, TIMESTAMP) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.controller)
        .bind(&data.sensor)
        .bind(data.value)
        .bind(&data.timestamp)
        .execute(conn)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl<'c> SensorDataRepository for SqliteSensorDataRepository<'c> {
    async fn get_all(&mut self, filter: &SensorDataFilter) -> Result<Vec<SensorData>, DomainError> {
        let plant_group = self.resolve_plant_group(filter.scope).await?;

        let rows = sqlx::query_as::<_, (String, String, f64, String)>(
            r#"
            SELECT SD.CONTROLLER, SD.SENSOR, SD.VALUE, SD.TIMESTAMP
            FROM SENSOR_DATA SD
            JOIN CONTROLLER C ON SD.CONTROLLER = C.UUID
            WHERE C.PLANT_GROUP = ?
              AND SD.SENSOR = ?
              AND SD.TIMESTAMP BETWEEN ? AND ?
            ORDER BY SD.TIMESTAMP, SD.ID
            "#,
        )
        .bind(plant_group)
        .bind(&filter.sensor)
        .bind(format_timestamp(filter.from))
        .bind(format_timestamp(filter.to))
        .fetch_all(&mut *self.conn)
        .await
        .map_err(db_error)?;

        debug!(
            "{} {} readings for plant group {}",
            rows.len(),
            filter.sensor,
            plant_group
        );

        Ok(rows
            .into_iter()
            .map(|(controller, sensor, value, timestamp)| SensorData {
                controller,
                sensor,
                value,
                timestamp,
            })
            .collect())
    }

    async fn save(&mut self, reading: SensorReading) -> Result<SensorData, DomainError> {
        let data = reading.stamped(Utc::now());

        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::insert(&mut tx, &data).await;
        finish(tx, outcome).await?;

        Ok(data)
    }

    async fn save_all(&mut self, readings: Vec<SensorReading>) -> Vec<DomainError> {
        let total = readings.len();
        let mut errors = Vec::new();

        for reading in readings {
            let label = format!("{}/{}", reading.controller, reading.sensor);
            if let Err(e) = self.save(reading).await {
                warn!("Dropping sensor reading {}: {}", label, e);
                errors.push(e);
            }
        }

        debug!("Saved {} of {} sensor readings", total - errors.len(), total);
        errors
    }
}
