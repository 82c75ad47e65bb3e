use super::Session;
use super::error::db_error;
use async_trait::async_trait;
use domain::DomainError;
use domain::sensor::{SensorType, SensorTypeRepository};
use sqlx::SqliteConnection;

/// Read access to the sensor catalog
pub struct SqliteSensorTypeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteSensorTypeRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self {
            conn: session.connection()?,
        })
    }
}

#[async_trait]
impl<'c> SensorTypeRepository for SqliteSensorTypeRepository<'c> {
    async fn get_all(&mut self) -> Result<Vec<SensorType>, DomainError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT NAME, UNIT FROM SENSOR_TYPE ORDER BY NAME",
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(name, unit)| SensorType { name, unit })
            .collect())
    }
}
