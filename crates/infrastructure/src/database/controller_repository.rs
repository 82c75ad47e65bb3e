use super::Session;
use super::error::db_error;
use async_trait::async_trait;
use domain::{Controller, ControllerRepository, DomainError};
use sqlx::SqliteConnection;

/// SQLite implementation of ControllerRepository
pub struct SqliteControllerRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteControllerRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self {
            conn: session.connection()?,
        })
    }
}

#[async_trait]
impl<'c> ControllerRepository for SqliteControllerRepository<'c> {
    async fn get_all_uuids(&mut self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT UUID FROM CONTROLLER ORDER BY UUID")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)
    }

    async fn get_by_uuid(&mut self, uuid: &str) -> Result<Controller, DomainError> {
        let plant_group =
            sqlx::query_scalar::<_, i64>("SELECT PLANT_GROUP FROM CONTROLLER WHERE UUID = ?")
                .bind(uuid)
                .fetch_optional(&mut *self.conn)
                .await
                .map_err(db_error)?
                .ok_or_else(|| DomainError::not_found("Controller", uuid))?;

        // Sensors are whatever the controller has reported so far
        let sensors = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT SENSOR FROM SENSOR_DATA WHERE CONTROLLER = ? ORDER BY SENSOR",
        )
        .bind(uuid)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(db_error)?;

        Ok(Controller {
            uuid: uuid.to_string(),
            plant_group,
            sensors,
        })
    }
}
