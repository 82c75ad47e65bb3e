use super::error::db_error;
use super::{Session, SqliteCareTipsRepository, SqliteSensorRangeRepository, finish};
use async_trait::async_trait;
use domain::sensor::SensorRangeRepository;
use domain::{
    CareTipsRepository, DomainError, PlantGroup, PlantGroupChange, PlantGroupRepository,
    PlantGroupStub,
};
use sqlx::{Connection, Row, SqliteConnection};
use tracing::{debug, info};

/// SQLite implementation of PlantGroupRepository
///
/// Care tips and sensor ranges are written through their own repositories on
/// the same connection, inside the transaction opened here.
pub struct SqlitePlantGroupRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqlitePlantGroupRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self::from_connection(session.connection()?))
    }

    pub(crate) fn from_connection(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    async fn insert(conn: &mut SqliteConnection, change: &PlantGroupChange) -> Result<i64, DomainError> {
        let result = sqlx::query("INSERT INTO PLANT_GROUP (NAME, DESCRIPTION) VALUES (?, ?)")
            .bind(&change.name)
            .bind(&change.description)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;
        let id = result.last_insert_rowid();

        SqliteCareTipsRepository::from_connection(&mut *conn)
            .create(id, &change.care_tips)
            .await?;
        SqliteSensorRangeRepository::from_connection(&mut *conn)
            .create_all(id, &change.sensor_ranges)
            .await?;

        Ok(id)
    }

    async fn replace(
        conn: &mut SqliteConnection,
        id: i64,
        change: &PlantGroupChange,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE PLANT_GROUP SET NAME = ?, DESCRIPTION = ? WHERE ID = ?")
            .bind(&change.name)
            .bind(&change.description)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Plant group", id));
        }

        let mut care_tips = SqliteCareTipsRepository::from_connection(&mut *conn);
        care_tips.delete_all_by_plant_group_id(id).await?;
        care_tips.create(id, &change.care_tips).await?;

        SqliteSensorRangeRepository::from_connection(&mut *conn)
            .update_all(id, &change.sensor_ranges)
            .await
    }

    async fn remove(conn: &mut SqliteConnection, id: i64) -> Result<(), DomainError> {
        let plants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM PLANT WHERE PLANT_GROUP = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error)?;
        if plants > 0 {
            return Err(DomainError::PlantGroupStillInUse(id));
        }

        SqliteCareTipsRepository::from_connection(&mut *conn)
            .delete_all_by_plant_group_id(id)
            .await?;
        SqliteSensorRangeRepository::from_connection(&mut *conn)
            .delete_all_by_plant_group_id(id)
            .await?;

        sqlx::query("DELETE FROM PLANT_GROUP WHERE ID = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl<'c> PlantGroupRepository for SqlitePlantGroupRepository<'c> {
    async fn get_by_id(&mut self, id: i64) -> Result<PlantGroup, DomainError> {
        let row = sqlx::query("SELECT ID, NAME, DESCRIPTION FROM PLANT_GROUP WHERE ID = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Plant group", id))?;

        let name: String = row.try_get("NAME").map_err(db_error)?;
        let description: Option<String> = row.try_get("DESCRIPTION").map_err(db_error)?;

        let care_tips = SqliteCareTipsRepository::from_connection(&mut *self.conn)
            .get_by_plant_group_id(id)
            .await?;
        let sensor_ranges = SqliteSensorRangeRepository::from_connection(&mut *self.conn)
            .get_all_by_plant_group_id(id)
            .await?;

        Ok(PlantGroup {
            id,
            name,
            description: description.unwrap_or_default(),
            care_tips,
            sensor_ranges,
        })
    }

    async fn get_all(&mut self) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT ID FROM PLANT_GROUP ORDER BY ID")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)
    }

    async fn get_all_overview(&mut self) -> Result<Vec<PlantGroupStub>, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT ID, NAME FROM PLANT_GROUP ORDER BY ID")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| PlantGroupStub { id, name })
            .collect())
    }

    async fn create(&mut self, change: &PlantGroupChange) -> Result<PlantGroup, DomainError> {
        change.validate()?;

        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::insert(&mut tx, change).await;
        let id = finish(tx, outcome).await?;

        info!("Created plant group {} ({})", id, change.name);
        self.get_by_id(id).await
    }

    async fn update(
        &mut self,
        id: i64,
        change: &PlantGroupChange,
    ) -> Result<PlantGroup, DomainError> {
        change.validate()?;

        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::replace(&mut tx, id, change).await;
        finish(tx, outcome).await?;

        info!("Updated plant group {}", id);
        self.get_by_id(id).await
    }

    async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::remove(&mut tx, id).await;
        finish(tx, outcome).await?;

        debug!("Deleted plant group {}", id);
        Ok(())
    }
}
