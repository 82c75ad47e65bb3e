use super::Session;
use super::error::db_error;
use async_trait::async_trait;
use domain::{CareTipsRepository, DomainError};
use sqlx::SqliteConnection;

/// SQLite implementation of CareTipsRepository
///
/// Statements run on whatever the connection is currently doing, so inside an
/// open transaction they become part of it.
pub struct SqliteCareTipsRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteCareTipsRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self::from_connection(session.connection()?))
    }

    pub(crate) fn from_connection(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> CareTipsRepository for SqliteCareTipsRepository<'c> {
    async fn get_by_plant_group_id(&mut self, id: i64) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT TIP FROM CARE_TIPS WHERE PLANT_GROUP = ? ORDER BY ID")
            .bind(id)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)
    }

    async fn get_additional_by_plant_id(&mut self, id: i64) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT TIP FROM ADDITIONAL_CARE_TIPS WHERE PLANT = ? ORDER BY ID")
            .bind(id)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)
    }

    async fn create(&mut self, plant_group_id: i64, tips: &[String]) -> Result<(), DomainError> {
        for tip in tips {
            sqlx::query("INSERT INTO CARE_TIPS (PLANT_GROUP, TIP) VALUES (?, ?)")
                .bind(plant_group_id)
                .bind(tip)
                .execute(&mut *self.conn)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }

    async fn delete_all_by_plant_group_id(&mut self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM CARE_TIPS WHERE PLANT_GROUP = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn create_additional_by_plant_id(
        &mut self,
        plant_id: i64,
        tips: &[String],
    ) -> Result<(), DomainError> {
        for tip in tips {
            sqlx::query("INSERT INTO ADDITIONAL_CARE_TIPS (PLANT, TIP) VALUES (?, ?)")
                .bind(plant_id)
                .bind(tip)
                .execute(&mut *self.conn)
                .await
                .map_err(db_error)?;
        }
        Ok(())
    }

    async fn delete_additional_by_plant_id(&mut self, plant_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM ADDITIONAL_CARE_TIPS WHERE PLANT = ?")
            .bind(plant_id)
            .execute(&mut *self.conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
