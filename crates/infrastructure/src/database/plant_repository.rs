use super::error::db_error;
use super::{Session, SqliteCareTipsRepository, SqlitePlantGroupRepository, finish};
use async_trait::async_trait;
use domain::{
    CareTipsRepository, DomainError, Plant, PlantChange, PlantGroupRepository, PlantRepository,
    PlantStub, PlantsFilter,
};
use sqlx::{Connection, Row, SqliteConnection};
use tracing::{debug, info};

/// SQLite implementation of PlantRepository
pub struct SqlitePlantRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqlitePlantRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self::from_connection(session.connection()?))
    }

    pub(crate) fn from_connection(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// The referenced group must exist. Checked on the writing connection so
    /// a concurrent delete cannot slip in between.
    async fn ensure_plant_group(conn: &mut SqliteConnection, id: i64) -> Result<(), DomainError> {
        match SqlitePlantGroupRepository::from_connection(conn).get_by_id(id).await {
            Ok(_) => Ok(()),
            Err(DomainError::NotFound { .. }) => Err(DomainError::PlantGroupNotExisting(id)),
            Err(e) => Err(e),
        }
    }

    async fn insert(conn: &mut SqliteConnection, change: &PlantChange) -> Result<i64, DomainError> {
        Self::ensure_plant_group(&mut *conn, change.plant_group_id).await?;

        let result = sqlx::query(
            "INSERT INTO PLANT (PLANT_GROUP, DESCRIPTION, NAME, SPECIES, LOCATION) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(change.plant_group_id)
        .bind(&change.description)
        .bind(&change.name)
        .bind(&change.species)
        .bind(&change.location)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;
        let id = result.last_insert_rowid();

        SqliteCareTipsRepository::from_connection(conn)
            .create_additional_by_plant_id(id, &change.additional_care_tips)
            .await?;

        Ok(id)
    }

    async fn replace(
        conn: &mut SqliteConnection,
        id: i64,
        change: &PlantChange,
    ) -> Result<(), DomainError> {
        Self::ensure_plant_group(&mut *conn, change.plant_group_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE PLANT
            SET PLANT_GROUP = ?, DESCRIPTION = ?, NAME = ?, SPECIES = ?, LOCATION = ?
            WHERE ID = ?
            "#,
        )
        .bind(change.plant_group_id)
        .bind(&change.description)
        .bind(&change.name)
        .bind(&change.species)
        .bind(&change.location)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Plant", id));
        }

        let mut care_tips = SqliteCareTipsRepository::from_connection(conn);
        care_tips.delete_additional_by_plant_id(id).await?;
        care_tips
            .create_additional_by_plant_id(id, &change.additional_care_tips)
            .await
    }

    async fn remove(conn: &mut SqliteConnection, id: i64) -> Result<u64, DomainError> {
        SqliteCareTipsRepository::from_connection(&mut *conn)
            .delete_additional_by_plant_id(id)
            .await?;

        let result = sqlx::query("DELETE FROM PLANT WHERE ID = ?")
            .bind(id)
            .execute(conn)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl<'c> PlantRepository for SqlitePlantRepository<'c> {
    async fn get_by_id(&mut self, id: i64) -> Result<Plant, DomainError> {
        let row = sqlx::query(
            "SELECT ID, PLANT_GROUP, DESCRIPTION, NAME, SPECIES, LOCATION FROM PLANT WHERE ID = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(db_error)?
        .ok_or_else(|| DomainError::not_found("Plant", id))?;

        let plant_group_id: i64 = row.try_get("PLANT_GROUP").map_err(db_error)?;
        let description: Option<String> = row.try_get("DESCRIPTION").map_err(db_error)?;
        let name: String = row.try_get("NAME").map_err(db_error)?;
        let species: Option<String> = row.try_get("SPECIES").map_err(db_error)?;
        let location: Option<String> = row.try_get("LOCATION").map_err(db_error)?;

        let plant_group = SqlitePlantGroupRepository::from_connection(&mut *self.conn)
            .get_by_id(plant_group_id)
            .await?;
        let additional_care_tips = SqliteCareTipsRepository::from_connection(&mut *self.conn)
            .get_additional_by_plant_id(id)
            .await?;

        Ok(Plant {
            id,
            description: description.unwrap_or_default(),
            name,
            species: species.unwrap_or_default(),
            location: location.unwrap_or_default(),
            plant_group,
            additional_care_tips,
        })
    }

    async fn get_all(&mut self, filter: PlantsFilter) -> Result<Vec<i64>, DomainError> {
        let query = match filter.plant_group_id {
            Some(group) => {
                sqlx::query_scalar::<_, i64>("SELECT ID FROM PLANT WHERE PLANT_GROUP = ? ORDER BY ID")
                    .bind(group)
            }
            None => sqlx::query_scalar::<_, i64>("SELECT ID FROM PLANT ORDER BY ID"),
        };

        query.fetch_all(&mut *self.conn).await.map_err(db_error)
    }

    async fn get_all_overview(&mut self) -> Result<Vec<PlantStub>, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT ID, NAME FROM PLANT ORDER BY ID")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| PlantStub { id, name })
            .collect())
    }

    async fn create(&mut self, change: &PlantChange) -> Result<Plant, DomainError> {
        change.validate()?;

        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::insert(&mut tx, change).await;
        let id = finish(tx, outcome).await?;

        info!(
            "Created plant {} ({}) in group {}",
            id, change.name, change.plant_group_id
        );
        self.get_by_id(id).await
    }

    async fn update(&mut self, id: i64, change: &PlantChange) -> Result<Plant, DomainError> {
        change.validate()?;

        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::replace(&mut tx, id, change).await;
        finish(tx, outcome).await?;

        info!("Updated plant {}", id);
        self.get_by_id(id).await
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<(), DomainError> {
        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::remove(&mut tx, id).await;
        let removed = finish(tx, outcome).await?;

        if removed == 0 {
            debug!("Plant {} did not exist, nothing deleted", id);
        } else {
            debug!("Deleted plant {}", id);
        }
        Ok(())
    }
}
