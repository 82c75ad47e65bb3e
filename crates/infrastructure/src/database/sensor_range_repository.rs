use super::error::db_error;
use super::{Session, finish};
use async_trait::async_trait;
use domain::DomainError;
use domain::sensor::{SensorRange, SensorRangeChange, SensorRangeRepository, SensorType};
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, Row, SqliteConnection};

/// SQLite implementation of SensorRangeRepository
pub struct SqliteSensorRangeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteSensorRangeRepository<'c> {
    pub fn new(session: &'c mut Session) -> Result<Self, DomainError> {
        Ok(Self::from_connection(session.connection()?))
    }

    pub(crate) fn from_connection(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    async fn insert(
        conn: &mut SqliteConnection,
        plant_group_id: i64,
        range: &SensorRangeChange,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO SENSOR_RANGE (PLANT_GROUP, SENSOR, MIN, MAX) VALUES (?, ?, ?, ?)")
            .bind(plant_group_id)
            .bind(&range.sensor)
            .bind(range.min)
            .bind(range.max)
            .execute(conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    /// Insert `(0, 0)` for every catalog type the group has no range for yet.
    async fn fill_missing(conn: &mut SqliteConnection, plant_group_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO SENSOR_RANGE (PLANT_GROUP, SENSOR, MIN, MAX)
            SELECT ?, ST.NAME, 0, 0
            FROM SENSOR_TYPE ST
            WHERE ST.NAME NOT IN (
                SELECT SR.SENSOR
                FROM SENSOR_RANGE SR
                WHERE SR.PLANT_GROUP = ?
            )
            "#,
        )
        .bind(plant_group_id)
        .bind(plant_group_id)
        .execute(conn)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn insert_all(
        conn: &mut SqliteConnection,
        plant_group_id: i64,
        ranges: &[SensorRangeChange],
    ) -> Result<(), DomainError> {
        for range in ranges {
            Self::insert(&mut *conn, plant_group_id, range).await?;
        }
        let filled = Self::fill_missing(conn, plant_group_id).await?;
        tracing::debug!(
            "Plant group {}: {} explicit sensor ranges, {} defaulted",
            plant_group_id,
            ranges.len(),
            filled
        );
        Ok(())
    }

    async fn delete_all(conn: &mut SqliteConnection, plant_group_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM SENSOR_RANGE WHERE PLANT_GROUP = ?")
            .bind(plant_group_id)
            .execute(conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

fn range_from_row(row: &SqliteRow) -> Result<SensorRange, DomainError> {
    Ok(SensorRange {
        min: row.try_get("MIN").map_err(db_error)?,
        max: row.try_get("MAX").map_err(db_error)?,
        sensor_type: SensorType {
            name: row.try_get("NAME").map_err(db_error)?,
            unit: row.try_get("UNIT").map_err(db_error)?,
        },
    })
}

#[async_trait]
impl<'c> SensorRangeRepository for SqliteSensorRangeRepository<'c> {
    async fn get_all_by_plant_group_id(
        &mut self,
        id: i64,
    ) -> Result<Vec<SensorRange>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT SR.MIN, SR.MAX, ST.NAME, ST.UNIT
            FROM SENSOR_RANGE SR
            JOIN SENSOR_TYPE ST ON SR.SENSOR = ST.NAME
            WHERE SR.PLANT_GROUP = ?
            ORDER BY ST.NAME
            "#,
        )
        .bind(id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(db_error)?;

        rows.iter().map(range_from_row).collect()
    }

    async fn create(
        &mut self,
        plant_group_id: i64,
        range: &SensorRangeChange,
    ) -> Result<(), DomainError> {
        Self::insert(&mut *self.conn, plant_group_id, range).await
    }

    /// Runs in its own transaction, which nests as a savepoint when the
    /// caller already holds one.
    async fn create_all(
        &mut self,
        plant_group_id: i64,
        ranges: &[SensorRangeChange],
    ) -> Result<(), DomainError> {
        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = Self::insert_all(&mut tx, plant_group_id, ranges).await;
        finish(tx, outcome).await
    }

    async fn update(
        &mut self,
        plant_group_id: i64,
        range: &SensorRangeChange,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO SENSOR_RANGE (PLANT_GROUP, SENSOR, MIN, MAX)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (PLANT_GROUP, SENSOR) DO UPDATE SET
                MIN = excluded.MIN,
                MAX = excluded.MAX
            "#,
        )
        .bind(plant_group_id)
        .bind(&range.sensor)
        .bind(range.min)
        .bind(range.max)
        .execute(&mut *self.conn)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn update_all(
        &mut self,
        plant_group_id: i64,
        ranges: &[SensorRangeChange],
    ) -> Result<(), DomainError> {
        let mut tx = self.conn.begin().await.map_err(db_error)?;
        let outcome = async {
            Self::delete_all(&mut tx, plant_group_id).await?;
            Self::insert_all(&mut tx, plant_group_id, ranges).await
        }
        .await;
        finish(tx, outcome).await
    }

    async fn delete_all_by_plant_group_id(&mut self, id: i64) -> Result<(), DomainError> {
        Self::delete_all(&mut *self.conn, id).await
    }
}
