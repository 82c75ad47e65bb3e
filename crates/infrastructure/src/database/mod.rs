mod care_tips_repository;
mod controller_repository;
mod error;
mod plant_group_repository;
mod plant_repository;
mod schema;
mod sensor_data_repository;
mod sensor_range_repository;
mod sensor_type_repository;
mod session;

pub use care_tips_repository::SqliteCareTipsRepository;
pub use controller_repository::SqliteControllerRepository;
pub use plant_group_repository::SqlitePlantGroupRepository;
pub use plant_repository::SqlitePlantRepository;
pub use sensor_data_repository::SqliteSensorDataRepository;
pub use sensor_range_repository::SqliteSensorRangeRepository;
pub use sensor_type_repository::SqliteSensorTypeRepository;
pub use session::Session;

use crate::config::DatabaseConfig;
use domain::DomainError;
use error::db_error;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Handle to the embedded store. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the store described by `config`, creating the file, the tables and
    /// the sensor catalog entries that do not exist yet.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(db_error)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every extra connection to a memory URL may see its own empty database
        let max_connections = if is_in_memory(&config.url) {
            1
        } else {
            config.max_connections.max(1)
        };

        // Connections live as long as the pool: an in-memory database vanishes
        // with its last connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        schema::initialize(&pool, &config.sensor_types).await?;
        info!("Database ready at {}", config.url);

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a new session on this database.
    pub async fn session(&self) -> Result<Session, DomainError> {
        let mut session = Session::new(self);
        session.open().await?;
        Ok(session)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Commit on success, roll back on failure. The original error is returned
/// untouched so callers still see which sub-step failed.
pub(crate) async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match outcome {
        Ok(value) => {
            tx.commit().await.map_err(db_error)?;
            Ok(value)
        }
        Err(err) => {
            warn!("Rolling back transaction: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(is_in_memory("sqlite:file:buddy?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://buddy.sqlite"));
    }

    #[tokio::test]
    async fn test_memory_database_uses_single_connection() {
        let mut config = DatabaseConfig::in_memory();
        config.max_connections = 4;
        let database = Database::connect(&config).await.unwrap();

        assert_eq!(database.pool().options().get_max_connections(), 1);

        let mut session = database.session().await.unwrap();
        let types: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM SENSOR_TYPE")
            .fetch_one(session.connection().unwrap())
            .await
            .unwrap();
        assert_eq!(types, 4);
    }
}
