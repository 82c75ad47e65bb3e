use super::Database;
use domain::DomainError;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};
use tracing::debug;

/// One logical unit of work against the store
///
/// A session is created unbound, [`open`](Session::open)ed to check out one
/// connection and [`close`](Session::close)d to hand it back. Repositories
/// built from the same session share that connection, so a write followed by
/// a read on the same session always observes the write. Dropping a session
/// releases its connection as well.
pub struct Session {
    database: Database,
    conn: Option<PoolConnection<Sqlite>>,
}

impl Session {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            conn: None,
        }
    }

    pub async fn open(&mut self) -> Result<(), DomainError> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = self
            .database
            .pool()
            .acquire()
            .await
            .map_err(|e| DomainError::ResourceUnavailable(e.to_string()))?;
        debug!("Session opened");
        self.conn = Some(conn);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. Safe on unopened or already closed sessions.
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!("Session closed");
        }
    }

    pub(crate) fn connection(&mut self) -> Result<&mut SqliteConnection, DomainError> {
        self.conn
            .as_deref_mut()
            .ok_or_else(|| DomainError::ResourceUnavailable("session is not open".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let database = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();
        let mut session = Session::new(&database);
        assert!(!session.is_open());
        assert!(session.connection().is_err());

        session.open().await.unwrap();
        assert!(session.is_open());
        assert!(session.connection().is_ok());

        session.close();
        assert!(!session.is_open());
        // idempotent
        session.close();
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn test_closed_session_returns_connection_to_pool() {
        let database = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();

        let mut first = Session::new(&database);
        first.open().await.unwrap();
        first.close();

        // Single-connection pool: this would time out if the first session leaked
        let mut second = Session::new(&database);
        second.open().await.unwrap();
        assert!(second.is_open());
    }
}
