use domain::DomainError;
use infrastructure::{Database, Session};

/// Shared handler state. Every request opens its own session.
pub struct AppState {
    pub database: Database,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn session(&self) -> Result<Session, DomainError> {
        self.database.session().await
    }
}
