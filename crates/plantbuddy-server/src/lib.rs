//! HTTP facade over the PlantBuddy store
//!
//! Handlers are thin: open a session, run one repository operation, close.

pub mod api;
pub mod error;
pub mod extract;
pub mod state;

use infrastructure::Database;
use state::AppState;
use std::sync::Arc;

pub fn setup_app_state(database: Database) -> Arc<AppState> {
    Arc::new(AppState::new(database))
}
