//! Infrastructure layer - SQLite persistence and configuration
//!
//! Repositories borrow the connection of an open [`Session`], so every
//! repository built from one session sees the same data and the same
//! transaction.

pub mod config;
pub mod database;

pub use crate::config::{AppConfig, DatabaseConfig};
pub use database::{
    Database, Session, SqliteCareTipsRepository, SqliteControllerRepository,
    SqlitePlantGroupRepository, SqlitePlantRepository, SqliteSensorDataRepository,
    SqliteSensorRangeRepository, SqliteSensorTypeRepository,
};
