//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Aggregates (PlantGroup, Plant) and their change requests
//! - Sensor catalog, ranges and time-series readings
//! - Repository interfaces (traits)
//! - The error taxonomy shared by every layer
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Validation rules live next to the types they guard
//! - Testable in isolation

pub mod care_tips;
pub mod controller;
pub mod error;
pub mod plant;
pub mod plant_group;
mod query;
pub mod sensor;

// Re-export commonly used types
pub use care_tips::CareTipsRepository;
pub use controller::{Controller, ControllerRepository};
pub use error::{DomainError, ErrorKind};
pub use plant::{Plant, PlantChange, PlantRepository, PlantStub, PlantsFilter};
pub use plant_group::{PlantGroup, PlantGroupChange, PlantGroupRepository, PlantGroupStub};
