use super::{Plant, PlantChange, PlantStub, PlantsFilter};
use crate::DomainError;
use async_trait::async_trait;

/// Repository of the plant aggregate
///
/// Create and update first check that the referenced plant group exists and
/// fail with `PlantGroupNotExisting` before touching any plant row.
#[async_trait]
pub trait PlantRepository: Send {
    async fn get_by_id(&mut self, id: i64) -> Result<Plant, DomainError>;

    /// Bare ids, optionally restricted to one plant group
    async fn get_all(&mut self, filter: PlantsFilter) -> Result<Vec<i64>, DomainError>;

    async fn get_all_overview(&mut self) -> Result<Vec<PlantStub>, DomainError>;

    async fn create(&mut self, change: &PlantChange) -> Result<Plant, DomainError>;

    async fn update(&mut self, id: i64, change: &PlantChange) -> Result<Plant, DomainError>;

    /// Deleting an unknown id is not an error
    async fn delete_by_id(&mut self, id: i64) -> Result<(), DomainError>;
}
