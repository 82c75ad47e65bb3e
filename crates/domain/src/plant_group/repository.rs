use super::{PlantGroup, PlantGroupChange, PlantGroupStub};
use crate::DomainError;
use async_trait::async_trait;

/// Repository of the plant group aggregate
///
/// Every write runs in one transaction: either the group row, its care tips
/// and its sensor ranges all change, or nothing does.
#[async_trait]
pub trait PlantGroupRepository: Send {
    /// Fully hydrated aggregate
    async fn get_by_id(&mut self, id: i64) -> Result<PlantGroup, DomainError>;

    /// Ids of all groups, ascending
    async fn get_all(&mut self) -> Result<Vec<i64>, DomainError>;

    /// Id and name of all groups, no children
    async fn get_all_overview(&mut self) -> Result<Vec<PlantGroupStub>, DomainError>;

    async fn create(&mut self, change: &PlantGroupChange) -> Result<PlantGroup, DomainError>;

    async fn update(&mut self, id: i64, change: &PlantGroupChange)
    -> Result<PlantGroup, DomainError>;

    /// Fails with `PlantGroupStillInUse` while plants reference the group
    async fn delete(&mut self, id: i64) -> Result<(), DomainError>;
}
