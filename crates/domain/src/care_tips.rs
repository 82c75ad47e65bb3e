use crate::DomainError;
use async_trait::async_trait;

/// Free-text care tips, scoped either to a plant group or to a single plant
/// ("additional" tips). Tips have no identity: they are appended and deleted
/// as a whole, never edited in place.
#[async_trait]
pub trait CareTipsRepository: Send {
    async fn get_by_plant_group_id(&mut self, id: i64) -> Result<Vec<String>, DomainError>;

    async fn get_additional_by_plant_id(&mut self, id: i64) -> Result<Vec<String>, DomainError>;

    async fn create(&mut self, plant_group_id: i64, tips: &[String]) -> Result<(), DomainError>;

    async fn delete_all_by_plant_group_id(&mut self, id: i64) -> Result<(), DomainError>;

    async fn create_additional_by_plant_id(
        &mut self,
        plant_id: i64,
        tips: &[String],
    ) -> Result<(), DomainError>;

    async fn delete_additional_by_plant_id(&mut self, plant_id: i64) -> Result<(), DomainError>;
}
