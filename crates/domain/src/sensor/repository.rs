use super::{SensorData, SensorDataFilter, SensorRange, SensorRangeChange, SensorReading, SensorType};
use crate::DomainError;
use async_trait::async_trait;

/// Sensor ranges of plant groups
///
/// After any create or update the set of ranges of a group covers every
/// sensor type of the catalog: types the caller omitted get a `(0, 0)` range.
#[async_trait]
pub trait SensorRangeRepository: Send {
    async fn get_all_by_plant_group_id(&mut self, id: i64)
    -> Result<Vec<SensorRange>, DomainError>;

    /// Store a single range. Does not fill missing types.
    async fn create(
        &mut self,
        plant_group_id: i64,
        range: &SensorRangeChange,
    ) -> Result<(), DomainError>;

    /// Store the given ranges plus `(0, 0)` for every catalog type still missing.
    async fn create_all(
        &mut self,
        plant_group_id: i64,
        ranges: &[SensorRangeChange],
    ) -> Result<(), DomainError>;

    /// Insert or overwrite a single range.
    async fn update(
        &mut self,
        plant_group_id: i64,
        range: &SensorRangeChange,
    ) -> Result<(), DomainError>;

    /// Replace all ranges of the group with the given ones (plus defaults).
    async fn update_all(
        &mut self,
        plant_group_id: i64,
        ranges: &[SensorRangeChange],
    ) -> Result<(), DomainError>;

    async fn delete_all_by_plant_group_id(&mut self, id: i64) -> Result<(), DomainError>;
}

/// Time series of sensor readings
#[async_trait]
pub trait SensorDataRepository: Send {
    /// Readings matching the filter, oldest first
    async fn get_all(&mut self, filter: &SensorDataFilter) -> Result<Vec<SensorData>, DomainError>;

    /// Store one reading in its own transaction
    async fn save(&mut self, reading: SensorReading) -> Result<SensorData, DomainError>;

    /// Store every reading separately. Failures are collected, not fatal:
    /// readings that succeed stay committed.
    async fn save_all(&mut self, readings: Vec<SensorReading>) -> Vec<DomainError>;
}

#[async_trait]
pub trait SensorTypeRepository: Send {
    async fn get_all(&mut self) -> Result<Vec<SensorType>, DomainError>;
}
