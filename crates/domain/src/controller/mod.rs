use crate::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Field aggregator posting sensor readings for one plant group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    pub uuid: String,
    pub plant_group: i64,
    /// Sensor types this controller has reported so far
    pub sensors: Vec<String>,
}

#[async_trait]
pub trait ControllerRepository: Send {
    async fn get_all_uuids(&mut self) -> Result<Vec<String>, DomainError>;

    async fn get_by_uuid(&mut self, uuid: &str) -> Result<Controller, DomainError>;
}
