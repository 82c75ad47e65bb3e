use crate::sensor::SensorRange;
use serde::{Deserialize, Serialize};

/// Plant group aggregate: the group row plus its care tips and sensor ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantGroup {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub care_tips: Vec<String>,
    pub sensor_ranges: Vec<SensorRange>,
}

/// Lightweight listing entry, no children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantGroupStub {
    pub id: i64,
    pub name: String,
}
