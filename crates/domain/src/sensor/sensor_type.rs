use serde::{Deserialize, Serialize};

/// Entry of the global sensor catalog (e.g. `moisture` measured in `%`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorType {
    pub name: String,
    pub unit: String,
}

impl SensorType {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}
