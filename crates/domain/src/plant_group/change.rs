use crate::error::{DomainError, Result};
use crate::sensor::SensorRangeChange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Create/update request of a plant group
///
/// Updates replace the care tips and sensor ranges wholesale: whatever is not
/// listed here is gone afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantGroupChange {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub care_tips: Vec<String>,
    #[serde(default)]
    pub sensor_ranges: Vec<SensorRangeChange>,
}

impl PlantGroupChange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_care_tips<I, S>(mut self, tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.care_tips = tips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sensor_range(mut self, range: SensorRangeChange) -> Self {
        self.sensor_ranges.push(range);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("plant group name is required"));
        }

        let mut seen = HashSet::new();
        for range in &self.sensor_ranges {
            range.validate()?;
            if !seen.insert(range.sensor.as_str()) {
                return Err(DomainError::validation(format!(
                    "sensor {} is listed more than once",
                    range.sensor
                )));
            }
        }

        Ok(())
    }
}
