use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Create/update request of a plant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantChange {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub plant_group_id: i64,
    #[serde(default)]
    pub additional_care_tips: Vec<String>,
}

impl PlantChange {
    pub fn new(name: impl Into<String>, plant_group_id: i64) -> Self {
        Self {
            name: name.into(),
            plant_group_id,
            ..Default::default()
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_additional_care_tips<I, S>(mut self, tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_care_tips = tips.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("plant name is required"));
        }
        // Id 0 never names a stored group
        if self.plant_group_id == 0 {
            return Err(DomainError::PlantGroupNotExisting(0));
        }
        Ok(())
    }
}
