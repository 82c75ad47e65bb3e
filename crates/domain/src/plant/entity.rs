use crate::plant_group::PlantGroup;
use serde::{Deserialize, Serialize};

/// Plant aggregate, hydrated with its full plant group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: i64,
    pub description: String,
    pub name: String,
    pub species: String,
    pub location: String,
    pub plant_group: PlantGroup,
    pub additional_care_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantStub {
    pub id: i64,
    pub name: String,
}

/// Optional restriction of the plant listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantsFilter {
    #[serde(default, deserialize_with = "crate::query::optional_id")]
    pub plant_group_id: Option<i64>,
}

impl PlantsFilter {
    pub fn by_plant_group(plant_group_id: i64) -> Self {
        Self {
            plant_group_id: Some(plant_group_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_query_values() {
        let filter: PlantsFilter = serde_json::from_str(r#"{"plantGroupId":"4"}"#).unwrap();
        assert_eq!(filter, PlantsFilter::by_plant_group(4));

        // empty and absent both list everything
        let filter: PlantsFilter = serde_json::from_str(r#"{"plantGroupId":""}"#).unwrap();
        assert_eq!(filter, PlantsFilter::default());
        let filter: PlantsFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, PlantsFilter::default());

        assert!(serde_json::from_str::<PlantsFilter>(r#"{"plantGroupId":"four"}"#).is_err());
    }
}
