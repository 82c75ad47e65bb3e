use super::sensor_data::parse_timestamp;
use crate::error::{DomainError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Which readings a sensor data query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDataScope {
    /// Readings of the plant's group (resolved on read)
    Plant(i64),
    PlantGroup(i64),
}

/// Filter of a sensor data read
///
/// Rules:
/// - sensor type is required
/// - exactly one of plant / plant group
/// - `from <= to`, both inclusive
#[derive(Debug, Clone, PartialEq)]
pub struct SensorDataFilter {
    pub sensor: String,
    pub scope: SensorDataScope,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl SensorDataFilter {
    /// Filter over the last 24 hours up to `now`.
    pub fn last_day(sensor: impl Into<String>, scope: SensorDataScope, now: DateTime<Utc>) -> Self {
        Self {
            sensor: sensor.into(),
            scope,
            from: now - Duration::days(1),
            to: now,
        }
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Raw query parameters of a sensor data read (`?sensor=&plant=&plantGroup=&from=&to=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDataQuery {
    pub sensor: Option<String>,
    #[serde(default, deserialize_with = "crate::query::optional_id")]
    pub plant: Option<i64>,
    #[serde(default, deserialize_with = "crate::query::optional_id")]
    pub plant_group: Option<i64>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SensorDataQuery {
    pub fn into_filter(self, now: DateTime<Utc>) -> Result<SensorDataFilter> {
        let sensor = self
            .sensor
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::validation("sensor type must be set"))?;

        // Zero ids count as unset
        let plant = self.plant.filter(|id| *id != 0);
        let plant_group = self.plant_group.filter(|id| *id != 0);

        let scope = match (plant, plant_group) {
            (Some(plant), None) => SensorDataScope::Plant(plant),
            (None, Some(group)) => SensorDataScope::PlantGroup(group),
            (Some(_), Some(_)) => {
                return Err(DomainError::validation(
                    "plant ID and plantGroup ID cannot be set at the same time",
                ));
            }
            (None, None) => {
                return Err(DomainError::validation(
                    "either plant ID or plantGroup ID must be set",
                ));
            }
        };

        let default = SensorDataFilter::last_day(sensor, scope, now);
        let from = match self.from.as_deref() {
            Some(raw) if !raw.is_empty() => parse_timestamp(raw)?,
            _ => default.from,
        };
        let to = match self.to.as_deref() {
            Some(raw) if !raw.is_empty() => parse_timestamp(raw)?,
            _ => default.to,
        };

        if from > to {
            return Err(DomainError::validation(format!(
                "from ({}) must not be after to ({})",
                from, to
            )));
        }

        Ok(default.between(from, to))
    }
}
