use super::SensorType;
use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Accepted value window of one sensor type within a plant group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRange {
    pub sensor_type: SensorType,
    pub min: f64,
    pub max: f64,
}

/// Write shape of a sensor range, keyed by sensor type name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRangeChange {
    pub sensor: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

impl SensorRangeChange {
    pub fn new(sensor: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            sensor: sensor.into(),
            min,
            max,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sensor.trim().is_empty() {
            return Err(DomainError::validation("sensor range requires a sensor type"));
        }

        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(DomainError::validation(format!(
                "sensor range for {} must have finite bounds",
                self.sensor
            )));
        }

        if self.min > self.max {
            return Err(DomainError::validation(format!(
                "sensor range for {} has min {} greater than max {}",
                self.sensor, self.min, self.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        assert!(SensorRangeChange::new("moisture", 10.0, 40.0).validate().is_ok());
    }

    #[test]
    fn test_zero_range_is_valid() {
        assert!(SensorRangeChange::new("moisture", 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_empty_sensor() {
        let result = SensorRangeChange::new(" ", 0.0, 1.0).validate();
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_inverted_bounds() {
        let result = SensorRangeChange::new("temperature", 30.0, 10.0).validate();
        assert!(matches!(result, Err(DomainError::ValidationFailed(_))));
    }

    #[test]
    fn test_nan_bound() {
        let result = SensorRangeChange::new("temperature", f64::NAN, 10.0).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_bounds_default_to_zero() {
        let change: SensorRangeChange = serde_json::from_str(r#"{"sensor":"humidity"}"#).unwrap();
        assert_eq!(change, SensorRangeChange::new("humidity", 0.0, 0.0));
    }

    #[test]
    fn test_range_serializes_camel_case() {
        let range = SensorRange {
            sensor_type: SensorType::new("moisture", "%"),
            min: 10.0,
            max: 40.0,
        };
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["sensorType"]["name"], "moisture");
        assert_eq!(json["max"], 40.0);
    }
}
