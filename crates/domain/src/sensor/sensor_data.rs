use crate::error::{DomainError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage format of sensor data timestamps. Lexical order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub controller: String,
    pub sensor: String,
    pub value: f64,
    pub timestamp: String,
}

/// Reading as posted by a controller. The timestamp is assigned on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub controller: String,
    pub sensor: String,
    pub value: f64,
}

impl SensorReading {
    pub fn new(controller: impl Into<String>, sensor: impl Into<String>, value: f64) -> Self {
        Self {
            controller: controller.into(),
            sensor: sensor.into(),
            value,
        }
    }

    /// Attach the write timestamp, producing the stored shape.
    pub fn stamped(self, at: DateTime<Utc>) -> SensorData {
        SensorData {
            controller: self.controller,
            sensor: self.sensor,
            value: self.value,
            timestamp: format_timestamp(at),
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse RFC 3339 (`2023-05-20T08:00:00Z`) or the storage format, both read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::validation(format!("invalid timestamp: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamped_reading_uses_storage_format() {
        let at = Utc.with_ymd_and_hms(2023, 5, 20, 8, 30, 0).unwrap();
        let data = SensorReading::new("c-1", "moisture", 31.5).stamped(at);
        assert_eq!(data.timestamp, "2023-05-20 08:30:00");
        assert_eq!(data.sensor, "moisture");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2023-05-20T10:30:00+02:00").unwrap();
        assert_eq!(format_timestamp(parsed), "2023-05-20 08:30:00");
    }

    #[test]
    fn test_parse_storage_format() {
        let parsed = parse_timestamp("2023-05-20 08:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 5, 20, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_iso() {
        assert!(parse_timestamp("2023-05-20T08:30:00").is_ok());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(DomainError::ValidationFailed(_))
        ));
    }
}
