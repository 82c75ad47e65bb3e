mod filter;
mod repository;
mod sensor_data;
mod sensor_range;
mod sensor_type;

pub use filter::{SensorDataFilter, SensorDataQuery, SensorDataScope};
pub use repository::{SensorDataRepository, SensorRangeRepository, SensorTypeRepository};
pub use sensor_data::{
    SensorData, SensorReading, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp,
};
pub use sensor_range::{SensorRange, SensorRangeChange};
pub use sensor_type::SensorType;
