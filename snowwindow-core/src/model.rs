use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed cadence of the 5-day forecast feed: one sample every 3 hours.
/// Each sample covers the half-open window `[timestamp, timestamp + step)`.
pub const FORECAST_STEP_HOURS: i64 = 3;

/// One timestamped forecast reading, already normalized by the provider:
/// temperature in °F, snow accumulation in inches (0 when no snow).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub snow_accumulation: f64,
}

/// A maximal contiguous run of snowing samples, merged into one record.
///
/// `accumulation` is the sum over contributing samples (inches) and `temp`
/// the arithmetic mean of their temperatures (°F). Always `start_time <
/// end_time` and `accumulation > 0`; immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub accumulation: f64,
    pub temp: f64,
}
