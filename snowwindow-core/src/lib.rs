//! Core library for the `snowwindow` CLI.
//!
//! This crate defines:
//! - Configuration & preference handling
//! - Abstraction over forecast providers
//! - The analysis engine: forecast segmentation into snow events,
//!   shovel/no-shovel assessment, and shoveling-time scheduling
//!
//! It is used by `snowwindow-cli`, but can also be reused by other binaries or services.

pub mod analysis;
pub mod config;
pub mod model;
pub mod provider;

pub use analysis::{
    EventAnalysis, Priority, Recommendation, ShovelAssessment, analyze_forecast,
};
pub use config::{Config, ConfigError, Location, Preferences, TimeWindow};
pub use model::{FORECAST_STEP_HOURS, ForecastSample, SnowEvent};
pub use provider::{ForecastProvider, provider_from_config};
