use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

/// Where to fetch the forecast for. Coordinates win over the city query
/// when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn default_country() -> String {
    "US".to_string()
}

impl Location {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// "City,State,Country" query string for city-based lookups.
    pub fn query(&self) -> Option<String> {
        let city = self.city.as_deref()?;
        let mut q = city.to_string();
        if let Some(state) = self.state.as_deref() {
            q.push(',');
            q.push_str(state);
        }
        q.push(',');
        q.push_str(&self.country);
        Some(q)
    }
}

/// A daily clock-time range the user prefers for outdoor work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    /// "HH:MM", e.g. "07:00".
    pub start: String,
    /// "HH:MM", e.g. "09:00".
    pub end: String,
    pub label: String,
}

impl TimeWindow {
    pub fn start_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.start)
    }

    pub fn end_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.end)
    }
}

/// Parse "HH:MM" (hour and minute may be unpadded) into a clock time.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Shoveling preferences: thresholds in inches, temperatures in °F.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub min_snow_threshold: f64,
    pub urgent_threshold: f64,
    pub comfortable_temp_min: f64,
    pub comfortable_temp_max: f64,
    /// How far ahead the report looks, in hours.
    #[serde(default = "default_forecast_hours")]
    pub forecast_hours: u32,
    #[serde(default)]
    pub preferred_times: Vec<TimeWindow>,
}

fn default_forecast_hours() -> u32 {
    48
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            min_snow_threshold: 2.0,
            urgent_threshold: 6.0,
            comfortable_temp_min: 20.0,
            comfortable_temp_max: 35.0,
            forecast_hours: default_forecast_hours(),
            preferred_times: Vec::new(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: Option<String>,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub preferences: Preferences,
}

/// Configuration problems caught before any analysis runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured.\nHint: run `snowwindow configure` and enter your OpenWeatherMap key.")]
    MissingApiKey,

    #[error("No location configured: set either a city or latitude/longitude.")]
    MissingLocation,

    #[error("min_snow_threshold ({min}\") must not exceed urgent_threshold ({urgent}\")")]
    ThresholdOrder { min: f64, urgent: f64 },

    #[error("comfortable_temp_min ({min}°F) must not exceed comfortable_temp_max ({max}°F)")]
    ComfortRange { min: f64, max: f64 },

    #[error("preferred time window '{label}' has malformed time '{value}' (expected HH:MM)")]
    MalformedWindowTime { label: String, value: String },
}

impl Config {
    /// Check everything the analysis assumes is well-formed. Runs before
    /// any forecast is fetched so bad config fails fast.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey),
        }

        if self.location.city.is_none() && !self.location.has_coordinates() {
            return Err(ConfigError::MissingLocation);
        }

        let prefs = &self.preferences;
        if prefs.min_snow_threshold > prefs.urgent_threshold {
            return Err(ConfigError::ThresholdOrder {
                min: prefs.min_snow_threshold,
                urgent: prefs.urgent_threshold,
            });
        }
        if prefs.comfortable_temp_min > prefs.comfortable_temp_max {
            return Err(ConfigError::ComfortRange {
                min: prefs.comfortable_temp_min,
                max: prefs.comfortable_temp_max,
            });
        }

        for window in &prefs.preferred_times {
            for value in [&window.start, &window.end] {
                if parse_clock(value).is_none() {
                    return Err(ConfigError::MalformedWindowTime {
                        label: window.label.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Load config from the platform config dir, or return an empty
    /// default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path (`--config` override).
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "snowwindow", "snowwindow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
