use crate::{Config, config::Location, model::ForecastSample, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw forecast samples. Implementations normalize units
/// (°F, inches) before handing samples to the analysis.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, location: &Location) -> anyhow::Result<Vec<ForecastSample>>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured.\n\
                 Hint: run `snowwindow configure` and enter your OpenWeatherMap key."
            )
        })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}
