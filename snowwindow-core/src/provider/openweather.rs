use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{config::Location, model::ForecastSample};

use super::ForecastProvider;

const MM_PER_INCH: f64 = 25.4;

/// OpenWeatherMap 5-day / 3-hour forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self, location: &Location) -> Result<Vec<ForecastSample>> {
        let url = "https://api.openweathermap.org/data/2.5/forecast";

        let mut query: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            // Imperial gives °F; snow volumes stay metric regardless.
            ("units", "imperial".to_string()),
        ];

        match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => {
                query.push(("lat", lat.to_string()));
                query.push(("lon", lon.to_string()));
            }
            _ => {
                let q = location.query().ok_or_else(|| {
                    anyhow!(
                        "No location configured.\n\
                         Hint: run `snowwindow configure` and enter a city or coordinates."
                    )
                })?;
                query.push(("q", q));
            }
        }

        let res = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to OpenWeather (5-day forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        Ok(samples_from_entries(&parsed.list))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSnow {
    /// Snow volume for the 3-hour slot, millimeters.
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    snow: Option<OwSnow>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Normalize raw forecast entries into samples: epoch seconds to UTC,
/// snow millimeters to inches, missing snow field to 0. Entries with an
/// out-of-range timestamp are dropped.
fn samples_from_entries(entries: &[OwForecastEntry]) -> Vec<ForecastSample> {
    entries
        .iter()
        .filter_map(|entry| {
            let timestamp = unix_to_utc(entry.dt)?;
            let snow_mm = entry.snow.as_ref().and_then(|s| s.three_hour).unwrap_or(0.0);

            Some(ForecastSample {
                timestamp,
                temperature: entry.main.temp,
                snow_accumulation: snow_mm / MM_PER_INCH,
            })
        })
        .collect()
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_forecast_payload_and_converts_snow_to_inches() {
        let body = r#"{
            "list": [
                {"dt": 1768456800, "main": {"temp": 24.5}, "snow": {"3h": 25.4}},
                {"dt": 1768467600, "main": {"temp": 30.0}},
                {"dt": 1768478400, "main": {"temp": 28.0}, "snow": {}}
            ]
        }"#;

        let parsed: OwForecastResponse = serde_json::from_str(body).expect("payload should parse");
        let samples = samples_from_entries(&parsed.list);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].timestamp, Utc.timestamp_opt(1768456800, 0).unwrap());
        assert!((samples[0].snow_accumulation - 1.0).abs() < 1e-9);
        assert!((samples[0].temperature - 24.5).abs() < 1e-9);

        // No snow field at all, and an empty snow object, both mean 0".
        assert_eq!(samples[1].snow_accumulation, 0.0);
        assert_eq!(samples[2].snow_accumulation, 0.0);
    }

    #[test]
    fn samples_preserve_feed_order() {
        let entries = vec![
            OwForecastEntry { dt: 100, main: OwMain { temp: 20.0 }, snow: None },
            OwForecastEntry { dt: 10900, main: OwMain { temp: 21.0 }, snow: None },
        ];

        let samples = samples_from_entries(&entries);
        assert!(samples[0].timestamp < samples[1].timestamp);
    }

    #[test]
    fn truncates_long_error_bodies() {
        let long = "x".repeat(500);
        let shown = truncate_body(&long);
        assert!(shown.len() < long.len());
        assert!(shown.ends_with("..."));
    }
}
