use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use inquire::Text;
use std::path::PathBuf;

use snowwindow_core::{
    Config, FORECAST_STEP_HOURS, ForecastSample, Location, Preferences, TimeWindow,
    analyze_forecast, provider_from_config,
};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "snowwindow", version, about = "Snow shoveling timing optimizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set up the API key and location.
    Configure,

    /// Fetch the forecast and report when to shovel.
    Check {
        /// Path to a config file; defaults to the platform config dir.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run canned scenarios without an API key.
    Demo,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Check { config } => check(config).await,
            Command::Demo => {
                demo();
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Configuration cancelled")?;
    let city = Text::new("City:").prompt().context("Configuration cancelled")?;
    let state = Text::new("State/region (optional):")
        .with_default("")
        .prompt()
        .context("Configuration cancelled")?;
    let country = Text::new("Country code:")
        .with_default("US")
        .prompt()
        .context("Configuration cancelled")?;

    cfg.api_key = Some(api_key.trim().to_string());
    cfg.location = Location {
        city: Some(city.trim().to_string()),
        state: {
            let state = state.trim();
            (!state.is_empty()).then(|| state.to_string())
        },
        country: country.trim().to_string(),
        // A fresh city entry replaces any stale coordinates, which would
        // otherwise win over it.
        latitude: None,
        longitude: None,
    };

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn check(config_path: Option<PathBuf>) -> Result<()> {
    let cfg = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cfg.validate()?;

    println!("Fetching weather forecast...");
    let provider = provider_from_config(&cfg)?;
    let samples = provider.fetch_forecast(&cfg.location).await?;

    // Presentation horizon; the analysis itself takes whatever it is given.
    let horizon = Utc::now() + Duration::hours(i64::from(cfg.preferences.forecast_hours));
    let samples: Vec<ForecastSample> =
        samples.into_iter().filter(|sample| sample.timestamp <= horizon).collect();

    let analyses = analyze_forecast(&samples, &cfg.preferences);
    println!();
    print!("{}", report::render_report(&analyses, cfg.preferences.forecast_hours));
    if analyses.iter().any(|analysis| analysis.assessment.action_required) {
        println!();
        print!("{}", report::render_tips());
    }

    Ok(())
}

fn demo() {
    let prefs = Preferences {
        preferred_times: vec![
            TimeWindow { start: "07:00".into(), end: "09:00".into(), label: "Morning".into() },
            TimeWindow { start: "16:00".into(), end: "18:00".into(), label: "Evening".into() },
        ],
        ..Preferences::default()
    };

    let scenarios = [
        ("Light Snow (No Shoveling Needed)", snowy_samples(Utc::now(), &[0.75, 0.75], 30.0)),
        ("Moderate Snow (Shoveling Required)", snowy_samples(Utc::now(), &[1.5, 1.0, 1.0], 28.0)),
        ("Heavy Snow (Urgent, Cold)", snowy_samples(Utc::now(), &[2.5, 2.5, 2.5], 15.0)),
    ];

    for (title, samples) in scenarios {
        println!("{}", "=".repeat(70));
        println!("  DEMO: {title}");
        println!("{}", "=".repeat(70));
        println!();

        let analyses = analyze_forecast(&samples, &prefs);
        print!("{}", report::render_report(&analyses, prefs.forecast_hours));
        println!();
    }
}

/// Synthetic forecast run starting at `start`: one snowing sample per
/// step with the given accumulations, followed by a dry sample.
fn snowy_samples(start: DateTime<Utc>, inches_per_step: &[f64], temp: f64) -> Vec<ForecastSample> {
    let step = Duration::hours(FORECAST_STEP_HOURS);
    let mut samples: Vec<ForecastSample> = inches_per_step
        .iter()
        .enumerate()
        .map(|(i, &snow)| ForecastSample {
            timestamp: start + step * i as i32,
            temperature: temp,
            snow_accumulation: snow,
        })
        .collect();

    samples.push(ForecastSample {
        timestamp: start + step * inches_per_step.len() as i32,
        temperature: temp,
        snow_accumulation: 0.0,
    });

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_samples_end_with_a_dry_slot() {
        let samples = snowy_samples(Utc::now(), &[1.0, 2.0], 25.0);

        assert_eq!(samples.len(), 3);
        assert!(samples.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));
        assert_eq!(samples.last().map(|s| s.snow_accumulation), Some(0.0));
    }

    #[test]
    fn demo_scenarios_trigger_all_three_outcomes() {
        let prefs = Preferences::default();

        let light = analyze_forecast(&snowy_samples(Utc::now(), &[0.75, 0.75], 30.0), &prefs);
        assert!(!light[0].assessment.action_required);

        let moderate = analyze_forecast(&snowy_samples(Utc::now(), &[1.5, 1.0, 1.0], 28.0), &prefs);
        assert!(moderate[0].assessment.action_required);
        assert!(!moderate[0].assessment.reason.contains("URGENT"));

        let heavy = analyze_forecast(&snowy_samples(Utc::now(), &[2.5, 2.5, 2.5], 15.0), &prefs);
        assert!(heavy[0].assessment.reason.contains("URGENT"));
    }
}
