use chrono::Duration;

use crate::config::Preferences;
use crate::model::{FORECAST_STEP_HOURS, ForecastSample, SnowEvent};

pub mod assess;
pub mod schedule;
pub mod segment;

pub use assess::{ShovelAssessment, assess_event};
pub use schedule::{MAX_RECOMMENDATIONS, Priority, Recommendation, recommend_times};
pub use segment::segment_forecast;

/// One snow event together with everything presentation needs: the
/// shovel/no-shovel call and, when action is required, up to three ranked
/// shoveling times.
#[derive(Debug, Clone)]
pub struct EventAnalysis {
    pub event: SnowEvent,
    pub assessment: ShovelAssessment,
    pub recommendations: Vec<Recommendation>,
}

/// Full single-pass analysis of one forecast snapshot: segment the
/// samples into events, assess each, and schedule shoveling times for
/// the events that need action.
pub fn analyze_forecast(samples: &[ForecastSample], prefs: &Preferences) -> Vec<EventAnalysis> {
    let step = Duration::hours(FORECAST_STEP_HOURS);

    segment_forecast(samples, step)
        .into_iter()
        .map(|event| {
            let assessment = assess_event(&event, prefs);
            let recommendations = if assessment.action_required {
                recommend_times(&event, prefs)
            } else {
                Vec::new()
            };
            EventAnalysis { event, assessment, recommendations }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeWindow;
    use chrono::{TimeZone, Utc};

    fn sample(hour: u32, temp: f64, snow: f64) -> ForecastSample {
        ForecastSample {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, hour, 0, 0).unwrap(),
            temperature: temp,
            snow_accumulation: snow,
        }
    }

    #[test]
    fn quiet_forecast_produces_no_analyses() {
        let samples = vec![sample(6, 30.0, 0.0), sample(9, 31.0, 0.0)];
        assert!(analyze_forecast(&samples, &Preferences::default()).is_empty());
    }

    #[test]
    fn light_event_is_reported_without_recommendations() {
        let samples = vec![sample(6, 28.0, 0.5), sample(9, 28.0, 0.0)];

        let analyses = analyze_forecast(&samples, &Preferences::default());
        assert_eq!(analyses.len(), 1);
        assert!(!analyses[0].assessment.action_required);
        assert!(analyses[0].recommendations.is_empty());
    }

    #[test]
    fn heavy_event_gets_urgent_call_and_ranked_times() {
        let prefs = Preferences {
            preferred_times: vec![TimeWindow {
                start: "16:00".into(),
                end: "18:00".into(),
                label: "Evening".into(),
            }],
            ..Preferences::default()
        };
        // 7.5" over 06:00-15:00, snow stops at noon + step.
        let samples =
            vec![sample(6, 22.0, 2.5), sample(9, 22.0, 2.5), sample(12, 22.0, 2.5)];

        let analyses = analyze_forecast(&samples, &prefs);
        assert_eq!(analyses.len(), 1);

        let analysis = &analyses[0];
        assert!(analysis.assessment.action_required);
        assert!(analysis.assessment.reason.contains("URGENT"));

        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.recommendations[0].time, analysis.event.end_time);
        assert!(analysis.recommendations[1].label.contains("Evening"));
    }
}
