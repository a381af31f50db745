//! Plain-text rendering of forecast analyses.

use snowwindow_core::EventAnalysis;

const TIME_FORMAT: &str = "%I:%M %p on %a, %b %d";

/// Render the whole analysis pass, including the happy "no snow" path.
pub fn render_report(analyses: &[EventAnalysis], forecast_hours: u32) -> String {
    let mut out = String::new();

    if analyses.is_empty() {
        out.push_str("Good news! No significant snow events in the forecast.\n");
        out.push_str(&format!("(Checked next {forecast_hours} hours)\n"));
        return out;
    }

    out.push_str(&format!("Found {} snow event(s) in the forecast:\n\n", analyses.len()));

    for (index, analysis) in analyses.iter().enumerate() {
        render_event(&mut out, index + 1, analysis);
        out.push('\n');
    }

    out
}

fn render_event(out: &mut String, number: usize, analysis: &EventAnalysis) {
    let event = &analysis.event;

    out.push_str(&format!("--- Snow Event #{number} ---\n"));
    out.push_str(&format!("Start: {}\n", event.start_time.format(TIME_FORMAT)));
    out.push_str(&format!("End:   {}\n", event.end_time.format(TIME_FORMAT)));
    out.push_str(&format!("Accumulation: {:.2} inches\n", event.accumulation));
    out.push_str(&format!("Temperature:  {:.1}°F\n", event.temp));

    if analysis.assessment.action_required {
        out.push_str(&format!("\n{}\n", analysis.assessment.reason));
        out.push_str("\nRecommended shoveling times:\n");
        for (index, rec) in analysis.recommendations.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} - {} [{}]\n",
                index + 1,
                rec.label,
                rec.time.format(TIME_FORMAT),
                rec.priority,
            ));
            out.push_str(&format!("     {}\n", rec.reason));
        }
    } else {
        out.push_str(&format!("\nNo action needed: {}\n", analysis.assessment.reason));
    }
}

/// Static advice footer shown after every check.
pub fn render_tips() -> String {
    concat!(
        "Tips:\n",
        "  - Shovel in multiple sessions for heavy accumulation\n",
        "  - Clear snow before it gets compacted by foot traffic\n",
        "  - Check forecast updates regularly for changes\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use snowwindow_core::{ForecastSample, Preferences, analyze_forecast};

    fn sample(hour: u32, temp: f64, snow: f64) -> ForecastSample {
        ForecastSample {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, hour, 0, 0).unwrap(),
            temperature: temp,
            snow_accumulation: snow,
        }
    }

    #[test]
    fn quiet_forecast_mentions_the_horizon() {
        let report = render_report(&[], 48);
        assert!(report.contains("No significant snow events"));
        assert!(report.contains("48 hours"));
    }

    #[test]
    fn urgent_event_lists_ranked_times() {
        let samples =
            vec![sample(6, 22.0, 2.5), sample(9, 22.0, 2.5), sample(12, 22.0, 2.5)];
        let analyses = analyze_forecast(&samples, &Preferences::default());

        let report = render_report(&analyses, 48);
        assert!(report.contains("Snow Event #1"));
        assert!(report.contains("7.50 inches"));
        assert!(report.contains("URGENT"));
        assert!(report.contains("After snow stops"));
        assert!(report.contains("[high]"));
    }

    #[test]
    fn light_event_reports_no_action() {
        let samples = vec![sample(6, 30.0, 0.5), sample(9, 30.0, 0.0)];
        let analyses = analyze_forecast(&samples, &Preferences::default());

        let report = render_report(&analyses, 48);
        assert!(report.contains("No action needed"));
        assert!(!report.contains("Recommended shoveling times"));
    }
}
