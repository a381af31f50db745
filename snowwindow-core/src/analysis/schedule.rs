use chrono::{DateTime, Utc};

use crate::config::Preferences;
use crate::model::SnowEvent;

/// At most this many recommendations are returned per event.
pub const MAX_RECOMMENDATIONS: usize = 3;

const TIME_FORMAT: &str = "%I:%M %p on %a, %b %d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One suggested shoveling slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub time: DateTime<Utc>,
    pub label: String,
    pub reason: String,
    pub priority: Priority,
}

/// Rank shoveling times for an event that needs action: always an anchor
/// at the moment the snow stops, plus any preferred windows still ahead
/// on the event's end date. Ascending by time, capped at
/// [`MAX_RECOMMENDATIONS`]; ties keep the anchor first, then windows in
/// configuration order.
pub fn recommend_times(event: &SnowEvent, prefs: &Preferences) -> Vec<Recommendation> {
    let mut recommendations = vec![after_snow_stops(event, prefs)];

    for window in &prefs.preferred_times {
        // Malformed windows are a config-validation concern; skip here.
        let Some(clock) = window.start_clock() else { continue };
        let window_start = event.end_time.date_naive().and_time(clock).and_utc();

        if event.end_time <= window_start {
            recommendations.push(Recommendation {
                time: window_start,
                label: format!("Your {} window", window.label),
                reason: format!("Falls within your preferred {} time", window.label),
                priority: Priority::Medium,
            });
        } else if event.end_time.date_naive() < window_start.date_naive() {
            // window_start is pinned to end_time's date above, so this arm
            // never fires under the current anchoring rule.
            recommendations.push(Recommendation {
                time: window_start,
                label: format!("Next day {}", window.label),
                reason: format!("Your preferred {} time", window.label),
                priority: Priority::Low,
            });
        }
    }

    // Vec::sort_by_key is stable, so equal times keep emission order.
    recommendations.sort_by_key(|rec| rec.time);
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// The always-present high-priority anchor, qualified by how the event's
/// mean temperature sits against the comfort range.
fn after_snow_stops(event: &SnowEvent, prefs: &Preferences) -> Recommendation {
    let mut reason = format!("Snow ends at {}", event.end_time.format(TIME_FORMAT));

    if (prefs.comfortable_temp_min..=prefs.comfortable_temp_max).contains(&event.temp) {
        reason.push_str(&format!(" (comfortable temp: {:.1}°F)", event.temp));
    } else if event.temp < prefs.comfortable_temp_min {
        reason.push_str(&format!(" (cold: {:.1}°F - dress warmly)", event.temp));
    } else {
        reason.push_str(&format!(" (warm: {:.1}°F - snow may be heavy)", event.temp));
    }

    Recommendation {
        time: event.end_time,
        label: "After snow stops".to_string(),
        reason,
        priority: Priority::High,
    }
}
