use crate::config::Preferences;
use crate::model::SnowEvent;

/// Whether an event needs shoveling, with a human-readable reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ShovelAssessment {
    pub action_required: bool,
    pub reason: String,
}

/// Decide whether `event` needs shoveling. Compared on accumulation only;
/// below the minimum threshold is strict, at or above the urgent
/// threshold is urgent.
pub fn assess_event(event: &SnowEvent, prefs: &Preferences) -> ShovelAssessment {
    if event.accumulation < prefs.min_snow_threshold {
        ShovelAssessment {
            action_required: false,
            reason: format!(
                "Only {:.1}\" expected (below {}\" threshold)",
                event.accumulation, prefs.min_snow_threshold
            ),
        }
    } else if event.accumulation >= prefs.urgent_threshold {
        ShovelAssessment {
            action_required: true,
            reason: format!(
                "URGENT: {:.1}\" expected (above {}\" urgent threshold)",
                event.accumulation, prefs.urgent_threshold
            ),
        }
    } else {
        ShovelAssessment {
            action_required: true,
            reason: format!(
                "{:.1}\" expected (above {}\" threshold)",
                event.accumulation, prefs.min_snow_threshold
            ),
        }
    }
}
