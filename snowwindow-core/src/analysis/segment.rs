use chrono::{DateTime, Duration, Utc};

use crate::model::{ForecastSample, SnowEvent};

/// Accumulator for the snow run currently being extended.
struct OpenRun {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    accumulation: f64,
    temps: Vec<f64>,
}

impl OpenRun {
    fn start(sample: &ForecastSample, step: Duration) -> Self {
        Self {
            start: sample.timestamp,
            end: sample.timestamp + step,
            accumulation: sample.snow_accumulation,
            temps: vec![sample.temperature],
        }
    }

    fn extend(&mut self, sample: &ForecastSample, step: Duration) {
        self.end = sample.timestamp + step;
        self.accumulation += sample.snow_accumulation;
        self.temps.push(sample.temperature);
    }

    fn close(self) -> SnowEvent {
        // temps is non-empty: a run only opens on a snowing sample.
        let temp = self.temps.iter().sum::<f64>() / self.temps.len() as f64;
        SnowEvent { start_time: self.start, end_time: self.end, accumulation: self.accumulation, temp }
    }
}

/// Merge an ascending sequence of forecast samples into snow events: each
/// maximal run of samples with positive snow becomes one event covering
/// `[first.timestamp, last.timestamp + step)`.
///
/// Samples must already be sorted ascending at the feed's fixed `step`;
/// an unsorted sequence produces wrong events, not an error.
pub fn segment_forecast(samples: &[ForecastSample], step: Duration) -> Vec<SnowEvent> {
    let mut events = Vec::new();
    let mut open: Option<OpenRun> = None;

    for sample in samples {
        if sample.snow_accumulation > 0.0 {
            match open.as_mut() {
                Some(run) => run.extend(sample, step),
                None => open = Some(OpenRun::start(sample, step)),
            }
        } else if let Some(run) = open.take() {
            events.push(run.close());
        }
    }

    // Forecast may end mid-snow; flush the still-open run.
    if let Some(run) = open {
        events.push(run.close());
    }

    events
}
