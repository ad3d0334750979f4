//! Job execution: fetch candles, run the kind's indicator, format the alert

use crate::error::ClientError;
use crate::indicators::{flats, rsi, trend, value_area, volatility};
use crate::jobs::context::JobContext;
use crate::jobs::types::{FlatsParams, JobDescriptor, JobParams, ThresholdParams};
use crate::models::Candle;
use std::time::Instant;
use tracing::{debug, info};

/// Smoothing length for RSI, ATR and DMI
pub const INDICATOR_LENGTH: u32 = 14;

const LOW_BAND: f64 = 0.15;
const HIGH_BAND: f64 = 0.85;

fn threshold_alert(title: &str, value: f64, params: &ThresholdParams) -> Option<String> {
    if value < LOW_BAND * params.setpoint || value > HIGH_BAND * params.setpoint {
        Some(format!("{}:\n{:.2}", title, value))
    } else {
        None
    }
}

fn flats_alert(title: &str, candles: &[Candle], params: &FlatsParams) -> Option<String> {
    let lines = flats(candles, params.max_difference, params.min_length)
        .into_iter()
        .filter_map(|segment| value_area(&candles[segment.start..segment.end], params.va))
        .map(|area| {
            format!(
                "val={:.2}, poc={:.2}, vah={:.2}",
                area.val, area.poc, area.vah
            )
        })
        .collect::<Vec<_>>();

    if lines.is_empty() {
        None
    } else {
        Some(format!("{}:\n{}", title, lines.join("\n")))
    }
}

/// Evaluate a candle series for a job; `Some(text)` when an alert is due.
///
/// Series too short for the indicator's warm-up produce no alert.
pub fn evaluate(params: &JobParams, title: &str, candles: &[Candle]) -> Option<String> {
    match params {
        JobParams::Rsi(p) => {
            rsi(candles, INDICATOR_LENGTH).and_then(|value| threshold_alert(title, value, p))
        }
        JobParams::Volatility(p) => {
            volatility(candles, INDICATOR_LENGTH).and_then(|value| threshold_alert(title, value, p))
        }
        JobParams::Flats(p) => flats_alert(title, candles, p),
        JobParams::Trend(_) => trend(candles, INDICATOR_LENGTH)
            .and_then(|signal| signal.label())
            .map(|label| format!("{}:\n{}", title, label)),
    }
}

impl JobDescriptor {
    /// Fetch the job's candles and evaluate them. Client failures propagate;
    /// the caller decides whether to notify.
    pub async fn execute(&self, ctx: &JobContext) -> Result<Option<String>, ClientError> {
        let start = Instant::now();
        let timeframe = self.params.timeframe();
        let candles = ctx
            .data_provider
            .get_candles(self.params.coin(), timeframe.interval, timeframe.limit)
            .await?;

        let title = self.title();
        let alert = evaluate(&self.params, &title, &candles);

        debug!(
            job = %self.fingerprint(),
            candles = candles.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Job: evaluated {} in {}ms",
            title,
            start.elapsed().as_millis()
        );
        if alert.is_some() {
            info!(job = %self.fingerprint(), "Job: alert raised for {}", title);
        }

        Ok(alert)
    }
}
