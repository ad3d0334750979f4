use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub start_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub turnover: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            start_time,
            open,
            high,
            low,
            close,
            volume,
            turnover: 0.0,
        }
    }

    pub fn with_turnover(mut self, turnover: f64) -> Self {
        self.turnover = turnover;
        self
    }

    /// Midpoint of the bar's range
    pub fn mid(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}
