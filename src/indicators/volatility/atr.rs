//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::Candle;

/// Calculate the most recent ATR value (Wilder smoothing).
///
/// True range starts at the second candle since it needs the previous close,
/// so `period + 1` candles are required.
pub fn volatility(candles: &[Candle], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();

    math::wilder(&tr_values, period)
}

/// Calculate ATR with default period (14)
pub fn volatility_default(candles: &[Candle]) -> Option<f64> {
    volatility(candles, 14)
}
