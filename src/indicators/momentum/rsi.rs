//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::Candle;

/// Calculate the most recent RSI value over close prices.
///
/// RSI = 100 - (100 / (1 + RS)), RS = avg gain / avg loss, both averages
/// Wilder-smoothed over `period`. Needs `period + 1` candles.
pub fn rsi(candles: &[Candle], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|pair| {
            let change = pair[1].close - pair[0].close;
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gain = math::wilder(&gains, period)?;
    let avg_loss = math::wilder(&losses, period)?;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Calculate RSI with default period (14)
pub fn rsi_default(candles: &[Candle]) -> Option<f64> {
    rsi(candles, 14)
}
