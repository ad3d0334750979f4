//! Trend reversal detection on top of DMI

use crate::indicators::trend::adx::directional_movement;
use crate::models::{Candle, TrendSignal};

/// Bars held back from the DMI window: the reference bar plus the three
/// most recent closes checked against it.
const HELD_BACK: usize = 4;

/// Detect a trend reversal at the end of the series.
///
/// DMI is computed over everything but the last 4 candles. With +DI > -DI and
/// the last 3 closes all below the low of the 4th-from-last candle the signal
/// is `ToDowntrend` (-1); with -DI > +DI and the last 3 closes all above that
/// candle's high it is `ToUptrend` (+1).
///
/// NOTE: the pairing reads inverted relative to the DMI condition (a bullish
/// DMI plus a break below the prior low reports "uptrend to downtrend").
/// Kept as-is pending product-owner confirmation of the polarity.
pub fn trend(candles: &[Candle], period: u32) -> Option<TrendSignal> {
    let n = candles.len();
    if n < period as usize + 1 + HELD_BACK {
        return None;
    }

    let dmi = directional_movement(&candles[..n - HELD_BACK], period)?;
    let reference = &candles[n - HELD_BACK];
    let recent = &candles[n - HELD_BACK + 1..];

    if dmi.plus_di > dmi.minus_di && recent.iter().all(|c| c.close < reference.low) {
        return Some(TrendSignal::ToDowntrend);
    }
    if dmi.minus_di > dmi.plus_di && recent.iter().all(|c| c.close > reference.high) {
        return Some(TrendSignal::ToUptrend);
    }
    Some(TrendSignal::None)
}

/// Detect a trend reversal with default DMI period (14)
pub fn trend_default(candles: &[Candle]) -> Option<TrendSignal> {
    trend(candles, 14)
}
