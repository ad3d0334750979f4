//! Flat zone segmentation

use crate::models::{Candle, Segment};

/// Split the series into flat zones where every close stays within
/// `max_difference` percent of the zone's first close.
///
/// Single greedy pass: the band is anchored on the first close of the current
/// zone; the first close outside the band ends the zone and anchors the next
/// one. Zones shorter than `min_length` bars are dropped, the trailing zone
/// included.
pub fn flats(candles: &[Candle], max_difference: f64, min_length: usize) -> Vec<Segment> {
    let mut result = Vec::new();
    let Some(first_candle) = candles.first() else {
        return result;
    };

    let band = |anchor: f64| {
        let delta = max_difference / 100.0;
        (anchor * (1.0 - delta), anchor * (1.0 + delta))
    };

    let mut first = 0;
    let (mut low, mut high) = band(first_candle.close);

    for (index, candle) in candles.iter().enumerate().skip(1) {
        if candle.close < low || candle.close > high {
            if index - first >= min_length {
                result.push(Segment::new(first, index));
            }
            first = index;
            (low, high) = band(candle.close);
        }
    }

    if candles.len() - first >= min_length {
        result.push(Segment::new(first, candles.len()));
    }

    result
}
