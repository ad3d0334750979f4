//! Volume profile: point of control and value area

use crate::models::{Candle, ValueArea};

/// Compute POC/VAL/VAH over the candles of one segment.
///
/// Bars are taken in descending volume order until their cumulative volume
/// reaches `va` percent of the total; the bar that crosses the threshold is
/// part of the value area. Ties keep their original order.
pub fn value_area(candles: &[Candle], va: f64) -> Option<ValueArea> {
    if candles.is_empty() {
        return None;
    }

    let mut order: Vec<usize> = (0..candles.len()).collect();
    order.sort_by(|&a, &b| candles[b].volume.total_cmp(&candles[a].volume));

    let total: f64 = candles.iter().map(|c| c.volume).sum();
    let threshold = total * va / 100.0;

    let mut cumulative = 0.0;
    let mut taken = order.len();
    for (position, &index) in order.iter().enumerate() {
        cumulative += candles[index].volume;
        if cumulative >= threshold {
            taken = position + 1;
            break;
        }
    }

    let area = &order[..taken];
    let poc = candles[area[0]].mid();
    let val = area
        .iter()
        .map(|&i| candles[i].low)
        .fold(f64::INFINITY, f64::min);
    let vah = area
        .iter()
        .map(|&i| candles[i].high)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(ValueArea { poc, val, vah })
}

/// Value area with the conventional 68% coverage
pub fn value_area_default(candles: &[Candle]) -> Option<ValueArea> {
    value_area(candles, 68.0)
}
