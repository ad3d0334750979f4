//! DMI / ADX (Directional Movement Index, Average Directional Index)

use crate::common::math;
use crate::models::{Candle, DirectionalMovement};

/// Calculate +DI, -DI and ADX for the last candle.
///
/// +DM/-DM and true range are Wilder-smoothed over `period`; ADX is the
/// Wilder average of DX and is only reported once `period` DX values exist
/// (that is `2 * period` candles). +DI/-DI need `period + 1` candles.
pub fn directional_movement(candles: &[Candle], period: u32) -> Option<DirectionalMovement> {
    let p = period as usize;
    if p == 0 || candles.len() < p + 1 {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    let mut plus_dm_values = Vec::with_capacity(candles.len() - 1);
    let mut minus_dm_values = Vec::with_capacity(candles.len() - 1);

    for pair in candles.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        tr_values.push(math::true_range(curr.high, curr.low, prev.close));

        let up = curr.high - prev.high;
        let down = prev.low - curr.low;
        plus_dm_values.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm_values.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let tr = math::wilder_series(&tr_values, p);
    let plus_dm = math::wilder_series(&plus_dm_values, p);
    let minus_dm = math::wilder_series(&minus_dm_values, p);

    let di = |dm: f64, tr: f64| if tr > 0.0 { 100.0 * dm / tr } else { 0.0 };

    let dx_values: Vec<f64> = tr
        .iter()
        .zip(plus_dm.iter().zip(minus_dm.iter()))
        .map(|(&tr, (&pdm, &mdm))| {
            let plus_di = di(pdm, tr);
            let minus_di = di(mdm, tr);
            let sum = plus_di + minus_di;
            if sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / sum
            } else {
                0.0
            }
        })
        .collect();

    let last_tr = *tr.last()?;
    Some(DirectionalMovement {
        plus_di: di(*plus_dm.last()?, last_tr),
        minus_di: di(*minus_dm.last()?, last_tr),
        adx: math::wilder(&dx_values, p),
        period,
    })
}

/// Calculate DMI with default period (14)
pub fn directional_movement_default(candles: &[Candle]) -> Option<DirectionalMovement> {
    directional_movement(candles, 14)
}
