//! Math helpers shared by the indicator implementations

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Simple moving average of the first `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(values[..period].iter().sum::<f64>() / period as f64)
}

/// Wilder's smoothed average (RMA) of `values`, returning the last value.
///
/// Seeded with the simple average of the first `period` values, then
/// `avg = (avg * (period - 1) + value) / period` for every following value.
pub fn wilder(values: &[f64], period: usize) -> Option<f64> {
    let seed = sma(values, period)?;
    let p = period as f64;
    Some(
        values[period..]
            .iter()
            .fold(seed, |avg, value| (avg * (p - 1.0) + value) / p),
    )
}

/// Wilder's smoothed series, one value per input from index `period - 1` on
pub fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(seed) = sma(values, period) else {
        return Vec::new();
    };
    let p = period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut avg = seed;
    for value in &values[period..] {
        avg = (avg * (p - 1.0) + value) / p;
        out.push(avg);
    }
    out
}
