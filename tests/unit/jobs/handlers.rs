//! Unit tests for job evaluation

use crate::helpers::{from_closes, rising};
use candlewatch::jobs::handlers::evaluate;
use candlewatch::jobs::types::{JobDescriptor, JobKind};
use std::time::Duration;

fn job(kind: JobKind, tokens: &[&str]) -> JobDescriptor {
    JobDescriptor::parse(kind, tokens, 1, 1, Duration::from_secs(60)).unwrap()
}

fn run(job: &JobDescriptor, candles: &[candlewatch::models::Candle]) -> Option<String> {
    evaluate(&job.params, &job.title(), candles)
}

#[test]
fn test_rsi_above_band_alerts() {
    let job = job(JobKind::Rsi, &["BTCUSDT", "30", "70"]);
    let text = run(&job, &rising(30, 100.0, 1.0));
    assert_eq!(text.as_deref(), Some("RSI[BTCUSDT, 30, 70.0]:\n100.00"));
}

#[test]
fn test_rsi_inside_band_is_silent() {
    let job = job(JobKind::Rsi, &["BTCUSDT", "30", "200"]);
    assert!(run(&job, &rising(30, 100.0, 1.0)).is_none());
}

#[test]
fn test_volatility_below_band_alerts() {
    let job = job(JobKind::Volatility, &["ETHUSDT", "240", "10"]);
    let text = run(&job, &from_closes(&[100.0; 20]));
    assert_eq!(text.as_deref(), Some("VOLATILITY[ETHUSDT, 240, 10.0]:\n1.00"));
}

#[test]
fn test_volatility_inside_band_is_silent() {
    let job = job(JobKind::Volatility, &["ETHUSDT", "240", "2"]);
    assert!(run(&job, &from_closes(&[100.0; 20])).is_none());
}

#[test]
fn test_short_series_is_silent() {
    let job = job(JobKind::Rsi, &["BTCUSDT", "30", "70"]);
    assert!(run(&job, &rising(5, 100.0, 1.0)).is_none());
}

#[test]
fn test_flats_reports_value_area_per_segment() {
    let job = job(JobKind::Flats, &["BTCUSDT", "30", "1", "5", "70"]);
    let text = run(&job, &from_closes(&[100.0; 30]));
    assert_eq!(
        text.as_deref(),
        Some("FLATS[BTCUSDT, 30, 1.0, 5, 70.0]:\nval=99.50, poc=100.00, vah=100.50")
    );
}

#[test]
fn test_flats_without_segments_is_silent() {
    let job = job(JobKind::Flats, &["BTCUSDT", "30", "0.1", "5", "70"]);
    assert!(run(&job, &rising(30, 100.0, 5.0)).is_none());
}

#[test]
fn test_trend_reversal_alert() {
    let job = job(JobKind::Trend, &["BTCUSDT", "30"]);
    let mut closes: Vec<f64> = (0..26).map(|i| 100.0 + i as f64).collect();
    closes.extend([110.0, 109.0, 108.0]);
    let text = run(&job, &from_closes(&closes));
    assert_eq!(text.as_deref(), Some("TREND[BTCUSDT, 30]:\nuptrend to downtrend"));
}

#[test]
fn test_trend_without_reversal_is_silent() {
    let job = job(JobKind::Trend, &["BTCUSDT", "30"]);
    assert!(run(&job, &rising(30, 100.0, 1.0)).is_none());
}
