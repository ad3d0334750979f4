//! Unit tests for RSI indicator

use crate::helpers::{from_closes, rising};
use candlewatch::indicators::momentum::{rsi, rsi_default};

#[test]
fn test_rsi_insufficient_data() {
    let candles = rising(14, 100.0, 1.0);
    assert!(rsi(&candles, 14).is_none());
}

#[test]
fn test_rsi_only_gains_is_100() {
    let candles = rising(30, 100.0, 1.0);
    assert_eq!(rsi_default(&candles), Some(100.0));
}

#[test]
fn test_rsi_only_losses_is_0() {
    let candles = rising(30, 200.0, -1.0);
    let value = rsi(&candles, 14).unwrap();
    assert!(value.abs() < 1e-9);
}

#[test]
fn test_rsi_balanced_moves_is_50() {
    let closes: Vec<f64> = (0..15)
        .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
        .collect();
    let value = rsi(&from_closes(&closes), 14).unwrap();
    assert!((value - 50.0).abs() < 1e-9);
}

#[test]
fn test_rsi_stays_in_range() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
        .collect();
    let value = rsi_default(&from_closes(&closes)).unwrap();
    assert!((0.0..=100.0).contains(&value));
}
