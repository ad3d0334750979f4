//! Unit tests for job kinds, parameter validation and naming

use candlewatch::error::ParamError;
use candlewatch::jobs::types::{JobDescriptor, JobKind, JobParams};
use candlewatch::services::market_data::KlineInterval;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(1800);

fn descriptor(kind: JobKind, tokens: &[&str]) -> JobDescriptor {
    JobDescriptor::parse(kind, tokens, 42, 7, INTERVAL).unwrap()
}

#[test]
fn test_prefix_lookup_is_case_insensitive() {
    assert_eq!(JobKind::from_prefix("RSI"), Some(JobKind::Rsi));
    assert_eq!(JobKind::from_prefix("Flats"), Some(JobKind::Flats));
    assert_eq!(JobKind::from_prefix("poc"), None);
    assert_eq!(JobKind::prefixes(), "rsi,volatility,flats,trend");
}

#[test]
fn test_default_interval() {
    for kind in JobKind::ALL {
        assert_eq!(kind.default_interval(), Duration::from_secs(1800));
    }
}

#[test]
fn test_timeframe_tables() {
    let daily = JobKind::Flats.timeframe("1440").unwrap();
    assert_eq!(daily.limit, 480);
    assert_eq!(daily.interval, KlineInterval::Minute3);

    let hourly = JobKind::Trend.timeframe("60").unwrap();
    assert_eq!(hourly.limit, 60);
    assert_eq!(hourly.interval, KlineInterval::Minute);

    assert!(JobKind::Rsi.timeframe("60").is_none());
    assert!(JobKind::Volatility.timeframe("1440").is_none());
    assert_eq!(JobKind::Rsi.timeframe("240").unwrap().limit, 240);
}

#[test]
fn test_rsi_fingerprint_and_title() {
    let job = descriptor(JobKind::Rsi, &["btcusdt", "30", "70"]);
    assert_eq!(job.fingerprint(), "42-rsi-BTCUSDT-30-70.0");
    assert_eq!(job.title(), "RSI[BTCUSDT, 30, 70.0]");
    assert_eq!(job.kind(), JobKind::Rsi);
    assert_eq!(job.chat_id, 7);
    assert_eq!(job.interval, INTERVAL);
}

#[test]
fn test_equivalent_tokens_share_fingerprint() {
    let a = descriptor(JobKind::Volatility, &["ETHUSDT", "240", "70"]);
    let b = descriptor(JobKind::Volatility, &["ethusdt", "240", "70.00"]);
    assert_eq!(a.fingerprint(), b.fingerprint());

    let other_owner = JobDescriptor::parse(JobKind::Volatility, &["ETHUSDT", "240", "70"], 43, 7, INTERVAL).unwrap();
    assert_ne!(a.fingerprint(), other_owner.fingerprint());
}

#[test]
fn test_flats_descriptor() {
    let job = descriptor(JobKind::Flats, &["SOLUSDT", "1440", "0.5", "10", "68"]);
    assert_eq!(job.fingerprint(), "42-flats-SOLUSDT-1440-0.5-10-68.0");
    assert_eq!(job.title(), "FLATS[SOLUSDT, 1440, 0.5, 10, 68.0]");
    match job.params {
        JobParams::Flats(ref p) => {
            assert_eq!(p.min_length, 10);
            assert_eq!(p.timeframe.limit, 480);
        }
        ref other => panic!("unexpected params {:?}", other),
    }
}

#[test]
fn test_trend_descriptor() {
    let job = descriptor(JobKind::Trend, &["BTCUSDT", "240"]);
    assert_eq!(job.fingerprint(), "42-trend-BTCUSDT-240");
    assert_eq!(job.title(), "TREND[BTCUSDT, 240]");
}

#[test]
fn test_wrong_token_count() {
    let err = JobParams::parse(JobKind::Rsi, &["BTCUSDT", "30"]).unwrap_err();
    assert_eq!(err, ParamError::Count { expected: 3, got: 2 });
    assert!(JobParams::parse(JobKind::Trend, &["BTCUSDT", "30", "1"]).is_err());
}

#[test]
fn test_negative_zero_shares_fingerprint_with_zero() {
    let zero = descriptor(JobKind::Rsi, &["btc", "30", "0"]);
    let negative_zero = descriptor(JobKind::Rsi, &["btc", "30", "-0"]);
    assert_eq!(zero.fingerprint(), "42-rsi-BTC-30-0.0");
    assert_eq!(negative_zero.fingerprint(), zero.fingerprint());
    assert_eq!(negative_zero.title(), "RSI[BTC, 30, 0.0]");
}

#[test]
fn test_invalid_coin_is_reported_as_coin() {
    let err = JobParams::parse(JobKind::Trend, &["BTC/USDT", "30"]).unwrap_err();
    assert_eq!(err, ParamError::Coin("BTC/USDT".to_string()));
    assert_eq!(err.to_string(), "coin invalid value: BTC/USDT");
}

#[test]
fn test_timeframe_outside_kind_set() {
    let err = JobParams::parse(JobKind::Rsi, &["BTCUSDT", "60", "70"]).unwrap_err();
    assert_eq!(err, ParamError::Timeframe("60".to_string()));
}

#[test]
fn test_non_numeric_and_non_finite_values() {
    assert!(JobParams::parse(JobKind::Rsi, &["BTCUSDT", "30", "abc"]).is_err());
    assert!(JobParams::parse(JobKind::Rsi, &["BTCUSDT", "30", "NaN"]).is_err());
    assert!(JobParams::parse(JobKind::Rsi, &["BTCUSDT", "30", "inf"]).is_err());
    assert!(JobParams::parse(JobKind::Flats, &["BTCUSDT", "30", "1", "2.5", "70"]).is_err());
    assert!(JobParams::parse(JobKind::Trend, &["BTC/USDT", "30"]).is_err());
}

#[test]
fn test_flats_ranges() {
    let parse = |tokens: &[&str]| JobParams::parse(JobKind::Flats, tokens);
    assert!(parse(&["BTCUSDT", "30", "-1", "5", "70"]).is_err());
    assert!(parse(&["BTCUSDT", "30", "1", "0", "70"]).is_err());
    assert!(parse(&["BTCUSDT", "30", "1", "5", "0"]).is_err());
    assert!(parse(&["BTCUSDT", "30", "1", "5", "100.5"]).is_err());
    assert!(parse(&["BTCUSDT", "30", "0", "1", "100"]).is_ok());
}

#[test]
fn test_usage_messages() {
    let usage = JobKind::Rsi.usage();
    assert!(usage.starts_with("rsi <coin> <timeframe> <setpoint>"));
    assert!(usage.contains("timeframe: 30 240"));

    let usage = JobKind::Flats.usage();
    assert!(usage.contains("<max_difference> <min_length> <va>"));
    assert!(usage.contains("timeframe: 30 60 240 1440"));
}
