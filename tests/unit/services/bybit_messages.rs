//! Unit tests for kline payload parsing

use candlewatch::error::ClientError;
use candlewatch::services::bybit::messages::parse_klines;
use serde_json::json;

fn body(list: serde_json::Value) -> String {
    json!({
        "retCode": 0,
        "retMsg": "OK",
        "result": { "symbol": "BTCUSDT", "category": "linear", "list": list }
    })
    .to_string()
}

#[test]
fn test_parses_and_reverses_to_oldest_first() {
    let payload = body(json!([
        ["1700000120000", "102", "103", "101", "102.5", "12", "1230"],
        ["1700000060000", "101", "102", "100", "101.5", "11", "1120"],
        ["1700000000000", "100", "101", "99", "100.5", "10", "1005"]
    ]));

    let candles = parse_klines(&payload, 3).unwrap();
    assert_eq!(candles.len(), 3);
    assert!(candles[0].start_time < candles[2].start_time);
    assert_eq!(candles[0].start_time.timestamp(), 1_700_000_000);
    assert_eq!(candles[0].close, 100.5);
    assert_eq!(candles[0].turnover, 1005.0);
    assert_eq!(candles[2].high, 103.0);
    assert_eq!(candles[2].volume, 12.0);
}

#[test]
fn test_accepts_numeric_fields() {
    let payload = body(json!([[1700000000000_i64, 1.0, 2.0, 0.5, 1.5, 3.0, 4.5]]));
    let candles = parse_klines(&payload, 1).unwrap();
    assert_eq!(candles[0].low, 0.5);
}

#[test]
fn test_count_mismatch_is_response_error() {
    let payload = body(json!([["1700000000000", "1", "2", "0.5", "1.5", "3", "4"]]));
    let err = parse_klines(&payload, 2).unwrap_err();
    assert!(matches!(err, ClientError::Response(_)));
}

#[test]
fn test_missing_list_is_response_error() {
    let payload = json!({ "retCode": 0, "result": {} }).to_string();
    assert!(matches!(parse_klines(&payload, 1), Err(ClientError::Response(_))));
    assert!(matches!(parse_klines("not json", 1), Err(ClientError::Response(_))));
}

#[test]
fn test_exchange_error_code_is_response_error() {
    let payload = json!({ "retCode": 10001, "retMsg": "params error", "result": {} }).to_string();
    match parse_klines(&payload, 1) {
        Err(ClientError::Response(message)) => assert!(message.contains("10001")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_unparsable_number_is_response_error() {
    let payload = body(json!([["1700000000000", "abc", "2", "0.5", "1.5", "3", "4"]]));
    assert!(matches!(parse_klines(&payload, 1), Err(ClientError::Response(_))));

    let short = body(json!([["1700000000000", "1", "2"]]));
    assert!(matches!(parse_klines(&short, 1), Err(ClientError::Response(_))));
}

#[test]
fn test_unordered_times_are_rejected() {
    let payload = body(json!([
        ["1700000000000", "1", "2", "0.5", "1.5", "3", "4"],
        ["1700000060000", "1", "2", "0.5", "1.5", "3", "4"]
    ]));
    assert!(matches!(parse_klines(&payload, 2), Err(ClientError::Response(_))));
}
