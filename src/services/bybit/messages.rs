//! Bybit v5 kline payloads and their conversion into candles

use crate::error::ClientError;
use crate::models::Candle;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

/// `GET /v5/market/kline` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlineEnvelope {
    #[serde(default)]
    pub ret_code: Option<i64>,
    #[serde(default)]
    pub ret_msg: Option<String>,
    #[serde(default)]
    pub result: Option<KlineResult>,
}

#[derive(Debug, Deserialize)]
pub struct KlineResult {
    /// `[start_ms, open, high, low, close, volume, turnover]`, newest first
    #[serde(default)]
    pub list: Option<Vec<Vec<Value>>>,
}

fn number(record: &[Value], index: usize, field: &str) -> Result<f64, ClientError> {
    let parsed = match record.get(index) {
        Some(Value::String(s)) => s.parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ClientError::Response(format!("invalid {} in kline record", field)))
}

fn start_millis(record: &[Value]) -> Result<i64, ClientError> {
    let parsed = match record.first() {
        Some(Value::String(s)) => s.parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    };
    parsed.ok_or_else(|| ClientError::Response("invalid start time in kline record".to_string()))
}

fn to_candle(record: &[Value]) -> Result<Candle, ClientError> {
    if record.len() < 7 {
        return Err(ClientError::Response(format!(
            "kline record has {} fields, expected 7",
            record.len()
        )));
    }
    let millis = start_millis(record)?;
    let start_time = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ClientError::Response(format!("start time {} out of range", millis)))?;

    Ok(Candle::new(
        number(record, 1, "open")?,
        number(record, 2, "high")?,
        number(record, 3, "low")?,
        number(record, 4, "close")?,
        number(record, 5, "volume")?,
        start_time,
    )
    .with_turnover(number(record, 6, "turnover")?))
}

/// Parse a kline body into exactly `limit` candles, oldest first
pub fn parse_klines(body: &str, limit: usize) -> Result<Vec<Candle>, ClientError> {
    let envelope: KlineEnvelope =
        serde_json::from_str(body).map_err(|e| ClientError::Response(e.to_string()))?;

    if let Some(code) = envelope.ret_code.filter(|&code| code != 0) {
        return Err(ClientError::Response(format!(
            "exchange returned retCode {}: {}",
            code,
            envelope.ret_msg.unwrap_or_default()
        )));
    }

    let list = envelope
        .result
        .and_then(|result| result.list)
        .ok_or_else(|| ClientError::Response("missing result.list".to_string()))?;

    if list.len() != limit {
        return Err(ClientError::Response(format!(
            "expected {} candles, got {}",
            limit,
            list.len()
        )));
    }

    let candles = list
        .iter()
        .rev()
        .map(|record| to_candle(record))
        .collect::<Result<Vec<_>, _>>()?;

    if candles
        .windows(2)
        .any(|pair| pair[0].start_time >= pair[1].start_time)
    {
        return Err(ClientError::Response(
            "candles are not strictly ordered by start time".to_string(),
        ));
    }

    Ok(candles)
}
