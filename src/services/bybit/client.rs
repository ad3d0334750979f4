//! Bybit REST client for linear kline data

use crate::config::BybitConfig;
use crate::error::ClientError;
use crate::metrics::Metrics;
use crate::models::Candle;
use crate::services::bybit::messages::parse_klines;
use crate::services::market_data::{validate_limit, KlineInterval, MarketDataProvider, RetryPolicy};
use crate::services::rate_limiter::RateLimiter;
use async_trait::async_trait;
use backon::Retryable;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const KLINE_ENDPOINT: &str = "v5/market/kline";
const CATEGORY: &str = "linear";

pub struct BybitClient {
    http: reqwest::Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    metrics: Option<Arc<Metrics>>,
}

impl BybitClient {
    pub fn new(
        config: &BybitConfig,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        Ok(Self::with_client(config.base_url.clone(), http, limiter, retry))
    }

    /// Build a client around an existing `reqwest::Client`
    pub fn with_client(
        base_url: impl Into<String>,
        http: reqwest::Client,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter,
            retry,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// One rate-limited GET. Any transport failure or non-success status is
    /// a connection error so the retry loop picks it up.
    async fn fetch_once(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: &str,
    ) -> Result<String, ClientError> {
        self.limiter.admit().await;
        if let Some(ref metrics) = self.metrics {
            metrics.market_data_requests_total.inc();
        }

        let url = format!("{}/{}", self.base_url, KLINE_ENDPOINT);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("category", CATEGORY),
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit),
            ])
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Connection(format!("HTTP status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for BybitClient {
    #[instrument(skip(self), level = "debug")]
    async fn get_candles(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, ClientError> {
        validate_limit(limit)?;
        let limit_param = limit.to_string();

        let result = (|| self.fetch_once(symbol, interval, &limit_param))
            .retry(self.retry)
            .sleep(tokio::time::sleep)
            .when(|e| matches!(e, ClientError::Connection(_)))
            .notify(|e, delay| {
                warn!(
                    symbol = %symbol,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "BybitClient: kline request failed, retrying in {}ms",
                    delay.as_millis()
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.market_data_retries_total.inc();
                }
            })
            .await
            .and_then(|body| parse_klines(&body, limit));

        match result {
            Ok(candles) => {
                debug!(
                    symbol = %symbol,
                    count = candles.len(),
                    "BybitClient: fetched {} candles for {}",
                    candles.len(),
                    symbol
                );
                Ok(candles)
            }
            Err(e) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.market_data_failures_total.inc();
                }
                Err(e)
            }
        }
    }
}
