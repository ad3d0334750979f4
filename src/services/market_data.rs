//! Market data provider interface and request retry policy.

use crate::error::ClientError;
use crate::models::Candle;
use async_trait::async_trait;
use backon::{BackoffBuilder, ConstantBackoff, ConstantBuilder, ExponentialBackoff, ExponentialBuilder};
use std::fmt;
use std::time::Duration;

/// Smallest candle count a kline request may ask for
pub const MIN_LIMIT: usize = 1;
/// Largest candle count a kline request may ask for
pub const MAX_LIMIT: usize = 1000;

/// Kline interval codes understood by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KlineInterval {
    Minute,
    Minute3,
    Minute5,
    Minute15,
    Minute30,
    Hour,
    Hour2,
    Hour4,
    Hour6,
    Hour12,
    Day,
    Week,
    Month,
}

impl KlineInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::Minute => "1",
            KlineInterval::Minute3 => "3",
            KlineInterval::Minute5 => "5",
            KlineInterval::Minute15 => "15",
            KlineInterval::Minute30 => "30",
            KlineInterval::Hour => "60",
            KlineInterval::Hour2 => "120",
            KlineInterval::Hour4 => "240",
            KlineInterval::Hour6 => "360",
            KlineInterval::Hour12 => "720",
            KlineInterval::Day => "D",
            KlineInterval::Week => "W",
            KlineInterval::Month => "M",
        }
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch exactly `limit` candles, oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, ClientError>;
}

/// Check a requested candle count against the exchange bounds
pub fn validate_limit(limit: usize) -> Result<(), ClientError> {
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ClientError::Validation(format!(
            "limit {} outside [{}, {}]",
            limit, MIN_LIMIT, MAX_LIMIT
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay between every attempt
    Fixed,
    /// Delay doubles after every attempt, capped at `max_delay`
    Exponential { max_delay: Duration },
}

/// How failed requests are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: usize,
    pub delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
        }
    }

    fn retries(&self) -> usize {
        self.max_attempts.saturating_sub(1)
    }
}

/// Delay sequence produced from a [`RetryPolicy`]
pub enum RetryDelays {
    Fixed(ConstantBackoff),
    Exponential(ExponentialBackoff),
}

impl Iterator for RetryDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        match self {
            RetryDelays::Fixed(inner) => inner.next(),
            RetryDelays::Exponential(inner) => inner.next(),
        }
    }
}

impl BackoffBuilder for RetryPolicy {
    type Backoff = RetryDelays;

    fn build(self) -> Self::Backoff {
        match self.backoff {
            Backoff::Fixed => RetryDelays::Fixed(
                ConstantBuilder::default()
                    .with_delay(self.delay)
                    .with_max_times(self.retries())
                    .build(),
            ),
            Backoff::Exponential { max_delay } => RetryDelays::Exponential(
                ExponentialBuilder::default()
                    .with_min_delay(self.delay)
                    .with_max_delay(max_delay)
                    .with_max_times(self.retries())
                    .build(),
            ),
        }
    }
}
