//! Runtime configuration loaded from environment variables

use crate::error::ConfigError;
use crate::jobs::types::JobKind;
use crate::services::market_data::{Backoff, RetryPolicy};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const BYBIT_MAINNET_URL: &str = "https://api.bybit.com";
pub const BYBIT_TESTNET_URL: &str = "https://api-testnet.bybit.com";

/// Deployment environment name (`ENVIRONMENT`, defaults to `sandbox`)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct BybitConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for BybitConfig {
    fn default() -> Self {
        Self {
            base_url: BYBIT_MAINNET_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Caps of the two admission windows. Zero disables a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_per_second: usize,
    pub max_per_minute: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_second: 3,
            max_per_minute: 100,
        }
    }
}

/// Repeat interval of each job kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobIntervals {
    pub rsi: Duration,
    pub volatility: Duration,
    pub flats: Duration,
    pub trend: Duration,
}

impl JobIntervals {
    pub fn get(&self, kind: JobKind) -> Duration {
        match kind {
            JobKind::Rsi => self.rsi,
            JobKind::Volatility => self.volatility,
            JobKind::Flats => self.flats,
            JobKind::Trend => self.trend,
        }
    }

    /// Same interval for every kind
    pub fn uniform(interval: Duration) -> Self {
        Self {
            rsi: interval,
            volatility: interval,
            flats: interval,
            trend: interval,
        }
    }
}

impl Default for JobIntervals {
    fn default() -> Self {
        Self {
            rsi: JobKind::Rsi.default_interval(),
            volatility: JobKind::Volatility.default_interval(),
            flats: JobKind::Flats.default_interval(),
            trend: JobKind::Trend.default_interval(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub bybit: BybitConfig,
    pub rate_limit: RateLimitConfig,
    pub retry: RetryPolicy,
    pub intervals: JobIntervals,
    /// Deliver a best-effort message to the chat when a job tick fails
    pub notify_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            bybit: BybitConfig::default(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
            intervals: JobIntervals::default(),
            notify_errors: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = match env::var("BYBIT_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ if env_flag("BYBIT_TESTNET", false) => BYBIT_TESTNET_URL.to_string(),
            _ => BYBIT_MAINNET_URL.to_string(),
        };

        let backoff = match env::var("CLIENT_RETRY_BACKOFF")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "" | "fixed" => Backoff::Fixed,
            "exponential" => Backoff::Exponential {
                max_delay: Duration::from_millis(env_or("CLIENT_RETRY_MAX_DELAY_MS", 30_000)),
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "CLIENT_RETRY_BACKOFF",
                    reason: format!("unknown backoff '{}', expected fixed or exponential", other),
                })
            }
        };

        let retry = RetryPolicy {
            max_attempts: env_or("CLIENT_RETRY_ATTEMPTS", defaults.retry.max_attempts),
            delay: Duration::from_millis(env_or(
                "CLIENT_RETRY_DELAY_MS",
                defaults.retry.delay.as_millis() as u64,
            )),
            backoff,
        };
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "CLIENT_RETRY_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        let interval = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            let seconds: u64 = env_or(key, default.as_secs());
            if seconds == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "interval must be > 0".to_string(),
                });
            }
            Ok(Duration::from_secs(seconds))
        };

        let intervals = JobIntervals {
            rsi: interval("JOB_RSI_INTERVAL_SECONDS", defaults.intervals.rsi)?,
            volatility: interval("JOB_VOLATILITY_INTERVAL_SECONDS", defaults.intervals.volatility)?,
            flats: interval("JOB_FLATS_INTERVAL_SECONDS", defaults.intervals.flats)?,
            trend: interval("JOB_TREND_INTERVAL_SECONDS", defaults.intervals.trend)?,
        };

        Ok(Self {
            environment: get_environment(),
            port: env_or("PORT", defaults.port),
            bybit: BybitConfig {
                base_url,
                request_timeout: Duration::from_millis(env_or(
                    "CLIENT_REQUEST_TIMEOUT_MS",
                    defaults.bybit.request_timeout.as_millis() as u64,
                )),
            },
            rate_limit: RateLimitConfig {
                max_per_second: env_or("CLIENT_MAX_PER_SECOND", defaults.rate_limit.max_per_second),
                max_per_minute: env_or("CLIENT_MAX_PER_MINUTE", defaults.rate_limit.max_per_minute),
            },
            retry,
            intervals,
            notify_errors: env_flag("NOTIFY_ERRORS", defaults.notify_errors),
        })
    }
}
