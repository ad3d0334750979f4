//! Outbound services: rate limiting and exchange market data

pub mod bybit;
pub mod market_data;
pub mod rate_limiter;

pub use bybit::BybitClient;
pub use market_data::{KlineInterval, MarketDataProvider, RetryPolicy};
pub use rate_limiter::RateLimiter;
