//! Candlewatch: periodic candle polling, indicator checks and alerting.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

pub use error::{AlertError, ClientError, ConfigError, ParamError, ShellError};
