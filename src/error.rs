use thiserror::Error;

/// Failures of the market data client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Request rejected before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Transport failure or non-success status after the retry budget
    #[error("connection error: {0}")]
    Connection(String),

    /// Payload missing, malformed or with an unexpected candle count
    #[error("incorrect response format: {0}")]
    Response(String),
}

/// Failures of the job shell. The display text is meant for the end user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShellError {
    #[error("{0}")]
    Validation(String),
}

impl ShellError {
    pub fn message(&self) -> &str {
        match self {
            ShellError::Validation(message) => message,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Why a job's parameter tokens were rejected. Surfaced to users only as the
/// kind's usage message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("expected {expected} parameters, got {got}")]
    Count { expected: usize, got: usize },

    #[error("coin invalid value: {0}")]
    Coin(String),

    #[error("timeframe invalid value: {0}")]
    Timeframe(String),

    #[error("{name} invalid value: {value}")]
    Number { name: &'static str, value: String },

    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: String },
}

/// Delivery failure of an alert sink
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    #[error("alert delivery failed: {0}")]
    Delivery(String),
}
