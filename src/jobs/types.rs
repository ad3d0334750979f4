//! Job kinds, their validated parameters and the job descriptor

use crate::error::ParamError;
use crate::services::market_data::KlineInterval;
use std::fmt;
use std::time::Duration;

/// A user-facing timeframe token and the request it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeframe {
    pub code: &'static str,
    pub limit: usize,
    pub interval: KlineInterval,
}

const THRESHOLD_TIMEFRAMES: &[Timeframe] = &[
    Timeframe { code: "30", limit: 30, interval: KlineInterval::Minute },
    Timeframe { code: "240", limit: 240, interval: KlineInterval::Minute },
];

const PATTERN_TIMEFRAMES: &[Timeframe] = &[
    Timeframe { code: "30", limit: 30, interval: KlineInterval::Minute },
    Timeframe { code: "60", limit: 60, interval: KlineInterval::Minute },
    Timeframe { code: "240", limit: 240, interval: KlineInterval::Minute },
    Timeframe { code: "1440", limit: 480, interval: KlineInterval::Minute3 },
];

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Rsi,
    Volatility,
    Flats,
    Trend,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [JobKind::Rsi, JobKind::Volatility, JobKind::Flats, JobKind::Trend];

    pub fn prefix(&self) -> &'static str {
        match self {
            JobKind::Rsi => "rsi",
            JobKind::Volatility => "volatility",
            JobKind::Flats => "flats",
            JobKind::Trend => "trend",
        }
    }

    /// Case-insensitive prefix lookup
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prefix().eq_ignore_ascii_case(prefix))
    }

    pub fn default_interval(&self) -> Duration {
        DEFAULT_INTERVAL
    }

    pub fn timeframes(&self) -> &'static [Timeframe] {
        match self {
            JobKind::Rsi | JobKind::Volatility => THRESHOLD_TIMEFRAMES,
            JobKind::Flats | JobKind::Trend => PATTERN_TIMEFRAMES,
        }
    }

    pub fn timeframe(&self, code: &str) -> Option<Timeframe> {
        self.timeframes().iter().find(|tf| tf.code == code).copied()
    }

    pub fn usage(&self) -> String {
        let timeframes = self
            .timeframes()
            .iter()
            .map(|tf| tf.code)
            .collect::<Vec<_>>()
            .join(" ");
        match self {
            JobKind::Rsi | JobKind::Volatility => format!(
                "{} <coin> <timeframe> <setpoint>\ncoin: string\ntimeframe: {}\nsetpoint: float",
                self.prefix(),
                timeframes
            ),
            JobKind::Flats => format!(
                "{} <coin> <timeframe> <max_difference> <min_length> <va>\ncoin: string\n\
                 timeframe: {}\nmax_difference: float\nmin_length: integer\nva: float",
                self.prefix(),
                timeframes
            ),
            JobKind::Trend => format!(
                "{} <coin> <timeframe>\ncoin: string\ntimeframe: {}",
                self.prefix(),
                timeframes
            ),
        }
    }

    /// All prefixes joined for the `<job_type>` usage line
    pub fn prefixes() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.prefix())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// rsi / volatility parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdParams {
    pub coin: String,
    pub timeframe: Timeframe,
    pub setpoint: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatsParams {
    pub coin: String,
    pub timeframe: Timeframe,
    /// Band half-width in percent of the zone's first close
    pub max_difference: f64,
    pub min_length: usize,
    /// Value area coverage in percent
    pub va: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendParams {
    pub coin: String,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobParams {
    Rsi(ThresholdParams),
    Volatility(ThresholdParams),
    Flats(FlatsParams),
    Trend(TrendParams),
}

fn expect_count<S: AsRef<str>>(tokens: &[S], expected: usize) -> Result<(), ParamError> {
    if tokens.len() != expected {
        return Err(ParamError::Count {
            expected,
            got: tokens.len(),
        });
    }
    Ok(())
}

fn parse_coin(token: &str) -> Result<String, ParamError> {
    let coin = token.trim();
    if coin.is_empty() || !coin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ParamError::Coin(token.to_string()));
    }
    Ok(coin.to_ascii_uppercase())
}

fn parse_timeframe(kind: JobKind, token: &str) -> Result<Timeframe, ParamError> {
    kind.timeframe(token.trim())
        .ok_or_else(|| ParamError::Timeframe(token.to_string()))
}

fn parse_float(name: &'static str, token: &str) -> Result<f64, ParamError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParamError::Number {
            name,
            value: token.to_string(),
        })
}

fn parse_usize(name: &'static str, token: &str) -> Result<usize, ParamError> {
    token.trim().parse::<usize>().map_err(|_| ParamError::Number {
        name,
        value: token.to_string(),
    })
}

fn out_of_range(name: &'static str, value: impl fmt::Display) -> ParamError {
    ParamError::OutOfRange {
        name,
        value: value.to_string(),
    }
}

/// Canonical float rendering used in names and titles (`70` → `70.0`).
/// Adding zero folds `-0.0` into `0.0`.
fn canonical_float(value: f64) -> String {
    format!("{:?}", value + 0.0)
}

impl JobParams {
    /// Validate the tokens that follow the kind prefix
    pub fn parse<S: AsRef<str>>(kind: JobKind, tokens: &[S]) -> Result<Self, ParamError> {
        let token = |i: usize| tokens[i].as_ref();
        match kind {
            JobKind::Rsi | JobKind::Volatility => {
                expect_count(tokens, 3)?;
                let params = ThresholdParams {
                    coin: parse_coin(token(0))?,
                    timeframe: parse_timeframe(kind, token(1))?,
                    setpoint: parse_float("setpoint", token(2))?,
                };
                Ok(if kind == JobKind::Rsi {
                    JobParams::Rsi(params)
                } else {
                    JobParams::Volatility(params)
                })
            }
            JobKind::Flats => {
                expect_count(tokens, 5)?;
                let max_difference = parse_float("max_difference", token(2))?;
                if max_difference < 0.0 {
                    return Err(out_of_range("max_difference", max_difference));
                }
                let min_length = parse_usize("min_length", token(3))?;
                if min_length == 0 {
                    return Err(out_of_range("min_length", min_length));
                }
                let va = parse_float("va", token(4))?;
                if va <= 0.0 || va > 100.0 {
                    return Err(out_of_range("va", va));
                }
                Ok(JobParams::Flats(FlatsParams {
                    coin: parse_coin(token(0))?,
                    timeframe: parse_timeframe(kind, token(1))?,
                    max_difference,
                    min_length,
                    va,
                }))
            }
            JobKind::Trend => {
                expect_count(tokens, 2)?;
                Ok(JobParams::Trend(TrendParams {
                    coin: parse_coin(token(0))?,
                    timeframe: parse_timeframe(kind, token(1))?,
                }))
            }
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobParams::Rsi(_) => JobKind::Rsi,
            JobParams::Volatility(_) => JobKind::Volatility,
            JobParams::Flats(_) => JobKind::Flats,
            JobParams::Trend(_) => JobKind::Trend,
        }
    }

    pub fn coin(&self) -> &str {
        match self {
            JobParams::Rsi(p) | JobParams::Volatility(p) => &p.coin,
            JobParams::Flats(p) => &p.coin,
            JobParams::Trend(p) => &p.coin,
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        match self {
            JobParams::Rsi(p) | JobParams::Volatility(p) => p.timeframe,
            JobParams::Flats(p) => p.timeframe,
            JobParams::Trend(p) => p.timeframe,
        }
    }

    /// Parameters in their canonical textual form, in declaration order
    pub fn canonical(&self) -> Vec<String> {
        match self {
            JobParams::Rsi(p) | JobParams::Volatility(p) => vec![
                p.coin.clone(),
                p.timeframe.code.to_string(),
                canonical_float(p.setpoint),
            ],
            JobParams::Flats(p) => vec![
                p.coin.clone(),
                p.timeframe.code.to_string(),
                canonical_float(p.max_difference),
                p.min_length.to_string(),
                canonical_float(p.va),
            ],
            JobParams::Trend(p) => vec![p.coin.clone(), p.timeframe.code.to_string()],
        }
    }
}

/// A validated recurring check owned by one user
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptor {
    pub owner_id: i64,
    pub chat_id: i64,
    pub params: JobParams,
    pub interval: Duration,
    fingerprint: String,
}

impl JobDescriptor {
    pub fn new(owner_id: i64, chat_id: i64, params: JobParams, interval: Duration) -> Self {
        let fingerprint = format!(
            "{}-{}-{}",
            owner_id,
            params.kind().prefix(),
            params.canonical().join("-")
        );
        Self {
            owner_id,
            chat_id,
            params,
            interval,
            fingerprint,
        }
    }

    pub fn parse<S: AsRef<str>>(
        kind: JobKind,
        tokens: &[S],
        owner_id: i64,
        chat_id: i64,
        interval: Duration,
    ) -> Result<Self, ParamError> {
        let params = JobParams::parse(kind, tokens)?;
        Ok(Self::new(owner_id, chat_id, params, interval))
    }

    pub fn kind(&self) -> JobKind {
        self.params.kind()
    }

    /// Registry key: owner, kind and canonical parameters
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn title(&self) -> String {
        format!(
            "{}[{}]",
            self.kind().prefix().to_uppercase(),
            self.params.canonical().join(", ")
        )
    }
}
