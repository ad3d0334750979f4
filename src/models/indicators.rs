use serde::{Deserialize, Serialize};

/// Half-open index range `[start, end)` over a candle sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Volume profile summary of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueArea {
    /// Point of control: midpoint of the highest-volume bar
    pub poc: f64,
    /// Value area low
    pub val: f64,
    /// Value area high
    pub vah: f64,
}

/// Directional movement values of the last bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalMovement {
    /// +DI
    pub plus_di: f64,
    /// -DI
    pub minus_di: f64,
    /// `None` until enough DX values exist to seed the average
    pub adx: Option<f64>,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendSignal {
    /// Signal `+1`
    ToUptrend,
    /// Signal `-1`
    ToDowntrend,
    /// Signal `0`
    None,
}

impl TrendSignal {
    pub fn value(&self) -> i8 {
        match self {
            TrendSignal::ToUptrend => 1,
            TrendSignal::ToDowntrend => -1,
            TrendSignal::None => 0,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            TrendSignal::ToUptrend => Some("downtrend to uptrend"),
            TrendSignal::ToDowntrend => Some("uptrend to downtrend"),
            TrendSignal::None => None,
        }
    }
}
