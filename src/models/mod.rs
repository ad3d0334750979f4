//! Shared data models spanning the client, indicator and job layers.

pub mod candle;
pub mod indicators;

pub use candle::Candle;
pub use indicators::{DirectionalMovement, Segment, TrendSignal, ValueArea};
