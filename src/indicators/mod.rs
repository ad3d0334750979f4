//! Indicator engine: pure functions over candle series

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use momentum::*;
pub use structure::*;
pub use trend::*;
pub use volatility::*;
