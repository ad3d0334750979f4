//! Trend indicators: DMI/ADX, reversal detection

pub mod adx;
pub mod reversal;

pub use adx::*;
pub use reversal::*;
