//! Bybit market data integration

pub mod client;
pub mod messages;

pub use client::BybitClient;
