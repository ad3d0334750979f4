//! Shared dependencies handed to every job execution

use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use std::sync::Arc;

/// Read-only context shared by all scheduled jobs.
///
/// The data provider is constructed once at startup and shared; the rate
/// limiter it holds is what keeps all jobs inside the exchange's budget.
#[derive(Clone)]
pub struct JobContext {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(data_provider: Arc<dyn MarketDataProvider>, metrics: Option<Arc<Metrics>>) -> Self {
        Self {
            data_provider,
            metrics,
        }
    }
}
