//! Prometheus metrics for the HTTP surface, the market data client and jobs

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub market_data_requests_total: IntCounter,
    pub market_data_retries_total: IntCounter,
    pub market_data_failures_total: IntCounter,
    pub job_executions_total: IntCounter,
    pub job_failures_total: IntCounter,
    pub alerts_sent_total: IntCounter,
    pub jobs_registered: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let market_data_requests_total = IntCounter::new(
            "market_data_requests_total",
            "Kline requests admitted by the rate limiter",
        )?;
        let market_data_retries_total = IntCounter::new(
            "market_data_retries_total",
            "Kline requests retried after a transport or status failure",
        )?;
        let market_data_failures_total = IntCounter::new(
            "market_data_failures_total",
            "Kline fetches that failed after all attempts or on a bad payload",
        )?;
        let job_executions_total =
            IntCounter::new("job_executions_total", "Scheduled job ticks executed")?;
        let job_failures_total =
            IntCounter::new("job_failures_total", "Scheduled job ticks that failed")?;
        let alerts_sent_total = IntCounter::new("alerts_sent_total", "Alerts delivered")?;
        let jobs_registered = IntGauge::new("jobs_registered", "Jobs currently scheduled")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(market_data_requests_total.clone()))?;
        registry.register(Box::new(market_data_retries_total.clone()))?;
        registry.register(Box::new(market_data_failures_total.clone()))?;
        registry.register(Box::new(job_executions_total.clone()))?;
        registry.register(Box::new(job_failures_total.clone()))?;
        registry.register(Box::new(alerts_sent_total.clone()))?;
        registry.register(Box::new(jobs_registered.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            market_data_requests_total,
            market_data_retries_total,
            market_data_failures_total,
            job_executions_total,
            job_failures_total,
            alerts_sent_total,
            jobs_registered,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
