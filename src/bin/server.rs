//! Candlewatch Server
//!
//! Runs the job scheduler and exposes the command surface over HTTP.

use candlewatch::config::Config;
use candlewatch::core::http::{start_server, AppState};
use candlewatch::core::runtime::{AlertDispatcher, LogAlertSink};
use candlewatch::core::scheduler::InMemoryScheduler;
use candlewatch::jobs::context::JobContext;
use candlewatch::jobs::shell::JobShell;
use candlewatch::logging;
use candlewatch::metrics::Metrics;
use candlewatch::services::bybit::BybitClient;
use candlewatch::services::rate_limiter::RateLimiter;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment);

    info!("Starting Candlewatch Server");
    info!(environment = %config.environment, "Environment");
    info!(base_url = %config.bybit.base_url, "Market data host");

    let metrics = Arc::new(Metrics::new()?);

    let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
    let client = BybitClient::new(&config.bybit, limiter, config.retry)?.with_metrics(metrics.clone());

    let context = JobContext::new(Arc::new(client), Some(metrics.clone()));
    let dispatcher = Arc::new(AlertDispatcher::new(
        context,
        Arc::new(LogAlertSink),
        config.notify_errors,
    ));

    let scheduler = Arc::new(InMemoryScheduler::new().with_metrics(metrics.clone()));
    let shell = Arc::new(JobShell::new(
        scheduler.clone(),
        dispatcher,
        config.intervals,
    ));

    let state = AppState::new(shell, metrics);
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    scheduler.shutdown().await;
    info!("Scheduler stopped");

    Ok(())
}
