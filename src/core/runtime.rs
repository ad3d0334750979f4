//! Tick execution and alert delivery

use crate::core::scheduler::{ScheduledJob, TickHandler};
use crate::error::AlertError;
use crate::jobs::context::JobContext;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Destination for alert texts
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), AlertError>;
}

/// Emits alerts as structured log events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), AlertError> {
        info!(chat_id, alert = %text, "Alert: {}", text.replace('\n', " | "));
        Ok(())
    }
}

/// Runs a job on each tick and forwards its outcome to the sink.
///
/// A failed tick is logged (and optionally reported to the chat); the job
/// stays registered and runs again on the next tick.
pub struct AlertDispatcher {
    context: JobContext,
    sink: Arc<dyn AlertSink>,
    notify_errors: bool,
}

impl AlertDispatcher {
    pub fn new(context: JobContext, sink: Arc<dyn AlertSink>, notify_errors: bool) -> Self {
        Self {
            context,
            sink,
            notify_errors,
        }
    }

    async fn deliver(&self, job: &ScheduledJob, text: &str) {
        match self.sink.send(job.chat_id, text).await {
            Ok(()) => {
                if let Some(ref metrics) = self.context.metrics {
                    metrics.alerts_sent_total.inc();
                }
            }
            Err(e) => {
                error!(job = %job.name, error = %e, "AlertDispatcher: failed to deliver alert");
            }
        }
    }
}

#[async_trait]
impl TickHandler for AlertDispatcher {
    async fn on_tick(&self, job: &ScheduledJob) {
        if let Some(ref metrics) = self.context.metrics {
            metrics.job_executions_total.inc();
        }

        match job.payload.execute(&self.context).await {
            Ok(Some(text)) => self.deliver(job, &text).await,
            Ok(None) => {}
            Err(e) => {
                if let Some(ref metrics) = self.context.metrics {
                    metrics.job_failures_total.inc();
                }
                warn!(
                    job = %job.name,
                    error = %e,
                    "AlertDispatcher: {} failed: {}",
                    job.name,
                    e
                );
                if self.notify_errors {
                    let text = format!("{}:\n{}", job.payload.title(), e);
                    self.deliver(job, &text).await;
                }
            }
        }
    }
}
