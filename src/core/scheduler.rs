//! Interval scheduler for recurring jobs

use crate::jobs::types::JobDescriptor;
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A job registered with a scheduler
#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub id: u64,
    pub name: String,
    pub owner_id: i64,
    pub chat_id: i64,
    pub interval: Duration,
    pub payload: Arc<JobDescriptor>,
}

/// Invoked on every tick of a scheduled job
#[async_trait]
pub trait TickHandler: Send + Sync {
    async fn on_tick(&self, job: &ScheduledJob);
}

#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Register a recurring job. The first tick fires one interval from now.
    async fn register(
        &self,
        name: &str,
        interval: Duration,
        owner_id: i64,
        chat_id: i64,
        payload: Arc<JobDescriptor>,
        handler: Arc<dyn TickHandler>,
    ) -> ScheduledJob;

    async fn find_by_name(&self, name: &str) -> Vec<ScheduledJob>;

    /// Stop future ticks. A tick already running completes.
    async fn cancel(&self, job: &ScheduledJob);

    /// Every registered job, in registration order
    async fn list_all(&self) -> Vec<ScheduledJob>;
}

struct Entry {
    job: ScheduledJob,
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Scheduler backed by one tokio task per job
pub struct InMemoryScheduler {
    entries: Arc<RwLock<HashMap<u64, Entry>>>,
    next_id: AtomicU64,
    metrics: Option<Arc<Metrics>>,
}

impl Default for InMemoryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn update_gauge(&self, count: usize) {
        if let Some(ref metrics) = self.metrics {
            metrics.jobs_registered.set(count as i64);
        }
    }

    /// Cancel every job and wait for in-flight ticks to finish
    pub async fn shutdown(&self) {
        let drained: Vec<Entry> = {
            let mut entries = self.entries.write().await;
            entries.drain().map(|(_, entry)| entry).collect()
        };
        self.update_gauge(0);

        info!(
            count = drained.len(),
            "InMemoryScheduler: shutting down {} jobs",
            drained.len()
        );

        for entry in drained {
            let _ = entry.cancel.send(true);
            if let Err(e) = entry.handle.await {
                warn!(job = %entry.job.name, error = %e, "InMemoryScheduler: job task ended abnormally");
            }
        }
    }

    fn spawn_ticker(
        job: ScheduledJob,
        handler: Arc<dyn TickHandler>,
        mut cancelled: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = job.interval.max(MIN_PERIOD);
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.changed() => break,
                    _ = ticker.tick() => {
                        debug!(job = %job.name, "InMemoryScheduler: tick for {}", job.name);
                        handler.on_tick(&job).await;
                    }
                }
                if *cancelled.borrow() {
                    break;
                }
            }

            debug!(job = %job.name, "InMemoryScheduler: stopped {}", job.name);
        })
    }
}

#[async_trait]
impl Scheduler for InMemoryScheduler {
    async fn register(
        &self,
        name: &str,
        interval: Duration,
        owner_id: i64,
        chat_id: i64,
        payload: Arc<JobDescriptor>,
        handler: Arc<dyn TickHandler>,
    ) -> ScheduledJob {
        let job = ScheduledJob {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            owner_id,
            chat_id,
            interval,
            payload,
        };

        let (cancel, cancelled) = watch::channel(false);
        let handle = Self::spawn_ticker(job.clone(), handler, cancelled);

        let count = {
            let mut entries = self.entries.write().await;
            entries.insert(
                job.id,
                Entry {
                    job: job.clone(),
                    cancel,
                    handle,
                },
            );
            entries.len()
        };
        self.update_gauge(count);

        info!(
            job = %job.name,
            interval_secs = interval.as_secs(),
            "InMemoryScheduler: registered {} every {}s",
            job.name,
            interval.as_secs()
        );

        job
    }

    async fn find_by_name(&self, name: &str) -> Vec<ScheduledJob> {
        let entries = self.entries.read().await;
        let mut jobs: Vec<ScheduledJob> = entries
            .values()
            .filter(|entry| entry.job.name == name)
            .map(|entry| entry.job.clone())
            .collect();
        jobs.sort_by_key(|job| job.id);
        jobs
    }

    async fn cancel(&self, job: &ScheduledJob) {
        let (removed, count) = {
            let mut entries = self.entries.write().await;
            let removed = entries.remove(&job.id);
            (removed, entries.len())
        };

        if let Some(entry) = removed {
            let _ = entry.cancel.send(true);
            self.update_gauge(count);
            info!(job = %job.name, "InMemoryScheduler: cancelled {}", job.name);
        }
    }

    async fn list_all(&self) -> Vec<ScheduledJob> {
        let entries = self.entries.read().await;
        let mut jobs: Vec<ScheduledJob> = entries.values().map(|entry| entry.job.clone()).collect();
        jobs.sort_by_key(|job| job.id);
        jobs
    }
}
