//! Unit tests for the in-memory interval scheduler

use async_trait::async_trait;
use candlewatch::core::scheduler::{InMemoryScheduler, ScheduledJob, Scheduler, TickHandler};
use candlewatch::jobs::types::{JobDescriptor, JobKind};
use candlewatch::metrics::Metrics;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    finished: AtomicUsize,
    work: Duration,
}

#[async_trait]
impl TickHandler for CountingHandler {
    async fn on_tick(&self, _job: &ScheduledJob) {
        self.started.fetch_add(1, Ordering::SeqCst);
        if !self.work.is_zero() {
            sleep(self.work).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

fn payload(owner_id: i64) -> Arc<JobDescriptor> {
    Arc::new(
        JobDescriptor::parse(JobKind::Trend, &["BTCUSDT", "30"], owner_id, owner_id, Duration::from_secs(10))
            .unwrap(),
    )
}

async fn register(
    scheduler: &InMemoryScheduler,
    name: &str,
    handler: Arc<CountingHandler>,
) -> ScheduledJob {
    scheduler
        .register(name, Duration::from_secs(10), 1, 1, payload(1), handler)
        .await
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_after_one_interval() {
    let scheduler = InMemoryScheduler::new();
    let handler = Arc::new(CountingHandler::default());
    register(&scheduler, "job", handler.clone()).await;

    sleep(Duration::from_secs(5)).await;
    assert_eq!(handler.started.load(Ordering::SeqCst), 0);

    sleep(Duration::from_secs(6)).await;
    assert_eq!(handler.started.load(Ordering::SeqCst), 1);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handler.started.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_future_ticks() {
    let scheduler = InMemoryScheduler::new();
    let handler = Arc::new(CountingHandler::default());
    let job = register(&scheduler, "job", handler.clone()).await;

    sleep(Duration::from_secs(11)).await;
    scheduler.cancel(&job).await;
    sleep(Duration::from_secs(60)).await;

    assert_eq!(handler.started.load(Ordering::SeqCst), 1);
    assert!(scheduler.find_by_name("job").await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_does_not_abort_in_flight_tick() {
    let scheduler = InMemoryScheduler::new();
    let handler = Arc::new(CountingHandler {
        work: Duration::from_secs(5),
        ..Default::default()
    });
    let job = register(&scheduler, "slow", handler.clone()).await;

    sleep(Duration::from_secs(12)).await;
    assert_eq!(handler.started.load(Ordering::SeqCst), 1);
    assert_eq!(handler.finished.load(Ordering::SeqCst), 0);

    scheduler.cancel(&job).await;
    sleep(Duration::from_secs(30)).await;

    assert_eq!(handler.started.load(Ordering::SeqCst), 1);
    assert_eq!(handler.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_find_and_list_in_registration_order() {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let scheduler = InMemoryScheduler::new().with_metrics(metrics.clone());
    let handler = Arc::new(CountingHandler::default());

    let a = register(&scheduler, "a", handler.clone()).await;
    let b = register(&scheduler, "b", handler.clone()).await;
    let a2 = register(&scheduler, "a", handler.clone()).await;
    assert_eq!(metrics.jobs_registered.get(), 3);

    let found: Vec<u64> = scheduler.find_by_name("a").await.iter().map(|j| j.id).collect();
    assert_eq!(found, vec![a.id, a2.id]);

    let all: Vec<String> = scheduler.list_all().await.into_iter().map(|j| j.name).collect();
    assert_eq!(all, vec!["a", "b", "a"]);

    scheduler.cancel(&b).await;
    scheduler.cancel(&b).await;
    assert_eq!(scheduler.list_all().await.len(), 2);
    assert_eq!(metrics.jobs_registered.get(), 2);

    scheduler.shutdown().await;
    assert!(scheduler.list_all().await.is_empty());
    assert_eq!(metrics.jobs_registered.get(), 0);
}

#[tokio::test]
async fn test_registered_job_carries_owner_and_payload() {
    let scheduler = InMemoryScheduler::new();
    let job = scheduler
        .register(
            "owned",
            Duration::from_secs(30),
            5,
            9,
            payload(5),
            Arc::new(CountingHandler::default()),
        )
        .await;

    assert_eq!(job.owner_id, 5);
    assert_eq!(job.chat_id, 9);
    assert_eq!(job.interval, Duration::from_secs(30));
    assert_eq!(job.payload.title(), "TREND[BTCUSDT, 30]");
    scheduler.shutdown().await;
}
