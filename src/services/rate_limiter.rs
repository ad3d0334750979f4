//! Sliding-window admission control for outbound exchange requests.
//!
//! The exchange enforces its limits per credential, so one limiter instance is
//! shared by every request the process makes.

use crate::config::RateLimitConfig;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

const SECOND: Duration = Duration::from_secs(1);
const MINUTE: Duration = Duration::from_secs(60);

#[derive(Default)]
struct Windows {
    second: VecDeque<Instant>,
    minute: VecDeque<Instant>,
}

pub struct RateLimiter {
    max_per_second: usize,
    max_per_minute: usize,
    windows: Mutex<Windows>,
}

/// Drop entries at least `period` old and return how long to wait before the
/// window has headroom again, if it is full.
fn headroom_wait(
    window: &mut VecDeque<Instant>,
    period: Duration,
    cap: usize,
    now: Instant,
) -> Option<Duration> {
    if cap == 0 {
        return None;
    }
    while let Some(&oldest) = window.front() {
        if now.duration_since(oldest) >= period {
            window.pop_front();
        } else {
            break;
        }
    }
    if window.len() < cap {
        return None;
    }
    window
        .front()
        .map(|&oldest| period.saturating_sub(now.duration_since(oldest)))
}

impl RateLimiter {
    pub fn new(max_per_second: usize, max_per_minute: usize) -> Self {
        Self {
            max_per_second,
            max_per_minute,
            windows: Mutex::new(Windows::default()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_per_second, config.max_per_minute)
    }

    /// Wait until both windows have headroom, then record the admission.
    ///
    /// Pruning, the cap check and the append happen under one lock; the lock
    /// is released while sleeping and everything is re-checked on wake-up.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut windows = self.windows.lock().await;
                let now = Instant::now();
                let second_wait =
                    headroom_wait(&mut windows.second, SECOND, self.max_per_second, now);
                let minute_wait =
                    headroom_wait(&mut windows.minute, MINUTE, self.max_per_minute, now);

                match second_wait.max(minute_wait) {
                    Some(wait) => wait,
                    None => {
                        if self.max_per_second > 0 {
                            windows.second.push_back(now);
                        }
                        if self.max_per_minute > 0 {
                            windows.minute.push_back(now);
                        }
                        return;
                    }
                }
            };

            debug!(
                wait_ms = wait.as_millis() as u64,
                "RateLimiter: window full, waiting {}ms",
                wait.as_millis()
            );
            sleep(wait).await;
        }
    }

    /// Admissions currently counted in the (second, minute) windows
    pub async fn usage(&self) -> (usize, usize) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        headroom_wait(&mut windows.second, SECOND, usize::MAX, now);
        headroom_wait(&mut windows.minute, MINUTE, usize::MAX, now);
        (windows.second.len(), windows.minute.len())
    }
}
