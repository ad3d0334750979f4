//! Command surface over the scheduler: add, remove and list jobs

use crate::config::JobIntervals;
use crate::core::scheduler::{ScheduledJob, Scheduler, TickHandler};
use crate::error::ShellError;
use crate::jobs::types::{JobDescriptor, JobKind};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const ALL: &str = "all";
const EMPTY: &str = "empty";

fn job_type_usage(with_all: bool) -> ShellError {
    let mut prefixes = JobKind::prefixes();
    if with_all {
        prefixes.push_str(",all");
    }
    ShellError::Validation(format!("<job_type>\njob_type: {}", prefixes))
}

fn titles(jobs: &[ScheduledJob]) -> String {
    jobs.iter()
        .map(|job| job.payload.title())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix of a command: a job kind, or `all` where accepted
enum Target {
    Kind(JobKind),
    All,
}

fn resolve_target(prefix: Option<&str>, accept_all: bool) -> Result<Target, ShellError> {
    let prefix = prefix.map(str::trim).unwrap_or_default();
    if accept_all && prefix.eq_ignore_ascii_case(ALL) {
        return Ok(Target::All);
    }
    JobKind::from_prefix(prefix)
        .map(Target::Kind)
        .ok_or_else(|| job_type_usage(accept_all))
}

pub struct JobShell {
    scheduler: Arc<dyn Scheduler>,
    handler: Arc<dyn TickHandler>,
    intervals: JobIntervals,
    lock: Mutex<()>,
}

impl JobShell {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        handler: Arc<dyn TickHandler>,
        intervals: JobIntervals,
    ) -> Self {
        Self {
            scheduler,
            handler,
            intervals,
            lock: Mutex::new(()),
        }
    }

    fn descriptor<S: AsRef<str>>(
        &self,
        kind: JobKind,
        params: &[S],
        owner_id: i64,
        chat_id: i64,
    ) -> Result<JobDescriptor, ShellError> {
        JobDescriptor::parse(kind, params, owner_id, chat_id, self.intervals.get(kind)).map_err(
            |e| {
                debug!(kind = %kind, error = %e, "JobShell: rejected parameters");
                ShellError::Validation(kind.usage())
            },
        )
    }

    async fn owner_jobs(&self, owner_id: i64) -> Vec<ScheduledJob> {
        self.scheduler
            .list_all()
            .await
            .into_iter()
            .filter(|job| job.owner_id == owner_id)
            .collect()
    }

    async fn cancel_all(&self, jobs: &[ScheduledJob]) {
        for job in jobs {
            self.scheduler.cancel(job).await;
        }
    }

    async fn cancel_owner_jobs(&self, owner_id: i64) -> Vec<ScheduledJob> {
        let _guard = self.lock.lock().await;
        let jobs = self.owner_jobs(owner_id).await;
        self.cancel_all(&jobs).await;
        jobs
    }

    /// Register a job, replacing any job with the same fingerprint
    pub async fn add<S: AsRef<str>>(
        &self,
        tokens: &[S],
        owner_id: i64,
        chat_id: i64,
    ) -> Result<String, ShellError> {
        let prefix = tokens.first().map(|token| token.as_ref());
        let Target::Kind(kind) = resolve_target(prefix, false)? else {
            return Err(job_type_usage(false));
        };
        let descriptor = self.descriptor(kind, &tokens[1..], owner_id, chat_id)?;
        let title = descriptor.title();
        let name = descriptor.fingerprint().to_string();
        let interval = descriptor.interval;

        let _guard = self.lock.lock().await;
        let replaced = self.scheduler.find_by_name(&name).await;
        self.cancel_all(&replaced).await;
        self.scheduler
            .register(
                &name,
                interval,
                owner_id,
                chat_id,
                Arc::new(descriptor),
                self.handler.clone(),
            )
            .await;

        info!(owner_id, job = %name, replaced = replaced.len(), "JobShell: added {}", title);

        if replaced.is_empty() {
            Ok(format!("Add job:\n{}", title))
        } else {
            Ok(format!(
                "Remove job:\n{}\nAdd job:\n{}",
                titles(&replaced),
                title
            ))
        }
    }

    /// Cancel the job matching the tokens, or every job of the owner for `all`
    pub async fn remove<S: AsRef<str>>(
        &self,
        tokens: &[S],
        owner_id: i64,
    ) -> Result<String, ShellError> {
        let prefix = tokens.first().map(|token| token.as_ref());
        let removed = match resolve_target(prefix, true)? {
            Target::All => self.cancel_owner_jobs(owner_id).await,
            Target::Kind(kind) => {
                let descriptor = self.descriptor(kind, &tokens[1..], owner_id, owner_id)?;
                let _guard = self.lock.lock().await;
                let jobs = self.scheduler.find_by_name(descriptor.fingerprint()).await;
                self.cancel_all(&jobs).await;
                jobs
            }
        };

        info!(owner_id, count = removed.len(), "JobShell: removed {} jobs", removed.len());

        if removed.is_empty() {
            Ok(EMPTY.to_string())
        } else {
            Ok(format!("Remove job:\n{}", titles(&removed)))
        }
    }

    /// Titles of the owner's jobs, optionally filtered by kind
    pub async fn list<S: AsRef<str>>(
        &self,
        tokens: &[S],
        owner_id: i64,
    ) -> Result<String, ShellError> {
        let filter = match tokens.first() {
            None => None,
            Some(prefix) => match resolve_target(Some(prefix.as_ref()), true)? {
                Target::All => None,
                Target::Kind(kind) => Some(kind),
            },
        };

        let jobs: Vec<ScheduledJob> = self
            .owner_jobs(owner_id)
            .await
            .into_iter()
            .filter(|job| filter.is_none_or(|kind| job.payload.kind() == kind))
            .collect();

        if jobs.is_empty() {
            Ok(format!("Jobs list:\n{}", EMPTY))
        } else {
            Ok(format!("Jobs list:\n{}", titles(&jobs)))
        }
    }

    /// Cancel every job of the owner, returning how many were removed
    pub async fn clear(&self, owner_id: i64) -> usize {
        let jobs = self.cancel_owner_jobs(owner_id).await;
        info!(owner_id, count = jobs.len(), "JobShell: cleared {} jobs", jobs.len());
        jobs.len()
    }
}
