//! Manages the state of long-running, asynchronous background jobs.
//!
//! Tasks that run outside the request/response cycle, such as the bulk lead
//! import in `services/leads/import.rs`, report their progress here so that
//! clients can poll it by job id.
//!
//! The main components are:
//! - `JobsState`: A clonable, thread-safe struct that holds the shared state of all jobs.
//!   It is injected into the Actix application state in `main.rs`.
//! - `JobUpdate`: A message struct used to communicate status changes from a background
//!   job back to the central state manager.
//! - `start_job_updater`: A long-running task that listens for `JobUpdate` messages
//!   on an MPSC channel and updates the shared `JobsState` accordingly.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{mpsc, RwLock};

/// Capacity of the update channel between workers and the updater task.
const UPDATE_BUFFER: usize = 100;

/// How long a completed or failed job stays pollable.
const FINISHED_RETENTION: Duration = Duration::from_secs(60 * 60);

/// A thread-safe, shareable container for the state of all background jobs.
///
/// Shared across the Actix application as `web::Data`.
#[derive(Clone)]
pub struct JobsState {
    /// A map from a unique job ID to its current `JobStatus`.
    ///
    /// Read by the status endpoints, written by `start_job_updater` and by the
    /// scheduling code when a job is first registered.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender side of the update channel. Background workers push `JobUpdate`s
    /// here instead of locking `jobs` themselves.
    pub tx: mpsc::Sender<JobUpdate>,

    /// Delay after which a finished job is dropped from `jobs`.
    retention: Duration,
}

impl JobsState {
    /// Creates an empty state and the receiver to hand to `start_job_updater`.
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        Self::with_retention(FINISHED_RETENTION)
    }

    pub fn with_retention(retention: Duration) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(UPDATE_BUFFER);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
            retention,
        };
        (state, rx)
    }

    /// Registers a new job as `Pending` and returns its id.
    pub async fn register(&self) -> String {
        let job_id = uuid::Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobStatus::Pending);
        job_id
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// Represents a status update for a specific background job.
#[derive(Debug)]
pub struct JobUpdate {
    /// The unique identifier of the job being updated.
    pub(crate) job_id: String,
    /// The new status of the job.
    pub(crate) status: JobStatus,
}

/// Starts the central job state updater task.
///
/// Spawned once from `main.rs`. Applies every received `JobUpdate` to the
/// shared map until all senders are dropped. Finished jobs are evicted once
/// the retention delay has passed.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let finished = matches!(
            update.status,
            JobStatus::Completed(_) | JobStatus::Failed(_)
        );
        state
            .jobs
            .write()
            .await
            .insert(update.job_id.clone(), update.status);

        if finished {
            let jobs = state.jobs.clone();
            let retention = state.retention;
            tokio::spawn(async move {
                tokio::time::sleep(retention).await;
                jobs.write().await.remove(&update.job_id);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn updates_are_applied_in_order() {
        let (state, rx) = JobsState::new();
        let job_id = state.register().await;
        assert_eq!(state.status(&job_id).await, Some(JobStatus::Pending));

        tokio::spawn(start_job_updater(state.clone(), rx));

        for status in [
            JobStatus::InProgress(10),
            JobStatus::Completed("done".to_string()),
        ] {
            state
                .tx
                .send(JobUpdate {
                    job_id: job_id.clone(),
                    status,
                })
                .await
                .unwrap();
        }

        let expected = Some(JobStatus::Completed("done".to_string()));
        for _ in 0..100 {
            if state.status(&job_id).await == expected {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(state.status(&job_id).await, expected);
    }

    #[actix_web::test]
    async fn finished_jobs_are_evicted_after_retention() {
        let (state, rx) = JobsState::with_retention(std::time::Duration::from_millis(50));
        let job_id = state.register().await;
        tokio::spawn(start_job_updater(state.clone(), rx));

        state
            .tx
            .send(JobUpdate {
                job_id: job_id.clone(),
                status: JobStatus::Failed("bad row".to_string()),
            })
            .await
            .unwrap();

        let mut seen_failed = false;
        for _ in 0..200 {
            match state.status(&job_id).await {
                Some(JobStatus::Failed(_)) => seen_failed = true,
                None if seen_failed => break,
                _ => {}
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        assert!(seen_failed);
        assert_eq!(state.status(&job_id).await, None);
    }

    #[actix_web::test]
    async fn unknown_job_has_no_status() {
        let (state, _rx) = JobsState::new();
        assert_eq!(state.status("missing").await, None);
    }
}
