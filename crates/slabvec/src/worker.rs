//! Worker facility: run a closure on a designated thread, get its result.
//!
//! This is the only thread-management surface in the workspace; the pool
//! and container crates are passive and know nothing about scheduling. The
//! harness uses it to demonstrate sequences being destroyed away from the
//! thread that built them.

use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Sender};
use thiserror::Error;

/// Failures of the worker facility.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The OS refused to spawn the thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(String),

    /// The worker thread is no longer accepting or answering jobs.
    #[error("worker thread terminated")]
    Gone,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single long-lived worker thread consuming jobs from a channel.
pub struct Worker {
    jobs: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a named worker thread.
    pub fn spawn(name: &str) -> Result<Self, WorkerError> {
        let (jobs, inbox) = unbounded::<Job>();
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for job in inbox {
                    job();
                }
            })
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;
        Ok(Self {
            jobs: Some(jobs),
            handle: Some(handle),
        })
    }

    /// Run `f` on the worker thread and block until its result arrives.
    pub fn run<R, F>(&self, f: F) -> Result<R, WorkerError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (done, result) = bounded(1);
        let jobs = self.jobs.as_ref().ok_or(WorkerError::Gone)?;
        jobs.send(Box::new(move || {
            let _ = done.send(f());
        }))
        .map_err(|_| WorkerError::Gone)?;
        result.recv().map_err(|_| WorkerError::Gone)
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
