//! Shared render worker pool.
//!
//! A small fixed pool of named threads drains one job queue. Jobs are plain
//! boxed closures; the pool knows nothing about rendering, which keeps the
//! async bridge a thin wrapper over the synchronous pipeline.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

use crate::domain::error::{FormweaverError, Result};

/// A unit of work executed on a pool thread.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Upper bound on pool size; render jobs are CPU-bound string work and gain
/// nothing from oversubscription.
const MAX_WORKERS: usize = 4;

/// Fixed-size pool of render worker threads draining a shared queue.
pub struct WorkerPool {
    sender: Sender<Job>,
}

impl WorkerPool {
    /// Spawns `size` worker threads (at least one).
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        for index in 0..size.max(1) {
            let receiver = Arc::clone(&receiver);
            thread::Builder::new()
                .name(format!("formweaver-render-{index}"))
                .spawn(move || worker_loop(receiver))
                .expect("failed to spawn render worker thread");
        }

        Self { sender }
    }

    /// Enqueues a job for execution on a pool thread.
    ///
    /// # Errors
    ///
    /// Returns [`FormweaverError::Worker`] if the pool has shut down.
    pub fn submit(&self, job: Job) -> Result<()> {
        self.sender
            .send(job)
            .map_err(|_| FormweaverError::Worker("render worker pool is shut down".to_string()))
    }
}

fn worker_loop(receiver: Arc<Mutex<Receiver<Job>>>) {
    loop {
        // Hold the lock only for the dequeue, never while running the job.
        let job = match receiver.lock() {
            Ok(guard) => guard.recv(),
            Err(_) => return,
        };
        match job {
            Ok(job) => job(),
            Err(_) => return,
        }
    }
}

static POOL: OnceLock<WorkerPool> = OnceLock::new();

/// Returns the process-wide render pool, spawning it on first use.
///
/// Pool size is the available parallelism capped at four threads.
pub fn global_pool() -> &'static WorkerPool {
    POOL.get_or_init(|| {
        let size = thread::available_parallelism()
            .map(|n| n.get().min(MAX_WORKERS))
            .unwrap_or(1);
        tracing::debug!(workers = size, "spawning render worker pool");
        WorkerPool::new(size)
    })
}
