//! Fixed-size worker pool.
//!
//! `capacity` long-lived tasks pull jobs off one shared queue, so at most
//! `capacity` jobs run at once while `execute` never waits for a free worker.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Option<mpsc::UnboundedSender<Job>>,
}

impl WorkerPool {
    /// Spawns `capacity` workers on the current runtime.
    pub fn new(capacity: usize) -> anyhow::Result<Self> {
        if capacity == 0 {
            anyhow::bail!("worker pool needs at least one worker");
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..capacity)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect();

        Ok(Self {
            workers,
            sender: Some(sender),
        })
    }

    pub fn capacity(&self) -> usize {
        self.workers.len()
    }

    /// Queues `job` for the next free worker.
    pub fn execute<F>(&self, job: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("worker pool is shut down"))?;
        sender
            .send(Box::pin(job))
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))
    }

    /// Stops accepting jobs, lets queued ones finish, and waits for every worker.
    pub async fn shutdown(mut self) {
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            tracing::debug!(worker = worker.id, "Shutting down worker");
            if let Err(e) = worker.handle.await {
                tracing::error!(worker = worker.id, error = %e, "Worker panicked");
            }
        }
    }
}

struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                // The lock is released before the job runs.
                let job = receiver.lock().await.recv().await;

                match job {
                    Some(job) => {
                        tracing::trace!(worker = id, "Worker got a job");
                        // A panicking job must not take the worker down with it.
                        if let Err(e) = tokio::spawn(job).await {
                            tracing::error!(worker = id, error = %e, "Job panicked");
                        }
                    }
                    None => {
                        tracing::trace!(worker = id, "Queue closed, worker exiting");
                        break;
                    }
                }
            }
        });

        Self { id, handle }
    }
}
