//! Detached background refresh queue.
//!
//! Cache hits submit a refresh job here and return without waiting. A single
//! worker drains the queue and runs every job as its own task. Outcomes are
//! published on a broadcast channel and never reach the original caller.

use futures_util::future::BoxFuture;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};

use kennelsync_core::models::Collection;
use kennelsync_core::remote::RemoteError;

/// Channel capacity for outcome events.
const OUTCOME_CHANNEL_CAPACITY: usize = 100;

/// A refresh job. Resolves to the number of entities fetched.
pub type RefreshJob = BoxFuture<'static, Result<usize, RemoteError>>;

/// What happened to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed { fetched: usize },
    Failed { message: String },
    /// The queue was full or shut down and the job never ran.
    Dropped,
}

/// An outcome tagged with the read that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshEvent {
    pub collection: Collection,
    pub owner_key: String,
    pub outcome: RefreshOutcome,
}

struct RefreshRequest {
    collection: Collection,
    owner_key: String,
    job: RefreshJob,
}

/// Handle for submitting jobs. Cheap to clone.
#[derive(Clone)]
pub struct RefreshQueue {
    request_tx: mpsc::Sender<RefreshRequest>,
    events: broadcast::Sender<RefreshEvent>,
}

/// The receiving half. Nothing runs until [`RefreshWorker::run`] is polled.
pub struct RefreshWorker {
    request_rx: mpsc::Receiver<RefreshRequest>,
    events: broadcast::Sender<RefreshEvent>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl RefreshQueue {
    /// Creates a queue holding at most `capacity` pending jobs.
    pub fn new(capacity: usize) -> (Self, RefreshWorker) {
        let (request_tx, request_rx) = mpsc::channel(capacity.max(1));
        let (events, _) = broadcast::channel(OUTCOME_CHANNEL_CAPACITY);

        let queue = Self {
            request_tx,
            events: events.clone(),
        };
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let worker = RefreshWorker {
            request_rx,
            events,
            shutdown_tx,
            shutdown_rx,
        };
        (queue, worker)
    }

    /// Creates a queue and spawns its worker on the current runtime.
    ///
    /// The worker exits once every queue handle has been dropped or
    /// [`RefreshHandle::shutdown`] is called.
    pub fn spawn(capacity: usize) -> (Self, RefreshHandle) {
        let (queue, worker) = Self::new(capacity);
        (queue, worker.spawn())
    }

    /// Enqueues a job without blocking.
    ///
    /// Returns false if the job was dropped because the queue is full or the
    /// worker is gone.
    pub fn submit(&self, collection: Collection, owner_key: &str, job: RefreshJob) -> bool {
        let request = RefreshRequest {
            collection,
            owner_key: owner_key.to_string(),
            job,
        };

        match self.request_tx.try_send(request) {
            Ok(()) => {
                tracing::trace!(collection = %collection, owner_key = %owner_key, "Refresh queued");
                true
            }
            Err(err) => {
                let reason = match &err {
                    mpsc::error::TrySendError::Full(_) => "queue full",
                    mpsc::error::TrySendError::Closed(_) => "worker stopped",
                };
                tracing::warn!(
                    collection = %collection,
                    owner_key = %owner_key,
                    reason,
                    "Background refresh dropped"
                );
                let _ = self.events.send(RefreshEvent {
                    collection,
                    owner_key: owner_key.to_string(),
                    outcome: RefreshOutcome::Dropped,
                });
                false
            }
        }
    }

    /// Subscribes to outcomes of jobs submitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }
}

impl RefreshWorker {
    /// Spawns the worker on the current runtime.
    pub fn spawn(self) -> RefreshHandle {
        let shutdown_tx = self.shutdown_tx.clone();
        let task = tokio::spawn(self.run());
        RefreshHandle { shutdown_tx, task }
    }

    /// Drains the queue until every sender is dropped or shutdown is
    /// signalled, then waits for running jobs.
    pub async fn run(self) {
        tracing::debug!("Refresh worker started");

        let Self {
            mut request_rx,
            events,
            shutdown_tx: _shutdown_tx,
            mut shutdown_rx,
        } = self;
        let mut jobs = JoinSet::new();

        loop {
            tokio::select! {
                request = request_rx.recv() => match request {
                    Some(request) => {
                        jobs.spawn(run_job(request, events.clone()));
                    }
                    None => break,
                },
                Some(joined) = jobs.join_next(), if !jobs.is_empty() => log_join(joined),
                _ = shutdown_rx.recv() => {
                    // Queued requests are still delivered, new ones are refused.
                    tracing::debug!("Refresh worker closing queue");
                    request_rx.close();
                }
            }
        }

        while let Some(joined) = jobs.join_next().await {
            log_join(joined);
        }

        tracing::debug!("Refresh worker shutting down");
    }
}

/// Control handle for a spawned [`RefreshWorker`].
pub struct RefreshHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stops accepting jobs and waits until every queued and running job has
    /// published its outcome.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(err) = self.task.await {
            tracing::error!(error = %err, "Refresh worker failed");
        }
    }
}

async fn run_job(request: RefreshRequest, events: broadcast::Sender<RefreshEvent>) {
    let RefreshRequest {
        collection,
        owner_key,
        job,
    } = request;

    let outcome = match job.await {
        Ok(fetched) => {
            tracing::debug!(
                collection = %collection,
                owner_key = %owner_key,
                fetched,
                "Background refresh completed"
            );
            RefreshOutcome::Completed { fetched }
        }
        Err(err) => {
            tracing::warn!(
                collection = %collection,
                owner_key = %owner_key,
                error = %err,
                "Background refresh failed"
            );
            RefreshOutcome::Failed {
                message: err.message().to_string(),
            }
        }
    };

    // No subscribers is fine.
    let _ = events.send(RefreshEvent {
        collection,
        owner_key,
        outcome,
    });
}

fn log_join(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        tracing::error!(error = %err, "Background refresh task failed");
    }
}
