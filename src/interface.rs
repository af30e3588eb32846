//! Single-writer ingestion queue.
//!
//! A [`ClassificationStore`](crate::store::ClassificationStore) must not be
//! mutated from more than one thread. Hosts with several producers start an
//! [`IngestQueue`]: one worker thread owns the dataset and its store, and all
//! inserts and lookups reach it as commands over a channel. Commands are
//! processed in the order they were sent, so triple order on the channel is
//! the order the ruleset sees.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use oxrdf::{Term, Triple};
use tracing::{debug, info, warn};

use crate::classification::Classifications;
use crate::dataset::Dataset;
use crate::error::{MetastateError, Result};
use crate::ruleset::Ruleset;
use crate::store::{MetaBase, Namespace, Snapshot};
use crate::term::TermSet;

/// Cancellation token shared with the worker thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);
impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::SeqCst); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

enum Command {
    Insert(Triple),
    Classifiers { namespace: Namespace, resource: Term, reply: Sender<TermSet> },
    Snapshot { reply: Sender<Snapshot> },
}

/// Handle to a running ingestion worker.
pub struct IngestQueue {
    commands: Option<Sender<Command>>,
    cancel: CancelToken,
    started: Instant,
    join: Option<JoinHandle<Snapshot>>,
}

impl IngestQueue {
    /// Starts a worker that owns a fresh dataset classified by `ruleset`.
    pub fn start(ruleset: Arc<dyn Ruleset + Send + Sync>) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let cancel_for_thread = cancel.clone();
        let join = std::thread::spawn(move || work(ruleset.as_ref(), rx, cancel_for_thread));
        Self { commands: Some(tx), cancel, started: Instant::now(), join: Some(join) }
    }

    /// Queues a triple for ingestion.
    pub fn insert(&self, triple: Triple) -> Result<()> {
        self.send(Command::Insert(triple))
    }

    /// Classifiers of `resource` once every previously queued triple has
    /// been processed.
    pub fn classifiers(&self, namespace: Namespace, resource: Term) -> Result<TermSet> {
        let (reply, answer) = mpsc::channel();
        self.send(Command::Classifiers { namespace, resource, reply })?;
        answer.recv().map_err(|_| MetastateError::QueueClosed)
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let (reply, answer) = mpsc::channel();
        self.send(Command::Snapshot { reply })?;
        answer.recv().map_err(|_| MetastateError::QueueClosed)
    }

    /// Request cancellation (cooperative). Commands still queued are dropped.
    pub fn cancel(&self) { self.cancel.cancel(); }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Duration { self.started.elapsed() }

    /// Stops accepting commands, waits for the queued ones and returns the
    /// final state of the store.
    pub fn close(mut self) -> Result<Snapshot> {
        self.commands.take();
        let join = self.join.take().ok_or(MetastateError::QueueClosed)?;
        let snapshot = join.join().map_err(|_| MetastateError::QueueClosed)?;
        info!(elapsed_ms = self.elapsed().as_millis() as u64, "ingestion queue closed");
        Ok(snapshot)
    }

    fn send(&self, command: Command) -> Result<()> {
        let commands = self.commands.as_ref().ok_or(MetastateError::QueueClosed)?;
        commands.send(command).map_err(|_| MetastateError::QueueClosed)
    }
}

impl Drop for IngestQueue {
    fn drop(&mut self) {
        self.commands.take();
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("ingestion worker panicked");
            }
        }
    }
}

fn work(ruleset: &dyn Ruleset, commands: Receiver<Command>, cancel: CancelToken) -> Snapshot {
    let mut dataset = Dataset::new(ruleset);
    let mut received = 0usize;
    for command in commands {
        if cancel.is_cancelled() {
            warn!(received, "ingestion cancelled");
            break;
        }
        match command {
            Command::Insert(triple) => {
                received += 1;
                if !dataset.insert(&triple) {
                    debug!(%triple, "duplicate triple skipped");
                }
            }
            Command::Classifiers { namespace, resource, reply } => {
                let classifiers = dataset.store().namespace(namespace).get_all(&resource).clone();
                // the caller may have given up waiting
                let _ = reply.send(classifiers);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(dataset.store().snapshot());
            }
        }
    }
    info!(received, triples = dataset.len(), "ingestion worker finished");
    dataset.store().snapshot()
}
