//! Snapshot distribution: one source of truth fanned out to every subscriber.
//!
//! Each publication replaces the current [`LedgerSnapshot`] and is delivered,
//! in the same order, to every live [`SnapshotStream`]. Queues are unbounded
//! per subscriber so a slow consumer falls behind instead of skipping versions.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};
use zospend_domain::{Expense, ExpenseId};

use crate::summary_service::SummaryService;

/// Immutable view of every record at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    version: u64,
    records: Vec<Expense>,
}

impl LedgerSnapshot {
    pub fn new(version: u64, records: Vec<Expense>) -> Self {
        Self { version, records }
    }

    /// Monotonic publication counter; the initial empty snapshot is version 0.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Records in store order; callers sort explicitly when order matters.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Records ordered by creation time, newest first.
    pub fn sorted_desc(&self) -> Vec<Expense> {
        SummaryService::sorted_desc(self.records.clone())
    }
}

/// Receiving end of a snapshot subscription.
#[derive(Debug)]
pub struct SnapshotStream {
    receiver: UnboundedReceiver<Arc<LedgerSnapshot>>,
}

impl SnapshotStream {
    /// Waits for the next snapshot; `None` once the publisher is gone.
    pub async fn recv(&mut self) -> Option<Arc<LedgerSnapshot>> {
        self.receiver.recv().await
    }

    /// Returns the next queued snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Arc<LedgerSnapshot>> {
        self.receiver.try_recv().ok()
    }

    /// Blocks the current thread until the next snapshot arrives.
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_recv(&mut self) -> Option<Arc<LedgerSnapshot>> {
        self.receiver.blocking_recv()
    }
}

/// Owns the current snapshot and the subscriber list.
#[derive(Debug)]
pub struct SnapshotHub {
    current: RwLock<Arc<LedgerSnapshot>>,
    subscribers: Mutex<Vec<UnboundedSender<Arc<LedgerSnapshot>>>>,
}

impl SnapshotHub {
    pub fn new(records: Vec<Expense>) -> Self {
        Self {
            current: RwLock::new(Arc::new(LedgerSnapshot::new(0, records))),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// The latest published snapshot. Never waits on subscribers.
    pub fn current(&self) -> Arc<LedgerSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Opens a subscription whose first item is the current snapshot.
    pub fn subscribe(&self) -> SnapshotStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Holding the subscriber lock keeps publishers out, so nothing can be
        // published between the initial send and registration.
        let _ = sender.send(self.current());
        subscribers.push(sender);
        trace!(subscribers = subscribers.len(), "snapshot subscriber added");
        SnapshotStream { receiver }
    }

    /// Replaces the current snapshot and delivers it to every subscriber.
    pub fn publish(&self, records: Vec<Expense>) -> Arc<LedgerSnapshot> {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let snapshot = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(LedgerSnapshot::new(current.version + 1, records));
            *current = next.clone();
            next
        };
        let before = subscribers.len();
        subscribers.retain(|sender| sender.send(snapshot.clone()).is_ok());
        if subscribers.len() != before {
            trace!(
                pruned = before - subscribers.len(),
                "dropped closed snapshot subscribers"
            );
        }
        debug!(
            version = snapshot.version,
            records = snapshot.len(),
            subscribers = subscribers.len(),
            "published ledger snapshot"
        );
        snapshot
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for SnapshotHub {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
