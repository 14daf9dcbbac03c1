use std::sync::{Arc, Mutex, PoisonError};

use zospend_domain::{Expense, ExpenseDraft, ExpenseId};

use crate::{
    snapshot::{LedgerSnapshot, SnapshotHub, SnapshotStream},
    CoreError,
};

/// Contract for durable or in-memory holders of expense records.
///
/// Every successful mutation publishes a new snapshot to [`RecordStore::stream_all`]
/// subscribers. Implementations serialise all mutations behind one lock and run
/// the `check` of [`RecordStore::insert_checked`] and [`RecordStore::update_checked`]
/// under that same lock, against the committed records, so a check-then-write
/// is atomic with respect to every other writer of the store.
pub trait RecordStore: Send + Sync {
    /// Persists `draft` under a fresh identifier if `check` accepts the
    /// current records; a rejection is returned unchanged and nothing is written.
    fn insert_checked(
        &self,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<ExpenseId, CoreError>;
    /// Replaces the record `id` if `check` accepts the current records; fails
    /// with [`CoreError::NotFound`] when absent.
    fn update_checked(
        &self,
        id: ExpenseId,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<(), CoreError>;
    fn fetch_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError>;
    fn delete(&self, id: ExpenseId) -> Result<(), CoreError>;
    /// Removes every synthetic record, returning how many were removed.
    fn clear_synthetic(&self) -> Result<usize, CoreError>;
    /// The latest published snapshot.
    fn snapshot(&self) -> Arc<LedgerSnapshot>;
    /// Live feed of full snapshots, starting with the current one.
    fn stream_all(&self) -> SnapshotStream;

    /// Unconditional insert.
    fn insert(&self, draft: ExpenseDraft) -> Result<ExpenseId, CoreError> {
        self.insert_checked(draft, &accept_all)
    }

    /// Unconditional update.
    fn update(&self, id: ExpenseId, draft: ExpenseDraft) -> Result<(), CoreError> {
        self.update_checked(id, draft, &accept_all)
    }
}

fn accept_all(_: &[Expense]) -> Result<(), CoreError> {
    Ok(())
}

/// Applies store mutations to a record list. Shared by store backends so
/// each only decides how (and whether) to persist the result.
pub struct RecordSet;

impl RecordSet {
    pub fn inserted(records: &[Expense], id: ExpenseId, draft: ExpenseDraft) -> Vec<Expense> {
        let mut next = records.to_vec();
        next.push(Expense::from_draft(id, draft));
        next
    }

    pub fn updated(
        records: &[Expense],
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Vec<Expense>, CoreError> {
        let mut next = records.to_vec();
        let record = next
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(CoreError::NotFound(id))?;
        record.apply(draft);
        Ok(next)
    }

    pub fn deleted(records: &[Expense], id: ExpenseId) -> Result<Vec<Expense>, CoreError> {
        if !records.iter().any(|record| record.id == id) {
            return Err(CoreError::NotFound(id));
        }
        Ok(records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect())
    }

    pub fn without_synthetic(records: &[Expense]) -> (Vec<Expense>, usize) {
        let kept: Vec<Expense> = records
            .iter()
            .filter(|record| !record.is_synthetic)
            .cloned()
            .collect();
        let removed = records.len() - kept.len();
        (kept, removed)
    }
}

/// Volatile record store, used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<Expense>>,
    hub: SnapshotHub,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Expense>) -> Self {
        Self {
            hub: SnapshotHub::new(records.clone()),
            records: Mutex::new(records),
        }
    }

    fn commit(&self, guard: &mut Vec<Expense>, next: Vec<Expense>) {
        *guard = next;
        self.hub.publish(guard.clone());
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert_checked(
        &self,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<ExpenseId, CoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        check(&records)?;
        let id = ExpenseId::new();
        let next = RecordSet::inserted(&records, id, draft);
        self.commit(&mut records, next);
        Ok(id)
    }

    fn update_checked(
        &self,
        id: ExpenseId,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<(), CoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        check(&records)?;
        let next = RecordSet::updated(&records, id, draft)?;
        self.commit(&mut records, next);
        Ok(())
    }

    fn fetch_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        Ok(self.hub.current().get(id).cloned())
    }

    fn delete(&self, id: ExpenseId) -> Result<(), CoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let next = RecordSet::deleted(&records, id)?;
        self.commit(&mut records, next);
        Ok(())
    }

    fn clear_synthetic(&self) -> Result<usize, CoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, removed) = RecordSet::without_synthetic(&records);
        if removed > 0 {
            self.commit(&mut records, next);
        }
        Ok(removed)
    }

    fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.hub.current()
    }

    fn stream_all(&self) -> SnapshotStream {
        self.hub.subscribe()
    }
}
