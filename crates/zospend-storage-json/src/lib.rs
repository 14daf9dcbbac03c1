//! zospend-storage-json
//!
//! File-backed [`RecordStore`] keeping the whole ledger in one JSON document.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use zospend_core::{
    CoreError, LedgerSnapshot, RecordSet, RecordStore, SnapshotHub, SnapshotStream, StorageError,
};
use zospend_domain::{Expense, ExpenseDraft, ExpenseId};

/// Current on-disk document version.
pub const CURRENT_SCHEMA_VERSION: u8 = 1;
const LEDGER_FILE_NAME: &str = "expenses.json";
const TMP_SUFFIX: &str = "tmp";
const BACKUP_SUFFIX: &str = "bak";

#[derive(Debug, Serialize, Deserialize)]
struct LedgerDocument {
    schema_version: u8,
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Record store persisting every mutation atomically before publishing it.
///
/// The previous document is kept next to the ledger with a `.bak` suffix.
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    records: Mutex<Vec<Expense>>,
    hub: SnapshotHub,
}

impl JsonRecordStore {
    /// Opens (or creates) `expenses.json` inside `dir`.
    pub fn open_in_dir(dir: &Path) -> Result<Self, CoreError> {
        fs::create_dir_all(dir)?;
        Self::open(dir.join(LEDGER_FILE_NAME))
    }

    /// Opens the ledger document at `path`; a missing file starts empty.
    pub fn open(path: PathBuf) -> Result<Self, CoreError> {
        let records = if path.exists() {
            load_records(&path)?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), records = records.len(), "opened json expense ledger");
        Ok(Self {
            path,
            hub: SnapshotHub::new(records.clone()),
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        suffixed_path(&self.path, BACKUP_SUFFIX)
    }

    /// Persists `next`, then swaps it in and publishes. Memory and subscribers
    /// are left untouched when the write fails.
    fn commit(&self, guard: &mut Vec<Expense>, next: Vec<Expense>) -> Result<(), CoreError> {
        if let Err(err) = self.persist(&next) {
            error!(path = %self.path.display(), error = %err, "failed to persist expense ledger");
            return Err(err);
        }
        *guard = next;
        self.hub.publish(guard.clone());
        Ok(())
    }

    fn persist(&self, records: &[Expense]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        if self.path.exists() {
            fs::copy(&self.path, self.backup_path())?;
        }
        let document = LedgerDocument {
            schema_version: CURRENT_SCHEMA_VERSION,
            expenses: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let tmp = suffixed_path(&self.path, TMP_SUFFIX);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, Vec<Expense>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for JsonRecordStore {
    fn insert_checked(
        &self,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<ExpenseId, CoreError> {
        let mut records = self.lock_records();
        check(&records)?;
        let id = ExpenseId::new();
        let next = RecordSet::inserted(&records, id, draft);
        self.commit(&mut records, next)?;
        Ok(id)
    }

    fn update_checked(
        &self,
        id: ExpenseId,
        draft: ExpenseDraft,
        check: &dyn Fn(&[Expense]) -> Result<(), CoreError>,
    ) -> Result<(), CoreError> {
        let mut records = self.lock_records();
        check(&records)?;
        let next = RecordSet::updated(&records, id, draft)?;
        self.commit(&mut records, next)
    }

    fn fetch_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        Ok(self.hub.current().get(id).cloned())
    }

    fn delete(&self, id: ExpenseId) -> Result<(), CoreError> {
        let mut records = self.lock_records();
        let next = RecordSet::deleted(&records, id)?;
        self.commit(&mut records, next)
    }

    fn clear_synthetic(&self) -> Result<usize, CoreError> {
        let mut records = self.lock_records();
        let (next, removed) = RecordSet::without_synthetic(&records);
        if removed > 0 {
            self.commit(&mut records, next)?;
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

/// Reads the records stored in a ledger document.
pub fn load_records(path: &Path) -> Result<Vec<Expense>, CoreError> {
    let data = fs::read_to_string(path)?;
    let document: LedgerDocument = serde_json::from_str(&data)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    if document.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(StorageError::Unavailable(format!(
            "ledger schema v{} is newer than supported v{}",
            document.schema_version, CURRENT_SCHEMA_VERSION
        ))
        .into());
    }
    Ok(document.expenses)
}

fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let mut target = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    target.set_extension(ext);
    target
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
