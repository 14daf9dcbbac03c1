use std::fs;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;
use zospend_core::{CoreError, RecordStore, StorageError};
use zospend_domain::{Category, ExpenseDraft, ExpenseId};
use zospend_storage_json::{load_records, JsonRecordStore, CURRENT_SCHEMA_VERSION};

fn draft(title: &str, amount: i64) -> ExpenseDraft {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 20, 11, 15, 0).unwrap();
    ExpenseDraft::new(title, amount, Category::Utility, created_at).with_receipt("receipts/42.jpg")
}

#[test]
fn records_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let id = {
        let store = JsonRecordStore::open_in_dir(dir.path()).expect("open store");
        store.insert(draft("Water bill", 64_000)).expect("insert")
    };

    let reopened = JsonRecordStore::open_in_dir(dir.path()).expect("reopen store");
    let fetched = reopened.fetch_by_id(id).unwrap().expect("record persisted");
    assert_eq!(fetched.title, "Water bill");
    assert_eq!(fetched.receipt_ref.as_deref(), Some("receipts/42.jpg"));
    assert_eq!(reopened.snapshot().len(), 1);
}

#[test]
fn mutations_rewrite_the_document_and_keep_a_backup() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::open_in_dir(dir.path()).expect("open store");
    let id = store.insert(draft("Internet", 99_900)).unwrap();
    store.insert(draft("Sample", 10_000).synthetic()).unwrap();
    assert!(store.backup_path().exists());

    assert_eq!(store.clear_synthetic().unwrap(), 1);
    store.update(id, draft("Internet (annual)", 999_000)).unwrap();

    let on_disk = load_records(store.path()).expect("load document");
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].title, "Internet (annual)");
    assert_eq!(on_disk[0].amount_minor, 999_000);
}

#[test]
fn missing_ids_are_not_found() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::open_in_dir(dir.path()).expect("open store");
    let err = store.update(ExpenseId::new(), draft("Ghost", 1)).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
    assert!(matches!(store.delete(ExpenseId::new()), Err(CoreError::NotFound(_))));
    assert!(!store.path().exists(), "failed mutations must not write");
}

#[test]
fn stream_reports_persisted_snapshots() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::open_in_dir(dir.path()).expect("open store");
    let mut stream = store.stream_all();
    store.insert(draft("Gas", 45_000)).unwrap();
    let first = stream.try_recv().expect("initial snapshot");
    let second = stream.try_recv().expect("after insert");
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
    assert!(second.version() > first.version());
}

#[test]
fn rejects_future_schema_versions() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.json");
    let document = format!(
        "{{\"schema_version\": {}, \"expenses\": []}}",
        CURRENT_SCHEMA_VERSION + 1
    );
    fs::write(&path, document).unwrap();
    let err = JsonRecordStore::open(path).unwrap_err();
    match err {
        CoreError::Storage(StorageError::Unavailable(message)) => {
            assert!(message.contains("newer"), "unexpected error: {message}");
        }
        other => panic!("expected storage error, got {other:?}"),
    }
}

#[test]
fn corrupt_documents_surface_serialization_errors() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.json");
    fs::write(&path, "{ not json").unwrap();
    let err = JsonRecordStore::open(path).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Storage(StorageError::Serialization(_))
    ));
}

#[test]
fn failed_writes_leave_memory_and_subscribers_untouched() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("ledger");
    fs::write(&blocker, "not a directory").unwrap();

    let store = JsonRecordStore::open(blocker.join("expenses.json")).expect("open store");
    let mut stream = store.stream_all();
    let initial = stream.try_recv().expect("initial snapshot");

    let err = store.insert(draft("Electricity", 210_000)).unwrap_err();
    assert!(matches!(err, CoreError::Storage(StorageError::Io(_))));

    let current = store.snapshot();
    assert_eq!(current.version(), initial.version());
    assert!(current.is_empty());
    assert!(stream.try_recv().is_none(), "nothing is published for a failed write");
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}
