//! Write path and live projections over a [`RecordStore`].
//!
//! Every mutation goes through [`ExpenseLedger`]. The duplicate check runs
//! inside the store's own write lock, so two near-identical submissions can
//! never both pass against a stale snapshot, even from ledgers that share one
//! store.

pub mod views;

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use tracing::{error, info, warn};
use zospend_core::{
    local_today, normalize_draft, ChartAxis, ChartService, Clock, CoreError, DuplicateService,
    ExpenseForm, Grouping, LedgerSnapshot, RecordStore, SummaryService, SystemClock,
    REPORT_WINDOW_DAYS,
};
use zospend_domain::{Expense, ExpenseDraft, ExpenseId, ReportWindow};

pub use views::{ExpenseListView, ListState, ReportState, ReportView, TodaySummary, TodayView};

/// One logical ledger: a record store, the zone used for calendar days and
/// the clock that stamps new entries.
pub struct ExpenseLedger<S, Z = Local>
where
    S: RecordStore,
    Z: TimeZone,
{
    store: Arc<S>,
    zone: Z,
    clock: Arc<dyn Clock>,
}

impl<S: RecordStore> ExpenseLedger<S, Local> {
    /// Ledger in the system's configured zone, stamped by the wall clock.
    pub fn local(store: Arc<S>) -> Self {
        Self::new(store, Local, Arc::new(SystemClock))
    }
}

impl<S, Z> ExpenseLedger<S, Z>
where
    S: RecordStore,
    Z: TimeZone,
{
    pub fn new(store: Arc<S>, zone: Z, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            zone,
            clock,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn zone(&self) -> &Z {
        &self.zone
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        local_today(self.clock.as_ref(), &self.zone)
    }

    /// Validates the form, stamps it with the current instant and submits it.
    pub fn submit_form(&self, form: ExpenseForm) -> Result<ExpenseId, CoreError> {
        let draft = form.into_draft(self.clock.now())?;
        self.submit(draft)
    }

    /// Inserts `draft` unless it duplicates an existing record.
    pub fn submit(&self, draft: ExpenseDraft) -> Result<ExpenseId, CoreError> {
        let draft = normalize_draft(draft)?;
        let candidate = draft.clone();
        let check = |records: &[Expense]| reject_duplicate(&candidate, records, None, &self.zone);
        match self.store.insert_checked(draft, &check) {
            Ok(id) => {
                info!(
                    %id,
                    title = %candidate.title,
                    category = %candidate.category,
                    amount_minor = candidate.amount_minor,
                    "expense recorded"
                );
                Ok(id)
            }
            Err(err) => Err(log_store_failure("insert", err)),
        }
    }

    /// Replaces the record `id` with `draft`; the record itself is excluded
    /// from the duplicate check.
    pub fn update(&self, id: ExpenseId, draft: ExpenseDraft) -> Result<(), CoreError> {
        let draft = normalize_draft(draft)?;
        let candidate = draft.clone();
        let check = |records: &[Expense]| {
            if !records.iter().any(|record| record.id == id) {
                return Err(CoreError::NotFound(id));
            }
            reject_duplicate(&candidate, records, Some(id), &self.zone)
        };
        self.store
            .update_checked(id, draft, &check)
            .map(|()| info!(%id, category = %candidate.category, "expense updated"))
            .map_err(|err| log_store_failure("update", err))
    }

    pub fn delete(&self, id: ExpenseId) -> Result<(), CoreError> {
        self.store
            .delete(id)
            .map(|()| info!(%id, "expense deleted"))
            .map_err(|err| log_store_failure("delete", err))
    }

    /// Removes every generated sample record, keeping user entries.
    pub fn clear_synthetic(&self) -> Result<usize, CoreError> {
        let removed = self
            .store
            .clear_synthetic()
            .map_err(|err| log_store_failure("clear_synthetic", err))?;
        info!(removed, "cleared sample expenses");
        Ok(removed)
    }

    pub fn fetch(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        self.store.fetch_by_id(id)
    }

    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.store.snapshot()
    }

    /// Every record, newest first.
    pub fn all_desc(&self) -> Vec<Expense> {
        self.store.snapshot().sorted_desc()
    }

    pub fn records_on(&self, date: NaiveDate) -> Vec<Expense> {
        SummaryService::records_on(self.store.snapshot().records(), date, &self.zone)
    }

    pub fn total_on(&self, date: NaiveDate) -> i64 {
        SummaryService::total_on(self.store.snapshot().records(), date, &self.zone)
    }

    /// One-shot report over the default window ending today.
    pub fn report(&self) -> ReportWindow {
        self.report_for(REPORT_WINDOW_DAYS)
    }

    pub fn report_for(&self, days: u32) -> ReportWindow {
        SummaryService::window_report(
            self.store.snapshot().records(),
            days,
            self.clock.now(),
            &self.zone,
        )
    }

    /// Axis for an arbitrary chart series.
    pub fn axis(series: &[Option<f64>]) -> ChartAxis {
        ChartService::compute_axis(series)
    }

    pub fn today_view(&self) -> TodayView<Z> {
        TodayView::new(
            self.store.stream_all(),
            self.zone.clone(),
            Arc::clone(&self.clock),
        )
    }

    pub fn list_view(&self, grouping: Grouping) -> ExpenseListView<Z> {
        ExpenseListView::new(
            self.store.stream_all(),
            self.zone.clone(),
            self.today(),
            grouping,
        )
    }

    pub fn report_view(&self, days: u32) -> ReportView<Z> {
        ReportView::new(
            self.store.stream_all(),
            self.zone.clone(),
            Arc::clone(&self.clock),
            days,
        )
    }
}

/// Runs under the store's write lock.
fn reject_duplicate<Z: TimeZone>(
    candidate: &ExpenseDraft,
    records: &[Expense],
    exclude: Option<ExpenseId>,
    zone: &Z,
) -> Result<(), CoreError> {
    match DuplicateService::find_duplicate(candidate, records, exclude, zone) {
        Some(existing) => {
            warn!(title = %candidate.title, existing = %existing.id, "rejected duplicate expense");
            Err(CoreError::DuplicateRecord {
                title: candidate.title.clone(),
            })
        }
        None => Ok(()),
    }
}

fn log_store_failure(operation: &'static str, err: CoreError) -> CoreError {
    match &err {
        CoreError::Storage(cause) => error!(operation, error = %cause, "record store failed"),
        CoreError::DuplicateRecord { .. } => {}
        other => warn!(operation, error = %other, "ledger operation rejected"),
    }
    err
}
