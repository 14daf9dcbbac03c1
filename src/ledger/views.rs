//! Live projections. Each view owns its own subscription and derives its state
//! from whole snapshots; none of them ever mutates what it receives.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone};
use zospend_core::{
    local_today, ChartAxis, ChartService, Clock, Grouping, LedgerSnapshot, SnapshotStream,
    SummaryService,
};
use zospend_domain::{sum_minor, Expense, ExpenseBucket, ReportWindow};

/// Today's records and their total.
#[derive(Debug, Clone, PartialEq)]
pub struct TodaySummary {
    pub version: u64,
    pub date: NaiveDate,
    pub records: Vec<Expense>,
    pub total_minor: i64,
}

impl TodaySummary {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

pub struct TodayView<Z: TimeZone> {
    stream: SnapshotStream,
    zone: Z,
    clock: Arc<dyn Clock>,
}

impl<Z: TimeZone> TodayView<Z> {
    pub(crate) fn new(stream: SnapshotStream, zone: Z, clock: Arc<dyn Clock>) -> Self {
        Self {
            stream,
            zone,
            clock,
        }
    }

    /// Waits for the next snapshot. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<TodaySummary> {
        let snapshot = self.stream.recv().await?;
        Some(self.project(&snapshot))
    }

    pub fn try_recv(&mut self) -> Option<TodaySummary> {
        let snapshot = self.stream.try_recv()?;
        Some(self.project(&snapshot))
    }

    /// "Today" is re-read from the clock on every projection.
    pub fn project(&self, snapshot: &LedgerSnapshot) -> TodaySummary {
        let date = local_today(self.clock.as_ref(), &self.zone);
        let records = SummaryService::records_on(snapshot.records(), date, &self.zone);
        let total_minor = sum_minor(records.iter().map(|record| record.amount_minor));
        TodaySummary {
            version: snapshot.version(),
            date,
            records,
            total_minor,
        }
    }
}

/// State of the day list: the selected date's records, bucketed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub version: u64,
    pub date: NaiveDate,
    pub grouping: Grouping,
    pub buckets: Vec<ExpenseBucket>,
    pub total_minor: i64,
    pub count: usize,
}

/// Day list with date navigation and a grouping toggle.
///
/// Navigation re-projects the last received snapshot, so callers get a fresh
/// [`ListState`] without waiting for the store to change.
pub struct ExpenseListView<Z: TimeZone> {
    stream: SnapshotStream,
    zone: Z,
    date: NaiveDate,
    grouping: Grouping,
    latest: Option<Arc<LedgerSnapshot>>,
}

impl<Z: TimeZone> ExpenseListView<Z> {
    pub(crate) fn new(stream: SnapshotStream, zone: Z, date: NaiveDate, grouping: Grouping) -> Self {
        Self {
            stream,
            zone,
            date,
            grouping,
            latest: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    pub async fn recv(&mut self) -> Option<ListState> {
        let snapshot = self.stream.recv().await?;
        Some(self.accept(snapshot))
    }

    pub fn try_recv(&mut self) -> Option<ListState> {
        let snapshot = self.stream.try_recv()?;
        Some(self.accept(snapshot))
    }

    /// Projection of the last snapshot seen, if any has arrived.
    pub fn state(&self) -> Option<ListState> {
        self.latest
            .as_deref()
            .map(|snapshot| self.project(snapshot))
    }

    pub fn previous_day(&mut self) -> Option<ListState> {
        if let Some(date) = self.date.pred_opt() {
            self.date = date;
        }
        self.state()
    }

    pub fn next_day(&mut self) -> Option<ListState> {
        if let Some(date) = self.date.succ_opt() {
            self.date = date;
        }
        self.state()
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Option<ListState> {
        self.date = date;
        self.state()
    }

    pub fn toggle_grouping(&mut self) -> Option<ListState> {
        self.grouping = self.grouping.toggled();
        self.state()
    }

    pub fn set_grouping(&mut self, grouping: Grouping) -> Option<ListState> {
        self.grouping = grouping;
        self.state()
    }

    fn accept(&mut self, snapshot: Arc<LedgerSnapshot>) -> ListState {
        let state = self.project(&snapshot);
        self.latest = Some(snapshot);
        state
    }

    fn project(&self, snapshot: &LedgerSnapshot) -> ListState {
        let records = SummaryService::records_on(snapshot.records(), self.date, &self.zone);
        let total_minor = sum_minor(records.iter().map(|record| record.amount_minor));
        ListState {
            version: snapshot.version(),
            date: self.date,
            grouping: self.grouping,
            count: records.len(),
            buckets: SummaryService::group_by_category(&records, self.grouping),
            total_minor,
        }
    }
}

/// Rolling report with the axis that fits its daily series.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportState {
    pub version: u64,
    pub window: ReportWindow,
    pub axis: ChartAxis,
}

pub struct ReportView<Z: TimeZone> {
    stream: SnapshotStream,
    zone: Z,
    clock: Arc<dyn Clock>,
    days: u32,
}

impl<Z: TimeZone> ReportView<Z> {
    pub(crate) fn new(stream: SnapshotStream, zone: Z, clock: Arc<dyn Clock>, days: u32) -> Self {
        Self {
            stream,
            zone,
            clock,
            days,
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub async fn recv(&mut self) -> Option<ReportState> {
        let snapshot = self.stream.recv().await?;
        Some(self.project(&snapshot))
    }

    pub fn try_recv(&mut self) -> Option<ReportState> {
        let snapshot = self.stream.try_recv()?;
        Some(self.project(&snapshot))
    }

    pub fn project(&self, snapshot: &LedgerSnapshot) -> ReportState {
        let window =
            SummaryService::window_report(snapshot.records(), self.days, self.clock.now(), &self.zone);
        let axis = ChartService::compute_axis(&window.daily_series());
        ReportState {
            version: snapshot.version(),
            window,
            axis,
        }
    }
}
