//! Aggregations over an immutable set of expense records.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use zospend_domain::{
    sum_minor, BucketKey, Category, DailyTotal, Expense, ExpenseBucket, ReportWindow,
};

use crate::time::{local_day, window_dates};

/// Length of the rolling report, in calendar days.
pub const REPORT_WINDOW_DAYS: u32 = 7;

/// How the expense list is bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// One bucket per category with activity, in [`Category::ALL`] order.
    #[default]
    ByCategory,
    /// A single bucket holding every record, newest first.
    Ungrouped,
}

impl Grouping {
    pub fn from_flag(group_by_category: bool) -> Self {
        if group_by_category {
            Grouping::ByCategory
        } else {
            Grouping::Ungrouped
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Grouping::ByCategory => Grouping::Ungrouped,
            Grouping::Ungrouped => Grouping::ByCategory,
        }
    }
}

/// Day, window, and category aggregations. Every function is pure.
pub struct SummaryService;

impl SummaryService {
    /// Records whose local calendar day is `date`, newest first.
    pub fn records_on<Z: TimeZone>(records: &[Expense], date: NaiveDate, zone: &Z) -> Vec<Expense> {
        let matching = records
            .iter()
            .filter(|record| local_day(record.created_at, zone) == date)
            .cloned()
            .collect();
        Self::sorted_desc(matching)
    }

    /// Sum of amounts recorded on `date`; zero when nothing was recorded.
    pub fn total_on<Z: TimeZone>(records: &[Expense], date: NaiveDate, zone: &Z) -> i64 {
        sum_minor(
            records
                .iter()
                .filter(|record| local_day(record.created_at, zone) == date)
                .map(|record| record.amount_minor),
        )
    }

    /// Rolling report over the `days` calendar days ending on `now`'s local date.
    ///
    /// Every day in the window is present (zero-filled), oldest first; only
    /// categories with activity appear in `category_totals`.
    pub fn window_report<Z: TimeZone>(
        records: &[Expense],
        days: u32,
        now: DateTime<Utc>,
        zone: &Z,
    ) -> ReportWindow {
        let end = local_day(now, zone);
        let mut per_day: BTreeMap<NaiveDate, i64> = window_dates(end, days)
            .into_iter()
            .map(|date| (date, 0))
            .collect();
        let mut category_totals: BTreeMap<Category, i64> = BTreeMap::new();

        for record in records {
            let day = local_day(record.created_at, zone);
            if let Some(total) = per_day.get_mut(&day) {
                *total = total.saturating_add(record.amount_minor);
                let category_total = category_totals.entry(record.category).or_insert(0);
                *category_total = category_total.saturating_add(record.amount_minor);
            }
        }

        let daily_totals: Vec<DailyTotal> = per_day
            .into_iter()
            .map(|(date, total)| DailyTotal::new(date, total))
            .collect();
        let window_total = sum_minor(daily_totals.iter().map(|day| day.total_minor));
        ReportWindow {
            daily_totals,
            category_totals,
            window_total,
        }
    }

    /// Buckets `records` for the list view.
    ///
    /// Category buckets follow [`Category::ALL`] order and omit categories
    /// without records; records inside each bucket are newest first. An empty
    /// input yields no buckets in either mode.
    pub fn group_by_category(records: &[Expense], grouping: Grouping) -> Vec<ExpenseBucket> {
        if records.is_empty() {
            return Vec::new();
        }
        match grouping {
            Grouping::Ungrouped => vec![ExpenseBucket {
                key: BucketKey::Ungrouped,
                expenses: Self::sorted_desc(records.to_vec()),
            }],
            Grouping::ByCategory => {
                let mut buckets: BTreeMap<Category, Vec<Expense>> = BTreeMap::new();
                for record in records {
                    buckets
                        .entry(record.category)
                        .or_default()
                        .push(record.clone());
                }
                buckets
                    .into_iter()
                    .map(|(category, expenses)| ExpenseBucket {
                        key: BucketKey::Category(category),
                        expenses: Self::sorted_desc(expenses),
                    })
                    .collect()
            }
        }
    }

    /// Orders records newest first, breaking ties by id for determinism.
    pub fn sorted_desc(mut records: Vec<Expense>) -> Vec<Expense> {
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }
}
