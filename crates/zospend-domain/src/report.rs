//! Derived, never-persisted shapes produced by the aggregation engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::Category, expense::Expense};

/// Adds minor-unit amounts, clamping at the `i64` range instead of wrapping.
pub fn sum_minor(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts
        .into_iter()
        .fold(0_i64, |total, amount| total.saturating_add(amount))
}

/// Total spent on one local calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_minor: i64,
}

impl DailyTotal {
    pub fn new(date: NaiveDate, total_minor: i64) -> Self {
        Self { date, total_minor }
    }
}

/// Rolling report over consecutive calendar days ending at a reference date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportWindow {
    /// One entry per day, oldest first.
    pub daily_totals: Vec<DailyTotal>,
    /// Only categories with activity inside the window appear.
    pub category_totals: BTreeMap<Category, i64>,
    pub window_total: i64,
}

impl ReportWindow {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.daily_totals.first().map(|day| day.date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.daily_totals.last().map(|day| day.date)
    }

    /// Per-day totals as chart values, oldest first.
    pub fn daily_series(&self) -> Vec<Option<f64>> {
        self.daily_totals
            .iter()
            .map(|day| Some(day.total_minor as f64))
            .collect()
    }
}

/// Key of a bucket in the grouped expense list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Category(Category),
    /// Single bucket used when grouping is disabled.
    Ungrouped,
}

/// A labelled run of expenses in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseBucket {
    pub key: BucketKey,
    pub expenses: Vec<Expense>,
}

impl ExpenseBucket {
    pub fn total_minor(&self) -> i64 {
        sum_minor(self.expenses.iter().map(|expense| expense.amount_minor))
    }
}
