//! Near-duplicate detection for the write path.

use chrono::{Duration, TimeZone};
use zospend_domain::{Amounted, Expense, ExpenseId, NamedEntity, Timestamped};

use crate::time::local_day;

/// Two entries closer than this (inclusive) may be duplicates.
pub const DUPLICATE_WINDOW_MINUTES: i64 = 5;

/// The duplicate window as a duration.
pub fn duplicate_window() -> Duration {
    Duration::minutes(DUPLICATE_WINDOW_MINUTES)
}

/// Pure predicates deciding whether a candidate repeats an existing expense.
pub struct DuplicateService;

impl DuplicateService {
    /// Returns `true` when any record in `existing` duplicates `candidate`.
    pub fn is_duplicate<C, Z>(candidate: &C, existing: &[Expense], zone: &Z) -> bool
    where
        C: NamedEntity + Amounted + Timestamped,
        Z: TimeZone,
    {
        Self::find_duplicate(candidate, existing, None, zone).is_some()
    }

    /// Finds the first record duplicating `candidate`, skipping `exclude`
    /// (the record being edited is never a duplicate of itself).
    pub fn find_duplicate<'a, C, Z>(
        candidate: &C,
        existing: &'a [Expense],
        exclude: Option<ExpenseId>,
        zone: &Z,
    ) -> Option<&'a Expense>
    where
        C: NamedEntity + Amounted + Timestamped,
        Z: TimeZone,
    {
        existing
            .iter()
            .filter(|record| Some(record.id) != exclude)
            .find(|record| Self::matches(candidate, *record, zone))
    }

    /// Symmetric pairwise check: same normalised title, same amount, same
    /// local calendar day, and at most [`DUPLICATE_WINDOW_MINUTES`] apart.
    pub fn matches<A, B, Z>(a: &A, b: &B, zone: &Z) -> bool
    where
        A: NamedEntity + Amounted + Timestamped,
        B: NamedEntity + Amounted + Timestamped,
        Z: TimeZone,
    {
        if a.amount_minor() != b.amount_minor() {
            return false;
        }
        if normalized_title(a.title()) != normalized_title(b.title()) {
            return false;
        }
        if local_day(a.created_at(), zone) != local_day(b.created_at(), zone) {
            return false;
        }
        let (earlier, later) = if a.created_at() <= b.created_at() {
            (a.created_at(), b.created_at())
        } else {
            (b.created_at(), a.created_at())
        };
        later - earlier <= duplicate_window()
    }
}

fn normalized_title(title: &str) -> String {
    title.trim().to_lowercase()
}
