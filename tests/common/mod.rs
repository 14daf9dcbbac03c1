#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use zospend::ExpenseLedger;
use zospend_core::{FixedClock, InMemoryRecordStore};
use zospend_domain::{Category, ExpenseDraft};

pub type TestLedger = ExpenseLedger<InMemoryRecordStore, FixedOffset>;

/// India Standard Time, the zone the sample data is written for.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset")
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
}

/// Instant for `hh:mm` IST on 2024-06-`d`.
pub fn at(d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    ist()
        .with_ymd_and_hms(2024, 6, d, hour, minute, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub fn draft(title: &str, amount_minor: i64, created_at: DateTime<Utc>) -> ExpenseDraft {
    ExpenseDraft::new(title, amount_minor, Category::Food, created_at)
}

/// Fresh in-memory ledger in IST with its clock pinned to `now`.
pub fn ledger_at(now: DateTime<Utc>) -> (TestLedger, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let ledger = ExpenseLedger::new(Arc::new(InMemoryRecordStore::new()), ist(), clock.clone());
    (ledger, clock)
}
