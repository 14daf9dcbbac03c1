use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Upper bound when searching for the first instant of a day whose local
/// midnight falls inside a daylight-saving gap.
const MAX_MIDNIGHT_GAP_MINUTES: i64 = 24 * 60;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Local calendar day of `instant` in `zone`.
pub fn local_day<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

/// Today's local calendar day according to `clock`.
pub fn local_today<Z: TimeZone>(clock: &dyn Clock, zone: &Z) -> NaiveDate {
    local_day(clock.now(), zone)
}

/// The `days` calendar days ending at `end` inclusive, oldest first.
///
/// Steps are calendar days, never fixed 24 hour offsets.
pub fn window_dates(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64)
        .rev()
        .map(|offset| end - Duration::days(offset))
        .collect()
}

/// Half-open UTC range `[start, end)` covering the local calendar day `date`.
///
/// Boundaries follow the zone's own midnight, so the span lasts 23 or 25
/// hours across daylight-saving transitions. When local midnight does not
/// exist the day starts at the first local instant after it.
pub fn day_span<Z: TimeZone>(date: NaiveDate, zone: &Z) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(date, zone);
    let end = start_of_day(date + Duration::days(1), zone);
    (start, end)
}

fn start_of_day<Z: TimeZone>(date: NaiveDate, zone: &Z) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::default());
    for minutes in 0..=MAX_MIDNIGHT_GAP_MINUTES {
        let local = midnight + Duration::minutes(minutes);
        if let Some(start) = zone.from_local_datetime(&local).earliest() {
            return start.with_timezone(&Utc);
        }
    }
    Utc.from_utc_datetime(&midnight)
}
