//! Field accessors shared by stored records and drafts, so the duplicate rule
//! can compare either against the other.

use chrono::{DateTime, Utc};

pub trait NamedEntity {
    fn title(&self) -> &str;
}

/// Amount in the currency's smallest unit.
pub trait Amounted {
    fn amount_minor(&self) -> i64;
}

/// Creation instant used for ordering and day bucketing.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}
