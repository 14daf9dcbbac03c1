#![doc(test(attr(deny(warnings))))]

//! zospend
//!
//! Expense ledger engine: a duplicate-checked, single-writer write path over a
//! pluggable record store, plus live today/list/report projections and chart
//! axis scaling for the reporting screens.

pub mod bootstrap;
pub mod errors;
pub mod ledger;
pub mod seed;
pub mod utils;

pub use bootstrap::Session;
pub use errors::LedgerError;
pub use ledger::{
    ExpenseLedger, ExpenseListView, ListState, ReportState, ReportView, TodaySummary, TodayView,
};
pub use seed::{SampleSeeder, SeedReport};

pub use zospend_config as config;
pub use zospend_core as engine;
pub use zospend_domain as domain;
pub use zospend_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::info!("zospend tracing initialized.");
    });
}
