//! zospend-core
//!
//! Ledger engine for the expense tracker: duplicate detection, day/window
//! aggregation, chart axis scaling, and snapshot distribution.
//! Depends on zospend-domain. No terminal I/O, no file access.

pub mod chart_service;
pub mod duplicate_service;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod validation;

pub use chart_service::*;
pub use duplicate_service::*;
pub use error::{CoreError, StorageError};
pub use snapshot::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
pub use validation::*;
