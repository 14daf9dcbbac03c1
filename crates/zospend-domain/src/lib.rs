//! zospend-domain
//!
//! Pure domain models for the expense ledger (Expense, Category, report shapes).
//! No I/O, no storage, no presentation. Only data types and core enums.

pub mod category;
pub mod common;
pub mod expense;
pub mod report;

pub use category::*;
pub use common::*;
pub use expense::*;
pub use report::*;
