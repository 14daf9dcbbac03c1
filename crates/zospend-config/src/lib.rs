//! zospend-config
//!
//! Persistent preferences for the expense ledger: where data lives, how the
//! list is grouped on launch and whether sample data is seeded.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
