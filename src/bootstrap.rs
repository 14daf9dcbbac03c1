//! Opens a file-backed ledger from user configuration.

use std::sync::Arc;

use chrono::Local;
use tracing::info;
use zospend_config::{Config, ConfigManager};
use zospend_core::Grouping;
use zospend_storage_json::JsonRecordStore;

use crate::{
    errors::LedgerError,
    ledger::{ExpenseLedger, ExpenseListView},
    seed::{SampleSeeder, SAMPLE_DAYS},
    utils,
};

/// A ready ledger plus the preferences it was opened with.
pub struct Session {
    pub config: Config,
    pub ledger: ExpenseLedger<JsonRecordStore, Local>,
}

impl Session {
    /// Loads `config/config.json` under the resolved data root and opens the ledger.
    pub fn open_default() -> Result<Self, LedgerError> {
        let manager = ConfigManager::with_base_dir(Config::default_data_root())?;
        let config = manager.load()?;
        Self::open(config)
    }

    /// Opens the JSON ledger under `config`'s data root, seeding sample data
    /// into an empty ledger when asked to.
    pub fn open(config: Config) -> Result<Self, LedgerError> {
        utils::init_tracing(config.log_filter.as_deref());
        let root = config.resolve_data_root();
        let store = JsonRecordStore::open_in_dir(&root)?;
        let ledger = ExpenseLedger::local(Arc::new(store));
        info!(root = %root.display(), "ledger session opened");

        if config.seed_sample_data && ledger.snapshot().is_empty() {
            SampleSeeder::new().seed(&ledger, SAMPLE_DAYS)?;
        }
        Ok(Self { config, ledger })
    }

    /// List view starting on today, grouped per the stored preference.
    pub fn list_view(&self) -> ExpenseListView<Local> {
        self.ledger
            .list_view(Grouping::from_flag(self.config.group_by_category))
    }
}
