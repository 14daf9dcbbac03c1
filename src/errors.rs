use thiserror::Error;
use zospend_config::ConfigError;
use zospend_core::CoreError;

/// Failures surfaced while opening or driving a ledger session.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger error: {0}")]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LedgerError {
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, LedgerError::Core(err) if err.is_user_recoverable())
    }
}
