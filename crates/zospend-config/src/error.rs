use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure reading or writing the preferences file; always names the path.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config at {} is not valid: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Self {
        let path = path.into();
        move |err| ConfigError::Invalid {
            path,
            message: err.to_string(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Invalid { path, .. } => path,
        }
    }
}
