use std::path::PathBuf;

use gostd_diagnostic::BindError;
use thiserror::Error;

/// Everything that stops a `gostdc` run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {origin}: {source}")]
    Manifest {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Bind(#[from] BindError),
}
