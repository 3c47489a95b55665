//! Error types for dataset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort startup while loading the node and performance datasets.
///
/// Either dataset failing is reported as a single error; the dashboard never
/// starts with partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The background loader task panicked or was cancelled.
    #[error("dataset loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
