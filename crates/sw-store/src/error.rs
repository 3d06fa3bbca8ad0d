//! Error types for sw-store.

use sw_core::CoreError;
use thiserror::Error;

/// Errors that can occur when reading or writing records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("bad record: {0}")]
    Record(#[from] CoreError),

    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("store already finished")]
    Finished,

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
