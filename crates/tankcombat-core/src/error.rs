//! Error types for the I/O edges of the simulation.
//!
//! The frame loop itself never fails. Errors only arise when loading or
//! saving maps and entity records.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or writing a map text file.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("map has no rows")]
    Empty,
}

/// Failure while reading or writing a JSON entity record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("record file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
}
