// Error taxonomy for task storage

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by loading, saving and mutating a task file
///
/// A missing task file is not an error: loading it yields an empty sequence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The task file exists but could not be read
    #[error("failed to read task file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The task file exists but is not a valid JSON array of tasks
    #[error("task file {} is corrupt", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A task carries an id of 0; ids are positive
    #[error("invalid task id {id} in {}", path.display())]
    InvalidId { path: PathBuf, id: u64 },

    /// Two tasks in the same sequence share an id
    #[error("duplicate task id {id} in {}", path.display())]
    DuplicateId { path: PathBuf, id: u64 },

    /// Writing or replacing the task file failed; the sequence was not saved
    #[error("failed to write task file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no task with id {0}")]
    NotFound(u64),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
