//! Error types for file locking

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for lock operations
#[derive(Error, Debug)]
pub enum LockError {
    /// Another holder kept the lock for longer than the caller would wait
    #[error("timed out after {:.2}s waiting for lock on {} ({description})", .waited.as_secs_f64(), .path.display())]
    Timeout {
        path: PathBuf,
        description: String,
        waited: Duration,
    },

    /// The lock file could not be created, opened or locked
    #[error("I/O error during {operation} on {}: {source}", .path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    },
}

impl LockError {
    pub(crate) fn io(path: &Path, operation: &'static str, source: std::io::Error) -> Self {
        LockError::Io {
            source,
            path: path.to_path_buf(),
            operation,
        }
    }
}
