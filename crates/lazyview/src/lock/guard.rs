use std::fs::File;
use std::path::{Path, PathBuf};

/// Held compile lock; released when dropped
///
/// `fs2` locks belong to the open file handle, so closing the handle is the
/// release.
#[derive(Debug)]
pub struct LockGuard {
    #[allow(dead_code)]
    pub(crate) file: File,
    pub(crate) path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
