//! Advisory file locking for compiled-view publication
//!
//! Compiling a view is serialized per compiled root through an exclusive
//! `fs2` lock, so concurrent renderers (threads or processes) sharing one
//! compiled directory never race on the same artifact.

use std::path::Path;
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Take the exclusive lock at `lock_path`, polling until `timeout`
///
/// The file and its parent directories are created when missing.
/// `description` names the waiter in logs and in [`LockError::Timeout`].
///
/// ```no_run
/// use lazyview::lock::acquire_lock;
/// use std::path::Path;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), lazyview::lock::LockError> {
/// let _guard = acquire_lock(
///     Path::new("storage/views/.compile.lock"),
///     Duration::from_secs(30),
///     "compile view 'home'",
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description)
}
