//! Polling acquisition of the compile lock

use super::{LockError, LockGuard};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const FIRST_DELAY: Duration = Duration::from_millis(10);
const DELAY_CAP: Duration = Duration::from_millis(500);
const ANNOUNCE_AFTER: Duration = Duration::from_secs(2);

/// Doubling poll interval, capped at [`DELAY_CAP`]
struct Backoff {
    next: Duration,
}

impl Backoff {
    fn new() -> Self {
        Self { next: FIRST_DELAY }
    }

    /// Sleep for the current interval, never past `remaining`
    fn wait(&mut self, remaining: Duration) {
        thread::sleep(self.next.min(remaining));
        self.next = (self.next * 2).min(DELAY_CAP);
    }
}

fn open_lock_file(lock_path: &Path) -> Result<File, LockError> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| LockError::io(lock_path, "create parent directories", e))?;
    }
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| LockError::io(lock_path, "open lock file", e))
}

pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    let file = open_lock_file(lock_path)?;
    let start = Instant::now();
    let mut backoff = Backoff::new();
    let mut announced = false;

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::trace!(
                    path = %lock_path.display(),
                    description,
                    waited_ms = start.elapsed().as_millis() as u64,
                    "lock acquired"
                );
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(LockError::io(lock_path, "acquire lock", e)),
        }

        let waited = start.elapsed();
        if waited >= timeout {
            return Err(LockError::Timeout {
                path: lock_path.to_path_buf(),
                description: description.to_string(),
                waited,
            });
        }
        if !announced && waited >= ANNOUNCE_AFTER {
            tracing::info!(path = %lock_path.display(), description, "waiting for compile lock");
            announced = true;
        }
        backoff.wait(timeout - waited);
    }
}
