//! Test utilities for lazyview
//!
//! Shared fixtures and compiler doubles used by the lazyview integration tests.

pub mod fixtures;
pub mod mock;

pub use fixtures::ViewFixture;
pub use mock::{CountingCompiler, FailingCompiler};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` under the current directory
///
/// Keeps scratch view trees in one gitignored place that is easy to inspect
/// when a test fails.
///
/// # Panics
///
/// Panics if the current directory is unavailable or `.tmp/` cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for callers that handle errors
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
