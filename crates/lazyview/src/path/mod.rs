//! Cross-platform path checks for normalized view names
//!
//! A normalized view name is joined onto the views root and the compiled
//! root, so it must stay relative on every platform. `Path::is_absolute()`
//! alone is not enough for that:
//!
//! - Unix: `Path::new("/tmp").is_absolute()` → `true`
//! - Windows: `Path::new("/tmp").is_absolute()` → `false` (rooted, not absolute!)
//!
//! `PathBuf::join` with a rooted path replaces the base, so both shapes are
//! rejected using component-based analysis.

use std::path::{Component, Path};

/// Check if path is absolute OR rooted (cross-platform)
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use lazyview::path::has_absolute_or_rooted_component;
///
/// assert!(has_absolute_or_rooted_component(Path::new("/etc/passwd")));
/// assert!(!has_absolute_or_rooted_component(Path::new("admin/users/index")));
/// ```
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Check that a relative path cannot leave the directory it is joined onto
///
/// Rejects absolute/rooted paths and any `..` component. Empty paths are
/// accepted: they simply never name an existing view file.
///
/// ```rust
/// use std::path::Path;
/// use lazyview::path::stays_within_root;
///
/// assert!(stays_within_root(Path::new("admin/users/index")));
/// assert!(stays_within_root(Path::new("")));
/// assert!(!stays_within_root(Path::new("../secrets")));
/// ```
pub fn stays_within_root(path: &Path) -> bool {
    !has_absolute_or_rooted_component(path)
        && !path.components().any(|c| matches!(c, Component::ParentDir))
}
