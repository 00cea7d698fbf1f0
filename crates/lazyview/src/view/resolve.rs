//! View name → source file and compiled artifact paths

use serde::{Deserialize, Serialize};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::consts::{extensions, files};
use crate::error::{Result, ViewError};

/// How a recognized source file is turned into output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Compiled, cached and evaluated with parameters
    Template,
    /// Emitted verbatim from source, never compiled
    Asset,
}

/// A recognized view file suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewExtension {
    pub suffix: String,
    pub kind: ViewKind,
}

impl ViewExtension {
    pub fn new(suffix: impl Into<String>, kind: ViewKind) -> Self {
        Self {
            suffix: suffix.into(),
            kind,
        }
    }

    /// Built-in table, in resolution priority order
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(extensions::TEMPLATE, ViewKind::Template),
            Self::new(extensions::HTML, ViewKind::Template),
            Self::new(extensions::SCRIPT, ViewKind::Asset),
            Self::new(extensions::STYLE, ViewKind::Asset),
        ]
    }
}

/// The source file chosen for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub path: PathBuf,
    pub extension: String,
    pub kind: ViewKind,
}

/// Maps logical view names onto the views and compiled roots
#[derive(Debug, Clone)]
pub struct PathResolver {
    views_dir: PathBuf,
    compiled_dir: PathBuf,
    extensions: Vec<ViewExtension>,
}

impl PathResolver {
    pub fn new(views_dir: impl Into<PathBuf>, compiled_dir: Option<PathBuf>) -> Self {
        let views_dir = views_dir.into();
        let compiled_dir = compiled_dir.unwrap_or_else(|| views_dir.clone());
        Self {
            views_dir,
            compiled_dir,
            extensions: ViewExtension::defaults(),
        }
    }

    /// Replace the extension table; order is resolution priority
    pub fn with_extensions(mut self, extensions: Vec<ViewExtension>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn views_dir(&self) -> &Path {
        &self.views_dir
    }

    pub fn compiled_dir(&self) -> &Path {
        &self.compiled_dir
    }

    pub fn extensions(&self) -> &[ViewExtension] {
        &self.extensions
    }

    /// `admin.users.index` → `admin/users/index` (platform separator)
    pub fn normalize(name: &str) -> String {
        name.replace('.', &MAIN_SEPARATOR.to_string())
    }

    /// Find the source for a normalized name
    ///
    /// Candidates are `<normalized><suffix>` for every recognized suffix; when
    /// several exist the first suffix in the extension table wins.
    pub fn find_source(&self, normalized: &str) -> Result<Option<SourceDescriptor>> {
        // `join` would resolve an empty final segment to the parent directory
        if normalized.is_empty() || normalized.ends_with(['/', MAIN_SEPARATOR]) {
            return Ok(None);
        }

        let base = self.views_dir.join(normalized);
        let (Some(dir), Some(stem)) = (base.parent(), base.file_name()) else {
            return Ok(None);
        };
        let stem = stem.to_string_lossy();

        if !dir.is_dir() {
            tracing::trace!(dir = %dir.display(), "views directory missing");
            return Ok(None);
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ViewError::io(path, e.into())
            })?;
            // `Path::is_file` follows links, so symlinked sources count
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if let Some(suffix) = file_name.strip_prefix(stem.as_ref()) {
                candidates.push((suffix.to_string(), entry.path().to_path_buf()));
            }
        }

        let found = self.extensions.iter().find_map(|ext| {
            candidates
                .iter()
                .find(|(suffix, _)| *suffix == ext.suffix)
                .map(|(_, path)| SourceDescriptor {
                    path: path.clone(),
                    extension: ext.suffix.clone(),
                    kind: ext.kind,
                })
        });

        if let Some(source) = &found {
            tracing::trace!(
                path = %source.path.display(),
                candidates = candidates.len(),
                "resolved view source"
            );
        }
        Ok(found)
    }

    /// `<compiled_dir>/<normalized>.compiled.json`; no I/O
    pub fn compiled_path(&self, normalized: &str) -> PathBuf {
        self.compiled_dir
            .join(format!("{}{}", normalized, files::COMPILED_VIEW_EXT))
    }

    /// An existing artifact is valid; there is no staleness check
    pub fn has_valid_compiled(&self, normalized: &str, cache_enabled: bool) -> bool {
        cache_enabled && self.compiled_path(normalized).is_file()
    }
}
