use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::limits;
use crate::error::{Result, ViewError};
use crate::template::ParameterSet;
use crate::view::{ViewExtension, ViewKind};

/// views.toml schema
///
/// ```toml
/// [views]
/// dir = "resources/views"
/// compiled_dir = "storage/views"
/// cache = true
///
/// [[views.extensions]]
/// suffix = ".view.tpl"
/// kind = "template"
///
/// [params]
/// app_name = "Demo"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub views: ViewsConfig,
    /// Initial shared parameters
    #[serde(default)]
    pub params: ParameterSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    pub dir: PathBuf,
    /// Defaults to `dir`
    #[serde(default)]
    pub compiled_dir: Option<PathBuf>,
    #[serde(default = "default_cache")]
    pub cache: bool,
    #[serde(default = "default_render_timeout_ms")]
    pub render_timeout_ms: u64,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Empty means the built-in extension table
    #[serde(default)]
    pub extensions: Vec<ExtensionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtensionConfig {
    pub suffix: String,
    pub kind: ViewKind,
}

fn default_cache() -> bool {
    true
}

fn default_render_timeout_ms() -> u64 {
    limits::RENDER_TIMEOUT.as_millis() as u64
}

fn default_lock_timeout_ms() -> u64 {
    limits::LOCK_TIMEOUT.as_millis() as u64
}

impl ViewConfig {
    /// Config with default settings for a views root
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            views: ViewsConfig {
                dir: dir.into(),
                compiled_dir: None,
                cache: default_cache(),
                render_timeout_ms: default_render_timeout_ms(),
                lock_timeout_ms: default_lock_timeout_ms(),
                extensions: Vec::new(),
            },
            params: ParameterSet::new(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ViewError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read views.toml from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ViewError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        for ext in &self.views.extensions {
            if !ext.suffix.starts_with('.') || ext.suffix.len() < 2 {
                return Err(ViewError::ConfigInvalid(format!(
                    "views.extensions: suffix '{}' must start with '.'",
                    ext.suffix
                )));
            }
        }
        if self.views.render_timeout_ms == 0 {
            return Err(ViewError::ConfigInvalid(
                "views.render_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Compiled root, falling back to the views root
    pub fn compiled_dir(&self) -> &Path {
        self.views
            .compiled_dir
            .as_deref()
            .unwrap_or(&self.views.dir)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.views.render_timeout_ms)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.views.lock_timeout_ms)
    }

    /// Extension table in priority order
    pub fn extensions(&self) -> Vec<ViewExtension> {
        if self.views.extensions.is_empty() {
            return ViewExtension::defaults();
        }
        self.views
            .extensions
            .iter()
            .map(|ext| ViewExtension::new(ext.suffix.clone(), ext.kind))
            .collect()
    }
}
