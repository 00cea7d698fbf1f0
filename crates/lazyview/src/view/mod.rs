//! The view orchestrator: resolve, compile when needed, evaluate
//!
//! ```no_run
//! use lazyview::View;
//! use toml::toml;
//!
//! # fn main() -> lazyview::Result<()> {
//! let mut view = View::new("resources/views").with_compiled_dir("storage/views");
//! view.set_param("app_name", "Demo");
//!
//! let html = view.render("admin.users.index", &toml! { page = 2 })?;
//! # Ok(())
//! # }
//! ```

mod params;
mod resolve;

pub use params::ParameterStore;
pub use resolve::{PathResolver, SourceDescriptor, ViewExtension, ViewKind};

use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use toml::Value;

use crate::compile::{Compiler, TemplateCompiler};
use crate::config::ViewConfig;
use crate::config::consts::{files, limits};
use crate::error::{Result, ViewError};
use crate::lock;
use crate::path::stays_within_root;
use crate::template::{Artifact, Evaluator, OutputStack, ParameterSet};

/// Renders named views from a views root, caching compiled artifacts
pub struct View {
    resolver: PathResolver,
    params: ParameterStore,
    compiler: Box<dyn Compiler>,
    evaluator: Evaluator,
    cache_enabled: bool,
    lock_timeout: Duration,
}

impl View {
    /// View over `dir` with compiled artifacts stored next to the sources
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(dir, None),
            params: ParameterStore::new(),
            compiler: Box::new(TemplateCompiler::new()),
            evaluator: Evaluator::new(),
            cache_enabled: true,
            lock_timeout: limits::LOCK_TIMEOUT,
        }
    }

    /// View built from a loaded `views.toml`
    pub fn from_config(config: &ViewConfig) -> Self {
        let resolver = PathResolver::new(
            config.views.dir.clone(),
            Some(config.compiled_dir().to_path_buf()),
        )
        .with_extensions(config.extensions());

        Self {
            resolver,
            params: ParameterStore::from(config.params.clone()),
            compiler: Box::new(TemplateCompiler::new()),
            evaluator: Evaluator::with_timeout(config.render_timeout()),
            cache_enabled: config.views.cache,
            lock_timeout: config.lock_timeout(),
        }
    }

    /// Store compiled artifacts under `compiled_dir` instead of the views root
    pub fn with_compiled_dir(mut self, compiled_dir: impl Into<PathBuf>) -> Self {
        self.resolver = PathResolver::new(
            self.resolver.views_dir().to_path_buf(),
            Some(compiled_dir.into()),
        )
        .with_extensions(self.resolver.extensions().to_vec());
        self
    }

    /// Replace the shared parameters
    pub fn with_params(mut self, params: ParameterSet) -> Self {
        self.params = ParameterStore::from(params);
        self
    }

    /// Swap the compiler used for template views
    pub fn with_compiler(mut self, compiler: impl Compiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// Replace the extension table; order is resolution priority
    pub fn with_extensions(mut self, extensions: Vec<ViewExtension>) -> Self {
        self.resolver = self.resolver.with_extensions(extensions);
        self
    }

    /// Deadline for a single evaluation
    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.evaluator = Evaluator::with_timeout(timeout);
        self
    }

    /// How long a render waits for the compile lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Views root
    pub fn dir(&self) -> &Path {
        self.resolver.views_dir()
    }

    /// Compiled root; the views root unless configured
    pub fn compiled_dir(&self) -> &Path {
        self.resolver.compiled_dir()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Shared parameters
    pub fn params(&self) -> &ParameterSet {
        self.params.all()
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.has(name)
    }

    /// Shared parameter by name
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Set a shared parameter, overwriting any previous value
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.params.set(name, value);
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// With caching off every render of a template view recompiles
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }

    /// Render a view into a string
    ///
    /// Shared parameters override `params` entries of the same name.
    pub fn render(&self, name: &str, params: &ParameterSet) -> Result<String> {
        self.render_into(name, params, &mut OutputStack::new())
    }

    /// Render inside a caller-owned output stack
    ///
    /// The view gets its own capture scope on top of `out`; `out.depth()` is
    /// the same after the call whether it succeeds or fails.
    pub fn render_into(
        &self,
        name: &str,
        params: &ParameterSet,
        out: &mut OutputStack,
    ) -> Result<String> {
        let artifact = self.resolve(name)?;
        let merged = self.params.merged(params);
        tracing::debug!(view = name, path = %artifact.path().display(), "rendering view");
        self.evaluator.evaluate(&artifact, &merged, out)
    }

    /// Resolve a view to the artifact that would be evaluated, compiling it
    /// if there is no valid compiled artifact
    pub fn resolve(&self, name: &str) -> Result<Artifact> {
        let normalized = self.normalize(name)?;

        if self.resolver.has_valid_compiled(&normalized, self.cache_enabled) {
            tracing::trace!(view = name, "compiled view cache hit");
            return Ok(Artifact::Compiled(self.resolver.compiled_path(&normalized)));
        }

        let source = self
            .resolver
            .find_source(&normalized)?
            .ok_or_else(|| ViewError::NotFound {
                name: name.to_string(),
            })?;

        match source.kind {
            ViewKind::Asset => Ok(Artifact::Asset(source.path)),
            ViewKind::Template => {
                let compiled = self.resolver.compiled_path(&normalized);
                self.compile(name, &source, &compiled)?;
                Ok(Artifact::Compiled(compiled))
            }
        }
    }

    /// Whether `render` would find something for this name
    pub fn exists(&self, name: &str) -> Result<bool> {
        let normalized = self.normalize(name)?;
        Ok(self.resolver.has_valid_compiled(&normalized, self.cache_enabled)
            || self.resolver.find_source(&normalized)?.is_some())
    }

    /// Delete the compiled artifact of a view, returning whether one existed
    pub fn forget(&self, name: &str) -> Result<bool> {
        let compiled = self.resolver.compiled_path(&self.normalize(name)?);
        match std::fs::remove_file(&compiled) {
            Ok(()) => {
                tracing::debug!(view = name, "compiled view removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ViewError::io(compiled, e)),
        }
    }

    /// Every dot must separate two non-empty segments; `Path` would fold
    /// `a..b` onto `a.b`
    fn normalize(&self, name: &str) -> Result<String> {
        let normalized = PathResolver::normalize(name);
        let empty_segment = !name.is_empty() && name.split('.').any(str::is_empty);
        if empty_segment || !stays_within_root(Path::new(&normalized)) {
            return Err(ViewError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(normalized)
    }

    /// Compile into a temp file next to the artifact and publish it atomically
    fn compile(&self, name: &str, source: &SourceDescriptor, compiled: &Path) -> Result<()> {
        let parent = compiled.parent().unwrap_or(self.resolver.compiled_dir());
        std::fs::create_dir_all(parent).map_err(|e| ViewError::io(parent, e))?;

        let _lock = lock::acquire_lock(
            &self.resolver.compiled_dir().join(files::COMPILE_LOCK_FILE),
            self.lock_timeout,
            &format!("compile view '{}'", name),
        )?;

        // Another renderer may have published while we waited
        if self.cache_enabled && compiled.is_file() {
            tracing::trace!(view = name, "compiled view published concurrently");
            return Ok(());
        }

        let temp = NamedTempFile::new_in(parent)
            .map_err(|e| ViewError::io(parent, e))?
            .into_temp_path();
        self.compiler.compile(&source.path, &temp)?;
        temp.persist(compiled)
            .map_err(|e| ViewError::io(compiled, e.error))?;

        tracing::debug!(
            view = name,
            source = %source.path.display(),
            compiled = %compiled.display(),
            "view compiled"
        );
        Ok(())
    }
}
