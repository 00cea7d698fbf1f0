//! View compilation
//!
//! The core consumes compilers through the [`Compiler`] trait. The bundled
//! [`TemplateCompiler`] parses placeholder templates into a [`CompiledView`],
//! the JSON artifact format the [`Evaluator`](crate::template::Evaluator)
//! executes.

mod artifact;
mod error;

pub use artifact::{CompiledView, FORMAT_VERSION};
pub use error::CompileError;

use std::io::Write;
use std::path::Path;

/// Turns a view source into a compiled artifact
///
/// `target` is a scratch path chosen by the caller; the caller publishes it
/// atomically once `compile` returns `Ok`. Compiling the same source twice
/// must produce a usable artifact each time.
pub trait Compiler: Send + Sync {
    fn compile(&self, source: &Path, target: &Path) -> Result<(), CompileError>;
}

/// Compiler for the bundled placeholder template language
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCompiler;

impl TemplateCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for TemplateCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<(), CompileError> {
        let text = std::fs::read_to_string(source).map_err(|e| CompileError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        let view = CompiledView::from_source(source, &text)?;
        let json = serde_json::to_vec(&view).map_err(|e| CompileError::Encode {
            path: target.to_path_buf(),
            source: e,
        })?;

        let mut file = std::fs::File::create(target).map_err(|e| CompileError::Io {
            path: target.to_path_buf(),
            source: e,
        })?;
        file.write_all(&json)
            .and_then(|()| file.sync_all())
            .map_err(|e| CompileError::Io {
                path: target.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(
            source = %source.display(),
            nodes = view.nodes.len(),
            "compiled view"
        );
        Ok(())
    }
}

impl<C: Compiler + ?Sized> Compiler for Box<C> {
    fn compile(&self, source: &Path, target: &Path) -> Result<(), CompileError> {
        (**self).compile(source, target)
    }
}

impl<C: Compiler + ?Sized> Compiler for std::sync::Arc<C> {
    fn compile(&self, source: &Path, target: &Path) -> Result<(), CompileError> {
        (**self).compile(source, target)
    }
}
