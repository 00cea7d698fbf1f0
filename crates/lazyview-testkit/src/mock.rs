//! Compiler doubles

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lazyview::{CompileError, Compiler, TemplateCompiler};

/// Delegates to [`TemplateCompiler`] and counts calls
///
/// Clones share the counter, so a test can hand one clone to a `View` and
/// keep another for assertions.
#[derive(Debug, Clone, Default)]
pub struct CountingCompiler {
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every compile, widening race windows
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Compiler for CountingCompiler {
    fn compile(&self, source: &Path, target: &Path) -> Result<(), CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        TemplateCompiler::new().compile(source, target)
    }
}

/// Writes half an artifact, then fails
#[derive(Debug, Clone, Default)]
pub struct FailingCompiler;

impl Compiler for FailingCompiler {
    fn compile(&self, _source: &Path, target: &Path) -> Result<(), CompileError> {
        std::fs::write(target, b"{\"format\":1,\"sour").map_err(|e| CompileError::Io {
            path: target.to_path_buf(),
            source: e,
        })?;
        Err(CompileError::Failed("compiler crashed".to_string()))
    }
}
