use std::path::PathBuf;
use thiserror::Error;

use crate::compile::CompileError;
use crate::lock::LockError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum ViewError {
    // Resolution errors
    #[error("VIEW_NOT_FOUND: view '{name}' not found")]
    NotFound { name: String },

    #[error("VIEW_INVALID_NAME: view name '{name}' resolves outside the views root")]
    InvalidName { name: String },

    // Build errors
    #[error("VIEW_COMPILE_FAILED: {0}")]
    Compile(#[from] CompileError),

    #[error("VIEW_LOCK_FAILED: {0}")]
    Lock(#[from] LockError),

    // Evaluation errors
    #[error("VIEW_EVALUATION_FAILED: {path}: {source}")]
    Evaluation {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("VIEW_ARTIFACT_INVALID: compiled view '{path}' is unusable: {reason}")]
    ArtifactInvalid { path: PathBuf, reason: String },

    // Config errors
    #[error("VIEW_CONFIG_INVALID: {0}")]
    ConfigInvalid(String),

    // IO errors
    #[error("VIEW_IO_ERROR: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ViewError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewError::Io {
            path: path.into(),
            source,
        }
    }

    /// The template failure behind an evaluation error, if any
    pub fn template_error(&self) -> Option<&TemplateError> {
        match self {
            ViewError::Evaluation { source, .. } => Some(source),
            ViewError::Compile(CompileError::Syntax { source, .. }) => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
