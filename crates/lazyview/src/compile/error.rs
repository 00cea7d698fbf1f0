use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}': {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("failed to encode compiled view '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by a third-party compiler
    #[error("{0}")]
    Failed(String),
}
