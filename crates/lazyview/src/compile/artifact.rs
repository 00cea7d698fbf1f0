use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::CompileError;
use crate::error::{Result, ViewError};
use crate::template::{Node, parse};

/// Version of the compiled view layout; artifacts with another version are rejected
pub const FORMAT_VERSION: u32 = 1;

/// On-disk compiled view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledView {
    pub format: u32,
    /// Source file the artifact was built from
    pub source: PathBuf,
    pub nodes: Vec<Node>,
}

impl CompiledView {
    /// Parse template text read from `source`
    pub fn from_source(source: &Path, text: &str) -> std::result::Result<Self, CompileError> {
        let nodes = parse(text).map_err(|e| CompileError::Syntax {
            path: source.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            format: FORMAT_VERSION,
            source: source.to_path_buf(),
            nodes,
        })
    }

    /// Read and decode a compiled artifact
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| ViewError::io(path, e))?;
        let view: Self =
            serde_json::from_slice(&content).map_err(|e| ViewError::ArtifactInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if view.format != FORMAT_VERSION {
            return Err(ViewError::ArtifactInvalid {
                path: path.to_path_buf(),
                reason: format!(
                    "format {} is not supported (expected {})",
                    view.format, FORMAT_VERSION
                ),
            });
        }
        Ok(view)
    }
}
