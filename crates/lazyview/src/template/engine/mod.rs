//! Template evaluator
//!
//! Runs a node list against a parameter scope inside its own capture scope.
//! On any failure the scopes opened during the call are discarded and only
//! the error is returned.

mod capture;
mod helpers;
mod parse;
mod tokenize;

use crate::compile::CompiledView;
use crate::config::consts::limits;
use crate::error::{Result, ViewError};
use crate::template::ParameterSet;
use crate::template::error::TemplateError;
use crate::template::node::Node;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use toml::Value;

pub use capture::{CaptureScope, OutputStack};
pub use parse::parse;

use helpers::{Bindings, stringify_value};

/// What the evaluator executes for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// A compiled view (`*.compiled.json`)
    Compiled(PathBuf),
    /// A pass-through source emitted verbatim
    Asset(PathBuf),
}

impl Artifact {
    pub fn path(&self) -> &Path {
        match self {
            Artifact::Compiled(path) | Artifact::Asset(path) => path,
        }
    }

    fn load(&self) -> Result<Vec<Node>> {
        match self {
            Artifact::Compiled(path) => Ok(CompiledView::load(path)?.nodes),
            Artifact::Asset(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| ViewError::io(path, e))?;
                Ok(vec![Node::Text { text }])
            }
        }
    }
}

/// Executes artifacts against a merged parameter set
#[derive(Debug, Clone)]
pub struct Evaluator {
    timeout: Duration,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            timeout: limits::RENDER_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Evaluate an artifact file, nesting inside `out`
    pub fn evaluate(
        &self,
        artifact: &Artifact,
        params: &ParameterSet,
        out: &mut OutputStack,
    ) -> Result<String> {
        let nodes = artifact.load()?;
        tracing::trace!(path = %artifact.path().display(), nodes = nodes.len(), "evaluating");

        self.evaluate_nodes(&nodes, params, out)
            .map_err(|source| ViewError::Evaluation {
                path: artifact.path().to_path_buf(),
                source,
            })
    }

    /// Evaluate an in-memory node list, nesting inside `out`
    pub fn evaluate_nodes(
        &self,
        nodes: &[Node],
        params: &ParameterSet,
        out: &mut OutputStack,
    ) -> std::result::Result<String, TemplateError> {
        let mut run = Run {
            start: Instant::now(),
            timeout: self.timeout,
            bindings: Bindings::new(params),
        };

        let mut scope = out.scope();
        run.exec(nodes, &mut scope)?;
        Ok(scope.finish())
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one evaluation
struct Run<'a> {
    start: Instant,
    timeout: Duration,
    bindings: Bindings<'a>,
}

impl Run<'_> {
    fn check_timeout(&self) -> std::result::Result<(), TemplateError> {
        let elapsed = self.start.elapsed();
        if elapsed >= self.timeout {
            return Err(TemplateError::Timeout {
                max_duration: self.timeout,
                elapsed,
            });
        }
        Ok(())
    }

    fn exec(&mut self, nodes: &[Node], out: &mut OutputStack) -> std::result::Result<(), TemplateError> {
        let mark = self.bindings.mark();

        for node in nodes {
            self.check_timeout()?;
            match node {
                Node::Text { text } => out.write(text),
                Node::Print { key, line } => {
                    let value = self.bindings.resolve(key).ok_or_else(|| {
                        TemplateError::UndefinedKey {
                            key: key.clone(),
                            line: *line,
                        }
                    })?;
                    out.write(&stringify_value(value, key)?);
                }
                Node::Each {
                    key,
                    var,
                    line,
                    body,
                } => {
                    let items = self.resolve_array(key, *line)?;
                    for item in items {
                        let item_mark = self.bindings.mark();
                        self.bindings.bind(var, item);
                        self.exec(body, out)?;
                        self.bindings.release(item_mark);
                    }
                }
                Node::Capture { var, body, .. } => {
                    let text = {
                        let mut scope = out.scope();
                        self.exec(body, &mut scope)?;
                        scope.finish()
                    };
                    self.bindings.bind(var, Value::String(text));
                }
            }
        }

        self.bindings.release(mark);
        Ok(())
    }

    fn resolve_array(&self, key: &str, line: usize) -> std::result::Result<Vec<Value>, TemplateError> {
        let value = self
            .bindings
            .resolve(key)
            .ok_or_else(|| TemplateError::UndefinedKey {
                key: key.to_string(),
                line,
            })?;

        match value {
            Value::Array(items) => Ok(items.clone()),
            _ => Err(TemplateError::NotAnArray {
                key: key.to_string(),
                line,
            }),
        }
    }
}

/// Parse and evaluate a template string in a fresh output stack
pub fn render(template: &str, params: &ParameterSet) -> std::result::Result<String, TemplateError> {
    let nodes = parse(template)?;
    Evaluator::new().evaluate_nodes(&nodes, params, &mut OutputStack::new())
}

#[cfg(test)]
mod tests;
