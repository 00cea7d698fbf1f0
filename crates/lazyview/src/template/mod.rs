//! Template module - placeholder templates, their compiled node form and
//! the evaluator that runs them inside capture scopes.
//!
//! ## Syntax
//!
//! - Placeholders: `{{key}}` or `{{ nested.key }}` (spaces optional)
//! - List iteration: `{{each items |item|}} ... {{/each}}`
//! - Captured blocks: `{{capture name}} ... {{/capture}}` renders the body into
//!   a nested capture scope and binds the text to `name`
//! - Escape sequences: `\{{literal}}`
//!
//! Parameters are a `toml::Table`; every entry is visible by its exact name.

pub mod engine;
pub mod error;
mod node;

pub use engine::{Artifact, CaptureScope, Evaluator, OutputStack, parse, render};
pub use error::TemplateError;
pub use node::Node;

/// Name → value mapping bound into a template's scope
pub type ParameterSet = toml::Table;
