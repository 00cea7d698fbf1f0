//! Template error types

use std::fmt;
use std::time::Duration;

/// Failures raised while compiling or evaluating a template
///
/// `line` fields are 1-based and point at the opening `{{` of the offending
/// tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{{key}}` with nothing bound under that name
    UndefinedKey { key: String, line: usize },

    /// Rejected by the compiler
    MalformedSyntax { message: String, line: usize },

    /// An array printed by a placeholder
    ArrayInNonEachContext { key: String },

    /// A table printed by a placeholder
    TableInPlaceholder { key: String },

    /// `{{each key |v|}}` where `key` is not an array
    NotAnArray { key: String, line: usize },

    /// Render deadline exceeded
    Timeout {
        max_duration: Duration,
        elapsed: Duration,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedKey { key, line } => {
                write!(f, "Undefined key '{}' at line {}", key, line)
            }
            TemplateError::MalformedSyntax { message, line } => {
                write!(f, "Malformed syntax at line {}: {}", line, message)
            }
            TemplateError::ArrayInNonEachContext { key } => {
                write!(
                    f,
                    "Array '{}' used outside of {{{{each}}}} context. Use {{{{each {} |item|}}}} ... {{{{/each}}}}",
                    key, key
                )
            }
            TemplateError::TableInPlaceholder { key } => {
                write!(
                    f,
                    "Table '{}' cannot be used directly in placeholder. Use nested keys like {}.field",
                    key, key
                )
            }
            TemplateError::NotAnArray { key, line } => {
                write!(f, "Key '{}' iterated at line {} is not an array", key, line)
            }
            TemplateError::Timeout {
                max_duration,
                elapsed,
            } => {
                write!(
                    f,
                    "View evaluation timed out after {:.2}s (max: {:.2}s)",
                    elapsed.as_secs_f64(),
                    max_duration.as_secs_f64()
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}
