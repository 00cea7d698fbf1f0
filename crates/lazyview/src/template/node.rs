use serde::{Deserialize, Serialize};

/// One instruction of a compiled view
///
/// Line numbers point at the opening tag in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Node {
    /// Literal output
    Text { text: String },
    /// `{{key}}`
    Print { key: String, line: usize },
    /// `{{each key |var|}} body {{/each}}`
    Each {
        key: String,
        var: String,
        line: usize,
        body: Vec<Node>,
    },
    /// `{{capture var}} body {{/capture}}`
    Capture {
        var: String,
        line: usize,
        body: Vec<Node>,
    },
}
