//! Template source → node list

use super::tokenize::{Token, TokenKind, TokenStream};
use crate::template::error::TemplateError;
use crate::template::node::Node;

/// Open block awaiting its closing tag
struct Frame {
    block: Block,
    line: usize,
    nodes: Vec<Node>,
}

enum Block {
    Each { key: String, var: String },
    Capture { var: String },
}

impl Block {
    fn keyword(&self) -> &'static str {
        match self {
            Block::Each { .. } => "each",
            Block::Capture { .. } => "capture",
        }
    }
}

/// Block-structured node builder
#[derive(Default)]
struct Parser {
    root: Vec<Node>,
    open: Vec<Frame>,
}

impl Parser {
    /// Node list of the innermost open block
    fn nodes(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(frame) => &mut frame.nodes,
            None => &mut self.root,
        }
    }

    fn process_token(&mut self, token: &Token) -> Result<(), TemplateError> {
        let line = token.line;
        match &token.kind {
            TokenKind::Placeholder { key } => {
                validate_key(key, line)?;
                self.nodes().push(Node::Print {
                    key: key.clone(),
                    line,
                });
            }
            TokenKind::BlockStart { keyword, args } => {
                let block = if keyword == "each" {
                    let (key, var) = parse_each_syntax(args, line)?;
                    Block::Each {
                        key: key.to_string(),
                        var: var.to_string(),
                    }
                } else {
                    validate_identifier(args, keyword, line)?;
                    Block::Capture { var: args.clone() }
                };
                self.open.push(Frame {
                    block,
                    line,
                    nodes: Vec::new(),
                });
            }
            TokenKind::BlockEnd { keyword } => self.close_block(keyword, line)?,
        }
        Ok(())
    }

    fn close_block(&mut self, keyword: &str, line: usize) -> Result<(), TemplateError> {
        let frame = match self.open.pop() {
            Some(frame) if frame.block.keyword() == keyword => frame,
            _ => {
                return Err(TemplateError::MalformedSyntax {
                    message: format!(
                        "Unexpected {{{{/{}}}}} without matching {{{{{}}}}}",
                        keyword, keyword
                    ),
                    line,
                });
            }
        };

        let node = match frame.block {
            Block::Each { key, var } => Node::Each {
                key,
                var,
                line: frame.line,
                body: frame.nodes,
            },
            Block::Capture { var } => Node::Capture {
                var,
                line: frame.line,
                body: frame.nodes,
            },
        };
        self.nodes().push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, TemplateError> {
        match self.open.pop() {
            None => Ok(self.root),
            Some(frame) => {
                let message = match frame.block {
                    Block::Each { key, .. } => format!("Unclosed each loop for key '{}'", key),
                    Block::Capture { var } => format!("Unclosed capture block '{}'", var),
                };
                Err(TemplateError::MalformedSyntax {
                    message,
                    line: frame.line,
                })
            }
        }
    }
}

/// Parse a template into its node list
///
/// Fails with [`TemplateError::MalformedSyntax`] on unclosed placeholders,
/// unbalanced blocks and invalid tag arguments.
pub fn parse(template: &str) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser::default();
    let mut cursor = 0;

    for token in TokenStream::new(template) {
        let text = &template[cursor..token.start];
        push_text_before_token(parser.nodes(), text, token.backslash_count);

        if token.is_escaped() {
            let literal = format!("{{{{{}}}}}", token.content(template));
            push_text(parser.nodes(), &literal);
        } else {
            parser.process_token(&token)?;
        }
        cursor = token.start + token.length;
    }

    let rest = &template[cursor..];
    if let Some(open) = rest.find("{{") {
        let escaped = count_backslashes_before(rest, open) % 2 == 1;
        let message = if escaped {
            "Unclosed escaped placeholder"
        } else {
            "Unclosed placeholder or block"
        };
        return Err(TemplateError::MalformedSyntax {
            message: message.to_string(),
            line: 1 + count_newlines(&template[..cursor + open]),
        });
    }
    push_text(parser.nodes(), rest);

    parser.finish()
}

/// Emit text preceding a token, halving the backslashes right before `{{`
fn push_text_before_token(nodes: &mut Vec<Node>, text: &str, backslash_count: usize) {
    push_text(nodes, &text[..text.len() - backslash_count]);
    push_text(nodes, &"\\".repeat(backslash_count / 2));
}

/// Append literal text, merging with a preceding text node
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text { text: last }) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text {
            text: text.to_string(),
        });
    }
}

/// Parse each loop syntax: "items |item|" → (key, var_name)
fn parse_each_syntax(rest: &str, line: usize) -> Result<(&str, &str), TemplateError> {
    let pipe_pos = rest
        .find('|')
        .ok_or_else(|| TemplateError::MalformedSyntax {
            message: format!("Invalid each syntax: expected |var| in 'each {}'", rest),
            line,
        })?;

    let key = rest[..pipe_pos].trim();
    let var_end = rest[pipe_pos + 1..]
        .find('|')
        .ok_or_else(|| TemplateError::MalformedSyntax {
            message: format!("Invalid each syntax: unclosed |var| in 'each {}'", rest),
            line,
        })?;

    let var_name = rest[pipe_pos + 1..pipe_pos + 1 + var_end].trim();
    validate_key(key, line)?;
    validate_identifier(var_name, "each", line)?;
    Ok((key, var_name))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Keys are dot-separated names
fn validate_key(key: &str, line: usize) -> Result<(), TemplateError> {
    if key.is_empty() || !key.split('.').all(|part| !part.is_empty() && part.chars().all(is_name_char)) {
        return Err(TemplateError::MalformedSyntax {
            message: format!("Invalid placeholder '{{{{{}}}}}'", key),
            line,
        });
    }
    Ok(())
}

fn validate_identifier(name: &str, keyword: &str, line: usize) -> Result<(), TemplateError> {
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(TemplateError::MalformedSyntax {
            message: format!("Invalid variable name '{}' in {{{{{}}}}}", name, keyword),
            line,
        });
    }
    Ok(())
}

/// Count backslashes immediately before a position
fn count_backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
