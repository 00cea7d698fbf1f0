//! Tag scanner for the template compiler
//!
//! A single forward pass over the bytes of a template finds every `{{...}}`
//! tag together with the run of backslashes in front of it. Text between
//! tags is left to the parser, which slices it out of the template using the
//! token offsets.

/// Keywords that open a body closed by `{{/keyword}}`
pub(crate) const BLOCK_KEYWORDS: [&str; 2] = ["each", "capture"];

/// Upper bound on scanner steps, as a multiple of the input length
const STEP_BUDGET_FACTOR: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `{{key}}`, `{{ nested.key }}`
    Placeholder { key: String },

    /// `{{each items |var|}}`, `{{capture name}}`
    BlockStart { keyword: String, args: String },

    /// `{{/each}}`, `{{/capture}}`
    BlockEnd { keyword: String },
}

/// One `{{...}}` tag
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the opening `{{`
    pub start: usize,
    /// Byte length from `{{` through `}}`
    pub length: usize,
    /// Backslashes directly before `{{`; an odd count makes the tag literal
    pub backslash_count: usize,
    /// 1-based line of the opening `{{`
    pub line: usize,
}

impl Token {
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }

    /// Raw text between the braces
    pub fn content<'t>(&self, template: &'t str) -> &'t str {
        &template[self.start + 2..self.start + self.length - 2]
    }
}

/// Scanner position relative to the tag syntax
///
/// ```text
/// Text ─{─> OpenBrace ─{─> Tag ─}─> CloseBrace ─}─> emit, Text
///             │ other        ▲          │ other
///             ▼              └──────────┘
///            Text
/// ```
///
/// A byte that breaks a half-seen delimiter is scanned again in the state it
/// falls back to, so every byte is visited at most twice.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scan {
    Text { backslashes: usize },
    OpenBrace { at: usize, backslashes: usize },
    Tag { at: usize, line: usize, backslashes: usize },
    CloseBrace { at: usize, line: usize, backslashes: usize },
}

struct Transition {
    next: Scan,
    consumed: bool,
    token: Option<Token>,
}

impl Transition {
    fn consume(next: Scan) -> Self {
        Self {
            next,
            consumed: true,
            token: None,
        }
    }

    fn retry(next: Scan) -> Self {
        Self {
            next,
            consumed: false,
            token: None,
        }
    }
}

/// Iterator over the tags of a template
pub(crate) struct TokenStream<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    scan: Scan,
    steps: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            scan: Scan::Text { backslashes: 0 },
            steps: 0,
        }
    }

    fn transition(&self, byte: u8) -> Transition {
        match self.scan {
            Scan::Text { backslashes } => match byte {
                b'\\' => Transition::consume(Scan::Text {
                    backslashes: backslashes + 1,
                }),
                b'{' => Transition::consume(Scan::OpenBrace {
                    at: self.pos,
                    backslashes,
                }),
                _ => Transition::consume(Scan::Text { backslashes: 0 }),
            },
            Scan::OpenBrace { at, backslashes } if byte == b'{' => {
                Transition::consume(Scan::Tag {
                    at,
                    line: self.line,
                    backslashes,
                })
            }
            Scan::OpenBrace { .. } => Transition::retry(Scan::Text { backslashes: 0 }),
            Scan::Tag {
                at,
                line,
                backslashes,
            } if byte == b'}' => Transition::consume(Scan::CloseBrace {
                at,
                line,
                backslashes,
            }),
            Scan::Tag { .. } => Transition::consume(self.scan),
            Scan::CloseBrace {
                at,
                line,
                backslashes,
            } if byte == b'}' => {
                let end = self.pos + 1;
                Transition {
                    next: Scan::Text { backslashes: 0 },
                    consumed: true,
                    token: Some(Token {
                        kind: classify(&self.text[at + 2..end - 2]),
                        start: at,
                        length: end - at,
                        backslash_count: backslashes,
                        line,
                    }),
                }
            }
            // A lone `}` is part of the tag content
            Scan::CloseBrace {
                at,
                line,
                backslashes,
            } => Transition::retry(Scan::Tag {
                at,
                line,
                backslashes,
            }),
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let bytes = self.text.as_bytes();
        let budget = bytes.len().saturating_mul(STEP_BUDGET_FACTOR);

        while self.pos < bytes.len() && self.steps < budget {
            self.steps += 1;
            let byte = bytes[self.pos];
            let transition = self.transition(byte);

            self.scan = transition.next;
            if transition.consumed {
                if byte == b'\n' {
                    self.line += 1;
                }
                self.pos += 1;
            }
            if transition.token.is_some() {
                return transition.token;
            }
        }
        // An unclosed `{{` yields no token; the parser reports it from the
        // trailing text
        None
    }
}

/// `each ...` / `capture ...` open a block, `/...` closes one, anything else
/// is a placeholder
fn classify(content: &str) -> TokenKind {
    let trimmed = content.trim();

    let block = BLOCK_KEYWORDS.iter().find_map(|keyword| {
        let rest = trimmed
            .strip_prefix(keyword)?
            .strip_prefix(char::is_whitespace)?;
        Some(TokenKind::BlockStart {
            keyword: keyword.to_string(),
            args: rest.trim().to_string(),
        })
    });
    if let Some(block) = block {
        return block;
    }

    match trimmed.strip_prefix('/') {
        Some(rest) => TokenKind::BlockEnd {
            keyword: rest.trim().to_string(),
        },
        None => TokenKind::Placeholder {
            key: trimmed.to_string(),
        },
    }
}
