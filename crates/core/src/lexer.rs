//! Stage 1: character scanner that builds the keyword hierarchy.
//!
//! There is no token stream. Each character either extends the identifier
//! of the node currently being written, moves the cursor between nodes and
//! depths, or feeds the string literal buffer.

use crate::diagnostic::Warning;
use crate::error::{ParseError, Position};
use crate::hierarchy::{Hierarchy, NodeRef, RawKeyword};
use crate::{MAX_NESTING_DEPTH, RESERVED_KEYWORDS};

/// Output of the lexer: the unlinked hierarchy plus any warnings.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub hierarchy: Hierarchy,
    pub warnings: Vec<Warning>,
}

/// A character the scanner is holding until it sees the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    /// Outside a literal: `"` was just seen; a backtick now opens a string.
    Quote,
    /// Inside a literal: a backslash waiting to see if it is doubled.
    Backslash,
    /// Inside a literal: a backtick waiting to see if `"` closes the string.
    Backtick,
}

struct Lexer {
    hierarchy: Hierarchy,
    warnings: Vec<Warning>,
    depth: usize,
    index: usize,
    /// Open groups, innermost last, with the position of their `{`.
    parents: Vec<(NodeRef, Position)>,
    in_string: bool,
    string_start: Position,
    pending: Pending,
    buffer: String,
}

pub(crate) fn is_reserved(text: &str) -> bool {
    RESERVED_KEYWORDS.contains(&text)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '{' | '}' | ';' | ',' | ':' | ' ' | '"' | '`' | '\n' | '/')
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '/'
}

/// Scan `text` into a depth-indexed hierarchy of raw keyword nodes.
pub fn build_hierarchy(text: &str) -> Result<Lexed, ParseError> {
    let mut lexer = Lexer::new();
    let mut pos = Position::start();

    for c in text.chars() {
        lexer.open_slot();

        if c == '\r' {
            continue;
        }

        if lexer.in_string {
            lexer.string_char(c);
        } else {
            lexer.outer_char(c, pos)?;
        }

        if c == '\n' {
            pos.line += 1;
            pos.column = 1;
        } else {
            pos.column += 1;
        }
    }

    lexer.finish()
}

impl Lexer {
    fn new() -> Self {
        Lexer {
            hierarchy: Hierarchy::new(),
            warnings: Vec::new(),
            depth: 0,
            index: 0,
            parents: Vec::new(),
            in_string: false,
            string_start: Position::start(),
            pending: Pending::None,
            buffer: String::new(),
        }
    }

    fn current_parent(&self) -> Option<NodeRef> {
        self.parents.last().map(|(node, _)| *node)
    }

    /// Make sure the cursor addresses an existing node.
    fn open_slot(&mut self) {
        self.current();
    }

    fn current(&mut self) -> &mut RawKeyword {
        let parent = self.current_parent();
        self.hierarchy.slot_mut(self.depth, self.index, parent)
    }

    fn outer_char(&mut self, c: char, pos: Position) -> Result<(), ParseError> {
        if !is_allowed(c) {
            return Err(ParseError::InvalidCharacter {
                character: c,
                position: pos,
            });
        }

        let after_quote = std::mem::replace(&mut self.pending, Pending::None) == Pending::Quote;

        match c {
            '{' => {
                if self.parents.len() >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                        position: pos,
                    });
                }
                self.parents.push((NodeRef::new(self.depth, self.index), pos));
                self.depth += 1;
                self.hierarchy.ensure_depth(self.depth);
                self.index = self.hierarchy.len_at(self.depth);
            }
            '}' => {
                let (parent, _) = self
                    .parents
                    .pop()
                    .ok_or(ParseError::UnbalancedBrace { position: pos })?;
                self.depth = parent.depth;
                self.index = parent.index;
                if let Some(node) = self.hierarchy.get_mut(parent) {
                    node.value_assigned = true;
                }
            }
            ';' => {
                if !self.parents.is_empty() {
                    return Err(ParseError::ImproperSemicolon { position: pos });
                }
                self.current().value_assigned = true;
                self.index += 1;
            }
            ',' => {
                if !self.current().value_assigned {
                    return Err(ParseError::UnfinishedKeyword { position: pos });
                }
                self.index += 1;
            }
            ' ' | '\n' => self.close_identifier(pos)?,
            ':' => {
                let node = self.current();
                if node.text.is_empty() {
                    return Err(ParseError::MissingKeywordBeforeColon { position: pos });
                }
                node.done_with_keyword = true;
                node.is_custom = true;
                if is_reserved(&node.text) {
                    let warning = Warning::ReservedKeywordWithColon {
                        keyword: node.text.clone(),
                        position: node.position.unwrap_or(pos),
                    };
                    self.warnings.push(warning);
                }
            }
            '"' => {
                self.close_identifier(pos)?;
                self.pending = Pending::Quote;
            }
            '`' => {
                if !after_quote {
                    return Err(ParseError::UnexpectedCharacter {
                        character: c,
                        position: pos,
                    });
                }
                self.in_string = true;
                self.string_start = pos;
                self.buffer.clear();
            }
            c if is_identifier_char(c) => {
                let node = self.current();
                if node.done_with_keyword {
                    // Trailing characters after a finished, valued keyword
                    // are ignored.
                    if !node.value_assigned {
                        return Err(ParseError::UnfinishedKeyword { position: pos });
                    }
                } else {
                    if node.text.is_empty() {
                        node.position = Some(pos);
                    }
                    node.text.push(c);
                }
            }
            _ => {
                return Err(ParseError::UnexpectedCharacter {
                    character: c,
                    position: pos,
                })
            }
        }
        Ok(())
    }

    /// Whitespace and `"` terminate an open identifier, which must then be
    /// one of the reserved keywords.
    fn close_identifier(&mut self, pos: Position) -> Result<(), ParseError> {
        let node = self.current();
        if node.text.is_empty() || node.done_with_keyword {
            return Ok(());
        }
        if !is_reserved(&node.text) {
            return Err(ParseError::UnknownKeyword {
                keyword: node.text.clone(),
                position: node.position.unwrap_or(pos),
            });
        }
        node.done_with_keyword = true;
        Ok(())
    }

    fn string_char(&mut self, c: char) {
        match (self.pending, c) {
            (Pending::Backslash, '\\') => {
                self.buffer.push('\\');
                self.pending = Pending::None;
            }
            (_, '\\') => self.pending = Pending::Backslash,
            (Pending::Backslash, other) => {
                self.buffer.push('\\');
                self.buffer.push(other);
                self.pending = Pending::None;
            }
            (Pending::Backtick, '"') => {
                let value = std::mem::take(&mut self.buffer);
                let node = self.current();
                node.value = Some(value);
                node.value_assigned = true;
                self.in_string = false;
                self.pending = Pending::None;
            }
            // A backtick not followed by `"` is dropped.
            (_, '`') => self.pending = Pending::Backtick,
            (_, other) => {
                self.buffer.push(other);
                self.pending = Pending::None;
            }
        }
    }

    fn finish(self) -> Result<Lexed, ParseError> {
        if self.in_string {
            return Err(ParseError::UnterminatedString {
                position: self.string_start,
            });
        }
        if let Some((_, position)) = self.parents.last() {
            return Err(ParseError::UnclosedGroup {
                position: *position,
            });
        }
        Ok(Lexed {
            hierarchy: self.hierarchy,
            warnings: self.warnings,
        })
    }
}
