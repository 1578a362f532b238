use std::fmt;

use serde::Serialize;

/// A 1-based line/column location in the source text.
///
/// Columns count characters, not bytes. Carriage returns are skipped by the
/// lexer and never advance the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Broad class of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Raised by the lexer on a character it cannot accept here.
    Syntax,
    /// The shape of a keyword or group is wrong.
    Structural,
    /// Well-formed input that violates a document rule.
    Semantic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Structural => "structural",
            ErrorCategory::Semantic => "semantic",
        };
        f.write_str(s)
    }
}

/// A fatal parse failure. The first one detected aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid character {character:?} at {position}; did you mean to put it in a string?")]
    InvalidCharacter { character: char, position: Position },

    #[error("unknown placement of character {character:?} at {position}; did you mean to put it in a string?")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("no keyword found before ':' at {position}")]
    MissingKeywordBeforeColon { position: Position },

    #[error("improper usage of ';' at {position}; semicolons may only separate root declarations, did you mean ','?")]
    ImproperSemicolon { position: Position },

    #[error("the previous keyword has not been assigned a value at {position}; did you forget a value or a string?")]
    UnfinishedKeyword { position: Position },

    #[error("'}}' at {position} does not close any open group")]
    UnbalancedBrace { position: Position },

    #[error("string literal opened at {position} is never terminated")]
    UnterminatedString { position: Position },

    #[error("group opened at {position} is never closed")]
    UnclosedGroup { position: Position },

    #[error("group opened at {position} is nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, position: Position },

    #[error("'{keyword}' at {position} is not a reserved keyword; custom keywords must be followed by ':'")]
    UnknownKeyword { keyword: String, position: Position },

    #[error("value expected for '{keyword}'; did you forget to assign a value or to use a string?")]
    ValueExpected { keyword: String },

    #[error("missing keyword: {keyword}")]
    MissingKeyword { keyword: String },

    #[error("reserved keyword '{keyword}' must not be repeated in the same scope")]
    DuplicateReservedKeyword { keyword: String },

    #[error("custom keyword '{keyword}' is defined twice under the same parent")]
    DuplicateCustomKeyword { keyword: String },

    #[error("language '{language}' has already been defined")]
    DuplicateLanguage { language: String },
}

impl ParseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseError::InvalidCharacter { .. }
            | ParseError::UnexpectedCharacter { .. }
            | ParseError::MissingKeywordBeforeColon { .. }
            | ParseError::ImproperSemicolon { .. }
            | ParseError::UnfinishedKeyword { .. }
            | ParseError::UnbalancedBrace { .. }
            | ParseError::UnterminatedString { .. } => ErrorCategory::Syntax,
            ParseError::UnclosedGroup { .. }
            | ParseError::NestingTooDeep { .. }
            | ParseError::UnknownKeyword { .. }
            | ParseError::ValueExpected { .. } => ErrorCategory::Structural,
            ParseError::MissingKeyword { .. }
            | ParseError::DuplicateReservedKeyword { .. }
            | ParseError::DuplicateCustomKeyword { .. }
            | ParseError::DuplicateLanguage { .. } => ErrorCategory::Semantic,
        }
    }

    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidCharacter { .. } => "invalid_character",
            ParseError::UnexpectedCharacter { .. } => "unexpected_character",
            ParseError::MissingKeywordBeforeColon { .. } => "missing_keyword_before_colon",
            ParseError::ImproperSemicolon { .. } => "improper_semicolon",
            ParseError::UnfinishedKeyword { .. } => "unfinished_keyword",
            ParseError::UnbalancedBrace { .. } => "unbalanced_brace",
            ParseError::UnterminatedString { .. } => "unterminated_string",
            ParseError::UnclosedGroup { .. } => "unclosed_group",
            ParseError::NestingTooDeep { .. } => "nesting_too_deep",
            ParseError::UnknownKeyword { .. } => "unknown_keyword",
            ParseError::ValueExpected { .. } => "value_expected",
            ParseError::MissingKeyword { .. } => "missing_keyword",
            ParseError::DuplicateReservedKeyword { .. } => "duplicate_reserved_keyword",
            ParseError::DuplicateCustomKeyword { .. } => "duplicate_custom_keyword",
            ParseError::DuplicateLanguage { .. } => "duplicate_language",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::InvalidCharacter { position, .. }
            | ParseError::UnexpectedCharacter { position, .. }
            | ParseError::MissingKeywordBeforeColon { position }
            | ParseError::ImproperSemicolon { position }
            | ParseError::UnfinishedKeyword { position }
            | ParseError::UnbalancedBrace { position }
            | ParseError::UnterminatedString { position }
            | ParseError::UnclosedGroup { position }
            | ParseError::NestingTooDeep { position, .. }
            | ParseError::UnknownKeyword { position, .. } => Some(*position),
            ParseError::ValueExpected { .. }
            | ParseError::MissingKeyword { .. }
            | ParseError::DuplicateReservedKeyword { .. }
            | ParseError::DuplicateCustomKeyword { .. }
            | ParseError::DuplicateLanguage { .. } => None,
        }
    }

    /// Serialize to the JSON shape used by the CLI. Always includes every
    /// field (null for a missing position).
    pub fn to_json_value(&self) -> serde_json::Value {
        let position = self.position();
        serde_json::json!({
            "category": self.category(),
            "code":     self.code(),
            "column":   position.map(|p| p.column),
            "line":     position.map(|p| p.line),
            "message":  self.to_string(),
        })
    }
}
