//! Non-fatal notices produced while lexing.

use std::fmt;

use serde::Serialize;

use crate::error::Position;

/// A condition worth reporting that does not change the parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Warning {
    /// A reserved keyword was followed by `:`. Almost always a typo for a
    /// string value, but the keyword is still processed.
    ReservedKeywordWithColon { keyword: String, position: Position },
}

impl Warning {
    pub fn position(&self) -> Position {
        match self {
            Warning::ReservedKeywordWithColon { position, .. } => *position,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ReservedKeywordWithColon { keyword, position } => write!(
                f,
                "'{}' at {} is a reserved keyword and should not be followed by ':'; did you mean to put a string after it?",
                keyword, position
            ),
        }
    }
}
