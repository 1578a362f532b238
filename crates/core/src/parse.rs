//! Three-stage parser: lex -> link -> structure.
//!
//! This is a thin orchestrator; each stage lives in its own module.

use crate::diagnostic::Warning;
use crate::document::Document;
use crate::error::ParseError;
use crate::lexer;
use crate::link;
use crate::structure;

/// A successful parse together with the warnings it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

/// Parse one complete `.webcontent` text, keeping any warnings.
pub fn parse_with_diagnostics(text: &str) -> Result<Parsed, ParseError> {
    // Stage 1: scan characters into the depth-indexed hierarchy
    let lexer::Lexed {
        mut hierarchy,
        warnings,
    } = lexer::build_hierarchy(text)?;

    // Stage 2: attach children to parents, deepest level first
    link::link(&mut hierarchy);

    // Stage 3: validate and build the typed document
    let document = structure::structure(&hierarchy)?;

    Ok(Parsed { document, warnings })
}

/// Parse one complete `.webcontent` text into a [`Document`].
pub fn parse(text: &str) -> Result<Document, ParseError> {
    parse_with_diagnostics(text).map(|parsed| parsed.document)
}
