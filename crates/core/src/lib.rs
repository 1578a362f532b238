//! webcontent-core: parser for `.webcontent` documents.
//!
//! A document declares one script file and one or more named language
//! blocks, each with a title, a route, and optional metadata and content:
//!
//! ```text
//! scriptfile "`main.js`";
//! en{title "`Hello`", route "`/hello`", metadata{author: "`Ada`"}};
//! ```
//!
//! # Public API
//!
//! - [`parse()`] / [`parse_with_diagnostics()`] -- run the whole pipeline
//! - [`ParseError`] -- the single error type, see [`ErrorCategory`]
//! - [`Warning`] -- non-fatal notices returned with [`Parsed`]
//! - Document types: [`Document`], [`Language`], [`Section`], [`Keyword`]
//!
//! The three stages ([`lexer`], [`link`], [`structure`]) are public for
//! callers that want to inspect the intermediate hierarchy.

/// Keywords recognised without a trailing colon.
pub const RESERVED_KEYWORDS: [&str; 5] = ["scriptfile", "title", "route", "metadata", "content"];

/// Deepest allowed `{` nesting, counting the language group itself.
pub const MAX_NESTING_DEPTH: usize = 128;

/// File extension of documents picked up by content-folder scans.
pub const FILE_EXTENSION: &str = "webcontent";

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod lexer;
pub mod link;
pub mod parse;
pub mod structure;

// ── Convenience re-exports ───────────────────────────────────────────

pub use diagnostic::Warning;
pub use document::{Document, Keyword, Language, Section};
pub use error::{ErrorCategory, ParseError, Position};
pub use hierarchy::{Hierarchy, NodeRef, RawKeyword};
pub use parse::{parse, parse_with_diagnostics, Parsed};
