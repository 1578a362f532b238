//! webcontent-index: discovers `.webcontent` documents in a content folder
//! and indexes their languages by file path, route and script file.
//!
//! Parsing is delegated to [`webcontent_core::parse_with_diagnostics`]; this
//! crate only handles listing, reading, cross-document duplicate checks and
//! swapping in a fresh index on refresh. Scheduling refreshes is left to the
//! caller.

mod config;
mod error;
mod index;
mod paths;
mod scan;
mod shared;
mod source;

pub use config::{FailurePolicy, IndexConfig, DEFAULT_REFRESH_INTERVAL_SECS};
pub use error::IndexError;
pub use index::{ContentIndex, Languages};
pub use paths::{expand_home, normalize_path, resolve_path};
pub use scan::{scan, FileWarning, ScanReport, SkippedFile};
pub use shared::{RefreshSummary, SharedIndex};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
