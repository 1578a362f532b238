use std::path::PathBuf;

use webcontent_core::ParseError;

/// All errors that can be returned while building a content index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The content folder or a document could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document was read but is not a valid webcontent file.
    #[error("cannot parse '{}': {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    /// Two documents resolve to the same script file.
    #[error("script file '{}' is declared by more than one document", .script_file.display())]
    DuplicateScriptFile { script_file: PathBuf },

    /// A language name is already indexed under the same route.
    #[error("language '{language}' has already been defined for route '{route}'")]
    DuplicateLanguage { language: String, route: String },
}

impl IndexError {
    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::Io { .. } => "io",
            IndexError::Parse { source, .. } => source.code(),
            IndexError::DuplicateScriptFile { .. } => "duplicate_script_file",
            IndexError::DuplicateLanguage { .. } => "duplicate_language_route",
        }
    }
}
