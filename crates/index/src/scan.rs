//! One pass over the content folder.

use std::path::{Path, PathBuf};

use webcontent_core::{parse_with_diagnostics, Warning, FILE_EXTENSION};

use crate::config::{FailurePolicy, IndexConfig};
use crate::error::IndexError;
use crate::index::ContentIndex;
use crate::source::SourceProvider;

/// A document left out of the index under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: IndexError,
}

/// A warning raised while parsing an indexed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWarning {
    pub path: PathBuf,
    pub warning: Warning,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub index: ContentIndex,
    pub skipped: Vec<SkippedFile>,
    pub warnings: Vec<FileWarning>,
}

/// Build a fresh index from every `.webcontent` file directly inside the
/// configured content folder, in path order.
///
/// Failing to list the folder is always an error. A document that fails to
/// read, parse or index is handled per `config.on_parse_error`.
pub fn scan(config: &IndexConfig, provider: &dyn SourceProvider) -> Result<ScanReport, IndexError> {
    let folder = config.content_folder_path();
    let mut paths = provider
        .list_dir(&folder)
        .map_err(|source| IndexError::Io {
            path: folder.clone(),
            source,
        })?;
    paths.retain(|p| p.extension().is_some_and(|e| e == FILE_EXTENSION));
    paths.sort();

    let mut report = ScanReport::default();
    for path in paths {
        if let Err(error) = index_file(&mut report, &path, config, provider) {
            match config.on_parse_error {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Skip => report.skipped.push(SkippedFile { path, error }),
            }
        }
    }
    Ok(report)
}

fn index_file(
    report: &mut ScanReport,
    path: &Path,
    config: &IndexConfig,
    provider: &dyn SourceProvider,
) -> Result<(), IndexError> {
    let text = provider
        .read_source(path)
        .map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let parsed = parse_with_diagnostics(&text).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    report
        .index
        .insert(path, &parsed.document, &config.base_route)?;
    report
        .warnings
        .extend(parsed.warnings.into_iter().map(|warning| FileWarning {
            path: path.to_path_buf(),
            warning,
        }));
    Ok(())
}
