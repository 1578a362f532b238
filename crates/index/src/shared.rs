//! A refreshable, shareable index snapshot.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::index::ContentIndex;
use crate::scan::{scan, FileWarning, ScanReport, SkippedFile};
use crate::source::SourceProvider;

/// What a completed refresh found.
#[derive(Debug)]
pub struct RefreshSummary {
    pub documents: usize,
    pub skipped: Vec<SkippedFile>,
    pub warnings: Vec<FileWarning>,
}

/// Holds the current [`ContentIndex`] and replaces it wholesale on refresh.
///
/// Readers take an `Arc` snapshot and never see a partially built index.
/// Refreshes are serialized; a failed refresh keeps the previous snapshot.
pub struct SharedIndex {
    config: IndexConfig,
    current: RwLock<Arc<ContentIndex>>,
    scan_lock: Mutex<()>,
}

impl SharedIndex {
    /// An empty index; call [`SharedIndex::refresh`] to populate it.
    pub fn new(config: IndexConfig) -> Self {
        SharedIndex {
            config,
            current: RwLock::new(Arc::new(ContentIndex::new())),
            scan_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<ContentIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rescan the content folder and swap in the result.
    pub fn refresh(&self, provider: &dyn SourceProvider) -> Result<RefreshSummary, IndexError> {
        let _scanning = self.scan_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ScanReport {
            index,
            skipped,
            warnings,
        } = scan(&self.config, provider)?;

        let summary = RefreshSummary {
            documents: index.len(),
            skipped,
            warnings,
        };
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(index);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryProvider;

    const DOC: &str = "scriptfile \"`a.js`\";en{title \"`A`\", route \"`/a`\"};";

    #[test]
    fn starts_empty_until_refreshed() {
        let shared = SharedIndex::new(IndexConfig::new("/c"));
        assert!(shared.snapshot().is_empty());
        let provider = InMemoryProvider::default().with_file("/c/a.webcontent", DOC);
        let summary = shared.refresh(&provider).unwrap();
        assert_eq!(summary.documents, 1);
        assert_eq!(shared.snapshot().languages_by_route("/a").len(), 1);
    }

    #[test]
    fn old_snapshot_survives_refresh() {
        let shared = SharedIndex::new(IndexConfig::new("/c"));
        let provider = InMemoryProvider::default().with_file("/c/a.webcontent", DOC);
        shared.refresh(&provider).unwrap();
        let before = shared.snapshot();

        let emptied = InMemoryProvider::default().with_file("/c/notes.txt", "");
        shared.refresh(&emptied).unwrap();
        assert_eq!(before.len(), 1);
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let shared = SharedIndex::new(IndexConfig::new("/c"));
        let provider = InMemoryProvider::default().with_file("/c/a.webcontent", DOC);
        shared.refresh(&provider).unwrap();

        let missing = InMemoryProvider::default();
        assert!(shared.refresh(&missing).is_err());
        assert_eq!(shared.snapshot().len(), 1);
    }
}
