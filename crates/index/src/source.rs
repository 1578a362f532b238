//! Source provider abstraction for filesystem-independent scanning.
//!
//! The [`SourceProvider`] trait abstracts directory listing and file reads so
//! the index can be built from the real filesystem or from memory in tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::paths::normalize_path;

pub trait SourceProvider {
    /// Read the whole text of a document.
    fn read_source(&self, path: &Path) -> Result<String, io::Error>;

    /// List the files directly inside `dir` (not recursive).
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, io::Error>;
}

/// Default filesystem-backed source provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, io::Error> {
        std::fs::read_to_string(path)
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// In-memory source provider for testing.
///
/// Maps paths to source text. Paths are normalized on insert and lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, text)| (normalize_path(&path), text))
            .collect();
        Self { files }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.files
            .insert(normalize_path(path.as_ref()), text.into());
        self
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, io::Error> {
        let normalized = normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
        let dir = normalize_path(dir);
        if !self.files.keys().any(|k| k.starts_with(&dir)) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found in memory: {}", dir.display()),
            ));
        }
        Ok(self
            .files
            .keys()
            .filter(|k| k.parent() == Some(dir.as_path()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_read_source_found() {
        let provider = InMemoryProvider::default().with_file("/site/a.webcontent", "x");
        let content = provider
            .read_source(Path::new("/site/./a.webcontent"))
            .unwrap();
        assert_eq!(content, "x");
    }

    #[test]
    fn in_memory_read_source_not_found() {
        let provider = InMemoryProvider::new(HashMap::new());
        let err = provider
            .read_source(Path::new("/missing.webcontent"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn in_memory_list_dir_is_not_recursive() {
        let provider = InMemoryProvider::default()
            .with_file("/site/a.webcontent", "")
            .with_file("/site/nested/b.webcontent", "");
        let listed = provider.list_dir(Path::new("/site")).unwrap();
        assert_eq!(listed, vec![PathBuf::from("/site/a.webcontent")]);
    }

    #[test]
    fn in_memory_list_missing_dir_fails() {
        let provider = InMemoryProvider::default().with_file("/site/a.webcontent", "");
        let err = provider.list_dir(Path::new("/other")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn filesystem_list_dir_skips_directories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.webcontent"), "x").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let listed = FileSystemProvider.list_dir(tmp.path()).unwrap();
        assert_eq!(listed, vec![tmp.path().join("a.webcontent")]);
    }
}
