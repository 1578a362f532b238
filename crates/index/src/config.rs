//! Index configuration.
//!
//! ```toml
//! content_folder = "~/content"
//! base_route = "/srv/site"
//! refresh_interval_secs = 3600
//! on_parse_error = "skip"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::paths::{expand_home, normalize_path};

/// One hour.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;

/// What a scan does when one document fails to read, parse or index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and continue with the remaining documents.
    #[default]
    Skip,
    /// Stop the scan and return the error.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexConfig {
    /// Folder scanned for `.webcontent` files. A leading `~/` is replaced
    /// by `base_route`.
    pub content_folder: String,
    /// Replaces a leading `~/` in the content folder and in script-file
    /// values.
    #[serde(default = "default_base_route")]
    pub base_route: PathBuf,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub on_parse_error: FailurePolicy,
}

fn default_base_route() -> PathBuf {
    PathBuf::from(".")
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl IndexConfig {
    pub fn new(content_folder: impl Into<String>) -> Self {
        IndexConfig {
            content_folder: content_folder.into(),
            base_route: default_base_route(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            on_parse_error: FailurePolicy::Skip,
        }
    }

    pub fn with_base_route(mut self, base_route: impl AsRef<Path>) -> Self {
        self.base_route = base_route.as_ref().to_path_buf();
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_parse_error = policy;
        self
    }

    /// The content folder with `~/` expanded.
    pub fn content_folder_path(&self) -> PathBuf {
        normalize_path(&expand_home(&self.content_folder, &self.base_route))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
