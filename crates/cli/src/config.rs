//! Index configuration for `webcontent scan` / `webcontent watch`.
//!
//! Values come from an optional TOML file and are overridden by flags.
//!
//! # Example
//!
//! ```toml
//! [index]
//! content_folder = "~/content"
//! base_route = "/srv/site"
//! refresh_interval_secs = 600
//! on_parse_error = "abort"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use webcontent_index::{FailurePolicy, IndexConfig};

use crate::IndexArgs;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub index: IndexSection,
}

/// `[index]` section. Every key is optional so flags can fill the gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IndexSection {
    pub content_folder: Option<String>,
    pub base_route: Option<PathBuf>,
    pub refresh_interval_secs: Option<u64>,
    pub on_parse_error: Option<FailurePolicy>,
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Combine the config file (if any) with command-line overrides.
pub(crate) fn resolve_index_config(
    args: &IndexArgs,
    interval: Option<u64>,
) -> Result<IndexConfig, String> {
    let file = match &args.config {
        Some(path) => read_config_file(path)?,
        None => ConfigFile::default(),
    };
    merge(file.index, args, interval)
}

fn merge(
    section: IndexSection,
    args: &IndexArgs,
    interval: Option<u64>,
) -> Result<IndexConfig, String> {
    let content_folder = args
        .content_folder
        .clone()
        .or(section.content_folder)
        .ok_or_else(|| {
            "no content folder given; pass --content-folder or set index.content_folder".to_string()
        })?;

    let mut config = IndexConfig::new(content_folder);
    if let Some(base_route) = args.base_route.clone().or(section.base_route) {
        config.base_route = base_route;
    }
    if let Some(secs) = interval.or(section.refresh_interval_secs) {
        config.refresh_interval_secs = secs;
    }
    if let Some(policy) = section.on_parse_error {
        config.on_parse_error = policy;
    }
    if args.abort_on_error {
        config.on_parse_error = FailurePolicy::Abort;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(toml_src: &str) -> IndexSection {
        let file: ConfigFile = toml::from_str(toml_src).unwrap();
        file.index
    }

    #[test]
    fn file_values_are_used_when_no_flags_given() {
        let s = section(
            r#"
[index]
content_folder = "~/pages"
base_route = "/srv"
refresh_interval_secs = 60
on_parse_error = "abort"
"#,
        );
        let config = merge(s, &IndexArgs::default(), None).unwrap();
        assert_eq!(config.content_folder, "~/pages");
        assert_eq!(config.base_route, PathBuf::from("/srv"));
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.on_parse_error, FailurePolicy::Abort);
    }

    #[test]
    fn flags_override_file_values() {
        let s = section("[index]\ncontent_folder = \"a\"\nrefresh_interval_secs = 60\n");
        let args = IndexArgs {
            content_folder: Some("b".to_string()),
            abort_on_error: true,
            ..IndexArgs::default()
        };
        let config = merge(s, &args, Some(5)).unwrap();
        assert_eq!(config.content_folder, "b");
        assert_eq!(config.refresh_interval_secs, 5);
        assert_eq!(config.on_parse_error, FailurePolicy::Abort);
    }

    #[test]
    fn missing_content_folder_is_an_error() {
        let err = merge(IndexSection::default(), &IndexArgs::default(), None).unwrap_err();
        assert!(err.contains("--content-folder"), "{}", err);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("[index]\nfolder = \"x\"\n").is_err());
    }
}
