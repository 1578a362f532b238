use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use webcontent_index::{scan, ContentIndex, FileSystemProvider, FileWarning, Languages, SkippedFile};

use crate::config::resolve_index_config;
use crate::{report_error, warning_json, IndexArgs, OutputFormat};

pub(crate) fn cmd_scan(args: &IndexArgs, output: OutputFormat, quiet: bool) {
    let config = match resolve_index_config(args, None) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let report = match scan(&config, &FileSystemProvider) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("scan failed: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let value = index_json(&report.index, &report.skipped, &report.warnings);
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            );
        }
        OutputFormat::Text => {
            report_issues(&report.skipped, &report.warnings, quiet);
            print!("{}", render_index(&report.index, report.skipped.len()));
        }
    }
}

/// Skipped documents and warnings go to stderr in text mode.
pub(crate) fn report_issues(skipped: &[SkippedFile], warnings: &[FileWarning], quiet: bool) {
    if quiet {
        return;
    }
    for s in skipped {
        eprintln!("skipped: {}", s.error);
    }
    for w in warnings {
        eprintln!("warning: {}: {}", w.path.display(), w.warning);
    }
}

fn names(languages: &Languages) -> String {
    languages.keys().cloned().collect::<Vec<_>>().join(", ")
}

pub(crate) fn render_index(index: &ContentIndex, skipped: usize) -> String {
    let mut out = format!("indexed {} documents ({} skipped)\n", index.len(), skipped);
    if !index.routes().is_empty() {
        out.push_str("routes:\n");
        for (route, languages) in index.routes() {
            out.push_str(&format!("  {}  {}\n", route, names(languages)));
        }
    }
    if !index.script_files().is_empty() {
        out.push_str("script files:\n");
        for (script, languages) in index.script_files() {
            out.push_str(&format!("  {}  {}\n", script.display(), names(languages)));
        }
    }
    out
}

fn name_lists(map: &BTreeMap<String, Languages>) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .map(|(route, languages)| {
            let list: Vec<&String> = languages.keys().collect();
            (route.clone(), serde_json::json!(list))
        })
        .collect()
}

fn path_lists(map: &BTreeMap<PathBuf, Languages>) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .map(|(path, languages)| {
            let list: Vec<&String> = languages.keys().collect();
            (path.display().to_string(), serde_json::json!(list))
        })
        .collect()
}

pub(crate) fn index_json(
    index: &ContentIndex,
    skipped: &[SkippedFile],
    warnings: &[FileWarning],
) -> serde_json::Value {
    serde_json::json!({
        "documents":    index.len(),
        "files":        path_lists(index.files()),
        "routes":       name_lists(index.routes()),
        "script_files": path_lists(index.script_files()),
        "skipped":      skipped_json(skipped),
        "warnings":     file_warnings_json(warnings),
    })
}

pub(crate) fn skipped_json(skipped: &[SkippedFile]) -> Vec<serde_json::Value> {
    skipped
        .iter()
        .map(|s| {
            serde_json::json!({
                "file":    s.path.display().to_string(),
                "code":    s.error.code(),
                "message": s.error.to_string(),
            })
        })
        .collect()
}

pub(crate) fn file_warnings_json(warnings: &[FileWarning]) -> Vec<serde_json::Value> {
    warnings
        .iter()
        .map(|w| warning_json(&w.path, &w.warning))
        .collect()
}
