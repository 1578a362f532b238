use std::process;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use webcontent_index::{FileSystemProvider, IndexConfig, RefreshSummary, SharedIndex};

use super::scan::{file_warnings_json, report_issues, skipped_json};
use crate::config::resolve_index_config;
use crate::{report_error, IndexArgs, OutputFormat};

pub(crate) fn cmd_watch(args: &IndexArgs, interval: Option<u64>, output: OutputFormat, quiet: bool) {
    let config = match resolve_index_config(args, interval) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    if config.refresh_interval_secs == 0 {
        report_error("refresh interval must be at least one second", output, quiet);
        process::exit(1);
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(&format!("failed to create tokio runtime: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if let Err(msg) = rt.block_on(watch(config, output, quiet)) {
        report_error(&msg, output, quiet);
        process::exit(1);
    }
}

/// Refresh on every tick until Ctrl-C. The first tick fires immediately.
/// A failed refresh is reported and the previous index stays in place.
async fn watch(config: IndexConfig, output: OutputFormat, quiet: bool) -> Result<(), String> {
    let mut ticker = tokio::time::interval(config.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shared = Arc::new(SharedIndex::new(config));

    if !quiet && output == OutputFormat::Text {
        eprintln!(
            "watching {} every {}s (Ctrl-C to stop)",
            shared.config().content_folder_path().display(),
            shared.config().refresh_interval_secs
        );
    }

    // Created once: the listener has to stay registered while a refresh runs.
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            signal = &mut shutdown => {
                return signal.map_err(|e| format!("failed to listen for Ctrl-C: {}", e));
            }
            _ = ticker.tick() => {
                let worker = Arc::clone(&shared);
                let result = tokio::task::spawn_blocking(move || worker.refresh(&FileSystemProvider))
                    .await
                    .map_err(|e| format!("refresh task failed: {}", e))?;
                match result {
                    Ok(summary) => report_refresh(&summary, output, quiet),
                    Err(e) => report_error(
                        &format!("refresh failed, keeping previous index: {}", e),
                        output,
                        quiet,
                    ),
                }
            }
        }
    }
}

fn report_refresh(summary: &RefreshSummary, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "documents": summary.documents,
                    "skipped":   skipped_json(&summary.skipped),
                    "warnings":  file_warnings_json(&summary.warnings),
                })
            );
        }
        OutputFormat::Text => {
            report_issues(&summary.skipped, &summary.warnings, quiet);
            if !quiet {
                println!(
                    "refreshed: {} documents indexed, {} skipped",
                    summary.documents,
                    summary.skipped.len()
                );
            }
        }
    }
}
