use std::path::{Path, PathBuf};
use std::process;

use webcontent_core::{parse_with_diagnostics, ParseError, Warning};

use crate::{report_warnings, warning_json, OutputFormat};

enum Outcome {
    Valid(Vec<Warning>),
    Unreadable(std::io::Error),
    Invalid(ParseError),
}

fn check_file(file: &Path) -> Outcome {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => return Outcome::Unreadable(e),
    };
    match parse_with_diagnostics(&text) {
        Ok(parsed) => Outcome::Valid(parsed.warnings),
        Err(e) => Outcome::Invalid(e),
    }
}

pub(crate) fn cmd_check(files: &[PathBuf], output: OutputFormat, quiet: bool) {
    let mut failed = 0usize;
    let mut results = Vec::new();

    for file in files {
        let outcome = check_file(file);
        if !matches!(outcome, Outcome::Valid(_)) {
            failed += 1;
        }

        match output {
            OutputFormat::Json => results.push(outcome_json(file, &outcome)),
            OutputFormat::Text => match &outcome {
                Outcome::Valid(warnings) => {
                    report_warnings(file, warnings, output, quiet);
                    if !quiet {
                        println!("ok    {}", file.display());
                    }
                }
                Outcome::Unreadable(e) => {
                    if !quiet {
                        println!("FAIL  {}: cannot read file: {}", file.display(), e);
                    }
                }
                Outcome::Invalid(e) => {
                    if !quiet {
                        println!("FAIL  {}: {}", file.display(), e);
                    }
                }
            },
        }
    }

    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "checked": files.len(),
                "failed":  failed,
                "results": results,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string())
            );
        }
        OutputFormat::Text => {
            if !quiet {
                println!();
                println!("{} checked, {} failed", files.len(), failed);
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn outcome_json(file: &Path, outcome: &Outcome) -> serde_json::Value {
    let file_name = file.display().to_string();
    match outcome {
        Outcome::Valid(warnings) => serde_json::json!({
            "file":     file_name,
            "valid":    true,
            "warnings": warnings.iter().map(|w| warning_json(file, w)).collect::<Vec<_>>(),
        }),
        Outcome::Unreadable(e) => serde_json::json!({
            "file":  file_name,
            "valid": false,
            "error": { "code": "io", "message": e.to_string() },
        }),
        Outcome::Invalid(e) => serde_json::json!({
            "file":  file_name,
            "valid": false,
            "error": e.to_json_value(),
        }),
    }
}
