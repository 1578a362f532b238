mod commands;
mod config;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use webcontent_core::{ParseError, Warning};

use crate::commands::{cmd_check, cmd_parse, cmd_scan, cmd_watch};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Parser and content indexer for .webcontent documents.
#[derive(Parser)]
#[command(
    name = "webcontent",
    version,
    about = "Parser and content indexer for .webcontent documents"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .webcontent file and print the document
    Parse {
        /// Path to the .webcontent file
        file: PathBuf,
    },

    /// Check that .webcontent files parse without errors
    Check {
        /// Paths to the .webcontent files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Index a content folder once and print routes and script files
    Scan {
        #[command(flatten)]
        index: IndexArgs,
    },

    /// Index a content folder and refresh it periodically until interrupted
    Watch {
        #[command(flatten)]
        index: IndexArgs,
        /// Seconds between refreshes (overrides the config file)
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Options shared by the indexing subcommands.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct IndexArgs {
    /// TOML config file with an [index] section
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Folder containing the .webcontent files
    #[arg(long)]
    pub content_folder: Option<String>,
    /// Directory that replaces a leading `~/` in the content folder and script files
    #[arg(long)]
    pub base_route: Option<PathBuf>,
    /// Stop at the first document that fails instead of skipping it
    #[arg(long)]
    pub abort_on_error: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => {
            cmd_parse(&file, cli.output, cli.quiet);
        }
        Commands::Check { files } => {
            cmd_check(&files, cli.output, cli.quiet);
        }
        Commands::Scan { index } => {
            cmd_scan(&index, cli.output, cli.quiet);
        }
        Commands::Watch { index, interval } => {
            cmd_watch(&index, interval, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report a parse failure for `file`. JSON errors are always emitted so
/// tooling can rely on them; text errors respect `--quiet`.
pub(crate) fn report_parse_error(file: &Path, err: &ParseError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let mut value = err.to_json_value();
            value["file"] = serde_json::Value::String(file.display().to_string());
            let err_json = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", err));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}: {}", file.display(), err);
            }
        }
    }
}

pub(crate) fn report_warnings(file: &Path, warnings: &[Warning], output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    for warning in warnings {
        match output {
            OutputFormat::Text => eprintln!("warning: {}: {}", file.display(), warning),
            OutputFormat::Json => eprintln!("{}", warning_json(file, warning)),
        }
    }
}

pub(crate) fn warning_json(file: &Path, warning: &Warning) -> serde_json::Value {
    let mut value = serde_json::to_value(warning)
        .unwrap_or_else(|_| serde_json::json!({ "code": "warning" }));
    value["file"] = serde_json::Value::String(file.display().to_string());
    value["message"] = serde_json::Value::String(warning.to_string());
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use webcontent_core::Position;

    #[test]
    fn warning_json_carries_code_position_and_file() {
        let warning = Warning::ReservedKeywordWithColon {
            keyword: "title".to_string(),
            position: Position::new(2, 4),
        };
        let value = warning_json(Path::new("pages/home.webcontent"), &warning);
        assert_eq!(value["code"], "reserved_keyword_with_colon");
        assert_eq!(value["keyword"], "title");
        assert_eq!(value["position"], serde_json::json!({ "line": 2, "column": 4 }));
        assert_eq!(value["file"], "pages/home.webcontent");
        assert!(value["message"].as_str().unwrap().contains("'title' at 2:4"));
    }
}
