use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use webcontent_core::{parse_with_diagnostics, Document, Keyword, Section};

use crate::{report_error, report_parse_error, report_warnings, OutputFormat};

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            report_error(
                &format!("error reading file '{}': {}", file.display(), e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };

    let parsed = match parse_with_diagnostics(&text) {
        Ok(p) => p,
        Err(e) => {
            report_parse_error(file, &e, output, quiet);
            process::exit(1);
        }
    };
    report_warnings(file, &parsed.warnings, output, quiet);

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&parsed.document) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                report_error(&format!("serialization error: {}", e), output, quiet);
                process::exit(1);
            }
        },
        OutputFormat::Text => print!("{}", render_document(&parsed.document)),
    }
}

/// Indented plain-text view of a document.
pub(crate) fn render_document(doc: &Document) -> String {
    let mut out = format!("script file: {}\n", doc.script_file);
    for (name, lang) in &doc.languages {
        out.push_str(&format!("language {}\n", name));
        out.push_str(&format!("  title: {}\n", lang.title));
        out.push_str(&format!("  route: {}\n", lang.route));
        render_section(&mut out, "metadata", &lang.metadata);
        render_section(&mut out, "content", &lang.content);
    }
    out
}

fn render_section(out: &mut String, name: &str, section: &Section) {
    if section.is_empty() {
        return;
    }
    match &section.value {
        Some(value) => out.push_str(&format!("  {}: {}\n", name, value)),
        None => out.push_str(&format!("  {}:\n", name)),
    }
    render_keywords(out, &section.children, 2);
}

fn render_keywords(out: &mut String, keywords: &BTreeMap<String, Keyword>, depth: usize) {
    let indent = "  ".repeat(depth);
    for keyword in keywords.values() {
        match &keyword.value {
            Some(value) => out.push_str(&format!("{}{}: {}\n", indent, keyword.name, value)),
            None => out.push_str(&format!("{}{}:\n", indent, keyword.name)),
        }
        render_keywords(out, &keyword.children, depth + 1);
    }
}
