// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ylint fmt` — reformat grammar files into the canonical layout.
//!
//! `ylint fmt <path>...` parses each grammar file, renders it through
//! the formatter, and writes the result back in place. Files that are
//! already formatted are left unchanged.
//!
//! With `--check`, no files are written; files that would change are
//! listed and the command exits non-zero. `--diff` additionally prints
//! a unified diff for each of them. Files with parse errors are skipped
//! with a warning (formatting a broken file could corrupt it), and fail
//! a `--check` run.

use std::path::Path;

use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, Result};
use similar::TextDiff;
use ylint_core::config::Config;
use ylint_core::format::format;
use ylint_core::parse::{lex, parse};

use crate::commands::collect_grammar_files;

/// Format (or check formatting of) the given paths.
pub fn run_fmt(
    paths: &[String],
    check: bool,
    diff: bool,
    config_path: Option<&str>,
) -> Result<()> {
    let config = Config::load(config_path.map(Path::new))?;
    let files = collect_grammar_files(paths, &config)?;
    let write = !(check || diff);

    let mut changed_files: Vec<Utf8PathBuf> = Vec::new();
    let mut skipped_files: Vec<Utf8PathBuf> = Vec::new();

    for file in &files {
        let original = std::fs::read_to_string(file.as_std_path())
            .into_diagnostic()
            .map_err(|e| miette::miette!("Failed to read '{}': {e}", file))?;

        tracing::debug!(file = %file, "formatting");

        let tokens = lex(&original, file.as_str());
        let grammar = match parse(tokens) {
            Ok(grammar) => grammar,
            Err(error) => {
                eprintln!("warning: skipping '{file}' ({error})");
                skipped_files.push(file.clone());
                continue;
            }
        };

        let formatted = format(&grammar, &config.formatter);

        // Ensure formatted output ends with a newline.
        let formatted = if formatted.is_empty() || formatted.ends_with('\n') {
            formatted
        } else {
            format!("{formatted}\n")
        };

        if formatted == original {
            continue;
        }

        changed_files.push(file.clone());

        if diff {
            print_unified_diff(file.as_str(), &original, &formatted);
        } else if check {
            println!("{file} would be reformatted");
        }
        if write {
            std::fs::write(file.as_std_path(), &formatted)
                .into_diagnostic()
                .map_err(|e| miette::miette!("Failed to write '{}': {e}", file))?;
        }
    }

    if !write {
        let mut parts: Vec<String> = Vec::new();
        if !changed_files.is_empty() {
            let count = changed_files.len();
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} file{plural} would be reformatted"));
        }
        if !skipped_files.is_empty() {
            let count = skipped_files.len();
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} file{plural} could not be checked (parse errors)"));
        }
        if !parts.is_empty() {
            miette::bail!("{}", parts.join("; "));
        }
    }

    Ok(())
}

/// Print a unified diff between `original` and `formatted` for the given
/// file path. Output goes to stdout so it can be captured and piped.
fn print_unified_diff(path: &str, original: &str, formatted: &str) {
    let diff = TextDiff::from_lines(original, formatted);
    print!(
        "{}",
        diff.unified_diff()
            .header(&format!("a/{path}"), &format!("b/{path}"))
    );
}
