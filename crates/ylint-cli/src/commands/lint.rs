// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ylint lint` — run lint rules over grammar files.
//!
//! Each file goes through the full pipeline: read, lex, parse, build the
//! symbol table, run the enabled rules. A file that fails to parse does
//! not abort the batch; the parse failure is reported as a `SyntaxError`
//! offense alongside everything else. With `--fix`, correctable offenses
//! are applied and the file rewritten when its content changed.

use std::path::Path;

use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, Result};
use ylint_core::analyse::build_symbol_table;
use ylint_core::config::Config;
use ylint_core::format::format;
use ylint_core::lint::{
    all_rules, apply_fixes, enabled_rules, find_rule, run_rules, syntax_error_offense, Fix,
    LintContext, Offense, RuleDescriptor, Severity,
};
use ylint_core::parse::{lex, parse};
use ylint_core::report::OutputFormat;

use crate::commands::collect_grammar_files;

/// Lint the given paths and print a report in the chosen format.
///
/// Returns an error (exit 1) when any error-severity offense is found,
/// including syntax errors.
pub fn run_lint(
    paths: &[String],
    config_path: Option<&str>,
    format: OutputFormat,
    fix: bool,
    only: &[String],
    except: &[String],
) -> Result<()> {
    let config = Config::load(config_path.map(Path::new))?;
    let files = collect_grammar_files(paths, &config)?;
    let descriptors = select_rules(&config, only, except)?;

    let mut offenses = Vec::new();
    for file in &files {
        lint_file(file, &config, &descriptors, fix, &mut offenses)?;
    }

    let output = format.reporter().report(&offenses);
    if !output.is_empty() {
        println!("{output}");
    }

    let errors = offenses
        .iter()
        .filter(|o| o.severity == Severity::Error)
        .count();
    if errors > 0 {
        miette::bail!("{errors} error(s) found");
    }
    Ok(())
}

/// Resolves `--only`/`--except` against the registry. `--only` selects
/// from all rules regardless of config-level disables; `--except` is
/// applied last.
fn select_rules(
    config: &Config,
    only: &[String],
    except: &[String],
) -> Result<Vec<&'static RuleDescriptor>> {
    for name in only.iter().chain(except) {
        if find_rule(name).is_none() {
            miette::bail!("unknown rule '{name}'");
        }
    }

    let mut rules: Vec<&'static RuleDescriptor> = if only.is_empty() {
        enabled_rules(config)
    } else {
        all_rules()
            .iter()
            .filter(|rule| only.iter().any(|name| name == rule.name))
            .collect()
    };
    rules.retain(|rule| !except.iter().any(|name| name == rule.name));
    Ok(rules)
}

fn lint_file(
    file: &Utf8PathBuf,
    config: &Config,
    descriptors: &[&'static RuleDescriptor],
    fix: bool,
    offenses: &mut Vec<Offense>,
) -> Result<()> {
    let source = std::fs::read_to_string(file.as_std_path())
        .into_diagnostic()
        .map_err(|e| miette::miette!("Failed to read '{}': {e}", file))?;

    tracing::debug!(file = %file, "linting");

    let tokens = lex(&source, file.as_str());
    let mut grammar = match parse(tokens) {
        Ok(grammar) => grammar,
        Err(error) => {
            offenses.push(syntax_error_offense(&error));
            return Ok(());
        }
    };

    let table = build_symbol_table(&grammar);
    let ctx = LintContext {
        symbol_table: &table,
        source: &source,
        file: file.as_str(),
    };
    let mut file_offenses = run_rules(descriptors, config, &grammar, &ctx);
    file_offenses.sort_by_key(|o| (o.location.line, o.location.column));

    if fix {
        let has_ast_fix = file_offenses
            .iter()
            .any(|o| matches!(o.fix, Some(Fix::RemoveAction { .. })));
        let mut new_source = source.clone();
        let applied = apply_fixes(&file_offenses, &mut grammar, &mut new_source);
        if applied > 0 {
            // Fixes that edit the AST are materialized by reformatting.
            if has_ast_fix {
                new_source = format(&grammar, &config.formatter);
                if !new_source.ends_with('\n') {
                    new_source.push('\n');
                }
            }
            if new_source != source {
                std::fs::write(file.as_std_path(), &new_source)
                    .into_diagnostic()
                    .map_err(|e| miette::miette!("Failed to write '{}': {e}", file))?;
                eprintln!("fixed {applied} offense(s) in {file}");
            }
        }
    }

    offenses.extend(file_offenses);
    Ok(())
}
