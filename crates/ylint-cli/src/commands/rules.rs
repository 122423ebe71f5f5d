// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ylint rules` — list the built-in lint rules.

use miette::{IntoDiagnostic, Result};
use ylint_core::lint::all_rules;

/// Print the rule registry in the chosen format.
pub fn run_rules(format: RulesFormat) -> Result<()> {
    match format {
        RulesFormat::Text => {
            for rule in all_rules() {
                let marker = if rule.correctable {
                    " (autocorrectable)"
                } else {
                    ""
                };
                println!(
                    "{:<24} {:<12} {}{marker}",
                    rule.name, rule.severity, rule.description
                );
            }
        }
        RulesFormat::Json => {
            let rules: Vec<_> = all_rules()
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "name": rule.name,
                        "description": rule.description,
                        "severity": rule.severity,
                        "correctable": rule.correctable,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules).into_diagnostic()?);
        }
    }
    Ok(())
}

/// Output format for the rule listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulesFormat {
    /// Human-readable table (default).
    #[default]
    Text,
    /// Machine-readable JSON array.
    Json,
}

impl std::str::FromStr for RulesFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}
