// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Machine-readable JSON report.

use ecow::EcoString;
use indexmap::IndexMap;
use serde_json::json;

use crate::lint::{Offense, Severity};

use super::Reporter;

/// Emits pretty-printed JSON:
///
/// ```json
/// {
///   "summary": { "total": 1, "by_severity": { "warning": 1 } },
///   "files": [
///     {
///       "path": "grammar.y",
///       "offenses": [
///         {
///           "rule": "UnusedToken",
///           "severity": "warning",
///           "message": "Token 'FLOAT' is declared but never used",
///           "location": { "line": 3, "column": 5, "length": 5 },
///           "correctable": false
///         }
///       ]
///     }
///   ]
/// }
/// ```
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, offenses: &[Offense]) -> String {
        let mut by_severity = serde_json::Map::new();
        for severity in Severity::ALL.iter().rev() {
            let count = offenses.iter().filter(|o| o.severity == *severity).count();
            if count > 0 {
                by_severity.insert(severity.to_string(), json!(count));
            }
        }

        let mut by_file: IndexMap<&EcoString, Vec<&Offense>> = IndexMap::new();
        for offense in offenses {
            by_file.entry(&offense.location.file).or_default().push(offense);
        }

        let files: Vec<_> = by_file
            .into_iter()
            .map(|(file, file_offenses)| {
                json!({
                    "path": file.as_str(),
                    "offenses": file_offenses.iter().map(|o| offense_json(o)).collect::<Vec<_>>(),
                })
            })
            .collect();

        let output = json!({
            "summary": {
                "total": offenses.len(),
                "by_severity": by_severity,
            },
            "files": files,
        });

        serde_json::to_string_pretty(&output).unwrap_or_default()
    }
}

fn offense_json(offense: &Offense) -> serde_json::Value {
    json!({
        "rule": offense.rule_name,
        "severity": offense.severity,
        "message": offense.message,
        "location": {
            "line": offense.location.line,
            "column": offense.location.column,
            "length": offense.location.length,
        },
        "correctable": offense.is_correctable(),
    })
}
