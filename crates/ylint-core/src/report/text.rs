// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Human-readable terminal report, grouped by file.

use ecow::EcoString;
use indexmap::IndexMap;

use crate::lint::{Offense, Severity};

use super::Reporter;

/// Plain-text reporter:
///
/// ```text
/// grammar.y
///   3:5: warning: [UnusedToken] Token 'FLOAT' is declared but never used
///
/// 1 warning(s) found
/// ```
pub struct TextReporter;

impl Reporter for TextReporter {
    fn report(&self, offenses: &[Offense]) -> String {
        if offenses.is_empty() {
            return "✓ No offenses detected".to_string();
        }

        let mut by_file: IndexMap<&EcoString, Vec<&Offense>> = IndexMap::new();
        for offense in offenses {
            by_file.entry(&offense.location.file).or_default().push(offense);
        }

        let mut output = Vec::new();
        for (file, mut file_offenses) in by_file {
            file_offenses.sort_by_key(|o| (o.location.line, o.location.column));
            output.push(String::new());
            output.push(file.to_string());
            for offense in file_offenses {
                output.push(format!(
                    "  {}:{}: {}: [{}] {}",
                    offense.location.line,
                    offense.location.column,
                    offense.severity,
                    offense.rule_name,
                    offense.message
                ));
            }
        }

        output.push(String::new());
        output.push(summary(offenses));
        output.join("\n")
    }
}

fn summary(offenses: &[Offense]) -> String {
    let mut parts = Vec::new();
    // Most severe first.
    for severity in Severity::ALL.iter().rev() {
        let count = offenses.iter().filter(|o| o.severity == *severity).count();
        if count == 0 {
            continue;
        }
        let label = match severity {
            Severity::Error => format!("{count} error(s)"),
            Severity::Warning => format!("{count} warning(s)"),
            Severity::Convention => format!("{count} convention(s)"),
            Severity::Info => format!("{count} info"),
        };
        parts.push(label);
    }
    format!("{} found", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Location;

    fn offense(file: &str, line: u32, column: u32, severity: Severity) -> Offense {
        Offense::new(
            "UnusedToken",
            severity,
            Location::new(file, line, column, 1),
            "Token 'X' is declared but never used",
        )
    }

    #[test]
    fn empty_report_is_a_success_message() {
        assert_eq!(TextReporter.report(&[]), "✓ No offenses detected");
    }

    #[test]
    fn offenses_group_by_file_and_sort_by_position() {
        let offenses = vec![
            offense("b.y", 5, 1, Severity::Warning),
            offense("a.y", 2, 7, Severity::Error),
            offense("b.y", 1, 3, Severity::Warning),
        ];
        let report = TextReporter.report(&offenses);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[1], "b.y");
        assert!(lines[2].starts_with("  1:3:"));
        assert!(lines[3].starts_with("  5:1:"));
        assert_eq!(lines[5], "a.y");
        assert!(lines[6].starts_with("  2:7:"));
    }

    #[test]
    fn summary_counts_by_severity_most_severe_first() {
        let offenses = vec![
            offense("a.y", 1, 1, Severity::Warning),
            offense("a.y", 2, 1, Severity::Error),
            offense("a.y", 3, 1, Severity::Warning),
        ];
        let report = TextReporter.report(&offenses);
        assert!(report.ends_with("1 error(s), 2 warning(s) found"));
    }
}
