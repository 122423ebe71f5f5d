// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! GitHub Actions workflow-command report.

use crate::lint::{Offense, Severity};

use super::Reporter;

/// Emits one `::level file=...,line=...,col=...::message` command per
/// offense, which GitHub renders as inline annotations. Commas in the
/// message are percent-escaped so they survive the property list.
pub struct GithubReporter;

impl Reporter for GithubReporter {
    fn report(&self, offenses: &[Offense]) -> String {
        offenses
            .iter()
            .map(|offense| {
                format!(
                    "::{} file={},line={},col={}::{}",
                    level(offense.severity),
                    offense.location.file,
                    offense.location.line,
                    offense.location.column,
                    offense.message.replace(',', "%2C"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Convention | Severity::Info => "notice",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Location;

    #[test]
    fn annotation_format() {
        let offenses = vec![Offense::new(
            "UndefinedSymbol",
            Severity::Error,
            Location::new("grammar.y", 4, 9, 3),
            "Undefined symbol 'foo'",
        )];
        assert_eq!(
            GithubReporter.report(&offenses),
            "::error file=grammar.y,line=4,col=9::Undefined symbol 'foo'"
        );
    }

    #[test]
    fn commas_in_messages_are_escaped() {
        let offenses = vec![Offense::new(
            "LongRule",
            Severity::Convention,
            Location::new("g.y", 1, 1, 1),
            "one, two",
        )];
        assert_eq!(
            GithubReporter.report(&offenses),
            "::notice file=g.y,line=1,col=1::one%2C two"
        );
    }

    #[test]
    fn convention_and_info_map_to_notice() {
        assert_eq!(level(Severity::Convention), "notice");
        assert_eq!(level(Severity::Info), "notice");
        assert_eq!(level(Severity::Warning), "warning");
    }
}
