// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Suggests left-factoring alternatives that share a common prefix.

use ecow::EcoString;
use indexmap::IndexMap;

use crate::ast::{Alternative, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "FactorizableRules",
    description: "Suggests factoring rules with common prefixes",
    severity: Severity::Info,
    correctable: false,
    build: |_options| Box::new(FactorizableRules),
};

/// Prefixes shorter than this are not worth factoring.
const MIN_PREFIX_LENGTH: usize = 2;

struct FactorizableRules;

impl LintRule for FactorizableRules {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            if rule.alternatives().len() < 2 {
                continue;
            }

            // Group by first symbol; epsilon alternatives have none and
            // are left out.
            let mut groups: IndexMap<&EcoString, Vec<&Alternative>> = IndexMap::new();
            for alt in rule.alternatives() {
                if let Some(first) = alt.symbols.first() {
                    groups.entry(&first.name).or_default().push(alt);
                }
            }

            for alternatives in groups.values() {
                if alternatives.len() < 2 {
                    continue;
                }
                let prefix_length = common_prefix_length(alternatives);
                if prefix_length < MIN_PREFIX_LENGTH {
                    continue;
                }

                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!(
                        "Rule '{}' has {} alternatives with common prefix \
                         ({prefix_length} symbols). Consider factoring.",
                        rule.name(),
                        alternatives.len()
                    ),
                ));
                break; // one report per rule
            }
        }

        offenses
    }
}

fn common_prefix_length(alternatives: &[&Alternative]) -> usize {
    let min_len = alternatives
        .iter()
        .map(|alt| alt.symbols.len())
        .min()
        .unwrap_or(0);

    (0..min_len)
        .take_while(|&i| {
            let first = &alternatives[0].symbols[i].name;
            alternatives.iter().all(|alt| alt.symbols[i].name == *first)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::super::testing::lint;
    use super::*;

    #[test]
    fn shared_two_symbol_prefix_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\nstmt: IF expr THEN | IF expr ELSE ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0].message.contains("2 alternatives"));
        assert!(offenses[0].message.contains("(2 symbols)"));
    }

    #[test]
    fn single_symbol_prefix_is_too_short() {
        let offenses = lint(&DESCRIPTOR, "%%\nstmt: IF expr | IF stmt_list ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn distinct_first_symbols_are_fine() {
        let offenses = lint(&DESCRIPTOR, "%%\nstmt: IF expr THEN | WHILE expr DO ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn only_one_report_per_rule() {
        let offenses = lint(
            &DESCRIPTOR,
            "%%\nstmt: A B C | A B D | X Y Q | X Y R ;\n",
        );
        assert_eq!(offenses.len(), 1);
    }

    #[test]
    fn epsilon_alternatives_are_ignored() {
        let offenses = lint(&DESCRIPTOR, "%%\nopt: | X ;\n");
        assert!(offenses.is_empty());
    }
}
