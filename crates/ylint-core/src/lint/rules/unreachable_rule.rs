// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags rules that cannot be derived from the start symbol.

use crate::analyse::Reachability;
use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "UnreachableRule",
    description: "Detects rules that are not reachable from the start symbol",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(UnreachableRule),
};

struct UnreachableRule;

impl LintRule for UnreachableRule {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        if grammar.rules.is_empty() {
            return Vec::new();
        }

        let start = grammar.start_symbol().cloned();
        let mut analysis = Reachability::new(grammar);
        analysis.analyze(start.as_ref());

        let start_name = start.map(|s| s.to_string()).unwrap_or_default();
        let unreachable: Vec<_> = analysis
            .unreachable_rules()
            .into_iter()
            .cloned()
            .collect();

        unreachable
            .into_iter()
            .filter_map(|name| grammar.rules.iter().find(|rule| *rule.name() == name))
            .map(|rule| {
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!(
                        "Rule '{}' is not reachable from start symbol '{start_name}'",
                        rule.name()
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::super::testing::lint;
    use super::*;

    #[test]
    fn orphan_rule_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER ;\norphan: IDENT ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0]
            .message
            .contains("'orphan' is not reachable from start symbol 'expr'"));
    }

    #[test]
    fn start_declaration_determines_the_root() {
        let offenses = lint(&DESCRIPTOR, indoc! {"
            %start program
            %%
            helper: NUMBER ;
            program: helper ;
        "});
        assert!(offenses.is_empty());
    }

    #[test]
    fn empty_rules_section_is_ignored() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER\n%%\n");
        assert!(offenses.is_empty());
    }
}
