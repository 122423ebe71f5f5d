// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags epsilon productions alongside non-empty alternatives for review.

use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "RedundantEpsilon",
    description: "Detects potentially redundant epsilon (empty) productions",
    severity: Severity::Info,
    correctable: false,
    build: |_options| Box::new(RedundantEpsilon),
};

struct RedundantEpsilon;

impl LintRule for RedundantEpsilon {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            let has_non_epsilon = rule.alternatives().iter().any(|alt| !alt.is_epsilon());
            if !has_non_epsilon {
                continue;
            }

            for alt in rule.alternatives().iter().filter(|alt| alt.is_epsilon()) {
                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    alt.location.clone(),
                    format!(
                        "Rule '{}' has an epsilon production. Verify if it's necessary \
                         or if the rule can be made optional elsewhere.",
                        rule.name()
                    ),
                ));
            }
        }

        offenses
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::lint;
    use super::*;

    #[test]
    fn epsilon_next_to_content_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\nopt_expr: expr | ;\nexpr: NUMBER ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0].message.contains("'opt_expr'"));
    }

    #[test]
    fn rule_with_only_epsilon_is_ignored() {
        let offenses = lint(&DESCRIPTOR, "%%\nnothing: ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn rule_without_epsilon_is_fine() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER | IDENT ;\n");
        assert!(offenses.is_empty());
    }
}
