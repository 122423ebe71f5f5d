// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags `%prec` overrides naming tokens with no declared precedence.

use ecow::EcoString;

use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "PrecImprovement",
    description: "Suggests improvements for %prec directive usage",
    severity: Severity::Info,
    correctable: false,
    build: |_options| Box::new(PrecImprovement),
};

struct PrecImprovement;

impl LintRule for PrecImprovement {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let declared: Vec<&EcoString> = grammar
            .declarations
            .iter()
            .filter_map(|decl| match decl {
                Declaration::Precedence(prec) => Some(prec.tokens.iter()),
                _ => None,
            })
            .flatten()
            .collect();

        let mut offenses = Vec::new();
        for rule in &grammar.rules {
            for alt in rule.alternatives() {
                let Some(prec) = &alt.prec else {
                    continue;
                };
                if declared.iter().any(|token| *token == prec) {
                    continue;
                }
                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    alt.location.clone(),
                    format!(
                        "%prec token '{prec}' is not declared in precedence directives. \
                         Consider adding it to %left, %right, or %nonassoc."
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
    fn undeclared_prec_token_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: '-' expr %prec UMINUS ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0].message.contains("'UMINUS'"));
    }

    #[test]
    fn declared_prec_token_is_fine() {
        let offenses = lint(
            &DESCRIPTOR,
            "%nonassoc UMINUS\n%%\nexpr: '-' expr %prec UMINUS ;\n",
        );
        assert!(offenses.is_empty());
    }

    #[test]
    fn alternatives_without_prec_are_ignored() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER ;\n");
        assert!(offenses.is_empty());
    }
}
