// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags operator terminals used without a precedence declaration.

use ecow::EcoString;
use indexmap::IndexMap;

use crate::analyse::conflict::is_operator;
use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};
use crate::parse::Location;

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "AmbiguousPrecedence",
    description: "Detects operators without explicit precedence declarations",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(AmbiguousPrecedence),
};

struct AmbiguousPrecedence;

impl LintRule for AmbiguousPrecedence {
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
        for (operator, locations) in collect_operators(grammar) {
            if declared.iter().any(|token| **token == operator) {
                continue;
            }
            for location in locations {
                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    location,
                    format!("Operator '{operator}' does not have an explicit precedence declaration"),
                ));
            }
        }
        offenses
    }
}

/// Operator-shaped terminals and everywhere they appear, in first-use
/// order.
fn collect_operators(grammar: &GrammarFile) -> IndexMap<EcoString, Vec<Location>> {
    let mut operators: IndexMap<EcoString, Vec<Location>> = IndexMap::new();

    for rule in &grammar.rules {
        for alt in rule.alternatives() {
            for symbol in &alt.symbols {
                if symbol.is_terminal() && is_operator(&symbol.name) {
                    operators
                        .entry(symbol.name.clone())
                        .or_default()
                        .push(symbol.location.clone());
                }
            }
        }
    }

    operators
}
