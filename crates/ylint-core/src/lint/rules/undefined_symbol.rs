// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags references to symbols declared in neither namespace.

use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "UndefinedSymbol",
    description: "Detects references to undeclared tokens or nonterminals",
    severity: Severity::Error,
    correctable: false,
    build: |_options| Box::new(UndefinedSymbol),
};

struct UndefinedSymbol;

impl LintRule for UndefinedSymbol {
    fn check(&self, grammar: &GrammarFile, ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            for alt in rule.alternatives() {
                for symbol in &alt.symbols {
                    if ctx.symbol_table.is_declared(&symbol.name) {
                        continue;
                    }
                    offenses.push(Offense::new(
                        DESCRIPTOR.name,
                        DESCRIPTOR.severity,
                        symbol.location.clone(),
                        format!("Undefined symbol '{}'", symbol.name),
                    ));
                }
            }
        }

        offenses
    }
}
