// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags nonterminals that are defined but never referenced.
//!
//! Builds its own usage counts rather than reusing the shared symbol
//! table: references inside `%rule` declarations and parameterized-call
//! arguments count as uses, and the start symbol is always considered
//! used.

use crate::analyse::SymbolTable;
use crate::ast::{Alternative, Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "UnusedNonterminal",
    description: "Detects nonterminals that are defined but never referenced",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(UnusedNonterminal),
};

struct UnusedNonterminal;

impl LintRule for UnusedNonterminal {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut table = SymbolTable::new();
        for rule in &grammar.rules {
            table.add_nonterminal(rule.name().clone(), rule.location().clone());
        }

        for rule in &grammar.rules {
            for alt in rule.alternatives() {
                record_uses(&mut table, alt);
            }
        }
        for decl in &grammar.declarations {
            if let Declaration::Rule(rule) = decl {
                for alt in rule.alternatives() {
                    record_uses(&mut table, alt);
                }
            }
        }

        let start = grammar.start_symbol().cloned();
        if let Some(start) = &start {
            table.use_nonterminal(start);
        }

        let unused: Vec<_> = table
            .unused_nonterminals()
            .into_iter()
            .cloned()
            .collect();

        unused
            .into_iter()
            .filter(|name| start.as_ref() != Some(name))
            .filter_map(|name| grammar.rules.iter().find(|rule| *rule.name() == name))
            .map(|rule| {
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!("Nonterminal '{}' is defined but never used", rule.name()),
                )
            })
            .collect()
    }
}

fn record_uses(table: &mut SymbolTable, alt: &Alternative) {
    for symbol in &alt.symbols {
        if symbol.is_nonterminal() {
            table.use_nonterminal(&symbol.name);
        }
        if let Some(args) = &symbol.arguments {
            for arg in args {
                if arg.is_nonterminal() {
                    table.use_nonterminal(&arg.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::super::testing::lint;
    use super::*;

    #[test]
    fn unreferenced_nonterminal_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER ;\nunused: IDENT ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0].message.contains("'unused'"));
    }

    #[test]
    fn start_symbol_is_exempt() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn call_arguments_count_as_uses() {
        let offenses = lint(&DESCRIPTOR, indoc! {"
            %rule list(X): X | list(X) ',' X ;
            %%
            program: list(item) ;
            item: NUMBER ;
        "});
        assert!(offenses.is_empty());
    }

    #[test]
    fn references_in_rule_declarations_count() {
        let offenses = lint(&DESCRIPTOR, indoc! {"
            %rule wrapped(X): open X close ;
            %%
            program: wrapped(NUMBER) ;
            open: LPAREN ;
            close: RPAREN ;
        "});
        assert!(offenses.is_empty());
    }
}
