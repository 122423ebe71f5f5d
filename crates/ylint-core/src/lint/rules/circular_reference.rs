// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags cycles of pure nonterminal rules that can never terminate.
//!
//! A rule cycle is only fatal when no alternative along it can consume a
//! terminal or derive empty: `a: b ; b: a ;` loops forever, while
//! `expr: expr '+' term | term ;` is ordinary recursion and stays quiet.

use std::collections::{HashMap, HashSet};

use ecow::EcoString;

use crate::ast::{Alternative, GrammarFile, RuleLike, Symbol};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "CircularReference",
    description: "Detects infinite recursion in grammar rules",
    severity: Severity::Error,
    correctable: false,
    build: |_options| Box::new(CircularReference),
};

struct CircularReference;

impl LintRule for CircularReference {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut walker = Walker::new(grammar);
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            if walker.visited.contains(rule.name()) {
                continue;
            }
            if walker.has_cycle(rule.name()) {
                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!("Rule '{}' is part of a circular reference", rule.name()),
                ));
            }
        }

        offenses
    }
}

struct Walker<'a> {
    rules: HashMap<&'a EcoString, &'a RuleLike>,
    visited: HashSet<EcoString>,
    rec_stack: HashSet<EcoString>,
}

impl<'a> Walker<'a> {
    fn new(grammar: &'a GrammarFile) -> Self {
        Self {
            rules: grammar.rules.iter().map(|rule| (rule.name(), rule)).collect(),
            visited: HashSet::new(),
            rec_stack: HashSet::new(),
        }
    }

    /// DFS over first-symbol edges of pure-nonterminal alternatives.
    /// On a positive answer the recursion stack is intentionally left in
    /// place, so every rule on the cycle reports when its own turn comes.
    fn has_cycle(&mut self, rule_name: &EcoString) -> bool {
        if self.visited.contains(rule_name) {
            return false;
        }
        if self.rec_stack.contains(rule_name) {
            return self.pure_nonterminal_cycle(rule_name);
        }

        self.rec_stack.insert(rule_name.clone());

        if let Some(rule) = self.rules.get(rule_name).copied() {
            for alt in rule.alternatives() {
                if has_terminal_or_empty(alt) {
                    continue;
                }
                let Some(first) = alt.symbols.first() else {
                    continue;
                };
                if first.is_nonterminal() && self.has_cycle(&first.name) {
                    return true;
                }
            }
        }

        self.rec_stack.remove(rule_name);
        self.visited.insert(rule_name.clone());
        false
    }

    /// The cycle is fatal only if every alternative of `rule_name` is a
    /// non-empty run of nonterminals.
    fn pure_nonterminal_cycle(&self, rule_name: &EcoString) -> bool {
        let Some(rule) = self.rules.get(rule_name) else {
            return false;
        };
        rule.alternatives()
            .iter()
            .all(|alt| !has_terminal_or_empty(alt))
    }
}

fn has_terminal_or_empty(alt: &Alternative) -> bool {
    alt.is_epsilon() || alt.symbols.iter().any(Symbol::is_terminal)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::super::testing::lint;
    use super::*;

    #[test]
    fn mutual_pure_cycle_flags_both_rules() {
        let offenses = lint(&DESCRIPTOR, "%%\na: b ;\nb: a ;\n");
        assert_eq!(offenses.len(), 2);
        assert!(offenses[0].message.contains("'a'"));
        assert!(offenses[1].message.contains("'b'"));
    }

    #[test]
    fn recursion_through_terminals_is_fine() {
        let offenses = lint(&DESCRIPTOR, indoc! {"
            %%
            expr: expr '+' term | term ;
            term: NUMBER ;
        "});
        assert!(offenses.is_empty());
    }

    #[test]
    fn cycle_with_escape_alternative_is_fine() {
        // `a` can derive a terminal, so the cycle terminates.
        let offenses = lint(&DESCRIPTOR, "%%\na: b | NUMBER ;\nb: a ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn self_loop_without_escape_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%%\na: a ;\n");
        assert_eq!(offenses.len(), 1);
    }
}
