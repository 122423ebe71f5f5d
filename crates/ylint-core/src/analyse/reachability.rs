// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Reachability analysis over the rule dependency graph.
//!
//! A rule is reachable if it can be derived from the start symbol (the
//! `%start` declaration, falling back to the first rule). Dependencies
//! include nonterminal references on any right-hand side and the
//! arguments of parameterized-rule calls like `list(expr)`.

use std::collections::{HashMap, HashSet};

use ecow::EcoString;

use crate::ast::{Alternative, GrammarFile};

/// Reachability analyzer for one grammar.
pub struct Reachability<'a> {
    grammar: &'a GrammarFile,
    dependencies: HashMap<EcoString, HashSet<EcoString>>,
    reachable: HashSet<EcoString>,
}

impl<'a> Reachability<'a> {
    #[must_use]
    pub fn new(grammar: &'a GrammarFile) -> Self {
        Self {
            grammar,
            dependencies: HashMap::new(),
            reachable: HashSet::new(),
        }
    }

    /// Computes the reachable set from `start_symbol`, defaulting to the
    /// grammar's own start symbol.
    pub fn analyze(&mut self, start_symbol: Option<&EcoString>) -> &HashSet<EcoString> {
        self.build_dependency_graph();
        let start = start_symbol
            .cloned()
            .or_else(|| self.grammar.start_symbol().cloned());
        if let Some(start) = start {
            self.mark_reachable(start);
        }
        &self.reachable
    }

    /// Rules-section rules not reached from the start symbol, in
    /// definition order. Call after [`analyze`](Self::analyze).
    #[must_use]
    pub fn unreachable_rules(&self) -> Vec<&EcoString> {
        let mut seen = HashSet::new();
        self.grammar
            .rules
            .iter()
            .map(|rule| rule.name())
            .filter(|name| !self.reachable.contains(name.as_str()) && seen.insert(name.clone()))
            .collect()
    }

    fn build_dependency_graph(&mut self) {
        for rule in self.grammar.all_rules() {
            for alt in rule.alternatives() {
                record_dependencies(&mut self.dependencies, rule.name(), alt);
            }
        }
    }

    /// Iterative DFS; recursion depth would otherwise scale with grammar
    /// size.
    fn mark_reachable(&mut self, start: EcoString) {
        let mut stack = vec![start];
        while let Some(name) = stack.pop() {
            if !self.reachable.insert(name.clone()) {
                continue;
            }
            if let Some(deps) = self.dependencies.get(&name) {
                stack.extend(deps.iter().cloned());
            }
        }
    }
}

fn record_dependencies(
    dependencies: &mut HashMap<EcoString, HashSet<EcoString>>,
    rule_name: &EcoString,
    alt: &Alternative,
) {
    for symbol in &alt.symbols {
        if symbol.is_nonterminal() {
            dependencies
                .entry(rule_name.clone())
                .or_default()
                .insert(symbol.name.clone());
        }
        if let Some(args) = &symbol.arguments {
            for arg in args {
                if arg.is_nonterminal() {
                    dependencies
                        .entry(rule_name.clone())
                        .or_default()
                        .insert(arg.name.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::parse::{lex, parse};

    fn grammar(source: &str) -> GrammarFile {
        parse(lex(source, "test.y")).unwrap()
    }

    fn unreachable_names(source: &str) -> Vec<String> {
        let grammar = grammar(source);
        let mut analysis = Reachability::new(&grammar);
        analysis.analyze(None);
        analysis
            .unreachable_rules()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn all_rules_reachable_from_first_rule() {
        let unreachable = unreachable_names(indoc! {"
            %%
            expr: expr '+' term | term ;
            term: NUMBER ;
        "});
        assert!(unreachable.is_empty());
    }

    #[test]
    fn orphan_rule_is_unreachable() {
        let unreachable = unreachable_names(indoc! {"
            %%
            expr: NUMBER ;
            orphan: IDENT ;
        "});
        assert_eq!(unreachable, ["orphan"]);
    }

    #[test]
    fn start_declaration_overrides_first_rule() {
        let unreachable = unreachable_names(indoc! {"
            %start program
            %%
            expr: NUMBER ;
            program: stmt ;
            stmt: expr ;
        "});
        assert!(unreachable.is_empty());
    }

    #[test]
    fn parameterized_call_arguments_count_as_dependencies() {
        let unreachable = unreachable_names(indoc! {"
            %rule list(X): X | list(X) ',' X ;
            %%
            program: list(item) ;
            item: NUMBER ;
        "});
        assert!(unreachable.is_empty());
    }

    #[test]
    fn transitively_orphaned_rules_are_all_flagged() {
        let unreachable = unreachable_names(indoc! {"
            %%
            expr: NUMBER ;
            dead: deader ;
            deader: IDENT ;
        "});
        assert_eq!(unreachable, ["dead", "deader"]);
    }

    #[test]
    fn cycle_among_unreachable_rules_stays_unreachable() {
        let unreachable = unreachable_names(indoc! {"
            %%
            expr: NUMBER ;
            a: b ;
            b: a ;
        "});
        assert_eq!(unreachable, ["a", "b"]);
    }
}
