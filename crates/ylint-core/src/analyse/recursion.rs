// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursion-shape analysis for grammar rules.
//!
//! Classifies each rule as left-recursive (first right-hand-side symbol
//! derives the rule itself) or right-recursive (last symbol does). LR
//! generators prefer left recursion for constant stack depth; LL-style
//! consumers need the opposite, so both shapes are reported and the lint
//! layer decides which one matters.
//!
//! Indirect left recursion is detected through one intermediate rule
//! only (`a -> b ...`, `b -> a ...`). Longer cycles need a transitive
//! closure over first-symbol edges and are out of scope here.

use ecow::EcoString;

use crate::ast::{GrammarFile, RuleLike};

/// The left/right recursive rule names of a grammar, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecursionReport {
    pub left_recursive: Vec<EcoString>,
    pub right_recursive: Vec<EcoString>,
}

impl RecursionReport {
    #[must_use]
    pub fn is_left_recursive(&self, rule_name: &str) -> bool {
        self.left_recursive.iter().any(|name| name == rule_name)
    }

    #[must_use]
    pub fn is_right_recursive(&self, rule_name: &str) -> bool {
        self.right_recursive.iter().any(|name| name == rule_name)
    }
}

/// Analyzes the rules section of `grammar` for recursion shapes.
#[must_use]
pub fn analyze(grammar: &GrammarFile) -> RecursionReport {
    let mut report = RecursionReport::default();

    for rule in &grammar.rules {
        check_left_recursion(grammar, rule, &mut report);
        check_right_recursion(rule, &mut report);
    }

    report
}

fn check_left_recursion(grammar: &GrammarFile, rule: &RuleLike, report: &mut RecursionReport) {
    for alt in rule.alternatives() {
        let Some(first) = alt.symbols.first() else {
            continue;
        };
        if first.is_nonterminal()
            && first.name == *rule.name()
            && !report.is_left_recursive(rule.name())
        {
            report.left_recursive.push(rule.name().clone());
        }
    }

    check_indirect_left_recursion(grammar, rule, report);
}

fn check_right_recursion(rule: &RuleLike, report: &mut RecursionReport) {
    for alt in rule.alternatives() {
        let Some(last) = alt.symbols.last() else {
            continue;
        };
        if last.is_nonterminal()
            && last.name == *rule.name()
            && !report.is_right_recursive(rule.name())
        {
            report.right_recursive.push(rule.name().clone());
        }
    }
}

/// Two-hop check: `rule -> other ...` where some alternative of `other`
/// starts with `rule`.
fn check_indirect_left_recursion(
    grammar: &GrammarFile,
    rule: &RuleLike,
    report: &mut RecursionReport,
) {
    for alt in rule.alternatives() {
        let Some(first) = alt.symbols.first() else {
            continue;
        };
        if !first.is_nonterminal() {
            continue;
        }
        let Some(other) = grammar.rules.iter().find(|r| *r.name() == first.name) else {
            continue;
        };

        for other_alt in other.alternatives() {
            let Some(other_first) = other_alt.symbols.first() else {
                continue;
            };
            if other_first.is_nonterminal()
                && other_first.name == *rule.name()
                && !report.is_left_recursive(rule.name())
            {
                report.left_recursive.push(rule.name().clone());
            }
        }
    }
}
