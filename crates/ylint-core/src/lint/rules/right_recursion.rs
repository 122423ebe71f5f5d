// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags right-recursive rules, which grow the LR parser stack linearly.

use crate::analyse::recursion;
use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "RightRecursion",
    description: "Detects right recursion (consider converting to left recursion for LR parsers)",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(RightRecursion),
};

struct RightRecursion;

impl LintRule for RightRecursion {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let report = recursion::analyze(grammar);

        report
            .right_recursive
            .iter()
            .filter_map(|name| grammar.rules.iter().find(|rule| rule.name() == name))
            .map(|rule| {
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!(
                        "Rule '{}' uses right recursion (consider left recursion for better LR parser performance)",
                        rule.name()
                    ),
                )
            })
            .collect()
    }
}
