// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags left-recursive rules, which LL-style consumers cannot handle.

use crate::analyse::recursion;
use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "LeftRecursion",
    description: "Detects left recursion (may cause issues with some parsers)",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(LeftRecursion),
};

struct LeftRecursion;

impl LintRule for LeftRecursion {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let report = recursion::analyze(grammar);

        report
            .left_recursive
            .iter()
            .filter_map(|name| grammar.rules.iter().find(|rule| rule.name() == name))
            .map(|rule| {
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    rule.location().clone(),
                    format!(
                        "Rule '{}' uses left recursion (consider using right recursion for LL parsers)",
                        rule.name()
                    ),
                )
            })
            .collect()
    }
}
