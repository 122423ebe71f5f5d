// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags rules with more alternatives than the configured maximum.

use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "LongRule",
    description: "Detects rules with too many alternatives",
    severity: Severity::Convention,
    correctable: false,
    build: |options| {
        Box::new(LongRule {
            max_alternatives: options
                .get_usize("max_alternatives")
                .unwrap_or(DEFAULT_MAX_ALTERNATIVES),
        })
    },
};

const DEFAULT_MAX_ALTERNATIVES: usize = 10;

struct LongRule {
    max_alternatives: usize,
}

impl LintRule for LongRule {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            let count = rule.alternatives().len();
            if count <= self.max_alternatives {
                continue;
            }
            offenses.push(Offense::new(
                DESCRIPTOR.name,
                DESCRIPTOR.severity,
                rule.location().clone(),
                format!(
                    "Rule '{}' has {count} alternatives (max: {}). Consider refactoring.",
                    rule.name(),
                    self.max_alternatives
                ),
            ));
        }

        offenses
    }
}
