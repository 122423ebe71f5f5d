// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags (and removes) action blocks with no code in them.

use crate::ast::GrammarFile;
use crate::lint::{Fix, LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "EmptyAction",
    description: "Detects empty action blocks { }",
    severity: Severity::Convention,
    correctable: true,
    build: |_options| Box::new(EmptyAction),
};

struct EmptyAction;

impl LintRule for EmptyAction {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            for (idx, alt) in rule.alternatives().iter().enumerate() {
                let Some(action) = &alt.action else {
                    continue;
                };
                if !is_empty_action(&action.code) {
                    continue;
                }
                offenses.push(
                    Offense::new(
                        DESCRIPTOR.name,
                        DESCRIPTOR.severity,
                        alt.location.clone(),
                        "Empty action block can be removed",
                    )
                    .with_fix(Fix::RemoveAction {
                        rule: rule.name().clone(),
                        alternative: idx,
                    }),
                );
            }
        }

        offenses
    }
}

/// Action payloads keep their braces, so strip one balanced pair before
/// asking whether anything is left.
fn is_empty_action(code: &str) -> bool {
    let trimmed = code.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    inner.trim().is_empty()
}
