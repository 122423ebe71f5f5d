// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Enforces a naming convention for nonterminals (snake_case by default).

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::GrammarFile;
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "NonterminalNaming",
    description: "Nonterminals should follow snake_case naming convention",
    severity: Severity::Convention,
    correctable: false,
    build: |options| {
        let pattern = options
            .get_str("pattern")
            .and_then(|p| Regex::new(p).ok())
            .unwrap_or_else(|| DEFAULT_PATTERN.clone());
        Box::new(NonterminalNaming { pattern })
    },
};

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid pattern"));

struct NonterminalNaming {
    pattern: Regex,
}

impl LintRule for NonterminalNaming {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for rule in &grammar.rules {
            if self.pattern.is_match(rule.name()) {
                continue;
            }
            offenses.push(Offense::new(
                DESCRIPTOR.name,
                DESCRIPTOR.severity,
                rule.location().clone(),
                format!(
                    "Nonterminal '{}' should match pattern {}",
                    rule.name(),
                    self.pattern.as_str()
                ),
            ));
        }

        offenses
    }
}
