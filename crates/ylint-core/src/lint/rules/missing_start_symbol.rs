// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags grammars where no start symbol can be determined at all.
//!
//! Without `%start` the first rule is the conventional default, so this
//! only fires when there is neither a declaration nor any rule to fall
//! back on.

use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};
use crate::parse::Location;

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "MissingStartSymbol",
    description: "Detects missing %start declaration with ambiguous default",
    severity: Severity::Error,
    correctable: false,
    build: |_options| Box::new(MissingStartSymbol),
};

struct MissingStartSymbol;

impl LintRule for MissingStartSymbol {
    fn check(&self, grammar: &GrammarFile, ctx: &LintContext<'_>) -> Vec<Offense> {
        let has_start = grammar
            .declarations
            .iter()
            .any(|decl| matches!(decl, Declaration::Start(_)));

        if has_start || !grammar.rules.is_empty() {
            return Vec::new();
        }

        vec![Offense::new(
            DESCRIPTOR.name,
            DESCRIPTOR.severity,
            Location::start_of(ctx.file),
            "No %start declaration and no rules defined",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::lint;
    use super::*;

    #[test]
    fn empty_grammar_is_flagged_at_file_start() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER\n%%\n");
        assert_eq!(offenses.len(), 1);
        assert_eq!(offenses[0].location.line, 1);
        assert_eq!(offenses[0].location.column, 1);
    }

    #[test]
    fn first_rule_serves_as_default_start() {
        let offenses = lint(&DESCRIPTOR, "%%\nexpr: NUMBER ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn explicit_start_declaration_is_fine() {
        let offenses = lint(&DESCRIPTOR, "%start expr\n%%\n");
        assert!(offenses.is_empty());
    }
}
