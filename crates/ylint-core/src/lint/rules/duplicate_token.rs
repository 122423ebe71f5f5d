// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags tokens declared more than once.

use ecow::EcoString;
use indexmap::IndexMap;

use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};
use crate::parse::Location;

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "DuplicateToken",
    description: "Detects tokens defined multiple times",
    severity: Severity::Error,
    correctable: false,
    build: |_options| Box::new(DuplicateToken),
};

struct DuplicateToken;

impl LintRule for DuplicateToken {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut seen: IndexMap<EcoString, Location> = IndexMap::new();
        let mut offenses = Vec::new();

        for decl in &grammar.declarations {
            let Declaration::Token(token_decl) = decl else {
                continue;
            };
            for name in &token_decl.names {
                if let Some(first) = seen.get(name) {
                    offenses.push(Offense::new(
                        DESCRIPTOR.name,
                        DESCRIPTOR.severity,
                        token_decl.location.clone(),
                        format!("Token '{name}' already defined at {first}"),
                    ));
                } else {
                    seen.insert(name.clone(), token_decl.location.clone());
                }
            }
        }

        offenses
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::lint;
    use super::*;

    #[test]
    fn duplicate_across_lines_cites_first_location() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER\n%token NUMBER\n%%\nexpr: NUMBER ;\n");
        assert_eq!(offenses.len(), 1);
        assert_eq!(offenses[0].location.line, 2);
        assert!(offenses[0].message.contains("already defined at test.y:1:1"));
    }

    #[test]
    fn duplicate_within_one_line_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER NUMBER\n%%\nexpr: NUMBER ;\n");
        assert_eq!(offenses.len(), 1);
    }

    #[test]
    fn distinct_tokens_are_fine() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER FLOAT\n%%\nexpr: NUMBER ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn triple_declaration_yields_two_offenses() {
        let offenses = lint(
            &DESCRIPTOR,
            "%token A\n%token A\n%token A\n%%\nexpr: A ;\n",
        );
        assert_eq!(offenses.len(), 2);
    }
}
