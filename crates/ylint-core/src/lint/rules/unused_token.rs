// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags tokens that are declared but never used in any rule.

use crate::analyse::SymbolTable;
use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "UnusedToken",
    description: "Detects tokens that are declared but never used in rules",
    severity: Severity::Warning,
    correctable: false,
    build: |_options| Box::new(UnusedToken),
};

struct UnusedToken;

impl LintRule for UnusedToken {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut table = SymbolTable::new();
        for decl in &grammar.declarations {
            if let Declaration::Token(token_decl) = decl {
                for name in &token_decl.names {
                    // Duplicates are DuplicateToken's concern.
                    let _ = table.add_token(
                        name.clone(),
                        token_decl.type_tag.clone(),
                        token_decl.location.clone(),
                    );
                }
            }
        }

        for rule in grammar.all_rules() {
            for alt in rule.alternatives() {
                for symbol in &alt.symbols {
                    if symbol.is_terminal() {
                        table.use_token(&symbol.name);
                    }
                }
            }
        }

        let unused: Vec<_> = table.unused_tokens().into_iter().cloned().collect();

        unused
            .into_iter()
            .filter_map(|name| {
                grammar.declarations.iter().find_map(|decl| match decl {
                    Declaration::Token(token_decl) if token_decl.names.contains(&name) => {
                        Some((name.clone(), token_decl))
                    }
                    _ => None,
                })
            })
            .map(|(name, decl)| {
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    decl.location.clone(),
                    format!("Token '{name}' is declared but never used"),
                )
            })
            .collect()
    }
}
