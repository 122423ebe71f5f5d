// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Symbol table for declared tokens and nonterminals.
//!
//! Grammars have two namespaces: terminals declared with `%token` and
//! nonterminals defined by rules. The table tracks both, plus per-symbol
//! usage counts and the `type_tag -> names` index used by tag-consistency
//! checks. Insertion order is preserved so diagnostics come out in
//! declaration order.

use ecow::EcoString;
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

use crate::ast::{Declaration, GrammarFile};
use crate::parse::Location;

/// A token was declared more than once.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
#[error("token '{name}' already declared at {previous}")]
#[diagnostic(code(ylint::analyse::duplicate_declaration))]
pub struct DuplicateDeclaration {
    pub name: EcoString,
    /// Where the first declaration was.
    pub previous: Location,
}

/// What the table knows about one declared token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub type_tag: Option<EcoString>,
    pub location: Location,
    pub usage_count: u32,
}

/// What the table knows about one nonterminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonterminalInfo {
    pub location: Location,
    pub usage_count: u32,
}

/// Declared symbols of a grammar, split into the token and nonterminal
/// namespaces.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    tokens: IndexMap<EcoString, TokenInfo>,
    nonterminals: IndexMap<EcoString, NonterminalInfo>,
    types: IndexMap<EcoString, Vec<EcoString>>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a token.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDeclaration`] if `name` was already declared as
    /// a token; the table is left unchanged in that case.
    pub fn add_token(
        &mut self,
        name: impl Into<EcoString>,
        type_tag: Option<EcoString>,
        location: Location,
    ) -> Result<(), DuplicateDeclaration> {
        let name = name.into();
        if let Some(existing) = self.tokens.get(&name) {
            return Err(DuplicateDeclaration {
                name,
                previous: existing.location.clone(),
            });
        }

        if let Some(tag) = &type_tag {
            self.types
                .entry(tag.clone())
                .or_default()
                .push(name.clone());
        }
        self.tokens.insert(
            name,
            TokenInfo {
                type_tag,
                location,
                usage_count: 0,
            },
        );
        Ok(())
    }

    /// Declares a nonterminal. Redeclaration is a no-op: a rule defined
    /// with multiple alternatives is still one nonterminal.
    pub fn add_nonterminal(&mut self, name: impl Into<EcoString>, location: Location) {
        self.nonterminals
            .entry(name.into())
            .or_insert(NonterminalInfo {
                location,
                usage_count: 0,
            });
    }

    /// Records a use of a token. Unknown names are ignored.
    pub fn use_token(&mut self, name: &str) {
        if let Some(info) = self.tokens.get_mut(name) {
            info.usage_count += 1;
        }
    }

    /// Records a use of a nonterminal. Unknown names are ignored.
    pub fn use_nonterminal(&mut self, name: &str) {
        if let Some(info) = self.nonterminals.get_mut(name) {
            info.usage_count += 1;
        }
    }

    #[must_use]
    pub fn is_token(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    #[must_use]
    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.contains_key(name)
    }

    /// True if `name` is declared in either namespace.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.is_token(name) || self.is_nonterminal(name)
    }

    #[must_use]
    pub fn token(&self, name: &str) -> Option<&TokenInfo> {
        self.tokens.get(name)
    }

    #[must_use]
    pub fn nonterminal(&self, name: &str) -> Option<&NonterminalInfo> {
        self.nonterminals.get(name)
    }

    /// Declared tokens with a zero usage count, in declaration order.
    #[must_use]
    pub fn unused_tokens(&self) -> Vec<&EcoString> {
        self.tokens
            .iter()
            .filter(|(_, info)| info.usage_count == 0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Declared nonterminals with a zero usage count, in definition order.
    #[must_use]
    pub fn unused_nonterminals(&self) -> Vec<&EcoString> {
        self.nonterminals
            .iter()
            .filter(|(_, info)| info.usage_count == 0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Names declared in both namespaces.
    #[must_use]
    pub fn duplicate_symbols(&self) -> Vec<&EcoString> {
        self.tokens
            .keys()
            .filter(|name| self.nonterminals.contains_key(name.as_str()))
            .collect()
    }

    /// The `type_tag -> declared names` index.
    #[must_use]
    pub fn types(&self) -> &IndexMap<EcoString, Vec<EcoString>> {
        &self.types
    }
}

/// Builds the symbol table for a parsed grammar: tokens from `%token`
/// declarations, nonterminals from `%rule` declarations and every rule.
/// Duplicate token declarations are ignored here; a lint rule reports
/// them with better context.
#[must_use]
pub fn build_symbol_table(grammar: &GrammarFile) -> SymbolTable {
    let mut table = SymbolTable::new();

    for decl in &grammar.declarations {
        match decl {
            Declaration::Token(token_decl) => {
                for name in &token_decl.names {
                    let _ = table.add_token(
                        name.clone(),
                        token_decl.type_tag.clone(),
                        token_decl.location.clone(),
                    );
                }
            }
            Declaration::Rule(rule) => {
                table.add_nonterminal(rule.name().clone(), rule.location().clone());
            }
            _ => {}
        }
    }

    for rule in &grammar.rules {
        table.add_nonterminal(rule.name().clone(), rule.location().clone());
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{lex, parse};

    fn loc(line: u32) -> Location {
        Location::new("test.y", line, 1, 1)
    }

    #[test]
    fn duplicate_token_is_an_error_citing_first_location() {
        let mut table = SymbolTable::new();
        table.add_token("NUMBER", None, loc(1)).unwrap();
        let err = table.add_token("NUMBER", None, loc(5)).unwrap_err();
        assert_eq!(err.name, "NUMBER");
        assert_eq!(err.previous.line, 1);
        assert_eq!(
            err.to_string(),
            "token 'NUMBER' already declared at test.y:1:1"
        );
    }

    #[test]
    fn nonterminal_redeclaration_is_idempotent() {
        let mut table = SymbolTable::new();
        table.add_nonterminal("expr", loc(3));
        table.add_nonterminal("expr", loc(9));
        assert_eq!(table.nonterminal("expr").unwrap().location.line, 3);
    }

    #[test]
    fn same_name_in_both_namespaces_is_allowed() {
        let mut table = SymbolTable::new();
        table.add_token("expr", None, loc(1)).unwrap();
        table.add_nonterminal("expr", loc(2));
        assert!(table.is_token("expr"));
        assert!(table.is_nonterminal("expr"));
        assert_eq!(table.duplicate_symbols(), [&EcoString::from("expr")]);
    }

    #[test]
    fn usage_counts_drive_unused_queries() {
        let mut table = SymbolTable::new();
        table.add_token("NUMBER", None, loc(1)).unwrap();
        table.add_token("FLOAT", None, loc(1)).unwrap();
        table.add_nonterminal("expr", loc(2));
        table.use_token("NUMBER");
        table.use_token("MISSING"); // ignored
        assert_eq!(table.unused_tokens(), [&EcoString::from("FLOAT")]);
        assert_eq!(table.unused_nonterminals(), [&EcoString::from("expr")]);
    }

    #[test]
    fn type_index_groups_names_by_tag() {
        let mut table = SymbolTable::new();
        table.add_token("NUMBER", Some("val".into()), loc(1)).unwrap();
        table.add_token("FLOAT", Some("val".into()), loc(1)).unwrap();
        table.add_token("IDENT", Some("str".into()), loc(2)).unwrap();
        assert_eq!(table.types()["val"], ["NUMBER", "FLOAT"]);
        assert_eq!(table.types()["str"], ["IDENT"]);
    }

    #[test]
    fn build_from_grammar_collects_both_namespaces() {
        let tokens = lex(
            "%token NUMBER\n%rule list(X): X ;\n%%\nexpr: NUMBER ;\n",
            "test.y",
        );
        let grammar = parse(tokens).unwrap();
        let table = build_symbol_table(&grammar);
        assert!(table.is_token("NUMBER"));
        assert!(table.is_nonterminal("list"));
        assert!(table.is_nonterminal("expr"));
    }

    #[test]
    fn build_ignores_duplicate_token_declarations() {
        let tokens = lex("%token NUMBER\n%token NUMBER\n%%\nexpr: NUMBER ;\n", "t.y");
        let grammar = parse(tokens).unwrap();
        let table = build_symbol_table(&grammar);
        assert_eq!(table.token("NUMBER").unwrap().location.line, 1);
    }
}
