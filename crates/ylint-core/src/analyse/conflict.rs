// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Structural conflict heuristics.
//!
//! These are not an LR automaton: no item sets are built. Instead three
//! cheap shape checks approximate where a generator would report
//! trouble:
//!
//! - *shift-reduce*: a terminal without declared precedence immediately
//!   followed by a nonterminal inside an alternative;
//! - *reduce-reduce*: two rules whose alternatives have identical symbol
//!   sequences;
//! - *ambiguous operators*: operator-shaped terminals used in a rule with
//!   no precedence declaration to disambiguate them.

use std::collections::HashMap;
use std::sync::LazyLock;

use ecow::EcoString;
use regex::Regex;

use crate::ast::{Associativity, Declaration, GrammarFile};
use crate::parse::Location;

/// A token's declared precedence: its level (1-based, later declarations
/// bind tighter) and associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecedenceEntry {
    pub level: u32,
    pub associativity: Associativity,
}

/// A terminal followed by a nonterminal with no precedence to arbitrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReduce {
    pub rule: EcoString,
    /// Index of the alternative within its rule.
    pub alternative: usize,
    pub symbol: EcoString,
    pub location: Location,
}

/// Rules whose alternatives are symbol-for-symbol identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceReduce {
    pub rules: Vec<EcoString>,
    pub location: Location,
}

/// Operator-shaped terminals in one alternative that lack precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousOperators {
    pub rule: EcoString,
    pub operators: Vec<EcoString>,
    pub location: Location,
}

/// The combined result of the three heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    pub shift_reduce: Vec<ShiftReduce>,
    pub reduce_reduce: Vec<ReduceReduce>,
    pub ambiguous_operators: Vec<AmbiguousOperators>,
}

/// Runs all three heuristics over the rules section.
#[must_use]
pub fn analyze(grammar: &GrammarFile) -> ConflictReport {
    let precedence = build_precedence_map(grammar);

    ConflictReport {
        shift_reduce: detect_shift_reduce(grammar, &precedence),
        reduce_reduce: detect_reduce_reduce(grammar),
        ambiguous_operators: detect_ambiguous_operators(grammar, &precedence),
    }
}

/// Maps each declared token to its precedence level. Each `%left` /
/// `%right` / `%nonassoc` line opens a new level; a token declared on two
/// lines keeps the later entry.
#[must_use]
pub fn build_precedence_map(grammar: &GrammarFile) -> HashMap<EcoString, PrecedenceEntry> {
    let mut map = HashMap::new();
    let mut level = 0;

    for decl in &grammar.declarations {
        let Declaration::Precedence(prec) = decl else {
            continue;
        };
        level += 1;
        for token in &prec.tokens {
            map.insert(
                token.clone(),
                PrecedenceEntry {
                    level,
                    associativity: prec.associativity,
                },
            );
        }
    }

    map
}

fn detect_shift_reduce(
    grammar: &GrammarFile,
    precedence: &HashMap<EcoString, PrecedenceEntry>,
) -> Vec<ShiftReduce> {
    let mut conflicts = Vec::new();

    for rule in &grammar.rules {
        for (alt_idx, alt) in rule.alternatives().iter().enumerate() {
            for (sym_idx, symbol) in alt.symbols.iter().enumerate() {
                if !symbol.is_terminal() || sym_idx + 1 == alt.symbols.len() {
                    continue;
                }
                let next = &alt.symbols[sym_idx + 1];
                if next.is_nonterminal() && !precedence.contains_key(&symbol.name) {
                    conflicts.push(ShiftReduce {
                        rule: rule.name().clone(),
                        alternative: alt_idx,
                        symbol: symbol.name.clone(),
                        location: symbol.location.clone(),
                    });
                }
            }
        }
    }

    conflicts
}

fn detect_reduce_reduce(grammar: &GrammarFile) -> Vec<ReduceReduce> {
    // Signature: the symbol-name sequences of every alternative. Two
    // rules with the same signature reduce identical frames.
    let mut groups: Vec<(Vec<Vec<EcoString>>, Vec<usize>)> = Vec::new();

    for (idx, rule) in grammar.rules.iter().enumerate() {
        let signature: Vec<Vec<EcoString>> = rule
            .alternatives()
            .iter()
            .map(|alt| alt.symbols.iter().map(|s| s.name.clone()).collect())
            .collect();

        match groups.iter_mut().find(|(sig, _)| *sig == signature) {
            Some((_, members)) => members.push(idx),
            None => groups.push((signature, vec![idx])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(_, members)| ReduceReduce {
            rules: members
                .iter()
                .map(|&idx| grammar.rules[idx].name().clone())
                .collect(),
            location: grammar.rules[members[0]].location().clone(),
        })
        .collect()
}

static OPERATOR_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+\-*/%^<>=!&|]+$").expect("valid pattern"));

/// True if `name` looks like a symbolic operator (`+`, `==`, `||`, ...).
/// Literal symbols store their unquoted payload, so one pattern covers
/// quoted and bare spellings alike.
#[must_use]
pub fn is_operator(name: &str) -> bool {
    OPERATOR_SHAPE.is_match(name)
}

fn detect_ambiguous_operators(
    grammar: &GrammarFile,
    precedence: &HashMap<EcoString, PrecedenceEntry>,
) -> Vec<AmbiguousOperators> {
    let mut ambiguous = Vec::new();

    for rule in &grammar.rules {
        for alt in rule.alternatives() {
            let missing: Vec<EcoString> = alt
                .symbols
                .iter()
                .filter(|s| s.is_terminal() && is_operator(&s.name))
                .filter(|s| !precedence.contains_key(&s.name))
                .map(|s| s.name.clone())
                .collect();

            if !missing.is_empty() {
                ambiguous.push(AmbiguousOperators {
                    rule: rule.name().clone(),
                    operators: missing,
                    location: rule.location().clone(),
                });
            }
        }
    }

    ambiguous
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::parse::{lex, parse};

    fn report(source: &str) -> ConflictReport {
        let grammar = parse(lex(source, "test.y")).unwrap();
        analyze(&grammar)
    }

    #[test]
    fn precedence_map_levels_follow_declaration_order() {
        let grammar = parse(lex(
            "%left '+' '-'\n%left '*'\n%%\nexpr: NUMBER ;\n",
            "t.y",
        ))
        .unwrap();
        let map = build_precedence_map(&grammar);
        assert_eq!(map["+"].level, 1);
        assert_eq!(map["*"].level, 2);
        assert_eq!(map["+"].associativity, Associativity::Left);
    }

    #[test]
    fn redeclared_token_keeps_later_entry() {
        let grammar = parse(lex(
            "%left '+'\n%right '+'\n%%\nexpr: NUMBER ;\n",
            "t.y",
        ))
        .unwrap();
        let map = build_precedence_map(&grammar);
        assert_eq!(map["+"].level, 2);
        assert_eq!(map["+"].associativity, Associativity::Right);
    }

    #[test]
    fn shift_reduce_flags_undeclared_terminal_before_nonterminal() {
        let report = report("%%\nexpr: expr '+' expr ;\n");
        assert_eq!(report.shift_reduce.len(), 1);
        assert_eq!(report.shift_reduce[0].symbol, "+");
        assert_eq!(report.shift_reduce[0].rule, "expr");
    }

    #[test]
    fn shift_reduce_silent_when_precedence_declared() {
        let report = report("%left '+'\n%%\nexpr: expr '+' expr ;\n");
        assert!(report.shift_reduce.is_empty());
    }

    #[test]
    fn reduce_reduce_groups_identical_rules() {
        let report = report(indoc! {"
            %%
            a: X Y | Z ;
            b: X Y | Z ;
            c: X ;
        "});
        assert_eq!(report.reduce_reduce.len(), 1);
        assert_eq!(report.reduce_reduce[0].rules, ["a", "b"]);
    }

    #[test]
    fn ambiguous_operator_without_precedence() {
        let report = report("%%\nexpr: expr '==' expr ;\n");
        assert_eq!(report.ambiguous_operators.len(), 1);
        assert_eq!(report.ambiguous_operators[0].operators, ["=="]);
    }

    #[test]
    fn operator_shape_matching() {
        assert!(is_operator("+"));
        assert!(is_operator("<<"));
        assert!(is_operator("&&"));
        assert!(!is_operator("NUMBER"));
        assert!(!is_operator("if"));
    }
}
