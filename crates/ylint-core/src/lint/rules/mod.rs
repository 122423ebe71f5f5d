// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The built-in lint rules.
//!
//! One rule per module; each contributes a `DESCRIPTOR` collected into
//! the static registry below. Adding a rule means adding its module and
//! one line to [`all_rules`].

mod ambiguous_precedence;
mod circular_reference;
mod consistent_tag_naming;
mod duplicate_token;
mod empty_action;
mod factorizable_rules;
mod left_recursion;
mod long_rule;
mod missing_start_symbol;
mod nonterminal_naming;
mod prec_improvement;
mod redundant_epsilon;
mod right_recursion;
mod token_naming;
mod trailing_whitespace;
mod undefined_symbol;
mod unreachable_rule;
mod unused_nonterminal;
mod unused_token;

use super::RuleDescriptor;

static REGISTRY: [RuleDescriptor; 19] = [
    ambiguous_precedence::DESCRIPTOR,
    circular_reference::DESCRIPTOR,
    consistent_tag_naming::DESCRIPTOR,
    duplicate_token::DESCRIPTOR,
    empty_action::DESCRIPTOR,
    factorizable_rules::DESCRIPTOR,
    left_recursion::DESCRIPTOR,
    long_rule::DESCRIPTOR,
    missing_start_symbol::DESCRIPTOR,
    nonterminal_naming::DESCRIPTOR,
    prec_improvement::DESCRIPTOR,
    redundant_epsilon::DESCRIPTOR,
    right_recursion::DESCRIPTOR,
    token_naming::DESCRIPTOR,
    trailing_whitespace::DESCRIPTOR,
    undefined_symbol::DESCRIPTOR,
    unreachable_rule::DESCRIPTOR,
    unused_nonterminal::DESCRIPTOR,
    unused_token::DESCRIPTOR,
];

/// All registered rules, in registry (alphabetical) order.
#[must_use]
pub fn all_rules() -> &'static [RuleDescriptor] {
    &REGISTRY
}

/// Looks up a rule descriptor by name.
#[must_use]
pub fn find_rule(name: &str) -> Option<&'static RuleDescriptor> {
    REGISTRY.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for exercising one rule against a source snippet.

    use crate::analyse::build_symbol_table;
    use crate::config::RuleOptions;
    use crate::lint::{LintContext, Offense, RuleDescriptor};
    use crate::parse::{lex, parse};

    /// Parses `source` and runs `descriptor` with default options.
    pub(crate) fn lint(descriptor: &RuleDescriptor, source: &str) -> Vec<Offense> {
        lint_with(descriptor, source, &RuleOptions::default())
    }

    /// Like [`lint`], with options from an inline TOML fragment.
    pub(crate) fn lint_with_options(
        descriptor: &RuleDescriptor,
        source: &str,
        options_toml: &str,
    ) -> Vec<Offense> {
        let table = options_toml.parse::<toml::Table>().expect("options should parse");
        lint_with(descriptor, source, &RuleOptions::new(table))
    }

    /// Runs `descriptor` against raw text that need not be a valid
    /// grammar, for rules that only inspect the source buffer.
    pub(crate) fn lint_source(descriptor: &RuleDescriptor, source: &str) -> Vec<Offense> {
        let grammar = parse(lex("%%\n", "test.y")).expect("stub grammar parses");
        let table = build_symbol_table(&grammar);
        let ctx = LintContext {
            symbol_table: &table,
            source,
            file: "test.y",
        };
        let rule = (descriptor.build)(&RuleOptions::default());
        rule.check(&grammar, &ctx)
    }

    fn lint_with(descriptor: &RuleDescriptor, source: &str, options: &RuleOptions) -> Vec<Offense> {
        let grammar = parse(lex(source, "test.y")).expect("test grammar should parse");
        let table = build_symbol_table(&grammar);
        let ctx = LintContext {
            symbol_table: &table,
            source,
            file: "test.y",
        };
        let rule = (descriptor.build)(options);
        rule.check(&grammar, &ctx)
    }

    #[test]
    fn registry_names_are_unique_and_sorted() {
        let names: Vec<_> = super::all_rules().iter().map(|rule| rule.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn find_rule_by_name() {
        assert!(super::find_rule("EmptyAction").is_some());
        assert!(super::find_rule("NoSuchRule").is_none());
    }
}
