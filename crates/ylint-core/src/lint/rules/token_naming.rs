// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Enforces a naming convention for declared tokens (UPPER_CASE by
//! default). Literal declarations like `'+'` are exempt.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "TokenNaming",
    description: "Tokens should follow UPPER_CASE naming convention",
    severity: Severity::Convention,
    correctable: false,
    build: |options| {
        let pattern = options
            .get_str("pattern")
            .and_then(|p| Regex::new(p).ok())
            .unwrap_or_else(|| DEFAULT_PATTERN.clone());
        Box::new(TokenNaming { pattern })
    },
};

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid pattern"));

struct TokenNaming {
    pattern: Regex,
}

impl LintRule for TokenNaming {
    fn check(&self, grammar: &GrammarFile, _ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        for decl in &grammar.declarations {
            let Declaration::Token(token_decl) = decl else {
                continue;
            };
            for name in &token_decl.names {
                if self.pattern.is_match(name) || is_literal_name(name) {
                    continue;
                }
                offenses.push(Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    token_decl.location.clone(),
                    format!(
                        "Token '{name}' should match pattern {}",
                        self.pattern.as_str()
                    ),
                ));
            }
        }

        offenses
    }
}

/// Declared names are stored without their quotes, so a `'+'` or `"<="`
/// declaration shows up as punctuation. Anything containing a non-word
/// character cannot be an identifier and is treated as a literal.
fn is_literal_name(name: &str) -> bool {
    name.chars().any(|c| !c.is_ascii_alphanumeric() && c != '_')
}

#[cfg(test)]
mod tests {
    use super::super::testing::{lint, lint_with_options};
    use super::*;

    #[test]
    fn upper_case_names_pass() {
        let offenses = lint(&DESCRIPTOR, "%token NUMBER T_IDENT2\n%%\nexpr: NUMBER ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn lowercase_token_is_flagged() {
        let offenses = lint(&DESCRIPTOR, "%token number\n%%\nexpr: number ;\n");
        assert_eq!(offenses.len(), 1);
        assert!(offenses[0].message.contains("'number'"));
    }

    #[test]
    fn literal_declarations_are_exempt() {
        let offenses = lint(&DESCRIPTOR, "%token '+' \"<=\"\n%%\nexpr: '+' ;\n");
        assert!(offenses.is_empty());
    }

    #[test]
    fn custom_pattern_from_options() {
        let offenses = lint_with_options(
            &DESCRIPTOR,
            "%token NUMBER\n%%\nexpr: NUMBER ;\n",
            r#"pattern = "^T_[A-Z]+$""#,
        );
        assert_eq!(offenses.len(), 1);
    }
}
