// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags (and strips) trailing whitespace, working on the raw source
//! text rather than the AST.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::GrammarFile;
use crate::lint::{Fix, LintContext, LintRule, Offense, RuleDescriptor, Severity};
use crate::parse::Location;

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "TrailingWhitespace",
    description: "Detects trailing whitespace at the end of lines",
    severity: Severity::Convention,
    correctable: true,
    build: |_options| Box::new(TrailingWhitespace),
};

static TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid pattern"));

struct TrailingWhitespace;

impl LintRule for TrailingWhitespace {
    fn check(&self, _grammar: &GrammarFile, ctx: &LintContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();
        // Every offense carries the same whole-buffer replacement, so
        // applying any subset of them is idempotent.
        let cleaned = TRAILING.replace_all(ctx.source, "").into_owned();

        for (idx, line) in ctx.source.lines().enumerate() {
            if !line.ends_with(' ') && !line.ends_with('\t') {
                continue;
            }
            let trimmed_len = line.trim_end_matches([' ', '\t']).chars().count();
            let trailing_len = line.chars().count() - trimmed_len;
            let location = Location::new(
                ctx.file,
                idx as u32 + 1,
                trimmed_len as u32 + 1,
                trailing_len as u32,
            );

            offenses.push(
                Offense::new(
                    DESCRIPTOR.name,
                    DESCRIPTOR.severity,
                    location,
                    "Trailing whitespace detected",
                )
                .with_fix(Fix::ReplaceSource(cleaned.clone())),
            );
        }

        offenses
    }
}
