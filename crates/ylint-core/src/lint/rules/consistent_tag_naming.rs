// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Flags grammars mixing naming styles in their type tags.

use std::fmt;
use std::sync::LazyLock;

use ecow::EcoString;
use indexmap::IndexMap;
use regex::Regex;

use crate::ast::{Declaration, GrammarFile};
use crate::lint::{LintContext, LintRule, Offense, RuleDescriptor, Severity};
use crate::parse::Location;

pub(crate) const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    name: "ConsistentTagNaming",
    description: "Ensures consistent naming style for type tags",
    severity: Severity::Convention,
    correctable: false,
    build: |_options| Box::new(ConsistentTagNaming),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TagStyle {
    SnakeCase,
    CamelCase,
    PascalCase,
    UpperSnakeCase,
    Other,
}

impl fmt::Display for TagStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SnakeCase => "snake_case",
            Self::CamelCase => "camel_case",
            Self::PascalCase => "pascal_case",
            Self::UpperSnakeCase => "upper_snake_case",
            Self::Other => "other",
        })
    }
}

static SNAKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());
static CAMEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());
static PASCAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());
static UPPER_SNAKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

fn detect_style(tag: &str) -> TagStyle {
    if SNAKE.is_match(tag) {
        TagStyle::SnakeCase
    } else if CAMEL.is_match(tag) {
        TagStyle::CamelCase
    } else if PASCAL.is_match(tag) {
        TagStyle::PascalCase
    } else if UPPER_SNAKE.is_match(tag) {
        TagStyle::UpperSnakeCase
    } else {
        TagStyle::Other
    }
}

struct ConsistentTagNaming;

impl LintRule for ConsistentTagNaming {
    fn check(&self, grammar: &GrammarFile, ctx: &LintContext<'_>) -> Vec<Offense> {
        let tags = collect_type_tags(grammar);
        if tags.len() < 2 {
            return Vec::new();
        }

        let mut styles: IndexMap<TagStyle, usize> = IndexMap::new();
        for (tag, _) in &tags {
            *styles.entry(detect_style(tag)).or_default() += 1;
        }
        if styles.len() < 2 {
            return Vec::new();
        }

        let style_names = styles
            .keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        // Ties go to the earliest-seen style.
        let max_count = styles.values().copied().max().unwrap_or(0);
        let dominant = styles
            .iter()
            .find(|(_, count)| **count == max_count)
            .map(|(style, _)| *style)
            .unwrap_or(TagStyle::Other);

        let location = grammar
            .declarations
            .first()
            .map_or_else(|| Location::start_of(ctx.file), declaration_location);

        vec![Offense::new(
            DESCRIPTOR.name,
            DESCRIPTOR.severity,
            location,
            format!(
                "Inconsistent type tag naming styles detected ({style_names}). \
                 Consider using {dominant} throughout."
            ),
        )]
    }
}

fn collect_type_tags(grammar: &GrammarFile) -> Vec<(EcoString, Location)> {
    let mut tags = Vec::new();
    for decl in &grammar.declarations {
        match decl {
            Declaration::Token(token) => {
                if let Some(tag) = &token.type_tag {
                    tags.push((tag.clone(), token.location.clone()));
                }
            }
            Declaration::Type(ty) => {
                if let Some(tag) = &ty.type_tag {
                    tags.push((tag.clone(), ty.location.clone()));
                }
            }
            _ => {}
        }
    }
    tags
}

fn declaration_location(decl: &Declaration) -> Location {
    match decl {
        Declaration::Token(d) => d.location.clone(),
        Declaration::Type(d) => d.location.clone(),
        Declaration::Precedence(d) => d.location.clone(),
        Declaration::Start(d) => d.location.clone(),
        Declaration::Union(d) => d.location.clone(),
        Declaration::Rule(d) => d.location().clone(),
        Declaration::Inline(d) => d.location.clone(),
    }
}
