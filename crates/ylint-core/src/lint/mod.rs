// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The lint engine: rule contract, offense model, and fix application.
//!
//! Rules are pure: [`LintRule::check`] inspects the grammar and context
//! and returns [`Offense`]s without mutating anything. A correctable
//! offense carries a [`Fix`] describing the edit as data; the driver
//! applies fixes later with [`apply_fixes`], in offense order, against
//! one shared grammar and source buffer. There is no conflict detection
//! between fixes from different rules; applying is sequential and
//! last-writer-wins, which callers accept in exchange for a trivially
//! predictable protocol.
//!
//! The rule set is a static registry: every rule contributes a
//! [`RuleDescriptor`] with its metadata and a build function, collected
//! in [`all_rules`]. Configuration can disable rules and pass options,
//! but cannot add rules at runtime.

pub mod rules;

use std::fmt;

use ecow::EcoString;
use serde::Serialize;

use crate::analyse::SymbolTable;
use crate::ast::GrammarFile;
use crate::config::{Config, RuleOptions};
use crate::parse::{Location, SyntaxError};

pub use rules::{all_rules, find_rule};

/// How serious an offense is.
///
/// Ordered from mildest to most severe so callers can compare: anything
/// `>= Severity::Error` fails a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Convention,
    Warning,
    Error,
}

impl Severity {
    /// All severities, mildest first.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Convention,
        Severity::Warning,
        Severity::Error,
    ];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Convention => "convention",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A deferred edit attached to a correctable offense.
///
/// Fixes are plain data, not callbacks: [`apply_fixes`] interprets them
/// against the grammar and source buffer, so an offense can be reported,
/// serialized, or filtered without ever running its fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    /// Clear the semantic action of one alternative, addressed by rule
    /// name and alternative index.
    RemoveAction {
        rule: EcoString,
        alternative: usize,
    },
    /// Replace the entire source buffer with the given text.
    ReplaceSource(String),
}

/// One lint finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    /// Name of the rule that produced this offense.
    pub rule_name: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// The deferred fix, if this offense is correctable.
    pub fix: Option<Fix>,
}

impl Offense {
    #[must_use]
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_name,
            severity,
            message: message.into(),
            location,
            fix: None,
        }
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    #[must_use]
    pub fn is_correctable(&self) -> bool {
        self.fix.is_some()
    }
}

impl fmt::Display for Offense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: [{}] {}",
            self.location, self.severity, self.rule_name, self.message
        )
    }
}

/// Read-only context shared by all rules during one check run.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    pub symbol_table: &'a SymbolTable,
    pub source: &'a str,
    pub file: &'a str,
}

/// A lint rule instance, built from its descriptor with the configured
/// options already resolved.
pub trait LintRule {
    /// Inspects `grammar` and returns all offenses found. Must not rely
    /// on being called more than once.
    fn check(&self, grammar: &GrammarFile, ctx: &LintContext<'_>) -> Vec<Offense>;
}

/// Static metadata and factory for one rule.
pub struct RuleDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Default severity of offenses this rule produces.
    pub severity: Severity,
    /// Whether offenses from this rule can carry fixes.
    pub correctable: bool,
    pub build: fn(&RuleOptions) -> Box<dyn LintRule>,
}

/// The descriptors enabled by `config`, in registry order.
#[must_use]
pub fn enabled_rules(config: &Config) -> Vec<&'static RuleDescriptor> {
    all_rules()
        .iter()
        .filter(|rule| config.rule_enabled(rule.name))
        .collect()
}

/// Builds and runs each descriptor in order, concatenating offenses.
#[must_use]
pub fn run_rules(
    descriptors: &[&'static RuleDescriptor],
    config: &Config,
    grammar: &GrammarFile,
    ctx: &LintContext<'_>,
) -> Vec<Offense> {
    let mut offenses = Vec::new();
    for descriptor in descriptors {
        let rule = (descriptor.build)(&config.rule_options(descriptor.name));
        offenses.extend(rule.check(grammar, ctx));
    }
    offenses
}

/// Applies the fixes of all correctable offenses, in offense order.
/// Returns how many fixes were applied. Fixes addressing a rule that no
/// longer exists are skipped.
pub fn apply_fixes(offenses: &[Offense], grammar: &mut GrammarFile, source: &mut String) -> usize {
    let mut applied = 0;

    for offense in offenses {
        let Some(fix) = &offense.fix else {
            continue;
        };
        match fix {
            Fix::RemoveAction { rule, alternative } => {
                let Some(target) = grammar.rules.iter_mut().find(|r| r.name() == rule) else {
                    continue;
                };
                let Some(alt) = target.alternatives_mut().get_mut(*alternative) else {
                    continue;
                };
                alt.action = None;
                applied += 1;
            }
            Fix::ReplaceSource(new_source) => {
                source.clear();
                source.push_str(new_source);
                applied += 1;
            }
        }
    }

    applied
}

/// Wraps a parse failure as an offense, so linting a syntactically
/// broken file still reports through the normal channels.
#[must_use]
pub fn syntax_error_offense(error: &SyntaxError) -> Offense {
    Offense::new(
        "SyntaxError",
        Severity::Error,
        error.location.clone(),
        error.to_string(),
    )
}
