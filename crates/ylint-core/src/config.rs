// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Project configuration (`ylint.toml`).
//!
//! Configuration is optional: with no file present every rule runs with
//! its defaults. A rule entry is either a bare boolean or a table with an
//! `enabled` flag plus rule-specific options:
//!
//! ```toml
//! [rules]
//! RightRecursion = false
//!
//! [rules.LongRule]
//! enabled = true
//! max_alternatives = 15
//!
//! [formatter]
//! indent_size = 2
//! align_tokens = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::format::FormatOptions;

/// The default configuration file name, looked up in the working
/// directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "ylint.toml";

/// Failure to read or parse a configuration file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(code(ylint::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    #[diagnostic(code(ylint::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A per-rule configuration entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// `RuleName = false`
    Enabled(bool),
    /// `[rules.RuleName]` table with options.
    Detailed {
        #[serde(default = "default_true")]
        enabled: bool,
        #[serde(flatten)]
        options: toml::Table,
    },
}

fn default_true() -> bool {
    true
}

/// Options passed to one rule when it is built.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    table: toml::Table,
}

impl RuleOptions {
    #[must_use]
    pub fn new(table: toml::Table) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.table.get(key).and_then(toml::Value::as_str)
    }

    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.table
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|n| usize::try_from(n).ok())
    }
}

/// The full project configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-rule settings, keyed by rule name.
    pub rules: BTreeMap<String, RuleSetting>,
    /// Formatter options.
    pub formatter: FormatOptions,
    /// Glob patterns for files to lint when a directory is given.
    pub include: Vec<String>,
    /// Glob patterns for files to skip.
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            formatter: FormatOptions::default(),
            include: vec!["**/*.y".to_string()],
            exclude: vec!["vendor/**".to_string(), "tmp/**".to_string()],
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// With an explicit `path`, the file must exist and parse. Without
    /// one, `ylint.toml` in the working directory is used when present,
    /// otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let fallback = Path::new(CONFIG_FILE_NAME);
                if fallback.exists() {
                    Self::load_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether `rule_name` should run. Rules not mentioned in the config
    /// are enabled.
    #[must_use]
    pub fn rule_enabled(&self, rule_name: &str) -> bool {
        match self.rules.get(rule_name) {
            None => true,
            Some(RuleSetting::Enabled(enabled)) => *enabled,
            Some(RuleSetting::Detailed { enabled, .. }) => *enabled,
        }
    }

    /// The options table for `rule_name`, empty if none were given.
    #[must_use]
    pub fn rule_options(&self, rule_name: &str) -> RuleOptions {
        match self.rules.get(rule_name) {
            Some(RuleSetting::Detailed { options, .. }) => RuleOptions::new(options.clone()),
            _ => RuleOptions::default(),
        }
    }

    /// Whether `path` should be linted: it must match one of the
    /// `include` patterns and none of the `exclude` patterns. Paths are
    /// matched with `/` separators.
    #[must_use]
    pub fn includes(&self, path: &str) -> bool {
        let included = self.include.iter().any(|p| glob_matches(p, path));
        let excluded = self.exclude.iter().any(|p| glob_matches(p, path));
        included && !excluded
    }

    /// The annotated default configuration written by `ylint init`.
    #[must_use]
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG
    }
}

/// Matches `path` against a glob pattern supporting `*` (within one path
/// component) and `**` (across components), by translating the pattern
/// to an anchored regex. An unparsable pattern matches nothing.
fn glob_matches(pattern: &str, path: &str) -> bool {
    let mut regex = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    // `**/` also matches the empty prefix.
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        regex.push_str("(?:.*/)?");
                    } else {
                        regex.push_str(".*");
                    }
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push_str("[^/]"),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push('$');
    Regex::new(&regex).is_ok_and(|re| re.is_match(path))
}

const DEFAULT_CONFIG: &str = r#"# ylint configuration.
# Rules not listed here run with their defaults.

include = ["**/*.y"]
exclude = ["vendor/**", "tmp/**"]

[rules]
# Disable a rule entirely:
# RightRecursion = false

[rules.LongRule]
enabled = true
max_alternatives = 10

[formatter]
indent_size = 2
align_tokens = true
align_alternatives = true
blank_lines_around_sections = 1
max_line_length = 120
"#;

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn config(text: &str) -> Config {
        toml::from_str(text).expect("config should parse")
    }

    #[test]
    fn empty_config_enables_everything() {
        let config = config("");
        assert!(config.rule_enabled("LongRule"));
        assert!(config.rule_enabled("NoSuchRule"));
    }

    #[test]
    fn boolean_entry_disables_a_rule() {
        let config = config("[rules]\nRightRecursion = false\n");
        assert!(!config.rule_enabled("RightRecursion"));
        assert!(config.rule_enabled("LeftRecursion"));
    }

    #[test]
    fn detailed_entry_carries_options() {
        let config = config(indoc! {r#"
            [rules.LongRule]
            enabled = true
            max_alternatives = 15

            [rules.TokenNaming]
            pattern = "^[A-Z]+$"
        "#});
        assert!(config.rule_enabled("LongRule"));
        assert_eq!(config.rule_options("LongRule").get_usize("max_alternatives"), Some(15));
        assert_eq!(config.rule_options("TokenNaming").get_str("pattern"), Some("^[A-Z]+$"));
        assert_eq!(config.rule_options("LongRule").get_str("pattern"), None);
    }

    #[test]
    fn detailed_entry_can_disable() {
        let config = config("[rules.LongRule]\nenabled = false\nmax_alternatives = 3\n");
        assert!(!config.rule_enabled("LongRule"));
    }

    #[test]
    fn formatter_options_parse() {
        let config = config("[formatter]\nindent_size = 4\nalign_tokens = false\n");
        assert_eq!(config.formatter.indent_size, 4);
        assert!(!config.formatter.align_tokens);
    }

    #[test]
    fn default_include_and_exclude_globs() {
        let config = Config::default();
        assert!(config.includes("grammar.y"));
        assert!(config.includes("src/parser/grammar.y"));
        assert!(!config.includes("grammar.c"));
        assert!(!config.includes("vendor/thirdparty/grammar.y"));
        assert!(!config.includes("tmp/scratch.y"));
    }

    #[test]
    fn custom_include_patterns() {
        let config = config(r#"include = ["*.yy"]"#);
        assert!(config.includes("grammar.yy"));
        assert!(!config.includes("nested/grammar.yy"));
        assert!(!config.includes("grammar.y"));
    }

    #[test]
    fn default_toml_round_trips() {
        let config = config(Config::default_toml());
        assert!(config.rule_enabled("LongRule"));
        assert_eq!(config.rule_options("LongRule").get_usize("max_alternatives"), Some(10));
    }
}
