// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Offense reporters: terminal text, machine-readable JSON, and GitHub
//! Actions workflow commands.

mod github;
mod json;
mod text;

pub use github::GithubReporter;
pub use json::JsonReporter;
pub use text::TextReporter;

use crate::lint::Offense;

/// Renders a batch of offenses to a string.
pub trait Reporter {
    fn report(&self, offenses: &[Offense]) -> String;
}

/// The output formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Github,
}

impl OutputFormat {
    /// Builds the reporter for this format.
    #[must_use]
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            Self::Text => Box::new(TextReporter),
            Self::Json => Box::new(JsonReporter),
            Self::Github => Box::new(GithubReporter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "github" => Ok(Self::Github),
            other => Err(format!(
                "unknown format '{other}': expected 'text', 'json', or 'github'"
            )),
        }
    }
}
