// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse error type.

use miette::Diagnostic;
use thiserror::Error;

use super::{Location, TokenKind};

/// An error produced when the parser meets a token it cannot accept.
///
/// Parsing stops at the first syntax error; the driver converts the error
/// into a synthetic offense so linting a broken file still reports
/// something actionable.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
#[error("expected {expected}, got {found}")]
#[diagnostic(code(ylint::parse::syntax_error))]
pub struct SyntaxError {
    /// What the parser was prepared to accept.
    pub expected: TokenKind,
    /// What it found instead.
    pub found: TokenKind,
    /// Where the unexpected token starts.
    pub location: Location,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(expected: TokenKind, found: TokenKind, location: Location) -> Self {
        Self {
            expected,
            found,
            location,
        }
    }
}
