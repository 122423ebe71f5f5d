// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Location`] indicating its position in
//! the grammar file. Line and column are 1-based; `length` is measured in
//! characters. Locations render as `file:line:column`, the form reporters
//! print and editors can jump to.

use std::fmt;

use ecow::EcoString;

/// A position in a grammar file.
///
/// # Examples
///
/// ```
/// use ylint_core::parse::Location;
///
/// let loc = Location::new("grammar.y", 3, 7, 5);
/// assert_eq!(loc.to_string(), "grammar.y:3:7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// The file this location points into.
    pub file: EcoString,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// Length of the located element in characters.
    pub length: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<EcoString>, line: u32, column: u32, length: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            length,
        }
    }

    /// Creates the `file:1:1` placeholder used when a finding has no
    /// precise source position.
    #[must_use]
    pub fn start_of(file: impl Into<EcoString>) -> Self {
        Self::new(file, 1, 1, 0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
