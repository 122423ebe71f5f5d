// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Ylint core.
//!
//! This crate contains the grammar tooling behind the `ylint` binary:
//! - Lexing and parsing of Yacc/Bison grammar files, including the
//!   Lrama extensions (parameterized rules, named references, `%inline`)
//! - Grammar analysis (symbol tables, reachability, recursion,
//!   precedence conflicts)
//! - The lint rule engine and its built-in rules
//! - The canonical reformatter
//! - Offense reporters (text, JSON, GitHub annotations)
//!
//! The parser is deliberately forgiving: the lexer never fails, and the
//! parser recovers from unknown declarations, so linting stays useful on
//! files that real-world Bison would reject.

#![doc = include_str!("../../../README.md")]

pub mod analyse;
pub mod ast;
pub mod config;
pub mod format;
pub mod lint;
pub mod parse;
pub mod report;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::analyse::build_symbol_table;
    pub use crate::ast::GrammarFile;
    pub use crate::config::Config;
    pub use crate::lint::{Offense, Severity};
    pub use crate::parse::{lex, parse};
}
