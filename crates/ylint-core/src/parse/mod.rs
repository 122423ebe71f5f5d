// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing of `.y` grammar files.
//!
//! The pipeline is [`lex`] then [`parse`]: the lexer never fails, and the
//! parser reports the first structural problem as a [`SyntaxError`].

mod error;
mod lexer;
mod location;
mod parser;
mod token;

pub use error::SyntaxError;
pub use lexer::{lex, Lexer};
pub use location::Location;
pub use parser::parse;
pub use token::{Token, TokenKind};
