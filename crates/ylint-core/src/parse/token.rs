// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for grammar-file lexical analysis.
//!
//! Each token pairs a [`TokenKind`] with the raw source text it was scanned
//! from and a [`Location`]. String-valued payloads (directive text, action
//! bodies, literals) live in `text`; the kind itself is a plain tag so the
//! parser can dispatch on it cheaply.

use std::fmt;

use ecow::EcoString;

use super::Location;

/// The kind of a lexed token.
///
/// Directive keywords that the parser understands get their own kinds;
/// any other `%foo` directive becomes the generic [`TokenKind::Directive`]
/// so unknown extensions pass through the lexer unharmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Structure ===
    /// Section separator: `%%`
    SectionSeparator,
    /// Prologue block: `%{ ... %}` (payload is the text between the delimiters)
    PrologueStart,
    /// Prologue terminator: `%}`
    PrologueEnd,

    // === Directive keywords ===
    /// `%token`
    Token,
    /// `%type`
    Type,
    /// `%left`
    Left,
    /// `%right`
    Right,
    /// `%nonassoc`
    Nonassoc,
    /// `%prec`
    Prec,
    /// `%union`
    Union,
    /// `%start`
    Start,
    /// `%rule` (Lrama parameterized-rule extension)
    Rule,
    /// `%inline` (Lrama inline-rule extension)
    Inline,
    /// Any other `%name` directive
    Directive,

    // === Punctuation ===
    /// `|`
    Pipe,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    // === Literals ===
    /// Character literal: `'+'` (payload excludes the quotes)
    Char,
    /// String literal: `"if"` (payload excludes the quotes)
    Str,
    /// Type tag: `<val>` (payload excludes the angle brackets)
    TypeTag,
    /// Balanced `{ ... }` action block (payload includes the braces)
    Action,
    /// Identifier: terminals and nonterminals
    Identifier,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SectionSeparator => "'%%'",
            Self::PrologueStart => "'%{'",
            Self::PrologueEnd => "'%}'",
            Self::Token => "'%token'",
            Self::Type => "'%type'",
            Self::Left => "'%left'",
            Self::Right => "'%right'",
            Self::Nonassoc => "'%nonassoc'",
            Self::Prec => "'%prec'",
            Self::Union => "'%union'",
            Self::Start => "'%start'",
            Self::Rule => "'%rule'",
            Self::Inline => "'%inline'",
            Self::Directive => "directive",
            Self::Pipe => "'|'",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Char => "character literal",
            Self::Str => "string literal",
            Self::TypeTag => "type tag",
            Self::Action => "action block",
            Self::Identifier => "identifier",
            Self::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A single lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's payload text (see [`TokenKind`] for what each kind stores).
    pub text: EcoString,
    /// Where the token starts in the source.
    pub location: Location,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<EcoString>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}
