// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for `.y` grammar files.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written: Bison grammar syntax needs balanced-brace action
//! scanning and `%{ ... %}` prologue capture, which rule out a
//! pattern-table lexer.
//!
//! # Design Principles
//!
//! - **Never fails**: unrecognized characters are skipped, and unterminated
//!   strings, actions, and prologues consume to end of input. Malformed
//!   input surfaces as a parser error instead.
//! - **Verbatim payloads**: action blocks keep their braces and nested text
//!   untouched; escape sequences in literals are copied through without
//!   interpretation.
//! - **Precise locations**: every token carries its 1-based line/column and
//!   character length.
//!
//! # Example
//!
//! ```
//! use ylint_core::parse::{lex, TokenKind};
//!
//! let tokens = lex("%token NUMBER", "grammar.y");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Token, TokenKind::Identifier, TokenKind::Eof]);
//! ```

use ecow::EcoString;

use super::{Location, Token, TokenKind};

/// A lexer for grammar-file source text.
///
/// Maintains a character cursor with a running line/column. Columns count
/// characters, not bytes, so multi-byte text in comments and actions does
/// not skew diagnostics.
pub struct Lexer<'src> {
    /// The source as characters (the grammar syntax is ASCII, but prologue
    /// and action payloads may not be).
    chars: Vec<char>,
    /// File name attached to every emitted location.
    file: &'src str,
    /// Index of the next unread character.
    pos: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column.
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over `source`, attributing tokens to `file`.
    #[must_use]
    pub fn new(source: &str, file: &'src str) -> Self {
        Self {
            chars: source.chars().collect(),
            file,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans the whole input, returning the token stream terminated by one
    /// [`TokenKind::Eof`] token.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }

            match (self.current(), self.peek(1)) {
                (Some('/'), Some('/')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment(),
                (Some('%'), Some('{')) => tokens.push(self.lex_prologue()),
                (Some('%'), Some('}')) => {
                    let (line, column) = (self.line, self.column);
                    self.advance_by(2);
                    tokens.push(self.token_at(TokenKind::PrologueEnd, "%}", line, column, 2));
                }
                (Some('%'), Some('%')) => {
                    let (line, column) = (self.line, self.column);
                    self.advance_by(2);
                    tokens.push(self.token_at(TokenKind::SectionSeparator, "%%", line, column, 2));
                }
                (Some('%'), Some(c)) if c.is_ascii_alphabetic() => {
                    tokens.push(self.lex_directive());
                }
                (Some('{'), _) => tokens.push(self.lex_action()),
                (Some('\''), _) => tokens.push(self.lex_quoted(TokenKind::Char, '\'')),
                (Some('"'), _) => tokens.push(self.lex_quoted(TokenKind::Str, '"')),
                (Some('<'), _) => tokens.push(self.lex_type_tag()),
                (Some(c), _) if c.is_ascii_alphabetic() || c == '_' => {
                    tokens.push(self.lex_identifier());
                }
                (Some(c), _) => {
                    if let Some(kind) = punctuation_kind(c) {
                        let (line, column) = (self.line, self.column);
                        self.advance();
                        tokens.push(self.token_at(kind, c, line, column, 1));
                    } else {
                        // Unrecognized character: skip silently. The parser
                        // reports structural problems with better context
                        // than a lexer error could.
                        self.advance();
                    }
                }
                (None, _) => break,
            }
        }

        tokens.push(self.token_at(TokenKind::Eof, "", self.line, self.column, 0));
        tokens
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consumes one character, tracking line/column.
    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        self.advance_by(2); // //
        while !self.is_eof() && self.current() != Some('\n') {
            self.advance();
        }
        if !self.is_eof() {
            self.advance(); // \n
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance_by(2); // /*
        while !self.is_eof() {
            if self.current() == Some('*') && self.peek(1) == Some('/') {
                self.advance_by(2);
                break;
            }
            self.advance();
        }
        // Unterminated block comment: swallowed to end of input.
    }

    /// Lexes `%{ ... %}`. The payload is the raw text between the
    /// delimiters; the closing `%}` is left for the main loop so it shows
    /// up as its own [`TokenKind::PrologueEnd`] token.
    fn lex_prologue(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance_by(2); // %{

        let mut payload = String::new();
        while !self.is_eof() && !(self.current() == Some('%') && self.peek(1) == Some('}')) {
            payload.push(self.current().unwrap_or_default());
            self.advance();
        }

        let length = payload.chars().count() as u32 + 2;
        self.token_at(TokenKind::PrologueStart, payload, line, column, length)
    }

    /// Lexes a `%name` directive: the longest run of letters, `%`, and `-`
    /// is matched against the keyword table; anything else becomes the
    /// generic [`TokenKind::Directive`].
    fn lex_directive(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_alphabetic() || c == '%' || c == '-' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match text.as_str() {
            "%token" => TokenKind::Token,
            "%type" => TokenKind::Type,
            "%left" => TokenKind::Left,
            "%right" => TokenKind::Right,
            "%nonassoc" => TokenKind::Nonassoc,
            "%prec" => TokenKind::Prec,
            "%union" => TokenKind::Union,
            "%start" => TokenKind::Start,
            "%rule" => TokenKind::Rule,
            "%inline" => TokenKind::Inline,
            _ => TokenKind::Directive,
        };

        let length = text.chars().count() as u32;
        self.token_at(kind, text, line, column, length)
    }

    /// Lexes a balanced `{ ... }` action block by brace-depth counting.
    /// The payload includes the enclosing braces; nested braces are
    /// preserved verbatim. An unterminated action consumes to end of input.
    fn lex_action(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut payload = String::new();
        let mut depth = 0u32;

        while let Some(c) = self.current() {
            if c == '{' {
                depth += 1;
            } else if c == '}' {
                depth -= 1;
                if depth == 0 {
                    payload.push(c);
                    self.advance();
                    break;
                }
            }
            payload.push(c);
            self.advance();
        }

        let length = payload.chars().count() as u32;
        self.token_at(TokenKind::Action, payload, line, column, length)
    }

    /// Lexes a `'...'` or `"..."` literal. The payload excludes the quotes;
    /// backslash escapes are copied through verbatim (backslash plus the
    /// escaped character), with no interpretation.
    fn lex_quoted(&mut self, kind: TokenKind, quote: char) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote

        let mut payload = String::new();
        while !self.is_eof() && self.current() != Some(quote) {
            let c = self.current().unwrap_or_default();
            payload.push(c);
            if c == '\\' {
                self.advance();
                if let Some(escaped) = self.current() {
                    payload.push(escaped);
                }
            }
            self.advance();
        }
        if !self.is_eof() {
            self.advance(); // closing quote
        }

        let length = payload.chars().count() as u32 + 2;
        self.token_at(kind, payload, line, column, length)
    }

    /// Lexes `<tag>`. The payload excludes the angle brackets.
    fn lex_type_tag(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance(); // <

        let mut payload = String::new();
        while !self.is_eof() && self.current() != Some('>') {
            payload.push(self.current().unwrap_or_default());
            self.advance();
        }
        if !self.is_eof() {
            self.advance(); // >
        }

        let length = payload.chars().count() as u32 + 2;
        self.token_at(TokenKind::TypeTag, payload, line, column, length)
    }

    fn lex_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let length = text.chars().count() as u32;
        self.token_at(TokenKind::Identifier, text, line, column, length)
    }

    fn token_at(
        &self,
        kind: TokenKind,
        text: impl Into<EcoString>,
        line: u32,
        column: u32,
        length: u32,
    ) -> Token {
        Token::new(kind, text, Location::new(self.file, line, column, length))
    }
}

/// Maps single-character punctuation to its token kind.
fn punctuation_kind(c: char) -> Option<TokenKind> {
    match c {
        '|' => Some(TokenKind::Pipe),
        ':' => Some(TokenKind::Colon),
        ';' => Some(TokenKind::Semicolon),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        ',' => Some(TokenKind::Comma),
        _ => None,
    }
}

/// Tokenizes `source`, attributing locations to `file`.
///
/// Always succeeds and always ends with exactly one [`TokenKind::Eof`]
/// token. See the module docs for the error-tolerance rules.
#[must_use]
pub fn lex(source: &str, file: &str) -> Vec<Token> {
    Lexer::new(source, file).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to lex and extract just the token kinds (including Eof).
    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex(source, "test.y").into_iter().map(|t| t.kind).collect()
    }

    /// Helper to lex and extract (kind, text) pairs, excluding Eof.
    fn lex_pairs(source: &str) -> Vec<(TokenKind, String)> {
        lex(source, "test.y")
            .into_iter()
            .filter(|t| !t.is_eof())
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    }

    #[test]
    fn lex_empty_input_yields_only_eof() {
        assert_eq!(lex_kinds(""), [TokenKind::Eof]);
        assert_eq!(lex_kinds("   \n\t "), [TokenKind::Eof]);
        assert_eq!(lex_kinds("// just a comment"), [TokenKind::Eof]);
        assert_eq!(lex_kinds("/* block */"), [TokenKind::Eof]);
    }

    #[test]
    fn lex_directive_keywords() {
        assert_eq!(
            lex_kinds("%token %type %left %right %nonassoc %prec %union %start %rule %inline"),
            [
                TokenKind::Token,
                TokenKind::Type,
                TokenKind::Left,
                TokenKind::Right,
                TokenKind::Nonassoc,
                TokenKind::Prec,
                TokenKind::Union,
                TokenKind::Start,
                TokenKind::Rule,
                TokenKind::Inline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_unknown_directive_is_generic() {
        assert_eq!(
            lex_pairs("%expect %parse-param"),
            [
                (TokenKind::Directive, "%expect".to_string()),
                (TokenKind::Directive, "%parse-param".to_string()),
            ]
        );
    }

    #[test]
    fn lex_section_separator_and_punctuation() {
        assert_eq!(
            lex_kinds("%% | : ; ( ) [ ] ,"),
            [
                TokenKind::SectionSeparator,
                TokenKind::Pipe,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_prologue_keeps_raw_payload_and_separate_end_token() {
        let pairs = lex_pairs("%{\n#include <stdio.h>\n%}");
        assert_eq!(
            pairs,
            [
                (
                    TokenKind::PrologueStart,
                    "\n#include <stdio.h>\n".to_string()
                ),
                (TokenKind::PrologueEnd, "%}".to_string()),
            ]
        );
    }

    #[test]
    fn lex_action_preserves_nested_braces() {
        let pairs = lex_pairs("{ if (x) { y(); } }");
        assert_eq!(
            pairs,
            [(TokenKind::Action, "{ if (x) { y(); } }".to_string())]
        );
    }

    #[test]
    fn lex_action_unterminated_consumes_to_eof() {
        let pairs = lex_pairs("{ $$ = $1;");
        assert_eq!(pairs, [(TokenKind::Action, "{ $$ = $1;".to_string())]);
    }

    #[test]
    fn lex_char_and_string_literals_exclude_quotes() {
        assert_eq!(
            lex_pairs(r#"'+' "if""#),
            [
                (TokenKind::Char, "+".to_string()),
                (TokenKind::Str, "if".to_string()),
            ]
        );
    }

    #[test]
    fn lex_literal_escapes_pass_through() {
        assert_eq!(
            lex_pairs(r"'\n' '\\'"),
            [
                (TokenKind::Char, r"\n".to_string()),
                (TokenKind::Char, r"\\".to_string()),
            ]
        );
    }

    #[test]
    fn lex_unterminated_string_consumes_to_eof() {
        let pairs = lex_pairs("\"never closed");
        assert_eq!(pairs, [(TokenKind::Str, "never closed".to_string())]);
    }

    #[test]
    fn lex_type_tag_excludes_brackets() {
        assert_eq!(lex_pairs("<val>"), [(TokenKind::TypeTag, "val".to_string())]);
    }

    #[test]
    fn lex_identifiers() {
        assert_eq!(
            lex_pairs("expr NUMBER _private x1"),
            [
                (TokenKind::Identifier, "expr".to_string()),
                (TokenKind::Identifier, "NUMBER".to_string()),
                (TokenKind::Identifier, "_private".to_string()),
                (TokenKind::Identifier, "x1".to_string()),
            ]
        );
    }

    #[test]
    fn lex_comments_are_skipped() {
        assert_eq!(
            lex_pairs("expr // trailing\n/* inline */ NUMBER"),
            [
                (TokenKind::Identifier, "expr".to_string()),
                (TokenKind::Identifier, "NUMBER".to_string()),
            ]
        );
    }

    #[test]
    fn lex_unrecognized_characters_are_skipped() {
        assert_eq!(
            lex_pairs("expr @ # NUMBER"),
            [
                (TokenKind::Identifier, "expr".to_string()),
                (TokenKind::Identifier, "NUMBER".to_string()),
            ]
        );
    }

    #[test]
    fn lex_locations_track_lines_and_columns() {
        let tokens = lex("%token NUMBER\nexpr", "g.y");
        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[0].location.column, 1);
        assert_eq!(tokens[1].location.line, 1);
        assert_eq!(tokens[1].location.column, 8);
        assert_eq!(tokens[1].location.length, 6);
        assert_eq!(tokens[2].location.line, 2);
        assert_eq!(tokens[2].location.column, 1);
    }

    #[test]
    fn lex_literal_location_length_includes_quotes() {
        let tokens = lex("'+'", "g.y");
        assert_eq!(tokens[0].location.length, 3);
    }

    #[test]
    fn lex_full_grammar_fragment() {
        let kinds = lex_kinds("%token NUM\n%%\nexpr: expr '+' NUM { $$ = $1 + $3; } ;\n");
        assert_eq!(
            kinds,
            [
                TokenKind::Token,
                TokenKind::Identifier,
                TokenKind::SectionSeparator,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Char,
                TokenKind::Identifier,
                TokenKind::Action,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }
}
