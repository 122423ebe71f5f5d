// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for grammar files.
//!
//! Consumes the token stream from [`lex`](super::lex) and produces a
//! [`GrammarFile`]. The file shape is:
//!
//! ```text
//! %{ prologue %}
//! declarations
//! %%
//! rules
//! %%
//! epilogue
//! ```
//!
//! Parsing stops at the first unacceptable token with a
//! [`SyntaxError`]. Unknown declaration-section tokens are skipped so
//! grammars using directives this tool does not model (`%expect`,
//! `%parse-param`, ...) still parse.

use crate::ast::{
    Action, Alternative, Associativity, Declaration, Epilogue, GrammarFile, InlineRule,
    ParameterizedRule, PrecedenceDeclaration, Prologue, Rule, RuleLike, StartDeclaration, Symbol,
    SymbolKind, TokenDeclaration, TypeDeclaration, UnionDeclaration,
};

use super::{SyntaxError, Token, TokenKind};

/// Parses a token stream into a grammar file.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token the grammar cannot accept.
pub fn parse(tokens: Vec<Token>) -> Result<GrammarFile, SyntaxError> {
    Parser::new(tokens).parse()
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse(mut self) -> Result<GrammarFile, SyntaxError> {
        let prologue = self.parse_prologue();
        let declarations = self.parse_declarations()?;
        self.expect(TokenKind::SectionSeparator)?;
        let rules = self.parse_rules()?;
        let epilogue = self.parse_epilogue();

        Ok(GrammarFile {
            prologue,
            declarations,
            rules,
            epilogue,
            location: self.current_token().location.clone(),
        })
    }

    /// The token under the cursor. The stream always ends with Eof, so
    /// running off the end clamps to it.
    fn current_token(&self) -> &Token {
        self.tokens
            .get(self.current)
            .or_else(|| self.tokens.last())
            .expect("token stream always contains Eof")
    }

    fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    /// Consumes the current token, requiring it to be `kind`.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let token = self.current_token();
        if token.kind != kind {
            return Err(SyntaxError::new(
                kind,
                token.kind,
                token.location.clone(),
            ));
        }
        let token = token.clone();
        self.advance();
        Ok(token)
    }

    fn parse_prologue(&mut self) -> Option<Prologue> {
        if !self.check(TokenKind::PrologueStart) {
            return None;
        }
        let token = self.current_token().clone();
        self.advance();
        Some(Prologue {
            code: token.text,
            location: token.location,
        })
    }

    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        let mut declarations = Vec::new();

        while !self.check(TokenKind::SectionSeparator) && !self.check(TokenKind::Eof) {
            match self.current_token().kind {
                TokenKind::Token => declarations.push(self.parse_token_declaration()?),
                TokenKind::Type => declarations.push(self.parse_type_declaration()?),
                TokenKind::Left | TokenKind::Right | TokenKind::Nonassoc => {
                    declarations.push(self.parse_precedence_declaration());
                }
                TokenKind::Start => declarations.push(self.parse_start_declaration()?),
                TokenKind::Union => declarations.push(self.parse_union_declaration()?),
                TokenKind::Rule => {
                    self.advance();
                    declarations.push(self.parse_rule_declaration()?);
                }
                TokenKind::Inline => {
                    self.advance();
                    declarations.push(self.parse_inline_declaration()?);
                }
                // Unknown directives (and their operands, one token at a
                // time) are skipped for forward compatibility.
                _ => self.advance(),
            }
        }

        Ok(declarations)
    }

    fn parse_token_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let keyword = self.expect(TokenKind::Token)?;

        let mut type_tag = None;
        if self.check(TokenKind::TypeTag) {
            type_tag = Some(self.current_token().text.clone());
            self.advance();
        }

        let mut names = Vec::new();
        while matches!(
            self.current_token().kind,
            TokenKind::Identifier | TokenKind::Str | TokenKind::Char
        ) {
            names.push(self.current_token().text.clone());
            self.advance();
        }

        Ok(Declaration::Token(TokenDeclaration {
            names,
            type_tag,
            location: keyword.location,
        }))
    }

    fn parse_type_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let keyword = self.expect(TokenKind::Type)?;

        let mut type_tag = None;
        if self.check(TokenKind::TypeTag) {
            type_tag = Some(self.current_token().text.clone());
            self.advance();
        }

        let mut names = Vec::new();
        while self.check(TokenKind::Identifier) {
            names.push(self.current_token().text.clone());
            self.advance();
        }

        Ok(Declaration::Type(TypeDeclaration {
            type_tag,
            names,
            location: keyword.location,
        }))
    }

    fn parse_precedence_declaration(&mut self) -> Declaration {
        let keyword = self.current_token().clone();
        let associativity = match keyword.kind {
            TokenKind::Left => Associativity::Left,
            TokenKind::Right => Associativity::Right,
            _ => Associativity::Nonassoc,
        };
        self.advance();

        let mut tokens = Vec::new();
        while matches!(
            self.current_token().kind,
            TokenKind::Identifier | TokenKind::Str | TokenKind::Char
        ) {
            tokens.push(self.current_token().text.clone());
            self.advance();
        }

        Declaration::Precedence(PrecedenceDeclaration {
            associativity,
            tokens,
            location: keyword.location,
        })
    }

    fn parse_start_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let keyword = self.expect(TokenKind::Start)?;
        let symbol = self.expect(TokenKind::Identifier)?;

        Ok(Declaration::Start(StartDeclaration {
            symbol: symbol.text,
            location: keyword.location,
        }))
    }

    fn parse_union_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let keyword = self.expect(TokenKind::Union)?;

        let mut body = Default::default();
        if self.check(TokenKind::Action) {
            body = self.current_token().text.clone();
            self.advance();
        }

        Ok(Declaration::Union(UnionDeclaration {
            body,
            location: keyword.location,
        }))
    }

    /// Parses the body of a `%rule` declaration (the keyword is already
    /// consumed). Always wrapped as a parameterized rule, even with an
    /// empty parameter list.
    fn parse_rule_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let name = self.expect(TokenKind::Identifier)?;

        let mut parameters = Vec::new();
        if self.check(TokenKind::LParen) {
            self.advance();
            parameters = self.parse_parameter_list()?;
            self.expect(TokenKind::RParen)?;
        }

        self.expect(TokenKind::Colon)?;
        let alternatives = self.parse_alternatives()?;

        Ok(Declaration::Rule(RuleLike::Parameterized(
            ParameterizedRule {
                name: name.text,
                parameters,
                alternatives,
                location: name.location,
            },
        )))
    }

    /// Parses the body of a `%inline` declaration (keyword consumed).
    fn parse_inline_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let name = self.expect(TokenKind::Identifier)?;

        Ok(Declaration::Inline(InlineRule {
            rule_name: name.text,
            location: name.location,
        }))
    }

    fn parse_rules(&mut self) -> Result<Vec<RuleLike>, SyntaxError> {
        let mut rules = Vec::new();

        while !self.check(TokenKind::SectionSeparator) && !self.check(TokenKind::Eof) {
            if self.check(TokenKind::Identifier) {
                rules.push(self.parse_rule()?);
            } else {
                // Stray tokens between rules are skipped, matching the
                // lexer's tolerance for malformed input.
                self.advance();
            }
        }

        Ok(rules)
    }

    fn parse_rule(&mut self) -> Result<RuleLike, SyntaxError> {
        let name = self.expect(TokenKind::Identifier)?;

        let mut parameters = Vec::new();
        if self.check(TokenKind::LParen) {
            self.advance();
            parameters = self.parse_parameter_list()?;
            self.expect(TokenKind::RParen)?;
        }

        self.expect(TokenKind::Colon)?;
        let alternatives = self.parse_alternatives()?;

        if parameters.is_empty() {
            Ok(RuleLike::Plain(Rule {
                name: name.text,
                alternatives,
                location: name.location,
            }))
        } else {
            Ok(RuleLike::Parameterized(ParameterizedRule {
                name: name.text,
                parameters,
                alternatives,
                location: name.location,
            }))
        }
    }

    /// Parses pipe-separated alternatives followed by an optional `;`.
    fn parse_alternatives(&mut self) -> Result<Vec<Alternative>, SyntaxError> {
        let mut alternatives = vec![self.parse_alternative()?];

        while self.check(TokenKind::Pipe) {
            self.advance();
            alternatives.push(self.parse_alternative()?);
        }

        if self.check(TokenKind::Semicolon) {
            self.advance();
        }

        Ok(alternatives)
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<ecow::EcoString>, SyntaxError> {
        let mut params = vec![self.expect(TokenKind::Identifier)?.text];

        while self.check(TokenKind::Comma) {
            self.advance();
            params.push(self.expect(TokenKind::Identifier)?.text);
        }

        Ok(params)
    }

    /// Parses the comma-separated arguments of a parameterized-rule call.
    fn parse_argument_list(&mut self) -> Result<Vec<Symbol>, SyntaxError> {
        let mut args = Vec::new();

        if self.at_symbol() {
            args.push(self.parse_bare_symbol());

            while self.check(TokenKind::Comma) {
                self.advance();
                if !self.at_symbol() {
                    break;
                }
                args.push(self.parse_bare_symbol());
            }
        }

        Ok(args)
    }

    fn at_symbol(&self) -> bool {
        matches!(
            self.current_token().kind,
            TokenKind::Identifier | TokenKind::Str | TokenKind::Char
        )
    }

    /// Consumes the current symbol token with no alias or argument suffix.
    fn parse_bare_symbol(&mut self) -> Symbol {
        let token = self.current_token().clone();
        self.advance();
        let kind = symbol_kind(&token);
        Symbol::new(token.text, kind, token.location)
    }

    fn parse_alternative(&mut self) -> Result<Alternative, SyntaxError> {
        let start_location = self.current_token().location.clone();
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut prec = None;

        loop {
            match self.current_token().kind {
                TokenKind::Prec => {
                    self.advance();
                    prec = Some(self.current_token().text.clone());
                    self.advance();
                }
                TokenKind::Identifier | TokenKind::Str | TokenKind::Char => {
                    let token = self.current_token().clone();
                    self.advance();

                    let mut alias_name = None;
                    let mut arguments = None;

                    if self.check(TokenKind::LBracket) {
                        self.advance();
                        alias_name = Some(self.expect(TokenKind::Identifier)?.text);
                        self.expect(TokenKind::RBracket)?;
                    } else if self.check(TokenKind::LParen) {
                        self.advance();
                        arguments = Some(self.parse_argument_list()?);
                        self.expect(TokenKind::RParen)?;
                    }

                    symbols.push(Symbol {
                        name: token.text.clone(),
                        kind: symbol_kind(&token),
                        alias_name,
                        arguments,
                        location: token.location,
                    });
                }
                _ => break,
            }
        }

        let mut action = None;
        if self.check(TokenKind::Action) {
            let token = self.current_token().clone();
            action = Some(Action {
                code: token.text,
                location: token.location,
            });
            self.advance();
        }

        let location = symbols
            .first()
            .map_or(start_location, |sym| sym.location.clone());

        Ok(Alternative {
            symbols,
            action,
            prec,
            location,
        })
    }

    /// Everything after the second `%%`, concatenated verbatim from the
    /// remaining token payloads. Returns `None` when there is no epilogue
    /// section or it is empty.
    fn parse_epilogue(&mut self) -> Option<Epilogue> {
        if !self.check(TokenKind::SectionSeparator) {
            return None;
        }
        self.advance();

        let mut code = String::new();
        while !self.check(TokenKind::Eof) {
            code.push_str(&self.current_token().text);
            self.advance();
        }

        if code.is_empty() {
            None
        } else {
            Some(Epilogue {
                code: code.into(),
                location: self.current_token().location.clone(),
            })
        }
    }
}

/// Quoted literals and uppercase-initial identifiers are terminals.
fn symbol_kind(token: &Token) -> SymbolKind {
    let literal = matches!(token.kind, TokenKind::Str | TokenKind::Char);
    if literal || token.text.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        SymbolKind::Terminal
    } else {
        SymbolKind::Nonterminal
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::super::lex;
    use super::*;

    fn parse_source(source: &str) -> GrammarFile {
        parse(lex(source, "test.y")).expect("grammar should parse")
    }

    fn parse_err(source: &str) -> SyntaxError {
        parse(lex(source, "test.y")).expect_err("grammar should not parse")
    }

    #[test]
    fn parse_minimal_grammar() {
        let file = parse_source("%%\nexpr: NUMBER ;\n");
        assert!(file.prologue.is_none());
        assert!(file.declarations.is_empty());
        assert_eq!(file.rules.len(), 1);
        assert_eq!(file.rules[0].name(), "expr");
        assert!(file.epilogue.is_none());
    }

    #[test]
    fn parse_prologue_and_epilogue() {
        let file = parse_source(indoc! {"
            %{
            #include <stdio.h>
            %}
            %%
            expr: NUMBER ;
            %%
            int main(void) { return 0; }
        "});
        assert!(file.prologue.as_ref().unwrap().code.contains("stdio.h"));
        let epilogue = file.epilogue.unwrap();
        assert!(epilogue.code.contains("main"));
    }

    #[test]
    fn parse_empty_epilogue_is_none() {
        let file = parse_source("%%\nexpr: NUMBER ;\n%%\n");
        assert!(file.epilogue.is_none());
    }

    #[test]
    fn parse_token_declaration_with_tag() {
        let file = parse_source("%token <val> NUMBER FLOAT\n%%\nexpr: NUMBER ;\n");
        let Declaration::Token(decl) = &file.declarations[0] else {
            panic!("expected token declaration");
        };
        assert_eq!(decl.type_tag.as_deref(), Some("val"));
        assert_eq!(decl.names, ["NUMBER", "FLOAT"]);
    }

    #[test]
    fn parse_token_declaration_with_literals() {
        let file = parse_source("%token PLUS '+' \"if\"\n%%\nexpr: PLUS ;\n");
        let Declaration::Token(decl) = &file.declarations[0] else {
            panic!("expected token declaration");
        };
        assert_eq!(decl.names, ["PLUS", "+", "if"]);
    }

    #[test]
    fn parse_type_declaration() {
        let file = parse_source("%type <node> expr term\n%%\nexpr: term ;\n");
        let Declaration::Type(decl) = &file.declarations[0] else {
            panic!("expected type declaration");
        };
        assert_eq!(decl.type_tag.as_deref(), Some("node"));
        assert_eq!(decl.names, ["expr", "term"]);
    }

    #[test]
    fn parse_precedence_declarations() {
        let file = parse_source(indoc! {"
            %left '+' '-'
            %right UMINUS
            %nonassoc EQ
            %%
            expr: NUMBER ;
        "});
        let assocs: Vec<_> = file
            .declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Precedence(p) => Some(p.associativity),
                _ => None,
            })
            .collect();
        assert_eq!(
            assocs,
            [
                Associativity::Left,
                Associativity::Right,
                Associativity::Nonassoc
            ]
        );
    }

    #[test]
    fn parse_start_and_union() {
        let file = parse_source(indoc! {"
            %start program
            %union { int num; char *str; }
            %%
            program: NUMBER ;
        "});
        assert!(matches!(
            &file.declarations[0],
            Declaration::Start(s) if s.symbol == "program"
        ));
        assert!(matches!(
            &file.declarations[1],
            Declaration::Union(u) if u.body.contains("int num")
        ));
    }

    #[test]
    fn parse_unknown_directives_are_skipped() {
        let file = parse_source("%expect 0\n%token NUMBER\n%%\nexpr: NUMBER ;\n");
        assert_eq!(file.declarations.len(), 1);
        assert!(matches!(&file.declarations[0], Declaration::Token(_)));
    }

    #[test]
    fn parse_multiple_alternatives() {
        let file = parse_source("%%\nexpr: expr '+' term | term ;\n");
        let alts = file.rules[0].alternatives();
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].symbols.len(), 3);
        assert_eq!(alts[1].symbols.len(), 1);
    }

    #[test]
    fn parse_epsilon_alternative() {
        let file = parse_source("%%\nopt_expr: expr | ;\n");
        let alts = file.rules[0].alternatives();
        assert!(!alts[0].is_epsilon());
        assert!(alts[1].is_epsilon());
    }

    #[test]
    fn parse_semantic_action() {
        let file = parse_source("%%\nexpr: expr '+' term { $$ = $1 + $3; } ;\n");
        let action = file.rules[0].alternatives()[0].action.as_ref().unwrap();
        assert_eq!(action.code, "{ $$ = $1 + $3; }");
    }

    #[test]
    fn parse_prec_override() {
        let file = parse_source("%%\nexpr: '-' expr %prec UMINUS ;\n");
        let alt = &file.rules[0].alternatives()[0];
        assert_eq!(alt.prec.as_deref(), Some("UMINUS"));
        assert_eq!(alt.symbols.len(), 2);
    }

    #[test]
    fn parse_named_reference() {
        let file = parse_source("%%\nexpr: expr[lhs] '+' expr[rhs] ;\n");
        let symbols = &file.rules[0].alternatives()[0].symbols;
        assert_eq!(symbols[0].alias_name.as_deref(), Some("lhs"));
        assert_eq!(symbols[2].alias_name.as_deref(), Some("rhs"));
    }

    #[test]
    fn parse_parameterized_rule_in_rules_section() {
        let file = parse_source("%%\nlist(X): X | list(X) ',' X ;\n");
        let RuleLike::Parameterized(rule) = &file.rules[0] else {
            panic!("expected parameterized rule");
        };
        assert_eq!(rule.parameters, ["X"]);
        let call = &rule.alternatives[1].symbols[0];
        assert_eq!(call.name, "list");
        assert_eq!(call.arguments.as_ref().unwrap()[0].name, "X");
    }

    #[test]
    fn parse_rule_declaration() {
        let file = parse_source("%rule pair(X, Y): X Y ;\n%%\nstart: pair(A, B) ;\n");
        let Declaration::Rule(RuleLike::Parameterized(rule)) = &file.declarations[0] else {
            panic!("expected %rule declaration");
        };
        assert_eq!(rule.name, "pair");
        assert_eq!(rule.parameters, ["X", "Y"]);
    }

    #[test]
    fn parse_inline_declaration() {
        let file = parse_source("%inline op\n%%\nexpr: expr op expr ;\n");
        let Declaration::Inline(inline) = &file.declarations[0] else {
            panic!("expected %inline declaration");
        };
        assert_eq!(inline.rule_name, "op");
    }

    #[test]
    fn parse_symbol_classification() {
        let file = parse_source("%%\nexpr: expr '+' NUMBER \"if\" term ;\n");
        let symbols = &file.rules[0].alternatives()[0].symbols;
        assert!(symbols[0].is_nonterminal()); // expr
        assert!(symbols[1].is_terminal()); // '+'
        assert!(symbols[2].is_terminal()); // NUMBER
        assert!(symbols[3].is_terminal()); // "if"
        assert!(symbols[4].is_nonterminal()); // term
    }

    #[test]
    fn parse_missing_colon_is_error() {
        let err = parse_err("%%\nexpr NUMBER ;\n");
        assert_eq!(err.expected, TokenKind::Colon);
        assert_eq!(err.to_string(), "expected ':', got identifier");
    }

    #[test]
    fn parse_missing_section_separator_is_error() {
        let err = parse_err("%token NUMBER\n");
        assert_eq!(err.expected, TokenKind::SectionSeparator);
        assert_eq!(err.found, TokenKind::Eof);
    }

    #[test]
    fn parse_unclosed_named_reference_is_error() {
        let err = parse_err("%%\nexpr: expr[lhs '+' expr ;\n");
        assert_eq!(err.expected, TokenKind::RBracket);
    }
}
