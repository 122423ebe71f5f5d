// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree for grammar files.
//!
//! A parsed file is a [`GrammarFile`]: an optional prologue, the
//! declarations before the first `%%`, the grammar rules, and an optional
//! epilogue. Declarations and rules are closed enums, so analyzers and
//! lint rules match exhaustively and the compiler flags every site that
//! needs updating when a new construct is added.
//!
//! # Design Principles
//!
//! - **Closed sum types**: no open-ended "node kind" strings; every
//!   construct is a variant.
//! - **Locations everywhere**: each node keeps the location of the token
//!   that introduced it, so offenses point at real source positions.
//! - **Cheap clones**: names and payloads are [`EcoString`]s; analysis
//!   passes clone freely without copying the underlying text.

use ecow::EcoString;

use crate::parse::Location;

/// A complete parsed grammar file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFile {
    /// `%{ ... %}` verbatim code block, if present.
    pub prologue: Option<Prologue>,
    /// Declarations from the section before the first `%%`.
    pub declarations: Vec<Declaration>,
    /// Grammar rules from the section between the two `%%` separators.
    pub rules: Vec<RuleLike>,
    /// Verbatim text after the second `%%`, if present.
    pub epilogue: Option<Epilogue>,
    pub location: Location,
}

impl GrammarFile {
    /// The grammar's start symbol: the `%start` declaration if there is
    /// one, otherwise the first rule's name.
    #[must_use]
    pub fn start_symbol(&self) -> Option<&EcoString> {
        for decl in &self.declarations {
            if let Declaration::Start(start) = decl {
                return Some(&start.symbol);
            }
        }
        self.rules.first().map(RuleLike::name)
    }

    /// All rule definitions in source order: `%rule` declarations first,
    /// then the rules section. This is the set analyzers walk when they
    /// need "everything with a name and alternatives".
    #[must_use]
    pub fn all_rules(&self) -> Vec<&RuleLike> {
        let mut out: Vec<&RuleLike> = Vec::new();
        for decl in &self.declarations {
            if let Declaration::Rule(rule) = decl {
                out.push(rule);
            }
        }
        out.extend(&self.rules);
        out
    }
}

/// The `%{ ... %}` prologue block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prologue {
    /// Verbatim text between the delimiters.
    pub code: EcoString,
    pub location: Location,
}

/// The text after the second `%%`, copied through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epilogue {
    pub code: EcoString,
    pub location: Location,
}

/// A declaration from the section before the first `%%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `%token [<tag>] NAME ...`
    Token(TokenDeclaration),
    /// `%type <tag> name ...`
    Type(TypeDeclaration),
    /// `%left`, `%right`, or `%nonassoc`
    Precedence(PrecedenceDeclaration),
    /// `%start name`
    Start(StartDeclaration),
    /// `%union { ... }`
    Union(UnionDeclaration),
    /// `%rule name(params): alternatives ;` (Lrama extension)
    Rule(RuleLike),
    /// `%inline name` (Lrama extension)
    Inline(InlineRule),
}

/// A `%token` line declaring one or more token names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDeclaration {
    /// Declared names in source order. Literal declarations like `'+'`
    /// store the unquoted payload.
    pub names: Vec<EcoString>,
    /// `<tag>` type tag applying to every name on the line, if given.
    pub type_tag: Option<EcoString>,
    pub location: Location,
}

/// A `%type` line assigning a type tag to nonterminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub type_tag: Option<EcoString>,
    pub names: Vec<EcoString>,
    pub location: Location,
}

/// Operator associativity, as declared by a precedence directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    Nonassoc,
}

impl std::fmt::Display for Associativity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Left => "%left",
            Self::Right => "%right",
            Self::Nonassoc => "%nonassoc",
        })
    }
}

/// A `%left` / `%right` / `%nonassoc` line declaring one precedence level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceDeclaration {
    pub associativity: Associativity,
    /// The tokens sharing this level, in declaration order.
    pub tokens: Vec<EcoString>,
    pub location: Location,
}

/// `%start name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDeclaration {
    pub symbol: EcoString,
    pub location: Location,
}

/// `%union { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDeclaration {
    /// Verbatim union body, braces included. Empty if no body followed.
    pub body: EcoString,
    pub location: Location,
}

/// An Lrama `%inline name` marker: the named rule is expanded at its call
/// sites by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRule {
    /// The rule this marker applies to.
    pub rule_name: EcoString,
    pub location: Location,
}

/// A plain grammar rule: `name: alt | alt ;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: EcoString,
    pub alternatives: Vec<Alternative>,
    pub location: Location,
}

/// An Lrama parameterized rule: `name(X, Y): ... ;`. Appears both as a
/// `%rule` declaration and as a rules-section definition with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterizedRule {
    pub name: EcoString,
    /// Formal parameter names.
    pub parameters: Vec<EcoString>,
    pub alternatives: Vec<Alternative>,
    pub location: Location,
}

/// A rule definition, plain or parameterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLike {
    Plain(Rule),
    Parameterized(ParameterizedRule),
}

impl RuleLike {
    #[must_use]
    pub fn name(&self) -> &EcoString {
        match self {
            Self::Plain(rule) => &rule.name,
            Self::Parameterized(rule) => &rule.name,
        }
    }

    #[must_use]
    pub fn alternatives(&self) -> &[Alternative] {
        match self {
            Self::Plain(rule) => &rule.alternatives,
            Self::Parameterized(rule) => &rule.alternatives,
        }
    }

    pub fn alternatives_mut(&mut self) -> &mut Vec<Alternative> {
        match self {
            Self::Plain(rule) => &mut rule.alternatives,
            Self::Parameterized(rule) => &mut rule.alternatives,
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::Plain(rule) => &rule.location,
            Self::Parameterized(rule) => &rule.location,
        }
    }

    /// Formal parameters; empty for plain rules.
    #[must_use]
    pub fn parameters(&self) -> &[EcoString] {
        match self {
            Self::Plain(_) => &[],
            Self::Parameterized(rule) => &rule.parameters,
        }
    }
}

/// One alternative (production) of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    /// Right-hand-side symbols, in order. Empty for an epsilon alternative.
    pub symbols: Vec<Symbol>,
    /// Semantic action, if present.
    pub action: Option<Action>,
    /// `%prec SYMBOL` override, if present.
    pub prec: Option<EcoString>,
    pub location: Location,
}

impl Alternative {
    /// True if this alternative derives the empty string.
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Terminal or nonterminal, as classified at parse time: quoted literals
/// and uppercase-initial identifiers are terminals, everything else is a
/// nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

/// One symbol on the right-hand side of an alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The symbol's name (unquoted payload for literal symbols).
    pub name: EcoString,
    pub kind: SymbolKind,
    /// `[name]` named reference, if given.
    pub alias_name: Option<EcoString>,
    /// Arguments of a parameterized-rule call like `list(expr)`, if given.
    pub arguments: Option<Vec<Symbol>>,
    pub location: Location,
}

impl Symbol {
    /// Creates a bare symbol with no alias or arguments.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, kind: SymbolKind, location: Location) -> Self {
        Self {
            name: name.into(),
            kind,
            alias_name: None,
            arguments: None,
            location,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    #[must_use]
    pub fn is_nonterminal(&self) -> bool {
        self.kind == SymbolKind::Nonterminal
    }
}

/// A `{ ... }` semantic action, stored verbatim with its braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub code: EcoString,
    pub location: Location,
}
