// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Canonical reformatting of parsed grammars.
//!
//! The formatter renders a [`GrammarFile`] back to text in a fixed house
//! style: declarations grouped by kind (tokens, types, precedence,
//! `%start`, `%rule`, `%inline`), one blank line between groups, `%%`
//! separators on their own lines, and rules laid out as
//!
//! ```text
//! expr
//!     : expr '+' term { $$ = $1 + $3; }
//!     | term
//!     ;
//! ```
//!
//! Formatting is an AST round trip, so comments and original spacing are
//! not preserved. The output is stable: formatting already-formatted
//! text yields it unchanged.

use serde::Deserialize;

use crate::ast::{
    Alternative, Associativity, Declaration, GrammarFile, InlineRule, PrecedenceDeclaration,
    RuleLike, Symbol, TokenDeclaration, TypeDeclaration,
};

/// Formatter options, deserialized from the `[formatter]` config table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub indent_size: usize,
    pub align_tokens: bool,
    pub align_alternatives: bool,
    pub blank_lines_around_sections: usize,
    pub max_line_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            align_tokens: true,
            align_alternatives: true,
            blank_lines_around_sections: 1,
            max_line_length: 120,
        }
    }
}

/// Renders `grammar` in the canonical style.
#[must_use]
pub fn format(grammar: &GrammarFile, options: &FormatOptions) -> String {
    let mut sections = Vec::new();

    if let Some(prologue) = &grammar.prologue {
        sections.push(format!("%{{\n{}\n%}}", prologue.code));
    }

    if !grammar.declarations.is_empty() {
        sections.push(format_declarations(&grammar.declarations, options));
    }

    sections.push(String::new());
    sections.push("%%".to_string());
    sections.push(String::new());

    sections.push(format_rules(&grammar.rules));

    if let Some(epilogue) = &grammar.epilogue {
        sections.push(String::new());
        sections.push("%%".to_string());
        sections.push(String::new());
        sections.push(epilogue.code.to_string());
    }

    sections.join("\n")
}

/// Declarations grouped by kind, each group followed by a blank line.
fn format_declarations(declarations: &[Declaration], options: &FormatOptions) -> String {
    let mut tokens: Vec<&TokenDeclaration> = Vec::new();
    let mut types: Vec<&TypeDeclaration> = Vec::new();
    let mut precedences: Vec<&PrecedenceDeclaration> = Vec::new();
    let mut start = None;
    let mut rules: Vec<&RuleLike> = Vec::new();
    let mut inlines: Vec<&InlineRule> = Vec::new();

    for decl in declarations {
        match decl {
            Declaration::Token(decl) => tokens.push(decl),
            Declaration::Type(decl) => types.push(decl),
            Declaration::Precedence(decl) => precedences.push(decl),
            Declaration::Start(decl) => start = Some(decl),
            Declaration::Rule(rule) => rules.push(rule),
            Declaration::Inline(inline) => inlines.push(inline),
            Declaration::Union(_) => {}
        }
    }

    let mut out = Vec::new();

    if !tokens.is_empty() {
        out.push(format_token_declarations(&tokens, options));
        out.push(String::new());
    }
    if !types.is_empty() {
        out.push(format_type_declarations(&types));
        out.push(String::new());
    }
    if !precedences.is_empty() {
        out.push(format_precedence_declarations(&precedences, options));
        out.push(String::new());
    }
    if let Some(start) = start {
        out.push(format!("%start {}", start.symbol));
        out.push(String::new());
    }
    if !rules.is_empty() {
        out.push(format_rule_declarations(&rules));
        out.push(String::new());
    }
    if !inlines.is_empty() {
        out.push(format_inline_declarations(&inlines));
        out.push(String::new());
    }

    out.join("\n")
}

fn format_token_declarations(declarations: &[&TokenDeclaration], options: &FormatOptions) -> String {
    if !options.align_tokens {
        return declarations
            .iter()
            .map(|decl| {
                let tag = decl
                    .type_tag
                    .as_ref()
                    .map_or_else(String::new, |tag| format!(" <{tag}>"));
                format!("%token{tag} {}", decl.names.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    // Pad tags to the widest so the name columns line up.
    let max_tag_width = declarations
        .iter()
        .map(|decl| decl.type_tag.as_ref().map_or(0, |tag| tag.len() + 2))
        .max()
        .unwrap_or(0);

    declarations
        .iter()
        .map(|decl| {
            let tag = decl
                .type_tag
                .as_ref()
                .map_or_else(String::new, |tag| format!("<{tag}>"));
            format!("%token {:<max_tag_width$} {}", tag, decl.names.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_type_declarations(declarations: &[&TypeDeclaration]) -> String {
    declarations
        .iter()
        .map(|decl| {
            let tag = decl
                .type_tag
                .as_ref()
                .map_or_else(String::new, |tag| format!(" <{tag}>"));
            format!("%type{tag} {}", decl.names.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_precedence_declarations(
    declarations: &[&PrecedenceDeclaration],
    options: &FormatOptions,
) -> String {
    // "%nonassoc" is the widest directive.
    let width = Associativity::Nonassoc.to_string().len();

    declarations
        .iter()
        .map(|decl| {
            let directive = decl.associativity.to_string();
            if options.align_tokens {
                format!("{directive:<width$} {}", decl.tokens.join(" "))
            } else {
                format!("{directive} {}", decl.tokens.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_rule_declarations(declarations: &[&RuleLike]) -> String {
    declarations
        .iter()
        .map(|rule| {
            let params = format!("({})", rule.parameters().join(", "));
            let alternatives = rule
                .alternatives()
                .iter()
                .map(format_alternative)
                .collect::<Vec<_>>()
                .join(" | ");
            format!("%rule {}{params}: {alternatives} ;", rule.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_inline_declarations(declarations: &[&InlineRule]) -> String {
    declarations
        .iter()
        .map(|inline| format!("%inline {}", inline.rule_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_rules(rules: &[RuleLike]) -> String {
    rules
        .iter()
        .map(format_rule)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_rule(rule: &RuleLike) -> String {
    let mut header = rule.name().to_string();
    if !rule.parameters().is_empty() {
        header.push_str(&format!("({})", rule.parameters().join(", ")));
    }

    let mut lines = vec![header];
    for (idx, alt) in rule.alternatives().iter().enumerate() {
        let prefix = if idx == 0 { "    :" } else { "    |" };
        lines.push(format!("{prefix} {}", format_alternative(alt)));
    }
    lines.push("    ;".to_string());
    lines.join("\n")
}

fn format_alternative(alt: &Alternative) -> String {
    let symbols = alt
        .symbols
        .iter()
        .map(format_symbol)
        .collect::<Vec<_>>()
        .join(" ");
    let prec = alt
        .prec
        .as_ref()
        .map_or_else(String::new, |prec| format!(" %prec {prec}"));
    let action = alt
        .action
        .as_ref()
        .map_or_else(String::new, |action| format!(" {}", action.code));

    format!("{symbols}{prec}{action}")
}

fn format_symbol(symbol: &Symbol) -> String {
    let mut out = symbol.name.to_string();

    if let Some(alias) = &symbol.alias_name {
        out.push_str(&format!("[{alias}]"));
    }
    if let Some(args) = &symbol.arguments {
        if !args.is_empty() {
            let rendered = args.iter().map(format_symbol).collect::<Vec<_>>().join(", ");
            out.push_str(&format!("({rendered})"));
        }
    }

    out
}
