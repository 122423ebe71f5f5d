// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Static analysis over parsed grammars.
//!
//! The analyzers here are shared infrastructure for the lint rules:
//! symbol bookkeeping, reachability from the start symbol, recursion
//! shapes, and structural conflict heuristics.

pub mod conflict;
pub mod reachability;
pub mod recursion;
pub mod symbol_table;

pub use reachability::Reachability;
pub use symbol_table::{build_symbol_table, DuplicateDeclaration, SymbolTable};
