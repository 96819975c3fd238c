//! Robot program parser
//!
//! This module checks robot program text against the language grammar:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The [`parse::Parser`] cursor, error types and entry point
//! - [`vocabulary`]: Reserved commands, directions, conditions and constants
//! - [`location`]: Source positions and spans
//! - [`hoist`]: Macro signature pre-pass
//!
//! # Language
//!
//! - Top level: `EXEC { ... }` blocks and `NEW VAR` / `NEW MACRO` definitions
//! - Instructions: commands, `if ... fi`, `rep ... per`, `do ... od`, macro calls
//! - Conditions: `isBlocked?`, `isFacing?`, `isZero?`, nested `not(...)`
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent over a lazily lexed token stream.
//! No tree is built; validation stops at the first error.

mod conditions;
mod declarations;
pub mod hoist;
pub mod lexer;
pub mod location;
pub mod parse;
mod statements;
pub mod vocabulary;
