//! # Introduction
//!
//! roboscript checks programs written in a small command language for a
//! grid-based robot. It answers one question per program: is this text a
//! syntactically and referentially valid program? Nothing is executed.
//!
//! ## Validation pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ SymbolTable) → Verdict
//! ```
//!
//! 1. [`parser::lexer`] — classifies the text into tokens, lazily.
//! 2. [`parser::parse`] — recursive descent over the tokens, enforcing the
//!    grammar and resolving every name against the [`symbols::SymbolTable`].
//! 3. [`verdict`] — folds the first error (if any) into a [`Verdict`].
//! 4. [`config`] — nesting limit, macro registration mode, strictness.
//!
//! ## Language at a glance
//!
//! ```text
//! NEW VAR one = 1;
//! NEW MACRO goend(n) {
//!     if (not(isBlocked?(forward))) then { walk(n); } else { nop; } fi;
//! }
//! EXEC { goend(one); rep 3 times { moves(left, forward); } per; }
//! ```

pub mod config;
pub mod parser;
pub mod symbols;
pub mod verdict;

pub use config::{MacroRegistration, ParserConfig};
pub use parser::parse::{ParseError, ParseErrorKind};
pub use verdict::{validate, Verdict};
