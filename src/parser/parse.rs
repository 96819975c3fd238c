//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a single-lookahead recursive descent validator:
//! - This module: Parser struct, token cursor, error types, depth guard
//! - `declarations`: `NEW VAR` and `NEW MACRO`
//! - `statements`: `EXEC` blocks, instructions, commands, loops, macro calls
//! - `conditions`: `not (...)` and the named predicates
//! - `hoist`: optional signature pre-pass
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Nothing is built: each grammar method returns `Ok(())` once its production
//! has been consumed and checked, or the first [`ParseError`].

use crate::config::{MacroRegistration, ParserConfig};
use crate::parser::hoist;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::location::SourceLocation;
use crate::symbols::SymbolTable;
use std::fmt;
use thiserror::Error;

/// Everything that can make a program invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Unrecognized character '{0}'")]
    UnrecognizedCharacter(char),

    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("Expected 'EXEC' or 'NEW', found {found}")]
    UnexpectedStatement { found: String },

    #[error("Unknown instruction: {found}")]
    UnknownInstruction { found: String },

    #[error("Expected condition, found {found}")]
    ExpectedCondition { found: String },

    #[error("Integer literal out of range: {literal}")]
    IntegerOutOfRange { literal: String },

    #[error("Undefined identifier '{name}'")]
    UndefinedIdentifier { name: String },

    #[error("Invalid literal '{name}' for '{command}'")]
    InvalidLiteral { name: String, command: String },

    #[error("Undefined macro '{name}'")]
    UndefinedMacro { name: String },

    #[error("Macro '{name}' takes {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate parameter '{name}' in macro '{macro_name}'")]
    DuplicateParameter { name: String, macro_name: String },

    #[error("'{name}' is already declared")]
    DuplicateDeclaration { name: String },

    #[error("'{name}' is a reserved name and cannot name a macro")]
    ReservedName { name: String },

    #[error("Nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

/// Value of a numeric literal; anything past `u64::MAX` is out of range.
pub(crate) fn integer_value(literal: &Token) -> Result<u64, ParseError> {
    literal.lexeme.parse::<u64>().map_err(|_| {
        ParseError::new(
            ParseErrorKind::IntegerOutOfRange {
                literal: literal.lexeme.clone(),
            },
            literal.location,
        )
    })
}

/// Recursive descent validator for robot programs
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    /// Byte offset just past the most recently consumed token.
    pub(crate) last_end: usize,
    pub(crate) symbols: SymbolTable,
    pub(crate) config: ParserConfig,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str, config: ParserConfig) -> Self {
        let mut symbols = SymbolTable::new();
        if config.macro_registration == MacroRegistration::Hoisted {
            for signature in hoist::collect_signatures(source) {
                symbols.declare_macro(&signature.name, signature.params, None);
            }
        }

        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            last_end: 0,
            symbols,
            config,
            depth: 0,
        }
    }

    /// Validate the entire program: `statement* EOF`.
    pub fn parse_program(&mut self) -> Result<(), ParseError> {
        self.reject_unknown()?;

        while !self.is_at_end() {
            self.parse_statement()?;
        }

        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and pull the next one from the lexer.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.last_end = consumed.end_offset();
        self.reject_unknown()?;
        Ok(consumed)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("{kind} {ctx}")))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, ctx).map(drop)
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, ctx).map(drop)
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Ident, ctx)
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.location)
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        self.error(ParseErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current.to_string(),
        })
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is reached.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(self.error(ParseErrorKind::NestingTooDeep {
                limit: self.config.max_depth,
            }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn reject_unknown(&self) -> Result<(), ParseError> {
        if self.current.kind == TokenKind::Unknown {
            let ch = self.current.lexeme.chars().next().unwrap_or('\u{fffd}');
            return Err(self.error(ParseErrorKind::UnrecognizedCharacter(ch)));
        }
        Ok(())
    }
}
