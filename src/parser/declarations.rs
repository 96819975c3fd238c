//! Declaration parsing implementation
//!
//! This module handles `NEW` definitions, the only statements that change the
//! symbol table:
//!
//! - Variables: `NEW VAR one = 1`
//! - Macros: `NEW MACRO goend(n) { ... }`
//!
//! # Grammar
//!
//! ```text
//! definition ::= "NEW" (var_def | macro_def)
//! var_def    ::= "VAR" IDENT "=" NUMBER
//! macro_def  ::= "MACRO" IDENT "(" (IDENT ("," IDENT)*)? ")" "{" block "}"
//! ```
//!
//! A macro is registered only after its body validates, so under the default
//! registration mode the body cannot refer to the macro itself.

use crate::parser::lexer::{Token, TokenKind};
use crate::parser::location::Span;
use crate::parser::parse::{integer_value, ParseError, ParseErrorKind, Parser};
use crate::parser::vocabulary;
use tracing::debug;

impl Parser {
    pub(crate) fn parse_definition(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'NEW'

        match self.current.kind {
            TokenKind::Var => self.parse_variable_declaration(),
            TokenKind::Macro => self.parse_macro_declaration(),
            _ => Err(self.unexpected("'VAR' or 'MACRO' after 'NEW'")),
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'VAR'

        let name = self.expect_identifier("as variable name")?;
        self.expect_token(TokenKind::Assign, "after variable name")?;
        let literal = self.expect_token(TokenKind::Number, "as variable value")?;

        let value = integer_value(&literal)?;

        if self.config.reject_duplicates && self.symbols.resolve_variable(&name.lexeme).is_some() {
            return Err(duplicate(&name));
        }

        debug!(name = %name.lexeme, value, "declared variable");
        self.symbols.declare_variable(&name.lexeme, value);
        Ok(())
    }

    fn parse_macro_declaration(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'MACRO'

        let name = self.expect_identifier("as macro name")?;
        if vocabulary::is_reserved_name(&name.lexeme) {
            return Err(ParseError::new(
                ParseErrorKind::ReservedName {
                    name: name.lexeme.clone(),
                },
                name.location,
            ));
        }
        if self.config.reject_duplicates
            && self
                .symbols
                .resolve_macro(&name.lexeme)
                .is_some_and(|m| m.is_defined())
        {
            return Err(duplicate(&name));
        }

        self.expect_lparen("after macro name")?;
        let params = self.parse_macro_parameters(&name.lexeme)?;
        self.expect_rparen("after macro parameters")?;

        let start = self.current.location.offset;
        self.symbols.enter_macro_body(&params);
        let body = self.parse_braced_block("before macro body");
        self.symbols.leave_macro_body();
        body?;
        let span = Span::new(start, self.last_end);

        debug!(name = %name.lexeme, arity = params.len(), "declared macro");
        self.symbols.declare_macro(&name.lexeme, params, Some(span));
        Ok(())
    }

    /// Parse formal parameter names: `(a, b, c)`
    fn parse_macro_parameters(&mut self, macro_name: &str) -> Result<Vec<String>, ParseError> {
        let mut params: Vec<String> = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let param = self.expect_identifier("as macro parameter")?;
            if params.contains(&param.lexeme) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateParameter {
                        name: param.lexeme,
                        macro_name: macro_name.to_string(),
                    },
                    param.location,
                ));
            }
            params.push(param.lexeme);

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(params)
    }
}

fn duplicate(name: &Token) -> ParseError {
    ParseError::new(
        ParseErrorKind::DuplicateDeclaration {
            name: name.lexeme.clone(),
        },
        name.location,
    )
}
