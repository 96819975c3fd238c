//! Condition parsing for `if` and `do`
//!
//! ```text
//! condition ::= "not" "(" condition ")"
//!             | COND_NAME "?"? "(" arg? ")"
//! ```
//!
//! `not` chains count against the nesting limit like blocks do.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::vocabulary;

impl Parser {
    pub(crate) fn parse_condition(&mut self) -> Result<(), ParseError> {
        self.nested(|p| match p.current.kind {
            TokenKind::Not => p.parse_negation(),
            TokenKind::Ident if vocabulary::is_condition(&p.current.lexeme) => p.parse_predicate(),
            _ => Err(p.error(ParseErrorKind::ExpectedCondition {
                found: p.current.to_string(),
            })),
        })
    }

    fn parse_negation(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'not'
        self.expect_lparen("after 'not'")?;
        self.parse_condition()?;
        self.expect_rparen("to close 'not'")?;
        Ok(())
    }

    /// `isBlocked?(left)`, `isFacing(back)`, `isZero?()`
    fn parse_predicate(&mut self) -> Result<(), ParseError> {
        let name = self.advance()?.lexeme;
        self.match_token(TokenKind::Query)?;

        self.expect_lparen(&format!("after '{name}'"))?;
        if !self.check(TokenKind::RParen) {
            self.parse_argument(None)?;
        }
        self.expect_rparen(&format!("to close '{name}'"))?;
        Ok(())
    }
}
