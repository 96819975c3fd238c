//! Statement parsing implementation
//!
//! This module handles top-level statements and everything that can appear
//! inside a block:
//!
//! - `EXEC { ... }` blocks
//! - Commands: `walk(1)`, `moves(left, right)`, `safeExe(walk(1))`, `nop`
//! - Control flow: `if ... fi`, `rep ... per`, `do ... od`
//! - Macro invocations: `goend(one)`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= (exec_block | definition) ";"?
//! exec_block  ::= "EXEC" "{" block "}"
//! block       ::= instruction*
//! instruction ::= (command | if_stmt | rep_loop | while_loop | macro_call) ";"
//! command     ::= CMD_ID "(" arg_list? ")"
//! if_stmt     ::= "if" "(" condition ")" "then" "{" block "}" ("else" "{" block "}")? "fi"
//! rep_loop    ::= "rep" (NUMBER | CONST | IDENT) "times" "{" block "}" "per"
//! while_loop  ::= "do" "(" condition ")" "{" block "}" "od"
//! macro_call  ::= IDENT "(" arg_list? ")"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{integer_value, ParseError, ParseErrorKind, Parser};
use crate::parser::vocabulary;
use tracing::trace;

impl Parser {
    /// Parse a top-level statement, with its optional trailing `;`
    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::Exec => self.parse_exec_block()?,
            TokenKind::New => self.parse_definition()?,
            _ => {
                return Err(self.error(ParseErrorKind::UnexpectedStatement {
                    found: self.current.to_string(),
                }));
            }
        }

        self.match_token(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_exec_block(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'EXEC'
        self.parse_braced_block("after 'EXEC'")
    }

    /// Parse `{ block }`, one nesting level deeper
    pub(crate) fn parse_braced_block(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace, ctx)?;
        self.nested(|p| p.parse_block())?;
        self.expect_token(TokenKind::RBrace, "to close block")?;
        Ok(())
    }

    /// Parse instructions up to the closing brace (or end of input, which the
    /// caller then reports as a missing `}`)
    fn parse_block(&mut self) -> Result<(), ParseError> {
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_instruction()?;
        }
        Ok(())
    }

    /// Parse one instruction and its terminating `;`
    fn parse_instruction(&mut self) -> Result<(), ParseError> {
        trace!(token = %self.current, "instruction");

        match self.current.kind {
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::Rep => self.parse_repeat()?,
            TokenKind::Do => self.parse_while_loop()?,
            _ if self.at_command() => self.parse_command()?,
            TokenKind::Ident => {
                if self.symbols.resolve_macro(&self.current.lexeme).is_none() {
                    return Err(self.error(ParseErrorKind::UndefinedMacro {
                        name: self.current.lexeme.clone(),
                    }));
                }
                self.parse_macro_call()?;
            }
            _ => {
                return Err(self.error(ParseErrorKind::UnknownInstruction {
                    found: self.current.to_string(),
                }));
            }
        }

        self.expect_token(TokenKind::Semicolon, "after instruction")?;
        Ok(())
    }

    /// True when the current token names a primitive command
    pub(crate) fn at_command(&self) -> bool {
        match self.current.kind {
            TokenKind::Nop | TokenKind::BalloonsHere => true,
            TokenKind::Ident => vocabulary::is_command(&self.current.lexeme),
            _ => false,
        }
    }

    /// Parse a command invocation; the caller has checked [`Self::at_command`]
    fn parse_command(&mut self) -> Result<(), ParseError> {
        let name = self.advance()?.lexeme;

        if name == vocabulary::SAFE_EXE {
            self.expect_lparen("after 'safeExe'")?;
            self.nested(|p| p.parse_safe_exe_argument())?;
            self.expect_rparen("after 'safeExe' argument")?;
            return Ok(());
        }

        // `nop` may be written bare
        if self.current.kind != TokenKind::LParen && name == "nop" {
            return Ok(());
        }

        self.expect_lparen(&format!("after '{name}'"))?;
        if !self.check(TokenKind::RParen) {
            self.parse_argument_list(Some(name.as_str()))?;
        }
        self.expect_rparen(&format!("to close '{name}' arguments"))?;
        Ok(())
    }

    /// `safeExe` wraps exactly one command or number
    fn parse_safe_exe_argument(&mut self) -> Result<(), ParseError> {
        if self.at_command() {
            self.parse_command()
        } else if self.check(TokenKind::Number) {
            self.advance().map(drop)
        } else {
            Err(self.unexpected("a command or number inside 'safeExe'"))
        }
    }

    /// Parse `arg ("," arg)*` and return the argument count
    pub(crate) fn parse_argument_list(&mut self, command: Option<&str>) -> Result<usize, ParseError> {
        let mut count = 0;
        loop {
            self.parse_argument(command)?;
            count += 1;
            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }
        Ok(count)
    }

    /// Parse one argument value.
    ///
    /// Numbers and state constants are always valid. A bare identifier must be
    /// a declared variable, a parameter of the enclosing macro, or a direction
    /// literal. `command` is the command being called, if any; it only affects
    /// how an unresolved word is reported.
    pub(crate) fn parse_argument(&mut self, command: Option<&str>) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::Number => {}
            kind if kind.is_state_constant() => {}
            TokenKind::Ident => {
                let word = &self.current.lexeme;
                if !self.symbols.is_value_name(word) && !vocabulary::is_direction(word) {
                    let kind = match command {
                        Some(command) if vocabulary::is_directional_command(command) => {
                            ParseErrorKind::InvalidLiteral {
                                name: word.clone(),
                                command: command.to_string(),
                            }
                        }
                        _ => ParseErrorKind::UndefinedIdentifier { name: word.clone() },
                    };
                    return Err(self.error(kind));
                }
            }
            _ => return Err(self.unexpected("an argument")),
        }
        self.advance()?;
        Ok(())
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'if'

        self.expect_lparen("after 'if'")?;
        self.parse_condition()?;
        self.expect_rparen("after if condition")?;
        self.expect_token(TokenKind::Then, "after if condition")?;
        self.parse_braced_block("after 'then'")?;

        if self.match_token(TokenKind::Else)? {
            self.parse_braced_block("after 'else'")?;
        }

        self.expect_token(TokenKind::Fi, "to close 'if'")?;
        Ok(())
    }

    /// Parse `rep <count> times { ... } per`
    fn parse_repeat(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'rep'

        match self.current.kind {
            TokenKind::Number => {
                integer_value(&self.current)?;
            }
            kind if kind.is_state_constant() => {}
            TokenKind::Ident => {
                if !self.symbols.is_value_name(&self.current.lexeme) {
                    return Err(self.error(ParseErrorKind::UndefinedIdentifier {
                        name: self.current.lexeme.clone(),
                    }));
                }
            }
            _ => return Err(self.unexpected("a repetition count after 'rep'")),
        }
        self.advance()?;

        self.expect_token(TokenKind::Times, "after repetition count")?;
        self.parse_braced_block("after 'times'")?;
        self.expect_token(TokenKind::Per, "to close 'rep'")?;
        Ok(())
    }

    /// Parse `do (cond) { ... } od`
    fn parse_while_loop(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume 'do'

        self.expect_lparen("after 'do'")?;
        self.parse_condition()?;
        self.expect_rparen("after loop condition")?;
        self.parse_braced_block("after loop condition")?;
        self.expect_token(TokenKind::Od, "to close 'do'")?;
        Ok(())
    }

    /// Parse a call to a declared macro and check its arity
    fn parse_macro_call(&mut self) -> Result<(), ParseError> {
        let name_token = self.advance()?;
        let name = name_token.lexeme;

        self.expect_lparen(&format!("after macro name '{name}'"))?;
        let found = if self.check(TokenKind::RParen) {
            0
        } else {
            self.parse_argument_list(None)?
        };
        self.expect_rparen(&format!("to close '{name}' arguments"))?;

        let expected = self
            .symbols
            .resolve_macro(&name)
            .map(|m| m.arity())
            .unwrap_or(found);
        if expected != found {
            return Err(ParseError::new(
                ParseErrorKind::ArityMismatch {
                    name,
                    expected,
                    found,
                },
                name_token.location,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserConfig;
    use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

    fn parse(source: &str) -> Result<(), ParseError> {
        Parser::new(source, ParserConfig::default()).parse_program()
    }

    fn kind(source: &str) -> ParseErrorKind {
        parse(source).unwrap_err().kind
    }

    #[test]
    fn test_commands_without_arguments() {
        assert!(parse("EXEC { M(); R(); C(); B(); c(); b(); P(); }").is_ok());
    }

    #[test]
    fn test_nop_forms() {
        assert!(parse("EXEC { nop; nop(); }").is_ok());
    }

    #[test]
    fn test_balloons_here_as_command() {
        assert!(parse("EXEC { balloonsHere(2); }").is_ok());
    }

    #[test]
    fn test_constants_as_arguments() {
        assert!(parse("EXEC { G(myX, myY); drop(myChips); walk(size); }").is_ok());
    }

    #[test]
    fn test_safe_exe() {
        assert!(parse("EXEC { safeExe(walk(1)); safeExe(3); }").is_ok());
        assert!(parse("EXEC { safeExe(safeExe(nop)); }").is_ok());
        assert!(matches!(
            kind("EXEC { safeExe(left); }"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(
            kind("EXEC { safeExe(walk(1), 2); }"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("EXEC { walk(1) }").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "';' after instruction".to_string(),
                found: "'}'".to_string(),
            }
        );
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("EXEC { walk(1);").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "'}' to close block".to_string(),
                found: "end of input".to_string(),
            }
        );
    }

    #[test]
    fn test_if_else() {
        assert!(parse("EXEC { if (isBlocked?(left)) then { walk(1); } else { nop; } fi; }").is_ok());
        assert!(parse("EXEC { if (isZero(myChips)) then { pick(1); } fi; }").is_ok());
        assert!(matches!(
            kind("EXEC { if (isBlocked?(left)) { walk(1); } fi; }"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(
            kind("EXEC { if (isBlocked?(left)) then { walk(1); }; }"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_repeat() {
        assert!(parse("EXEC { rep 3 times { walk(1); } per; }").is_ok());
        assert!(parse("EXEC { rep size times { walk(1); } per; }").is_ok());
        assert!(parse("NEW VAR n = 4 EXEC { rep n times { M(); } per; }").is_ok());
        assert_eq!(
            kind("EXEC { rep k times { M(); } per; }"),
            ParseErrorKind::UndefinedIdentifier { name: "k".to_string() }
        );
    }

    #[test]
    fn test_repeat_count_out_of_range() {
        let source = "EXEC { rep 99999999999999999999999 times { M(); } per; }";
        let err = parse(source).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::IntegerOutOfRange {
                literal: "99999999999999999999999".to_string(),
            }
        );
        assert_eq!(err.location.column, 12);

        assert!(parse("EXEC { rep 18446744073709551615 times { M(); } per; }").is_ok());
    }

    #[test]
    fn test_while_loop() {
        assert!(parse("EXEC { do (not(isBlocked?(forward))) { walk(1); } od; }").is_ok());
        assert!(matches!(
            kind("EXEC { do (isBlocked?(forward)) { walk(1); }; }"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            kind("EXEC { then; }"),
            ParseErrorKind::UnknownInstruction { found: "'then'".to_string() }
        );
        assert_eq!(
            kind("EXEC { 5; }"),
            ParseErrorKind::UnknownInstruction { found: "number 5".to_string() }
        );
    }

    #[test]
    fn test_unexpected_top_level() {
        assert_eq!(
            kind("walk(1);"),
            ParseErrorKind::UnexpectedStatement { found: "identifier 'walk'".to_string() }
        );
    }

    #[test]
    fn test_nesting_limit() {
        let config = ParserConfig::default().with_max_depth(3);
        let source = "EXEC { rep 1 times { rep 1 times { rep 1 times { M(); } per; } per; } per; }";
        let err = Parser::new(source, config).parse_program().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 3 });

        let shallow = "EXEC { rep 1 times { rep 1 times { M(); } per; } per; }";
        assert!(Parser::new(shallow, config).parse_program().is_ok());
    }
}
