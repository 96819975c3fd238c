//! Lexer (tokenizer) for robot programs
//!
//! Converts raw source text into a lazy stream of [`Token`]s consumed one at a
//! time by the parser. Whitespace is dropped; every other character ends up in
//! some token. Characters that fit no rule become [`TokenKind::Unknown`] tokens
//! so the parser can reject them at the point where they occur.
//!
//! Keywords and robot state constants are not recognised by separate rules:
//! they are lexed as identifiers and then reclassified by
//! [`TokenKind::reserved`].

use super::location::SourceLocation;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Number,
    Ident,

    // Punctuation
    Assign,    // =
    Semicolon, // ;
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Query,     // ? (condition marker, as in `isBlocked?`)

    // Keywords
    Exec,
    New,
    Var,
    Macro,
    If,
    Then,
    Else,
    Fi,
    Rep,
    Times,
    Per,
    Do,
    Od,
    Not,
    Nop,

    // Robot state constants
    Size,
    MyX,
    MyY,
    MyChips,
    MyBalloons,
    BalloonsHere,
    ChipsHere,
    RoomForChips,

    /// A character no rule matches.
    Unknown,

    Eof,
}

impl TokenKind {
    /// Reclassify an identifier lexeme that is a keyword, a state constant or
    /// the bare `?` marker.
    pub fn reserved(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "EXEC" => TokenKind::Exec,
            "NEW" => TokenKind::New,
            "VAR" => TokenKind::Var,
            "MACRO" => TokenKind::Macro,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "fi" => TokenKind::Fi,
            "rep" => TokenKind::Rep,
            "times" => TokenKind::Times,
            "per" => TokenKind::Per,
            "do" => TokenKind::Do,
            "od" => TokenKind::Od,
            "not" => TokenKind::Not,
            "nop" => TokenKind::Nop,
            "size" => TokenKind::Size,
            "myX" => TokenKind::MyX,
            "myY" => TokenKind::MyY,
            "myChips" => TokenKind::MyChips,
            "myBalloons" => TokenKind::MyBalloons,
            "balloonsHere" => TokenKind::BalloonsHere,
            "chipsHere" => TokenKind::ChipsHere,
            "roomForChips" => TokenKind::RoomForChips,
            "?" => TokenKind::Query,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_state_constant(self) -> bool {
        matches!(
            self,
            TokenKind::Size
                | TokenKind::MyX
                | TokenKind::MyY
                | TokenKind::MyChips
                | TokenKind::MyBalloons
                | TokenKind::BalloonsHere
                | TokenKind::ChipsHere
                | TokenKind::RoomForChips
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::Assign => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Query => "'?'",
            TokenKind::Exec => "'EXEC'",
            TokenKind::New => "'NEW'",
            TokenKind::Var => "'VAR'",
            TokenKind::Macro => "'MACRO'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Fi => "'fi'",
            TokenKind::Rep => "'rep'",
            TokenKind::Times => "'times'",
            TokenKind::Per => "'per'",
            TokenKind::Do => "'do'",
            TokenKind::Od => "'od'",
            TokenKind::Not => "'not'",
            TokenKind::Nop => "'nop'",
            TokenKind::Size => "constant 'size'",
            TokenKind::MyX => "constant 'myX'",
            TokenKind::MyY => "constant 'myY'",
            TokenKind::MyChips => "constant 'myChips'",
            TokenKind::MyBalloons => "constant 'myBalloons'",
            TokenKind::BalloonsHere => "constant 'balloonsHere'",
            TokenKind::ChipsHere => "constant 'chipsHere'",
            TokenKind::RoomForChips => "constant 'roomForChips'",
            TokenKind::Unknown => "unrecognized character",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified slice of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Byte offset just past the end of this token.
    pub fn end_offset(&self) -> usize {
        self.location.offset + self.lexeme.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Unknown => write!(f, "unrecognized character '{}'", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer for robot program text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Produce the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, "", loc);
        };

        match ch {
            '0'..='9' => self.number_literal(ch, loc),
            '=' => Token::new(TokenKind::Assign, "=", loc),
            ';' => Token::new(TokenKind::Semicolon, ";", loc),
            c if is_ident_start(c) => self.identifier_or_reserved(ch, loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            ',' => Token::new(TokenKind::Comma, ",", loc),
            other => Token::new(TokenKind::Unknown, other.to_string(), loc),
        }
    }

    /// Digits only; the value is range-checked by whoever needs it.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, digits, loc)
    }

    fn identifier_or_reserved(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::reserved(&ident).unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.offset, self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including one final `Eof`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '?'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("EXEC { walk(1); }").tokenize();

        assert!(matches!(tokens[0].kind, TokenKind::Exec));
        assert!(matches!(tokens[1].kind, TokenKind::LBrace));
        assert!(matches!(&tokens[2], t if t.kind == TokenKind::Ident && t.lexeme == "walk"));
        assert!(matches!(tokens[3].kind, TokenKind::LParen));
        assert!(matches!(&tokens[4], t if t.kind == TokenKind::Number && t.lexeme == "1"));
        assert!(matches!(tokens[5].kind, TokenKind::RParen));
        assert!(matches!(tokens[6].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[7].kind, TokenKind::RBrace));
        assert!(matches!(tokens[8].kind, TokenKind::Eof));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_keywords_reclassified() {
        assert_eq!(
            kinds("EXEC NEW VAR MACRO if then else fi rep times per do od not nop"),
            vec![
                TokenKind::Exec,
                TokenKind::New,
                TokenKind::Var,
                TokenKind::Macro,
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::Fi,
                TokenKind::Rep,
                TokenKind::Times,
                TokenKind::Per,
                TokenKind::Do,
                TokenKind::Od,
                TokenKind::Not,
                TokenKind::Nop,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_every_vocabulary_word_has_a_kind() {
        use crate::parser::vocabulary::{CONSTANTS, KEYWORDS};

        for word in KEYWORDS {
            assert!(TokenKind::reserved(word).is_some(), "{word}");
        }
        for word in CONSTANTS {
            let kind = TokenKind::reserved(word).unwrap();
            assert!(kind.is_state_constant(), "{word}");
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("exec If NOP"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_condition_marker() {
        let tokens = Lexer::new("isBlocked?(left)").tokenize();
        assert_eq!(tokens[0].lexeme, "isBlocked");
        assert_eq!(tokens[1].kind, TokenKind::Query);
        assert_eq!(tokens[2].kind, TokenKind::LParen);
    }

    #[test]
    fn test_query_may_start_identifier() {
        let tokens = Lexer::new("?q ? q?").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "?q");
        assert_eq!(tokens[1].kind, TokenKind::Query);
        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].lexeme, "q");
        assert_eq!(tokens[3].kind, TokenKind::Query);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_leading_digit_splits_number() {
        let tokens = Lexer::new("2abc").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "2");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "abc");
    }

    #[test]
    fn test_unknown_characters_are_emitted() {
        let tokens = Lexer::new("walk(1) # x").tokenize();
        let unknown = tokens.iter().find(|t| t.kind == TokenKind::Unknown).unwrap();
        assert_eq!(unknown.lexeme, "#");
        assert_eq!(unknown.location.column, 9);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("NEW VAR x=1;\n  EXEC {}").tokenize();
        let exec = tokens.iter().find(|t| t.kind == TokenKind::Exec).unwrap();
        assert_eq!(exec.location, SourceLocation::new(15, 2, 3));
        assert_eq!(exec.end_offset(), 19);
    }

    #[test]
    fn test_single_eof_then_exhausted() {
        let mut lexer = Lexer::new("   ");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }
}
