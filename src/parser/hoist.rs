//! Macro signature pre-pass
//!
//! Used by `MacroRegistration::Hoisted`. Scans the raw token stream for
//! `NEW MACRO name ( p1, p2, ... )` headers and returns their signatures so
//! the validator can resolve calls to macros declared later in the file (or
//! to the macro whose body is being validated).
//!
//! The scan is forgiving: a malformed header is skipped here and reported by
//! the real parse.
//!
//! Only the first header for a name is kept. Calls that precede every
//! declaration of that name are checked against it, and each later
//! `NEW MACRO` replaces the entry once the main pass reaches it.

use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::iter::Peekable;
use rustc_hash::FxHashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSignature {
    pub name: String,
    pub params: Vec<String>,
}

pub fn collect_signatures(source: &str) -> Vec<MacroSignature> {
    let mut tokens = Lexer::new(source).peekable();
    let mut signatures = Vec::new();
    let mut seen = FxHashSet::default();

    while let Some(token) = tokens.next() {
        if token.kind != TokenKind::New {
            continue;
        }
        if tokens.next_if(|t| t.kind == TokenKind::Macro).is_none() {
            continue;
        }
        if let Some(signature) = read_header(&mut tokens) {
            if seen.insert(signature.name.clone()) {
                signatures.push(signature);
            }
        }
    }

    debug!(count = signatures.len(), "hoisted macro signatures");
    signatures
}

/// Read `name ( params )` after `NEW MACRO`.
fn read_header<I>(tokens: &mut Peekable<I>) -> Option<MacroSignature>
where
    I: Iterator<Item = Token>,
{
    let name = tokens.next_if(|t| t.kind == TokenKind::Ident)?.lexeme;
    tokens.next_if(|t| t.kind == TokenKind::LParen)?;

    let mut params = Vec::new();
    if tokens.next_if(|t| t.kind == TokenKind::RParen).is_some() {
        return Some(MacroSignature { name, params });
    }

    loop {
        params.push(tokens.next_if(|t| t.kind == TokenKind::Ident)?.lexeme);
        match tokens.next()?.kind {
            TokenKind::Comma => continue,
            TokenKind::RParen => return Some(MacroSignature { name, params }),
            _ => return None,
        }
    }
}
