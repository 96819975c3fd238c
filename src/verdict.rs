//! Accept/reject verdicts
//!
//! [`validate`] is the library's front door: one call runs a fresh lexer,
//! symbol table and parser over the text and folds the outcome into a
//! [`Verdict`]. The first error ends the parse and becomes the verdict's only
//! diagnostic.

use crate::config::ParserConfig;
use crate::parser::parse::{ParseError, Parser};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(ParseError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn diagnostic(&self) -> Option<&ParseError> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<(), ParseError> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(err) => Err(err),
        }
    }
}

impl From<Result<(), ParseError>> for Verdict {
    fn from(result: Result<(), ParseError>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(err) => Verdict::Rejected(err),
        }
    }
}

/// Validate a complete program.
pub fn validate(source: &str, config: &ParserConfig) -> Verdict {
    let mut parser = Parser::new(source, *config);
    let verdict = Verdict::from(parser.parse_program());

    match &verdict {
        Verdict::Accepted => debug!(
            variables = parser.symbols().variable_count(),
            macros = parser.symbols().macro_count(),
            "program accepted"
        ),
        Verdict::Rejected(err) => debug!(error = %err, "program rejected"),
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::ParseErrorKind;

    #[test]
    fn test_accepts() {
        let verdict = validate("EXEC { walk(1); }", &ParserConfig::default());
        assert!(verdict.is_accepted());
        assert!(verdict.diagnostic().is_none());
        assert!(verdict.into_result().is_ok());
    }

    #[test]
    fn test_rejects_with_single_diagnostic() {
        let verdict = validate("EXEC { walk(two); } EXEC { x(); }", &ParserConfig::default());
        assert!(!verdict.is_accepted());
        let err = verdict.diagnostic().unwrap();
        assert_eq!(err.kind, ParseErrorKind::UndefinedIdentifier { name: "two".to_string() });
        assert_eq!(err.location.column, 13);
    }
}
