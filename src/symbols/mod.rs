//! Symbol table for one validation pass
//!
//! This module tracks every name the validator can resolve:
//! - [`Variable`]: a `NEW VAR name = n` declaration (flat, global scope)
//! - [`Macro`]: a `NEW MACRO name(params) { ... }` declaration
//! - the parameters of the macro whose body is currently being validated
//!
//! Both maps are append-only for the lifetime of one parse. Declaring a name
//! twice replaces the earlier entry; the parser decides whether that is an
//! error (see `ParserConfig::reject_duplicates`).

use crate::parser::location::Span;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    pub params: Vec<String>,
    /// Byte range of the `{ ... }` body; `None` while only the signature is
    /// known (hoisted registration).
    pub body: Option<Span>,
}

impl Macro {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_defined(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: FxHashMap<String, Variable>,
    macros: FxHashMap<String, Macro>,
    parameters: FxHashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, returning the one it replaced.
    pub fn declare_variable(&mut self, name: &str, value: u64) -> Option<Variable> {
        self.variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                value,
            },
        )
    }

    /// Insert a macro, returning the one it replaced.
    pub fn declare_macro(
        &mut self,
        name: &str,
        params: Vec<String>,
        body: Option<Span>,
    ) -> Option<Macro> {
        self.macros.insert(
            name.to_string(),
            Macro {
                name: name.to_string(),
                params,
                body,
            },
        )
    }

    pub fn resolve_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn resolve_macro(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    /// Bring a macro's formal parameters into scope for its body.
    pub fn enter_macro_body(&mut self, params: &[String]) {
        self.parameters = params.iter().cloned().collect();
    }

    pub fn leave_macro_body(&mut self) {
        self.parameters.clear();
    }

    pub fn is_parameter(&self, name: &str) -> bool {
        self.parameters.contains(name)
    }

    /// Whether `name` can stand as a bare-word value: a variable or a
    /// parameter currently in scope.
    pub fn is_value_name(&self, name: &str) -> bool {
        self.resolve_variable(name).is_some() || self.is_parameter(name)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_roundtrip() {
        let mut symbols = SymbolTable::new();
        assert!(symbols.resolve_variable("one").is_none());

        assert!(symbols.declare_variable("one", 1).is_none());
        assert_eq!(symbols.resolve_variable("one").map(|v| v.value), Some(1));

        let replaced = symbols.declare_variable("one", 2);
        assert_eq!(replaced.map(|v| (v.name, v.value)), Some(("one".to_string(), 1)));
        assert_eq!(symbols.resolve_variable("one").map(|v| v.value), Some(2));
        assert_eq!(symbols.variable_count(), 1);
    }

    #[test]
    fn test_macro_signature_then_definition() {
        let mut symbols = SymbolTable::new();
        symbols.declare_macro("go", vec!["n".into()], None);
        assert!(!symbols.resolve_macro("go").unwrap().is_defined());

        let previous = symbols.declare_macro("go", vec!["n".into()], Some(Span::new(10, 20)));
        assert!(previous.is_some_and(|m| !m.is_defined()));

        let go = symbols.resolve_macro("go").unwrap();
        assert_eq!(go.name, "go");
        assert_eq!(go.arity(), 1);
        assert_eq!(go.body, Some(Span::new(10, 20)));
    }

    #[test]
    fn test_parameter_scope() {
        let mut symbols = SymbolTable::new();
        symbols.enter_macro_body(&["x".to_string(), "y".to_string()]);
        assert!(symbols.is_parameter("x"));
        assert!(symbols.is_value_name("y"));

        symbols.leave_macro_body();
        assert!(!symbols.is_parameter("x"));
        assert!(!symbols.is_value_name("y"));
    }
}
