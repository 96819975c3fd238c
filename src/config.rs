//! Validation settings
//!
//! [`ParserConfig`] is passed by value into every parse. The defaults follow
//! the language as written: macros become callable only after their own
//! declaration, redeclarations silently replace earlier ones, and nesting is
//! capped at [`DEFAULT_MAX_DEPTH`].

/// Nesting limit for blocks, `not(...)` chains and nested `safeExe` calls.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// When a macro's name becomes visible to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroRegistration {
    /// Registered once its body has been validated, so a macro cannot call
    /// itself or any macro declared after it.
    #[default]
    DeclarationOrder,
    /// All `NEW MACRO` signatures are collected before validation starts, so
    /// bodies may recurse and call macros declared further down.
    Hoisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub max_depth: usize,
    pub macro_registration: MacroRegistration,
    /// Reject a `VAR` or `MACRO` whose name is already declared.
    pub reject_duplicates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            macro_registration: MacroRegistration::default(),
            reject_duplicates: false,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hoisted_macros(mut self) -> Self {
        self.macro_registration = MacroRegistration::Hoisted;
        self
    }

    pub fn with_strict_declarations(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }
}
