//! Error types for grammar compilation and matching.
//!
//! A failed match of a sub-expression is *not* an error: the matcher
//! signals it as `Ok(None)` and backtracks. The types here cover grammar
//! authoring defects and hard parse failures only.

/// Errors raised while compiling a textual grammar into a rule table.
///
/// No partial grammar is produced: any of these aborts construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A rule name was expected but not found.
    #[error("expected an alpha-numeric rule name at offset {offset}")]
    ExpectedRuleName {
        /// Byte offset into the grammar text.
        offset: usize,
    },

    /// The `<-` separator after a rule name is missing.
    #[error("expected '<-' after rule name '{rule}' at offset {offset}")]
    ExpectedArrow {
        /// The rule being defined.
        rule: String,
        /// Byte offset into the grammar text.
        offset: usize,
    },

    /// The same rule name was defined twice.
    #[error("duplicate rule name '{0}'")]
    DuplicateRule(String),

    /// A rule definition ended without a body.
    #[error("rule '{0}' has an empty body")]
    EmptyRule(String),

    /// A quoted literal was not closed before end of input.
    #[error("unclosed literal quote in rule '{rule}' at offset {offset}")]
    UnclosedLiteral {
        /// The rule being defined.
        rule: String,
        /// Byte offset into the grammar text.
        offset: usize,
    },

    /// A `[...]` or `<...>` pattern was not closed.
    #[error("unclosed pattern in rule '{rule}' at offset {offset}")]
    UnclosedPattern {
        /// The rule being defined.
        rule: String,
        /// Byte offset into the grammar text.
        offset: usize,
    },

    /// A closing parenthesis without a matching opening one.
    #[error("unbalanced parenthesis in rule '{0}'")]
    UnbalancedParenthesis(String),

    /// A malformed formal parameter or argument list.
    #[error("expected ',' or ')' in parameter list for rule '{0}'")]
    MalformedParameterList(String),

    /// A character the grammar tokenizer does not recognize.
    #[error("unrecognized character '{character}' in rule '{rule}'")]
    UnrecognizedCharacter {
        /// The rule being defined.
        rule: String,
        /// The offending character.
        character: char,
    },

    /// A rule body ended in the middle of an expression.
    #[error("unexpected end of definition for rule '{0}'")]
    UnexpectedEndOfRule(String),

    /// An operator or reference in an unexpected position.
    #[error("unexpected token '{token}' in rule '{rule}'")]
    UnexpectedToken {
        /// The rule being defined.
        rule: String,
        /// The offending token text.
        token: String,
    },

    /// Leftover tokens after the rule expression was parsed.
    #[error("trailing tokens after expression in rule '{0}'")]
    TrailingTokens(String),

    /// A parameterized call names a rule that is absent or takes no
    /// parameters.
    #[error("call to undefined or non-parameterized rule '{called}' from rule '{rule}'")]
    UnknownTemplate {
        /// The rule containing the call.
        rule: String,
        /// The rule being called.
        called: String,
    },

    /// A parameterized call passes the wrong number of arguments.
    #[error("argument count mismatch calling '{called}' from rule '{rule}': expected {expected}, got {got}")]
    ArgumentCountMismatch {
        /// The rule containing the call.
        rule: String,
        /// The rule being called.
        called: String,
        /// Number of declared formal parameters.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },
}

/// Hard failures during matching.
///
/// These indicate grammar authoring bugs or a structurally complete match
/// that left input behind; they are never treated as backtrackable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A rule reference names a rule absent from the rule table.
    #[error("undefined rule referenced: '{0}'")]
    UndefinedRule(String),

    /// A parameterized rule was invoked with the wrong argument count.
    #[error("argument count mismatch for rule '{rule}': expected {expected}, got {got}")]
    ArgumentCountMismatch {
        /// The template rule.
        rule: String,
        /// Number of declared formal parameters.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },

    /// The root rule matched but tokens remain unconsumed.
    #[error("unconsumed tokens remaining after match: consumed {consumed} of {total}")]
    UnconsumedInput {
        /// Tokens consumed by the match.
        consumed: usize,
        /// Total tokens in the input.
        total: usize,
    },
}

/// A checked downcast of a parse result node failed.
///
/// Raised when a caller requests a node variant that does not match the
/// runtime tag; the node is never reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse result type mismatch: expected {expected}, found {found}")]
pub struct NodeCastError {
    /// The requested variant name.
    pub expected: &'static str,
    /// The actual variant name.
    pub found: &'static str,
}
