//! Error types for tokenizing, transforming and the parser facade.

use ferrite_peg::{GrammarError, MatchError, NodeCastError};

/// Errors raised while tokenizing SQL text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// A `'...'` string literal was not closed.
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A `"..."` quoted identifier was not closed.
    #[error("unterminated quoted identifier starting at offset {offset}")]
    UnterminatedQuotedIdentifier {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A character outside the recognized SQL surface.
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        offset: usize,
    },
}

/// Errors raised while transforming a parse tree into statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A node's rule has no registered transform function.
    #[error("no transform function registered for rule '{0}'")]
    NoRuleFunction(String),

    /// A rule or alternative is absent from the enum mapping table.
    #[error("no enum mapping for alternative '{variant}' of rule '{rule}'")]
    NoEnumMapping {
        /// The rule the mapping is keyed by.
        rule: String,
        /// The matched alternative's rule name.
        variant: String,
    },

    /// A transform function received a value or node of the wrong type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The requested type or variant.
        expected: String,
        /// The actual type or variant.
        found: String,
    },

    /// A transform function expected a child the node does not have.
    #[error("rule '{rule}' produced no child at index {index}")]
    MissingChild {
        /// The rule whose result was inspected.
        rule: String,
        /// The missing child index.
        index: usize,
    },

    /// The input is structurally valid but semantically rejected.
    #[error("{0}")]
    Semantic(String),
}

impl From<NodeCastError> for TransformError {
    fn from(err: NodeCastError) -> Self {
        Self::TypeMismatch {
            expected: err.expected.to_string(),
            found: err.found.to_string(),
        }
    }
}

/// Top-level errors surfaced by the parser facade.
///
/// A statement shape the grammar does not recognize is not an error; the
/// facade returns `Ok(None)` so the caller can fall back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input text could not be tokenized.
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// The grammar text failed to compile.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// Matching failed hard: an undefined rule or unconsumed input.
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// The matched tree could not be transformed into a statement.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}
