//! The token interface consumed by the matcher.
//!
//! Tokenization is an external collaborator's responsibility; the engine
//! only sees an ordered list of classified tokens.

/// Coarse classification of an input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word-like token: identifier or keyword.
    Word,
    /// An operator or punctuation token (e.g. `=`, `.`, `,`).
    Operator,
    /// A numeric literal.
    Number,
    /// A string literal (quotes already stripped).
    String,
}

/// One input token: a classification plus its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherToken {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw token text.
    pub text: String,
}

impl MatcherToken {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Creates a word-like token.
    #[must_use]
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, text)
    }

    /// Creates an operator token.
    #[must_use]
    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Operator, text)
    }

    /// Creates a number literal token.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, text)
    }

    /// Creates a string literal token.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(TokenKind::String, text)
    }
}
