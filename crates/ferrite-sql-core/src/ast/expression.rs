//! Expression AST types.

/// A scalar expression appearing on the right-hand side of an
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare or quoted identifier.
    Identifier(String),
    /// A string literal, already unescaped.
    StringLiteral(String),
    /// A number literal, kept as its source text.
    NumberLiteral(String),
}

impl Expr {
    /// The textual payload, whatever the variant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Identifier(text) | Self::StringLiteral(text) | Self::NumberLiteral(text) => text,
        }
    }
}
