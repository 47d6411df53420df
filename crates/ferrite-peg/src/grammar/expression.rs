//! The compiled grammar expression tree.

/// One node of a compiled rule expression.
///
/// Expressions are immutable after compilation. `Sequence` and `Choice`
/// own their children; recursion between rules happens through
/// `RuleReference`, which is a by-name relation, not an ownership edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PegExpression {
    /// Matches one token case-insensitively against a literal.
    Keyword(String),
    /// Matches the named rule at this position.
    RuleReference(String),
    /// Invokes a parameterized rule with actual argument expressions,
    /// analogous to a macro call.
    ParameterizedReference {
        /// The template rule name.
        rule: String,
        /// The actual expressions bound to the template's parameters.
        arguments: Vec<PegExpression>,
    },
    /// Matches all children in order; fails as a whole if any child fails.
    Sequence(Vec<PegExpression>),
    /// Tries alternatives in declaration order; first match wins.
    Choice(Vec<PegExpression>),
    /// Matches the child zero or one time; never fails itself.
    Optional(Box<PegExpression>),
    /// Matches the child zero or more times.
    ZeroOrMore(Box<PegExpression>),
    /// Matches the child one or more times.
    OneOrMore(Box<PegExpression>),
    /// Succeeds iff the child matches, consuming nothing.
    AndPredicate(Box<PegExpression>),
    /// Succeeds iff the child does not match, consuming nothing.
    NotPredicate(Box<PegExpression>),
    /// Consumes one word-like token. The pattern text is kept as a
    /// marker; refinement beyond "any word token" is left to it.
    IdentifierPattern(String),
    /// Consumes one number literal token.
    NumberLiteral,
    /// Consumes one string literal token.
    StringLiteral,
}

impl PegExpression {
    /// Wraps `children` in a `Sequence`, collapsing a single child.
    #[must_use]
    pub fn sequence(mut children: Vec<PegExpression>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Self::Sequence(children)
        }
    }

    /// Wraps `alternatives` in a `Choice`, collapsing a single child.
    #[must_use]
    pub fn choice(mut alternatives: Vec<PegExpression>) -> Self {
        if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            Self::Choice(alternatives)
        }
    }
}
