//! Phase two of grammar compilation: recursive-descent parsing of a
//! tokenized rule body into a [`PegExpression`] tree.
//!
//! Standard PEG precedence: choice binds loosest, then sequence, then
//! the postfix quantifiers, then primaries.

use super::compiler::{GrammarToken, GrammarTokenKind};
use super::expression::PegExpression;
use crate::error::GrammarError;

pub(crate) struct RuleParser<'a> {
    rule: &'a str,
    tokens: &'a [GrammarToken],
    pos: usize,
}

impl<'a> RuleParser<'a> {
    pub(crate) const fn new(rule: &'a str, tokens: &'a [GrammarToken]) -> Self {
        Self {
            rule,
            tokens,
            pos: 0,
        }
    }

    /// Parses the whole token list into one expression.
    pub(crate) fn parse(mut self) -> Result<PegExpression, GrammarError> {
        let expression = self.parse_choice()?;
        if self.pos < self.tokens.len() {
            return Err(GrammarError::TrailingTokens(self.rule.to_string()));
        }
        Ok(expression)
    }

    fn peek(&self) -> Option<&'a GrammarToken> {
        self.tokens.get(self.pos)
    }

    /// Consumes the operator `op` if it is next.
    fn match_operator(&mut self, op: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_operator(op)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_choice(&mut self) -> Result<PegExpression, GrammarError> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.match_operator("/") {
            alternatives.push(self.parse_sequence()?);
        }
        Ok(PegExpression::choice(alternatives))
    }

    fn parse_sequence(&mut self) -> Result<PegExpression, GrammarError> {
        let mut children = vec![self.parse_suffix()?];
        while self
            .peek()
            .is_some_and(|t| !t.is_operator("/") && !t.is_operator(")") && !t.is_operator(","))
        {
            children.push(self.parse_suffix()?);
        }
        Ok(PegExpression::sequence(children))
    }

    fn parse_suffix(&mut self) -> Result<PegExpression, GrammarError> {
        let expression = self.parse_primary()?;
        if self.match_operator("?") {
            return Ok(PegExpression::Optional(Box::new(expression)));
        }
        if self.match_operator("*") {
            return Ok(PegExpression::ZeroOrMore(Box::new(expression)));
        }
        if self.match_operator("+") {
            return Ok(PegExpression::OneOrMore(Box::new(expression)));
        }
        Ok(expression)
    }

    fn parse_primary(&mut self) -> Result<PegExpression, GrammarError> {
        let Some(token) = self.peek() else {
            return Err(GrammarError::UnexpectedEndOfRule(self.rule.to_string()));
        };
        match token.kind {
            GrammarTokenKind::Operator => {
                if self.match_operator("(") {
                    let expression = self.parse_choice()?;
                    if !self.match_operator(")") {
                        return Err(GrammarError::UnbalancedParenthesis(self.rule.to_string()));
                    }
                    return Ok(expression);
                }
                if self.match_operator("!") {
                    return Ok(PegExpression::NotPredicate(Box::new(self.parse_suffix()?)));
                }
                if self.match_operator("&") {
                    return Ok(PegExpression::AndPredicate(Box::new(self.parse_suffix()?)));
                }
                Err(GrammarError::UnexpectedToken {
                    rule: self.rule.to_string(),
                    token: token.text.clone(),
                })
            }
            GrammarTokenKind::Literal => {
                let text = token.text.clone();
                self.pos += 1;
                Ok(PegExpression::Keyword(text))
            }
            GrammarTokenKind::Pattern => {
                let text = token.text.clone();
                self.pos += 1;
                Ok(PegExpression::IdentifierPattern(text))
            }
            GrammarTokenKind::Reference => {
                let text = token.text.clone();
                self.pos += 1;
                Ok(PegExpression::RuleReference(text))
            }
            GrammarTokenKind::FunctionCall => {
                let rule = token.text.clone();
                self.pos += 1;
                self.parse_arguments(rule)
            }
        }
    }

    /// Parses `( Arg, Arg, ... )` after a parameterized call name.
    fn parse_arguments(&mut self, rule: String) -> Result<PegExpression, GrammarError> {
        if !self.match_operator("(") {
            return Err(GrammarError::MalformedParameterList(self.rule.to_string()));
        }
        let mut arguments = Vec::new();
        if !self.match_operator(")") {
            loop {
                arguments.push(self.parse_choice()?);
                if self.match_operator(")") {
                    break;
                }
                if !self.match_operator(",") {
                    return Err(GrammarError::MalformedParameterList(self.rule.to_string()));
                }
            }
        }
        Ok(PegExpression::ParameterizedReference { rule, arguments })
    }
}
