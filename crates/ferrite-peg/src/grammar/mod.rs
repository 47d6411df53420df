//! Grammar model and compiler.
//!
//! [`Grammar::compile`] turns a textual grammar description into an
//! immutable rule table in two phases: a coarse rule-boundary scan
//! ([`compiler`]) followed by a per-rule recursive-descent expression
//! parse ([`rule_parser`]). The result is read-only and safe to share
//! across concurrent parses.

mod compiler;
mod expression;
mod rule_parser;

use std::collections::HashMap;

use tracing::debug;

pub use expression::PegExpression;

use crate::error::GrammarError;
use compiler::scan_rules;
use rule_parser::RuleParser;

/// One compiled grammar rule.
#[derive(Debug, Clone)]
pub struct PegRule {
    /// Formal parameter names, empty for ordinary rules. A rule with
    /// parameters is a template expanded at match time through the
    /// substitution stack.
    pub parameters: Vec<String>,
    /// The rule's expression tree.
    pub expression: PegExpression,
}

/// An immutable table of compiled rules, keyed by rule name.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, PegRule>,
}

impl Grammar {
    /// Compiles grammar text into a rule table.
    ///
    /// Installs the built-in `NumberLiteral` and `StringLiteral` rules
    /// after compilation, replacing any textual definition of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] on any malformed definition, duplicate
    /// rule name, unterminated construct, unknown character, or invalid
    /// parameterized call. No partial grammar is produced.
    pub fn compile(text: &str) -> Result<Self, GrammarError> {
        let definitions = scan_rules(text)?;
        let mut rules = HashMap::with_capacity(definitions.len() + 2);
        for definition in definitions {
            let expression = RuleParser::new(&definition.name, &definition.tokens).parse()?;
            if rules.contains_key(&definition.name) {
                return Err(GrammarError::DuplicateRule(definition.name));
            }
            rules.insert(
                definition.name,
                PegRule {
                    parameters: definition.parameters,
                    expression,
                },
            );
        }

        let mut grammar = Self { rules };
        grammar.set_override("NumberLiteral", PegExpression::NumberLiteral);
        grammar.set_override("StringLiteral", PegExpression::StringLiteral);
        grammar.validate_calls()?;
        debug!(rules = grammar.rules.len(), "compiled grammar");
        Ok(grammar)
    }

    /// Inserts or replaces a rule with a ready-made expression.
    pub fn set_override(&mut self, name: impl Into<String>, expression: PegExpression) {
        self.rules.insert(
            name.into(),
            PegRule {
                parameters: Vec::new(),
                expression,
            },
        );
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&PegRule> {
        self.rules.get(name)
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Verifies every parameterized call against its template: the
    /// template must exist, declare parameters, and match the argument
    /// count. Plain rule references stay unchecked here; an undefined
    /// one is a match-time error.
    fn validate_calls(&self) -> Result<(), GrammarError> {
        for (name, rule) in &self.rules {
            self.validate_expression(name, &rule.expression)?;
        }
        Ok(())
    }

    fn validate_expression(
        &self,
        rule_name: &str,
        expression: &PegExpression,
    ) -> Result<(), GrammarError> {
        match expression {
            PegExpression::ParameterizedReference { rule, arguments } => {
                let template = self.rules.get(rule).filter(|r| !r.parameters.is_empty());
                let Some(template) = template else {
                    return Err(GrammarError::UnknownTemplate {
                        rule: rule_name.to_string(),
                        called: rule.clone(),
                    });
                };
                if template.parameters.len() != arguments.len() {
                    return Err(GrammarError::ArgumentCountMismatch {
                        rule: rule_name.to_string(),
                        called: rule.clone(),
                        expected: template.parameters.len(),
                        got: arguments.len(),
                    });
                }
                for argument in arguments {
                    self.validate_expression(rule_name, argument)?;
                }
                Ok(())
            }
            PegExpression::Sequence(children) | PegExpression::Choice(children) => {
                for child in children {
                    self.validate_expression(rule_name, child)?;
                }
                Ok(())
            }
            PegExpression::Optional(child)
            | PegExpression::ZeroOrMore(child)
            | PegExpression::OneOrMore(child)
            | PegExpression::AndPredicate(child)
            | PegExpression::NotPredicate(child) => self.validate_expression(rule_name, child),
            PegExpression::Keyword(_)
            | PegExpression::RuleReference(_)
            | PegExpression::IdentifierPattern(_)
            | PegExpression::NumberLiteral
            | PegExpression::StringLiteral => Ok(()),
        }
    }
}
