//! The parser facade.
//!
//! A [`SqlParser`] wires the tokenizer, the compiled grammar and the
//! transform registrations together. Construction does all the mutable
//! work; afterwards the parser is immutable and shareable across
//! threads, with match state created per call.

use ferrite_peg::{GrammarError, Matcher, MatcherToken};
use tracing::debug;

use crate::ast::{SetScope, Statement};
use crate::error::ParseError;
use crate::grammar::DEFAULT_GRAMMAR;
use crate::tokenizer::tokenize;
use crate::transformer::{
    TransformerFactory, transform_common, transform_delete, transform_set, transform_use,
};

/// Grammar-driven statement parser.
#[derive(Debug)]
pub struct SqlParser {
    factory: TransformerFactory,
}

impl SqlParser {
    /// Creates a parser over the built-in statement grammar.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if the grammar fails to compile; with
    /// the built-in text this indicates a packaging defect.
    pub fn new() -> Result<Self, GrammarError> {
        Self::with_grammar(DEFAULT_GRAMMAR)
    }

    /// Creates a parser over caller-supplied grammar text. The transform
    /// registrations expect the built-in rule names to keep their
    /// shapes; extra rules are fine.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] when the grammar text is malformed.
    pub fn with_grammar(grammar_text: &str) -> Result<Self, GrammarError> {
        let mut factory = TransformerFactory::new(grammar_text)?;
        register_statement_rules(&mut factory);
        Ok(Self { factory })
    }

    /// Parses one SQL statement.
    ///
    /// Returns `Ok(None)` when the grammar does not recognize the
    /// statement shape, so the caller can fall back to another parser.
    ///
    /// # Errors
    ///
    /// Tokenizer failures, hard match failures (a structural prefix
    /// match with trailing tokens), and transform failures including
    /// semantic rejections.
    pub fn parse(&self, sql: &str) -> Result<Option<Statement>, ParseError> {
        let tokens = tokenize(sql)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        self.parse_tokens(&tokens)
    }

    /// Parses an already tokenized statement.
    ///
    /// # Errors
    ///
    /// As [`Self::parse`], minus tokenizer failures.
    pub fn parse_tokens(&self, tokens: &[MatcherToken]) -> Result<Option<Statement>, ParseError> {
        let mut matcher = Matcher::new(self.factory.grammar(), tokens);
        let Some(root) = matcher.match_root("Statement")? else {
            debug!(tokens = tokens.len(), "no grammar match, falling through");
            return Ok(None);
        };

        let arena = matcher.into_arena();
        let transformer = self.factory.transformer(&arena);
        let statement = transformer.transform_as::<Statement>(root)?;
        Ok(Some(statement))
    }
}

/// Registers every transform function and enum mapping the built-in
/// grammar needs.
fn register_statement_rules(factory: &mut TransformerFactory) {
    factory.register("Statement", transform_common::statement);
    factory.register("Identifier", transform_common::identifier);
    factory.register("SettingName", transform_common::identifier);
    factory.register("DottedIdentifier", transform_common::dotted_identifier);
    factory.register("UseTarget", transform_common::dotted_identifier);
    factory.register("Expression", transform_common::expression);
    factory.register("VariableList", transform_common::variable_list);

    factory.register_unary("UseStatement", transform_use::use_statement);
    factory.register_unary("DeleteStatement", transform_delete::delete_statement);
    factory.register_unary("SetStatement", transform_set::set_statement);
    factory.register_unary("ResetStatement", transform_set::reset_statement);
    factory.register_unary("SetAssignment", transform_set::set_assignment);
    factory.register_binary("StandardAssignment", transform_set::standard_assignment);
    factory.register_binary("SetSetting", transform_set::set_setting);
    factory.register_binary("SetVariable", transform_set::set_variable);

    factory.register_enum(
        "SettingScope",
        &[
            ("LocalScope", SetScope::Local),
            ("SessionScope", SetScope::Session),
            ("GlobalScope", SetScope::Global),
        ],
    );
    factory.register_enum("VariableScope", &[("VariableScope", SetScope::Variable)]);
}
