//! Transform dispatcher: parse trees to statements.
//!
//! A [`TransformerFactory`] owns the compiled grammar plus two
//! registries keyed by rule name: transform functions and enum mapping
//! tables. Both are immutable once the parser facade finishes
//! registration, so one factory serves concurrent parses. The per-parse
//! view is a [`PegTransformer`], which borrows the factory's registries
//! and the arena of one match.

pub(crate) mod transform_common;
pub(crate) mod transform_delete;
pub(crate) mod transform_set;
pub(crate) mod transform_use;

use std::any::Any;
use std::collections::HashMap;

use ferrite_peg::{Grammar, GrammarError, NodeId, ParseArena, ParseNode, ParseResult};
use tracing::trace;

use crate::ast::{Expr, SettingTarget, Statement};
use crate::error::TransformError;

/// The type-tagged output of a transform function.
///
/// Every value crossing the dispatcher is wrapped in one of these;
/// callers unwrap through [`FromTransformValue`], which checks the tag
/// instead of reinterpreting.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformValue {
    /// A complete statement.
    Statement(Statement),
    /// A scalar expression.
    Expression(Expr),
    /// A list of expressions, in source order.
    ExpressionList(Vec<Expr>),
    /// A single identifier.
    Identifier(String),
    /// The parts of a dotted identifier, in source order.
    IdentifierList(Vec<String>),
    /// A resolved SET/RESET target.
    Setting(SettingTarget),
}

impl TransformValue {
    /// The variant name, used in mismatch diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Statement(_) => "Statement",
            Self::Expression(_) => "Expression",
            Self::ExpressionList(_) => "ExpressionList",
            Self::Identifier(_) => "Identifier",
            Self::IdentifierList(_) => "IdentifierList",
            Self::Setting(_) => "Setting",
        }
    }
}

/// Checked extraction of a typed value out of a [`TransformValue`].
pub trait FromTransformValue: Sized {
    /// The wrapper variant this type unwraps from.
    const EXPECTED: &'static str;

    /// Unwraps the value.
    ///
    /// # Errors
    ///
    /// [`TransformError::TypeMismatch`] when the wrapper carries a
    /// different variant.
    fn from_value(value: TransformValue) -> Result<Self, TransformError>;
}

macro_rules! impl_from_transform_value {
    ($type:ty, $variant:ident) => {
        impl FromTransformValue for $type {
            const EXPECTED: &'static str = stringify!($variant);

            fn from_value(value: TransformValue) -> Result<Self, TransformError> {
                match value {
                    TransformValue::$variant(inner) => Ok(inner),
                    other => Err(TransformError::TypeMismatch {
                        expected: Self::EXPECTED.to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_transform_value!(Statement, Statement);
impl_from_transform_value!(Expr, Expression);
impl_from_transform_value!(Vec<Expr>, ExpressionList);
impl_from_transform_value!(String, Identifier);
impl_from_transform_value!(Vec<String>, IdentifierList);
impl_from_transform_value!(SettingTarget, Setting);

type TransformFn =
    Box<dyn Fn(&PegTransformer, NodeId) -> Result<TransformValue, TransformError> + Send + Sync>;
type EnumTable = HashMap<String, HashMap<String, Box<dyn Any + Send + Sync>>>;

/// Owns the compiled grammar, the transform function registry and the
/// enum mapping tables.
pub struct TransformerFactory {
    grammar: Grammar,
    functions: HashMap<String, TransformFn>,
    enums: EnumTable,
}

impl TransformerFactory {
    /// Compiles the grammar text and starts with empty registries.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] when the grammar text is malformed.
    pub fn new(grammar_text: &str) -> Result<Self, GrammarError> {
        Ok(Self {
            grammar: Grammar::compile(grammar_text)?,
            functions: HashMap::new(),
            enums: HashMap::new(),
        })
    }

    /// The compiled grammar.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Registers a transform function for a rule, replacing any
    /// previous one.
    pub fn register<F>(&mut self, rule: &str, function: F)
    where
        F: Fn(&PegTransformer, NodeId) -> Result<TransformValue, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.functions.insert(rule.to_string(), Box::new(function));
    }

    /// Registers a function for a rule whose result is a two-part list:
    /// the adapter hands over the child at index 1.
    pub fn register_unary<F>(&mut self, rule: &str, function: F)
    where
        F: Fn(&PegTransformer, NodeId) -> Result<TransformValue, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.register(rule, move |transformer, node| {
            let payload = transformer.list_child(node, 1)?;
            function(transformer, payload)
        });
    }

    /// Registers a function for a two-part rule: the adapter hands over
    /// the children at indices 0 and 1.
    pub fn register_binary<F>(&mut self, rule: &str, function: F)
    where
        F: Fn(&PegTransformer, NodeId, NodeId) -> Result<TransformValue, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.register(rule, move |transformer, node| {
            let first = transformer.list_child(node, 0)?;
            let second = transformer.list_child(node, 1)?;
            function(transformer, first, second)
        });
    }

    /// Registers an enum mapping table for a rule: matched alternative
    /// name to enum value. Rules covered here bypass the function
    /// registry entirely.
    pub fn register_enum<T>(&mut self, rule: &str, mappings: &[(&str, T)])
    where
        T: Any + Copy + Send + Sync,
    {
        let table = self.enums.entry(rule.to_string()).or_default();
        for (variant, value) in mappings {
            table.insert(
                (*variant).to_string(),
                Box::new(*value) as Box<dyn Any + Send + Sync>,
            );
        }
    }

    /// Creates the per-parse view over one match's arena.
    #[must_use]
    pub fn transformer<'a>(&'a self, arena: &'a ParseArena) -> PegTransformer<'a> {
        PegTransformer {
            arena,
            functions: &self.functions,
            enums: &self.enums,
        }
    }
}

impl std::fmt::Debug for TransformerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerFactory")
            .field("rules", &self.grammar.rule_count())
            .field("functions", &self.functions.len())
            .field("enums", &self.enums.len())
            .finish()
    }
}

/// Per-parse transformer: dispatches nodes of one arena through the
/// factory's registries.
pub struct PegTransformer<'a> {
    arena: &'a ParseArena,
    functions: &'a HashMap<String, TransformFn>,
    enums: &'a EnumTable,
}

impl PegTransformer<'_> {
    /// The node behind `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ParseResult {
        self.arena.get(id)
    }

    /// Dispatches a node to the transform function registered for its
    /// rule name.
    ///
    /// # Errors
    ///
    /// [`TransformError::NoRuleFunction`] when the rule has no
    /// registered function, or whatever the function itself raises.
    pub fn transform(&self, id: NodeId) -> Result<TransformValue, TransformError> {
        let rule = self.node(id).rule_name.as_str();
        trace!(rule = %rule, "dispatching transform");
        let function = self
            .functions
            .get(rule)
            .ok_or_else(|| TransformError::NoRuleFunction(rule.to_string()))?;
        function(self, id)
    }

    /// Dispatches a node and unwraps the result as `T`.
    ///
    /// # Errors
    ///
    /// Dispatch errors from [`Self::transform`], or
    /// [`TransformError::TypeMismatch`] when the registered function
    /// produced a different wrapper variant.
    pub fn transform_as<T: FromTransformValue>(&self, id: NodeId) -> Result<T, TransformError> {
        T::from_value(self.transform(id)?)
    }

    /// Resolves a node against the enum mapping table for its rule,
    /// bypassing the function registry.
    ///
    /// For a choice result the matched alternative's rule name selects
    /// the entry; any other node is keyed by its own rule name.
    ///
    /// # Errors
    ///
    /// [`TransformError::NoEnumMapping`] when the rule or alternative is
    /// absent, [`TransformError::TypeMismatch`] when the table was
    /// registered for a different enum type.
    pub fn transform_enum_as<T: Any + Copy>(&self, id: NodeId) -> Result<T, TransformError> {
        let result = self.node(id);
        let rule = result.rule_name.as_str();
        let variant = match &result.node {
            ParseNode::Choice { child, .. } => self.node(*child).rule_name.as_str(),
            _ => rule,
        };
        let value = self
            .enums
            .get(rule)
            .and_then(|table| table.get(variant))
            .ok_or_else(|| TransformError::NoEnumMapping {
                rule: rule.to_string(),
                variant: variant.to_string(),
            })?;
        value
            .downcast_ref::<T>()
            .copied()
            .ok_or_else(|| TransformError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                found: format!("enum mapping for rule '{rule}'"),
            })
    }

    /// The `index`-th child of a list-shaped node.
    ///
    /// # Errors
    ///
    /// [`TransformError::TypeMismatch`] when the node is not a list,
    /// [`TransformError::MissingChild`] when the index is out of range.
    pub fn list_child(&self, id: NodeId, index: usize) -> Result<NodeId, TransformError> {
        let result = self.node(id);
        let children = result.expect_list()?;
        children
            .get(index)
            .copied()
            .ok_or_else(|| TransformError::MissingChild {
                rule: result.rule_name.clone(),
                index,
            })
    }

    /// The selected alternative of a choice-shaped node.
    ///
    /// # Errors
    ///
    /// [`TransformError::TypeMismatch`] when the node is not a choice.
    pub fn choice_child(&self, id: NodeId) -> Result<NodeId, TransformError> {
        let (child, _) = self.node(id).expect_choice()?;
        Ok(child)
    }

    /// The present-or-absent child of an optional-shaped node.
    ///
    /// # Errors
    ///
    /// [`TransformError::TypeMismatch`] when the node is not an
    /// optional.
    pub fn optional_child(&self, id: NodeId) -> Result<Option<NodeId>, TransformError> {
        Ok(self.node(id).expect_optional()?)
    }
}
