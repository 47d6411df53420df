//! Shared transform functions: identifiers, dotted names, expressions
//! and comma-separated value lists.

use ferrite_peg::{NodeId, ParseNode};

use super::{PegTransformer, TransformValue};
use crate::ast::Expr;
use crate::error::TransformError;

/// Root dispatcher: forwards to the matched statement alternative.
pub(crate) fn statement(
    transformer: &PegTransformer,
    node: NodeId,
) -> Result<TransformValue, TransformError> {
    let child = transformer.choice_child(node)?;
    transformer.transform(child)
}

/// A single identifier leaf.
pub(crate) fn identifier(
    transformer: &PegTransformer,
    node: NodeId,
) -> Result<TransformValue, TransformError> {
    let text = transformer.node(node).expect_identifier()?;
    Ok(TransformValue::Identifier(text.to_string()))
}

/// `Identifier ('.' Identifier)*` into its parts, in source order.
pub(crate) fn dotted_identifier(
    transformer: &PegTransformer,
    node: NodeId,
) -> Result<TransformValue, TransformError> {
    let children = transformer.node(node).expect_list()?;
    let head = transformer.list_child(node, 0)?;
    let mut parts = vec![transformer.node(head).expect_identifier()?.to_string()];

    // Each repetition is a ('.' Identifier) pair.
    let tail = children.get(1).copied();
    if let Some(tail) = tail {
        for pair in transformer.node(tail).expect_repeat()? {
            let part = transformer.list_child(*pair, 1)?;
            parts.push(transformer.node(part).expect_identifier()?.to_string());
        }
    }
    Ok(TransformValue::IdentifierList(parts))
}

/// One scalar expression: identifier, string or number literal.
pub(crate) fn expression(
    transformer: &PegTransformer,
    node: NodeId,
) -> Result<TransformValue, TransformError> {
    let child = transformer.choice_child(node)?;
    let leaf = transformer.node(child);
    let expr = match &leaf.node {
        ParseNode::Identifier(text) => Expr::Identifier(text.clone()),
        ParseNode::String(text) => Expr::StringLiteral(text.clone()),
        ParseNode::Number(text) => Expr::NumberLiteral(text.clone()),
        other => {
            return Err(TransformError::TypeMismatch {
                expected: "Identifier, String or Number".to_string(),
                found: other.kind_name().to_string(),
            });
        }
    };
    Ok(TransformValue::Expression(expr))
}

/// `List(Expression)` into the expressions, in source order.
pub(crate) fn variable_list(
    transformer: &PegTransformer,
    node: NodeId,
) -> Result<TransformValue, TransformError> {
    let head = transformer.list_child(node, 0)?;
    let mut values = vec![transformer.transform_as::<Expr>(head)?];

    // Each repetition is a (',' Expression) pair.
    let tail = transformer.list_child(node, 1)?;
    for pair in transformer.node(tail).expect_repeat()? {
        let value = transformer.list_child(*pair, 1)?;
        values.push(transformer.transform_as::<Expr>(value)?);
    }
    Ok(TransformValue::ExpressionList(values))
}
