//! DELETE statement transform.

use ferrite_peg::NodeId;

use super::{PegTransformer, TransformValue};
use crate::ast::{DeleteStatement, Statement};
use crate::error::TransformError;

/// `'DELETE'i Identifier`; receives the table via the unary adapter.
pub(crate) fn delete_statement(
    transformer: &PegTransformer,
    table: NodeId,
) -> Result<TransformValue, TransformError> {
    let table: String = transformer.transform_as(table)?;
    Ok(TransformValue::Statement(Statement::Delete(
        DeleteStatement { table },
    )))
}
