//! USE statement transform.

use ferrite_peg::NodeId;

use super::{PegTransformer, TransformValue};
use crate::ast::{Statement, UseStatement};
use crate::error::TransformError;

/// `'USE'i UseTarget`; receives the target via the unary adapter.
///
/// One part selects a database, two parts a database and schema. Any
/// longer name is structurally matchable but semantically rejected.
pub(crate) fn use_statement(
    transformer: &PegTransformer,
    target: NodeId,
) -> Result<TransformValue, TransformError> {
    let parts: Vec<String> = transformer.transform_as(target)?;
    let statement = match parts.as_slice() {
        [schema] => UseStatement {
            database: None,
            schema: schema.clone(),
        },
        [database, schema] => UseStatement {
            database: Some(database.clone()),
            schema: schema.clone(),
        },
        _ => {
            return Err(TransformError::Semantic(
                "expected \"USE database\" or \"USE database.schema\"".to_string(),
            ));
        }
    };
    Ok(TransformValue::Statement(Statement::Use(statement)))
}
