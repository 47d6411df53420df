//! SET and RESET statement transforms.

use ferrite_peg::NodeId;

use super::{PegTransformer, TransformValue};
use crate::ast::{ResetStatement, SetScope, SetStatement, Statement, SettingTarget};
use crate::error::TransformError;

/// `'SET'i (StandardAssignment / SetTimeZone)`; receives the choice via
/// the unary adapter.
pub(crate) fn set_statement(
    transformer: &PegTransformer,
    body: NodeId,
) -> Result<TransformValue, TransformError> {
    let child = transformer.choice_child(body)?;
    if transformer.node(child).rule_name == "StandardAssignment" {
        return transformer.transform(child);
    }
    Err(TransformError::Semantic(
        "SET TIME ZONE is not yet implemented".to_string(),
    ))
}

/// `(SetVariable / SetSetting) SetAssignment`.
pub(crate) fn standard_assignment(
    transformer: &PegTransformer,
    target: NodeId,
    assignment: NodeId,
) -> Result<TransformValue, TransformError> {
    let target = transformer.choice_child(target)?;
    let SettingTarget { name, scope } = transformer.transform_as(target)?;
    let values = transformer.transform_as(assignment)?;
    Ok(TransformValue::Statement(Statement::Set(SetStatement {
        name,
        scope,
        values,
    })))
}

/// `VariableAssign VariableList`; receives the value list via the unary
/// adapter. The assignment operator itself carries no information.
pub(crate) fn set_assignment(
    transformer: &PegTransformer,
    values: NodeId,
) -> Result<TransformValue, TransformError> {
    transformer.transform(values)
}

/// `SettingScope? SettingName`: an unscoped setting defaults to
/// automatic resolution.
pub(crate) fn set_setting(
    transformer: &PegTransformer,
    scope: NodeId,
    name: NodeId,
) -> Result<TransformValue, TransformError> {
    let scope = match transformer.optional_child(scope)? {
        Some(inner) => transformer.transform_enum_as::<SetScope>(inner)?,
        None => SetScope::Automatic,
    };
    let name: String = transformer.transform_as(name)?;
    Ok(TransformValue::Setting(SettingTarget { name, scope }))
}

/// `VariableScope SettingName`.
pub(crate) fn set_variable(
    transformer: &PegTransformer,
    scope: NodeId,
    name: NodeId,
) -> Result<TransformValue, TransformError> {
    let scope = transformer.transform_enum_as::<SetScope>(scope)?;
    let name: String = transformer.transform_as(name)?;
    Ok(TransformValue::Setting(SettingTarget { name, scope }))
}

/// `'RESET'i (SetVariable / SetSetting)`; receives the choice via the
/// unary adapter.
pub(crate) fn reset_statement(
    transformer: &PegTransformer,
    target: NodeId,
) -> Result<TransformValue, TransformError> {
    let target = transformer.choice_child(target)?;
    let SettingTarget { name, scope } = transformer.transform_as(target)?;
    Ok(TransformValue::Statement(Statement::Reset(
        ResetStatement { name, scope },
    )))
}
