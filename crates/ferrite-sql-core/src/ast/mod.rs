//! Statement and expression types produced by the transformer.

mod expression;
mod statement;

pub use expression::Expr;
pub use statement::{
    DeleteStatement, ResetStatement, SetScope, SetStatement, SettingTarget, Statement,
    UseStatement,
};
