//! Statement AST types.

use super::expression::Expr;

/// A parsed SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// USE database[.schema]
    Use(UseStatement),
    /// SET [scope] name = value
    Set(SetStatement),
    /// RESET [scope] name
    Reset(ResetStatement),
    /// DELETE table
    Delete(DeleteStatement),
}

/// A USE statement: switch the default database and, optionally, the
/// default schema within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    /// The database, when a two-part name was given.
    pub database: Option<String>,
    /// The schema (or the database itself for a one-part name).
    pub schema: String,
}

/// A SET statement assigning values to a setting or variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatement {
    /// Name of the setting or variable.
    pub name: String,
    /// Where the assignment applies.
    pub scope: SetScope,
    /// The assigned values, in source order.
    pub values: Vec<Expr>,
}

/// A RESET statement restoring a setting or variable to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetStatement {
    /// Name of the setting or variable.
    pub name: String,
    /// Where the reset applies.
    pub scope: SetScope,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStatement {
    /// The target table.
    pub table: String,
}

/// Scope of a SET or RESET target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetScope {
    /// No scope keyword given; resolved by the engine.
    #[default]
    Automatic,
    /// LOCAL scope.
    Local,
    /// SESSION scope.
    Session,
    /// GLOBAL scope.
    Global,
    /// A user variable rather than a setting.
    Variable,
}

impl SetScope {
    /// Returns the SQL representation, empty for [`Self::Automatic`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "",
            Self::Local => "LOCAL",
            Self::Session => "SESSION",
            Self::Global => "GLOBAL",
            Self::Variable => "VARIABLE",
        }
    }
}

/// A resolved SET/RESET target: the name plus its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingTarget {
    /// Name of the setting or variable.
    pub name: String,
    /// Where the operation applies.
    pub scope: SetScope,
}
