//! Tests for the natively parsed statement families.

mod common;
use common::*;

use ferrite_sql_core::ast::{Expr, SetScope};

// ===================================================================
// USE
// ===================================================================

#[test]
fn use_single_part() {
    let u = parse_use("USE analytics");
    assert_eq!(u.database, None);
    assert_eq!(u.schema, "analytics");
}

#[test]
fn use_two_part() {
    let u = parse_use("USE analytics.main");
    assert_eq!(u.database.as_deref(), Some("analytics"));
    assert_eq!(u.schema, "main");
}

#[test]
fn use_is_case_insensitive() {
    let u = parse_use("use Analytics");
    // The keyword folds; the identifier keeps its casing.
    assert_eq!(u.schema, "Analytics");
}

#[test]
fn use_quoted_identifier() {
    let u = parse_use("USE \"my db\".main");
    assert_eq!(u.database.as_deref(), Some("my db"));
    assert_eq!(u.schema, "main");
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_table() {
    let d = parse_delete("DELETE staging_orders");
    assert_eq!(d.table, "staging_orders");
}

// ===================================================================
// SET
// ===================================================================

#[test]
fn set_automatic_scope() {
    let s = parse_set("SET threads = 4");
    assert_eq!(s.name, "threads");
    assert_eq!(s.scope, SetScope::Automatic);
    assert_eq!(s.values, vec![Expr::NumberLiteral("4".to_string())]);
}

#[test]
fn set_with_to_keyword() {
    let s = parse_set("SET memory_limit TO '4GB'");
    assert_eq!(s.name, "memory_limit");
    assert_eq!(s.values, vec![Expr::StringLiteral("4GB".to_string())]);
}

#[test]
fn set_local_scope() {
    let s = parse_set("SET LOCAL threads = 2");
    assert_eq!(s.scope, SetScope::Local);
}

#[test]
fn set_session_scope() {
    let s = parse_set("SET SESSION threads = 2");
    assert_eq!(s.scope, SetScope::Session);
}

#[test]
fn set_global_scope() {
    let s = parse_set("SET GLOBAL threads = 2");
    assert_eq!(s.scope, SetScope::Global);
}

#[test]
fn set_variable() {
    let s = parse_set("SET VARIABLE region = 'eu-west'");
    assert_eq!(s.scope, SetScope::Variable);
    assert_eq!(s.name, "region");
    assert_eq!(s.values, vec![Expr::StringLiteral("eu-west".to_string())]);
}

#[test]
fn set_multiple_values() {
    let s = parse_set("SET VARIABLE regions = 'eu', 'us', 3");
    assert_eq!(
        s.values,
        vec![
            Expr::StringLiteral("eu".to_string()),
            Expr::StringLiteral("us".to_string()),
            Expr::NumberLiteral("3".to_string()),
        ]
    );
}

#[test]
fn set_trailing_comma_in_value_list() {
    let s = parse_set("SET VARIABLE regions = 'eu', 'us',");
    assert_eq!(s.values.len(), 2);
}

#[test]
fn set_identifier_value() {
    let s = parse_set("SET search_path = main");
    assert_eq!(s.values, vec![Expr::Identifier("main".to_string())]);
}

// ===================================================================
// RESET
// ===================================================================

#[test]
fn reset_setting() {
    let r = parse_reset("RESET threads");
    assert_eq!(r.name, "threads");
    assert_eq!(r.scope, SetScope::Automatic);
}

#[test]
fn reset_scoped_setting() {
    let r = parse_reset("RESET GLOBAL threads");
    assert_eq!(r.scope, SetScope::Global);
}

#[test]
fn reset_variable() {
    let r = parse_reset("RESET VARIABLE region");
    assert_eq!(r.scope, SetScope::Variable);
    assert_eq!(r.name, "region");
}

// ===================================================================
// Statement boundaries
// ===================================================================

#[test]
fn semicolon_ends_statement() {
    let u = parse_use("USE analytics; DELETE other");
    assert_eq!(u.schema, "analytics");
}

#[test]
fn comments_are_ignored() {
    let u = parse_use("USE /* inline */ analytics -- trailing");
    assert_eq!(u.schema, "analytics");
}
