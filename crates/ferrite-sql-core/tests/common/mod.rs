#![allow(dead_code)]

use ferrite_sql_core::ast::{
    DeleteStatement, ResetStatement, SetStatement, Statement, UseStatement,
};
use ferrite_sql_core::{ParseError, SqlParser};

pub fn parser() -> SqlParser {
    SqlParser::new().expect("built-in grammar should compile")
}

pub fn parse(sql: &str) -> Statement {
    parser()
        .parse(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
        .unwrap_or_else(|| panic!("Expected a match for: {sql}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parser()
        .parse(sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Asserts the grammar does not recognize the shape, so a caller would
/// fall back to another parser.
pub fn parse_none(sql: &str) {
    let result = parser()
        .parse(sql)
        .unwrap_or_else(|e| panic!("Expected fall-through for: {sql}\nError: {e:?}"));
    assert!(result.is_none(), "Expected no match for: {sql}");
}

pub fn parse_use(sql: &str) -> UseStatement {
    match parse(sql) {
        Statement::Use(u) => u,
        other => panic!("Expected USE, got {other:?}"),
    }
}

pub fn parse_set(sql: &str) -> SetStatement {
    match parse(sql) {
        Statement::Set(s) => s,
        other => panic!("Expected SET, got {other:?}"),
    }
}

pub fn parse_reset(sql: &str) -> ResetStatement {
    match parse(sql) {
        Statement::Reset(r) => r,
        other => panic!("Expected RESET, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}
