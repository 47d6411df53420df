//! Tests for the fall-through contract: shapes outside the grammar are
//! not errors.

mod common;
use common::*;

#[test]
fn select_falls_through() {
    parse_none("SELECT id FROM users");
}

#[test]
fn create_table_falls_through() {
    parse_none("CREATE TABLE t (id INTEGER)");
}

#[test]
fn empty_input_falls_through() {
    parse_none("");
    parse_none("   \n\t ");
}

#[test]
fn comment_only_input_falls_through() {
    parse_none("-- nothing here");
    parse_none("/* or here */");
}

#[test]
fn lone_semicolon_falls_through() {
    parse_none(";");
}

#[test]
fn parser_is_reusable_after_fallback() {
    let parser = parser();
    assert!(parser.parse("SELECT 1").unwrap().is_none());
    // A miss leaves no state behind; the next parse sees a fresh cursor.
    assert!(parser.parse("USE analytics").unwrap().is_some());
    assert!(parser.parse("SELECT 1").unwrap().is_none());
}
