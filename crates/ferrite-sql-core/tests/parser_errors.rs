//! Tests for error surfaces: semantic rejections, hard match failures
//! and tokenizer failures.

mod common;
use common::*;

use ferrite_peg::MatchError;
use ferrite_sql_core::{ParseError, SqlParser, TokenizeError, TransformError};

// ===================================================================
// Semantic rejections
// ===================================================================

#[test]
fn use_three_part_name_is_semantic_error() {
    let err = parse_err("USE catalog.db.schema");
    assert!(matches!(
        err,
        ParseError::Transform(TransformError::Semantic(_))
    ));
}

#[test]
fn set_time_zone_not_implemented() {
    let err = parse_err("SET TIME ZONE utc");
    let ParseError::Transform(TransformError::Semantic(message)) = err else {
        panic!("expected semantic error, got {err:?}");
    };
    assert!(message.contains("TIME ZONE"));
}

// ===================================================================
// Hard match failures
// ===================================================================

#[test]
fn trailing_tokens_after_match_fail() {
    // The USE shape matches a prefix; leftovers are a hard error, not a
    // fall-through.
    let err = parse_err("USE analytics extra");
    assert!(matches!(
        err,
        ParseError::Match(MatchError::UnconsumedInput { .. })
    ));
}

#[test]
fn delete_with_trailing_clause_fails() {
    let err = parse_err("DELETE orders WHERE id = 1");
    assert!(matches!(
        err,
        ParseError::Match(MatchError::UnconsumedInput { .. })
    ));
}

// ===================================================================
// Tokenizer failures
// ===================================================================

#[test]
fn unterminated_string_fails() {
    let err = parse_err("SET x = 'oops");
    assert!(matches!(
        err,
        ParseError::Tokenize(TokenizeError::UnterminatedString { .. })
    ));
}

#[test]
fn unexpected_character_fails() {
    let err = parse_err("USE {analytics}");
    assert!(matches!(
        err,
        ParseError::Tokenize(TokenizeError::UnexpectedCharacter { .. })
    ));
}

// ===================================================================
// Grammar failures at construction
// ===================================================================

#[test]
fn malformed_grammar_fails_construction() {
    assert!(SqlParser::with_grammar("Statement 'USE'i\n").is_err());
}

#[test]
fn duplicate_rule_fails_construction() {
    assert!(SqlParser::with_grammar("Statement <- 'x'\nStatement <- 'y'\n").is_err());
}
