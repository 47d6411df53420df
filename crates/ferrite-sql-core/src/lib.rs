//! # ferrite-sql-core
//!
//! A grammar-driven SQL statement front end built on `ferrite-peg`.
//!
//! Statement shapes are described as PEG rules over a flat token list;
//! a registry of transform functions turns matched trees into typed
//! statements. Statements the grammar does not cover are not errors:
//! parsing returns `Ok(None)` so the caller can fall back to a general
//! parser.
//!
//! ```rust
//! use ferrite_sql_core::{SqlParser, Statement};
//!
//! let parser = SqlParser::new().expect("built-in grammar compiles");
//!
//! match parser.parse("USE analytics.main").unwrap() {
//!     Some(Statement::Use(stmt)) => {
//!         assert_eq!(stmt.database.as_deref(), Some("analytics"));
//!         assert_eq!(stmt.schema, "main");
//!     }
//!     other => panic!("expected USE, got {other:?}"),
//! }
//!
//! // Unrecognized shapes fall through instead of failing.
//! assert_eq!(parser.parse("SELECT 1 FROM t").unwrap(), None);
//! ```

pub mod ast;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod tokenizer;
pub mod transformer;

pub use ast::{
    DeleteStatement, Expr, ResetStatement, SetScope, SetStatement, SettingTarget, Statement,
    UseStatement,
};
pub use error::{ParseError, TokenizeError, TransformError};
pub use grammar::DEFAULT_GRAMMAR;
pub use parser::SqlParser;
pub use tokenizer::tokenize;
pub use transformer::{FromTransformValue, PegTransformer, TransformValue, TransformerFactory};
