//! # ferrite-peg
//!
//! A token-level PEG (Parsing Expression Grammar) engine.
//!
//! The engine has three parts:
//! - A grammar compiler that turns a textual grammar description into an
//!   immutable rule table ([`Grammar`]).
//! - A backtracking matcher ([`Matcher`]) that matches an ordered token
//!   list against a named rule and builds a generic parse tree inside a
//!   per-parse arena.
//! - An arena-backed parse result model ([`ParseArena`], [`ParseResult`])
//!   with checked downcast accessors, consumed by a downstream
//!   transformation layer.
//!
//! Tokenization of raw source text is the caller's responsibility: the
//! matcher consumes a pre-tokenized `&[MatcherToken]` slice.
//!
//! ```rust
//! use ferrite_peg::{Grammar, Matcher, MatcherToken};
//!
//! let grammar = Grammar::compile("Root <- 'USE'i Identifier\nIdentifier <- [a-zA-Z_]\n").unwrap();
//! let tokens = vec![MatcherToken::word("use"), MatcherToken::word("orders")];
//! let mut matcher = Matcher::new(&grammar, &tokens);
//! let root = matcher.match_root("Root").unwrap();
//! assert!(root.is_some());
//! ```

pub mod error;
pub mod grammar;
pub mod matcher;
pub mod parse_result;
pub mod token;

pub use error::{GrammarError, MatchError, NodeCastError};
pub use grammar::{Grammar, PegExpression, PegRule};
pub use matcher::Matcher;
pub use parse_result::{NodeId, ParseArena, ParseNode, ParseResult};
pub use token::{MatcherToken, TokenKind};
