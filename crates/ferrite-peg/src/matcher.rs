//! The backtracking matcher.
//!
//! A [`Matcher`] owns all per-parse state: the token cursor, the node
//! arena and the substitution-frame stack used while expanding
//! parameterized rules. The grammar itself is borrowed read-only, so
//! independent parses may share one compiled grammar across threads.
//!
//! A failed sub-match is signaled as `Ok(None)` with the cursor restored
//! to its pre-attempt position; `Err` is reserved for grammar authoring
//! defects (undefined rules) and unconsumed trailing input.

use std::collections::HashMap;

use tracing::trace;

use crate::error::MatchError;
use crate::grammar::{Grammar, PegExpression};
use crate::parse_result::{NodeId, ParseArena, ParseNode};
use crate::token::{MatcherToken, TokenKind};

/// One binding frame pushed while a parameterized rule is expanded:
/// formal parameter name to the actual argument expression.
///
/// Scoping is lexical: an argument expression is matched in the
/// environment of the call site that wrote it (the frames below its
/// binding frame), and a named rule's body sees no frames at all. The
/// frame at stack index `i` was pushed when `i` frames were live, so
/// the index doubles as the call site's environment depth.
type SubstitutionFrame<'g> = HashMap<&'g str, &'g PegExpression>;

/// Matches a token list against a compiled grammar.
pub struct Matcher<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [MatcherToken],
    pos: usize,
    arena: ParseArena,
    substitutions: Vec<SubstitutionFrame<'g>>,
}

impl<'g, 't> Matcher<'g, 't> {
    /// Creates a matcher over `tokens` with its own empty arena.
    #[must_use]
    pub const fn new(grammar: &'g Grammar, tokens: &'t [MatcherToken]) -> Self {
        Self {
            grammar,
            tokens,
            pos: 0,
            arena: ParseArena::new(),
            substitutions: Vec::new(),
        }
    }

    /// Current cursor position, in tokens.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The arena holding every node matched so far.
    #[must_use]
    pub const fn arena(&self) -> &ParseArena {
        &self.arena
    }

    /// Consumes the matcher, releasing the arena to the caller.
    #[must_use]
    pub fn into_arena(self) -> ParseArena {
        self.arena
    }

    /// Matches the named root rule against the whole token list.
    ///
    /// Returns `Ok(None)` when the grammar does not recognize the input
    /// shape, so the caller can fall back to another parser.
    ///
    /// # Errors
    ///
    /// [`MatchError::UndefinedRule`] for a reference to an absent rule,
    /// or [`MatchError::UnconsumedInput`] when the rule matched but left
    /// tokens behind — a structural prefix match is a hard failure, not
    /// a silent partial success.
    pub fn match_root(&mut self, rule_name: &str) -> Result<Option<NodeId>, MatchError> {
        let Some(root) = self.match_rule(rule_name)? else {
            return Ok(None);
        };
        if self.pos < self.tokens.len() {
            return Err(MatchError::UnconsumedInput {
                consumed: self.pos,
                total: self.tokens.len(),
            });
        }
        Ok(Some(root))
    }

    /// Matches one named rule at the current cursor position, stamping
    /// the rule name on the resulting node.
    ///
    /// # Errors
    ///
    /// [`MatchError::UndefinedRule`] if the name is absent from the rule
    /// table. An undefined rule is a grammar authoring bug and is never
    /// treated as a backtrackable failure.
    pub fn match_rule(&mut self, rule_name: &str) -> Result<Option<NodeId>, MatchError> {
        trace!(rule = %rule_name, pos = self.pos, "matching rule");
        let rule = self
            .grammar
            .rule(rule_name)
            .ok_or_else(|| MatchError::UndefinedRule(rule_name.to_string()))?;
        // A named rule's body is written outside any template, so its
        // references must not be captured by the expansion in progress.
        let suspended = std::mem::take(&mut self.substitutions);
        let result = self.match_expression(&rule.expression);
        self.substitutions = suspended;
        let result = result?;
        if let Some(id) = result {
            self.arena.set_rule_name(id, rule_name);
        }
        Ok(result)
    }

    fn match_expression(
        &mut self,
        expression: &'g PegExpression,
    ) -> Result<Option<NodeId>, MatchError> {
        let start = self.pos;
        match expression {
            PegExpression::Keyword(keyword) => Ok(self.match_keyword(keyword)),
            PegExpression::RuleReference(name) => {
                if let Some((bound, depth)) = self.find_substitution(name) {
                    // A formal parameter of the enclosing template. The
                    // bound argument expression is matched in its call
                    // site's environment, so a forwarded formal of the
                    // same name resolves outward instead of back into
                    // this frame.
                    let suspended = self.substitutions.split_off(depth);
                    let result = self.match_expression(bound);
                    self.substitutions.extend(suspended);
                    return result;
                }
                self.match_rule(name)
            }
            PegExpression::ParameterizedReference { rule, arguments } => {
                self.match_parameterized(rule, arguments)
            }
            PegExpression::Sequence(children) => {
                let mut results = Vec::with_capacity(children.len());
                for child in children {
                    match self.match_expression(child)? {
                        Some(id) => results.push(id),
                        None => {
                            self.pos = start;
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(self.arena.alloc(ParseNode::List(results))))
            }
            PegExpression::Choice(alternatives) => {
                for (selected, alternative) in alternatives.iter().enumerate() {
                    if let Some(child) = self.match_expression(alternative)? {
                        return Ok(Some(
                            self.arena.alloc(ParseNode::Choice { child, selected }),
                        ));
                    }
                }
                Ok(None)
            }
            PegExpression::Optional(child) => {
                let result = self.match_expression(child)?;
                Ok(Some(self.arena.alloc(ParseNode::Optional(result))))
            }
            PegExpression::ZeroOrMore(child) => {
                let results = self.match_repeated(child)?;
                Ok(Some(self.arena.alloc(ParseNode::Repeat(results))))
            }
            PegExpression::OneOrMore(child) => {
                let results = self.match_repeated(child)?;
                if results.is_empty() {
                    return Ok(None);
                }
                Ok(Some(self.arena.alloc(ParseNode::Repeat(results))))
            }
            PegExpression::AndPredicate(child) => {
                let matched = self.match_expression(child)?.is_some();
                self.pos = start;
                if matched {
                    // Lookahead only: succeeds without consuming input.
                    Ok(Some(self.arena.alloc(ParseNode::List(Vec::new()))))
                } else {
                    Ok(None)
                }
            }
            PegExpression::NotPredicate(child) => {
                let matched = self.match_expression(child)?.is_some();
                self.pos = start;
                if matched {
                    Ok(None)
                } else {
                    Ok(Some(self.arena.alloc(ParseNode::List(Vec::new()))))
                }
            }
            PegExpression::IdentifierPattern(_) => {
                // Any word-like token is accepted; refinement beyond the
                // token classification is left to the pattern text.
                Ok(self.match_token(TokenKind::Word, ParseNode::Identifier))
            }
            PegExpression::NumberLiteral => {
                Ok(self.match_token(TokenKind::Number, ParseNode::Number))
            }
            PegExpression::StringLiteral => {
                Ok(self.match_token(TokenKind::String, ParseNode::String))
            }
        }
    }

    /// Case-insensitive literal match against the current token. The
    /// node carries the matched token's text, so consumed input
    /// re-serializes exactly; operator-classified tokens produce an
    /// `Operator` node instead of a `Keyword` one.
    fn match_keyword(&mut self, keyword: &str) -> Option<NodeId> {
        let token = self.tokens.get(self.pos)?;
        if !token.text.eq_ignore_ascii_case(keyword) {
            return None;
        }
        self.pos += 1;
        let node = match token.kind {
            TokenKind::Operator => ParseNode::Operator(token.text.clone()),
            _ => ParseNode::Keyword(token.text.clone()),
        };
        Some(self.arena.alloc(node))
    }

    /// Consumes one token of `kind`, building a leaf with `make`.
    fn match_token(
        &mut self,
        kind: TokenKind,
        make: impl FnOnce(String) -> ParseNode,
    ) -> Option<NodeId> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != kind {
            return None;
        }
        self.pos += 1;
        Some(self.arena.alloc(make(token.text.clone())))
    }

    /// Matches `child` as many times as it succeeds. A success that
    /// consumes no input ends the repetition, so a nullable child cannot
    /// loop forever.
    fn match_repeated(&mut self, child: &'g PegExpression) -> Result<Vec<NodeId>, MatchError> {
        let mut results = Vec::new();
        loop {
            let before = self.pos;
            let Some(id) = self.match_expression(child)? else {
                break;
            };
            results.push(id);
            if self.pos == before {
                break;
            }
        }
        Ok(results)
    }

    /// Expands a parameterized rule call: binds the template's formal
    /// parameters to the actual argument expressions, matches the
    /// template body under that frame, then pops it.
    fn match_parameterized(
        &mut self,
        rule_name: &str,
        arguments: &'g [PegExpression],
    ) -> Result<Option<NodeId>, MatchError> {
        let template = self
            .grammar
            .rule(rule_name)
            .filter(|rule| !rule.parameters.is_empty())
            .ok_or_else(|| MatchError::UndefinedRule(rule_name.to_string()))?;
        if template.parameters.len() != arguments.len() {
            return Err(MatchError::ArgumentCountMismatch {
                rule: rule_name.to_string(),
                expected: template.parameters.len(),
                got: arguments.len(),
            });
        }

        let frame: SubstitutionFrame<'g> = template
            .parameters
            .iter()
            .map(String::as_str)
            .zip(arguments)
            .collect();
        self.substitutions.push(frame);
        let result = self.match_expression(&template.expression);
        self.substitutions.pop();

        let result = result?;
        if let Some(id) = result {
            self.arena.set_rule_name(id, rule_name);
        }
        Ok(result)
    }

    /// Searches the substitution stack innermost-first for a binding of
    /// `name`, returning the bound expression and the binding frame's
    /// stack index (the depth of the call site's environment).
    fn find_substitution(&self, name: &str) -> Option<(&'g PegExpression, usize)> {
        self.substitutions
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, frame)| frame.get(name).map(|bound| (*bound, depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str]) -> Vec<MatcherToken> {
        texts.iter().map(|t| MatcherToken::word(*t)).collect()
    }

    fn grammar(text: &str) -> Grammar {
        Grammar::compile(text).expect("grammar should compile")
    }

    fn match_root(matcher: &mut Matcher<'_, '_>, rule: &str) -> NodeId {
        matcher
            .match_root(rule)
            .expect("match should not error")
            .expect("should match")
    }

    #[test]
    fn test_keyword_is_case_insensitive_and_keeps_token_text() {
        let g = grammar("Root <- 'USE'i\n");
        let tokens = words(&["use"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let result = m.arena().get(root);
        assert_eq!(result.expect_keyword().unwrap(), "use");
        assert_eq!(result.rule_name, "Root");
    }

    #[test]
    fn test_sequence_rewinds_cursor_on_failure() {
        let g = grammar("Root <- 'USE'i Identifier\nIdentifier <- [a-zA-Z_]\n");
        let tokens = words(&["use"]);
        let mut m = Matcher::new(&g, &tokens);
        assert_eq!(m.match_root("Root").unwrap(), None);
        assert_eq!(m.position(), 0);
        // Idempotent retry: failing again from the same position leaves
        // the same cursor state.
        assert_eq!(m.match_root("Root").unwrap(), None);
        assert_eq!(m.position(), 0);
    }

    #[test]
    fn test_choice_first_match_wins() {
        let g = grammar("Root <- First / Second\nFirst <- 'x'\nSecond <- 'x'\n");
        let tokens = words(&["x"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let (child, selected) = m.arena().get(root).expect_choice().unwrap();
        assert_eq!(selected, 0);
        assert_eq!(m.arena().get(child).rule_name, "First");
    }

    #[test]
    fn test_choice_records_alternative_index() {
        let g = grammar("Root <- 'a' / 'b' / 'c'\n");
        let tokens = words(&["c"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let (_, selected) = m.arena().get(root).expect_choice().unwrap();
        assert_eq!(selected, 2);
    }

    #[test]
    fn test_choice_failure_leaves_cursor_unchanged() {
        let g = grammar("Root <- 'a' / 'b'\n");
        let tokens = words(&["z"]);
        let mut m = Matcher::new(&g, &tokens);
        assert_eq!(m.match_rule("Root").unwrap(), None);
        assert_eq!(m.position(), 0);
    }

    #[test]
    fn test_optional_never_fails() {
        let g = grammar("Root <- 'maybe'? 'end'\n");
        let tokens = words(&["end"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let children = m.arena().get(root).expect_list().unwrap();
        let optional = m.arena().get(children[0]).expect_optional().unwrap();
        assert!(optional.is_none());
    }

    #[test]
    fn test_zero_or_more_collects_matches() {
        let g = grammar("Root <- 'x'*\n");
        let tokens = words(&["x", "x", "x"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        assert_eq!(m.arena().get(root).expect_repeat().unwrap().len(), 3);
    }

    #[test]
    fn test_zero_or_more_matches_empty() {
        let g = grammar("Root <- 'x'* 'end'\n");
        let tokens = words(&["end"]);
        let mut m = Matcher::new(&g, &tokens);
        assert!(m.match_root("Root").unwrap().is_some());
    }

    #[test]
    fn test_one_or_more_requires_a_match() {
        let g = grammar("Root <- 'x'+\n");
        let tokens = words(&["y"]);
        let mut m = Matcher::new(&g, &tokens);
        assert_eq!(m.match_rule("Root").unwrap(), None);
        assert_eq!(m.position(), 0);
    }

    #[test]
    fn test_and_predicate_consumes_nothing() {
        let g = grammar("Root <- &'use' Identifier\nIdentifier <- [a-zA-Z_]\n");
        let tokens = words(&["use"]);
        let mut m = Matcher::new(&g, &tokens);
        // The predicate sees 'use', then the identifier consumes it.
        assert!(m.match_root("Root").unwrap().is_some());
    }

    #[test]
    fn test_not_predicate_rejects_match() {
        let g = grammar("Root <- !'delete' Identifier\nIdentifier <- [a-zA-Z_]\n");
        let tokens = words(&["delete"]);
        let mut m = Matcher::new(&g, &tokens);
        assert_eq!(m.match_root("Root").unwrap(), None);
        assert_eq!(m.position(), 0);

        let tokens = words(&["orders"]);
        let mut m = Matcher::new(&g, &tokens);
        assert!(m.match_root("Root").unwrap().is_some());
    }

    #[test]
    fn test_undefined_rule_is_fatal_not_backtrackable() {
        let g = grammar("Root <- Missing / 'x'\n");
        let tokens = words(&["x"]);
        let mut m = Matcher::new(&g, &tokens);
        let err = m.match_root("Root").unwrap_err();
        assert_eq!(err, MatchError::UndefinedRule("Missing".to_string()));
    }

    #[test]
    fn test_unconsumed_input_is_a_hard_failure() {
        let g = grammar("Root <- 'use'\n");
        let tokens = words(&["use", "orders"]);
        let mut m = Matcher::new(&g, &tokens);
        let err = m.match_root("Root").unwrap_err();
        assert_eq!(
            err,
            MatchError::UnconsumedInput {
                consumed: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_rule_reference_stamps_rule_name() {
        let g = grammar("Root <- Inner\nInner <- 'x'\n");
        let tokens = words(&["x"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        // The outer reference overwrites the inner stamp.
        assert_eq!(m.arena().get(root).rule_name, "Root");
    }

    #[test]
    fn test_parameterized_rule_expansion() {
        let g = grammar("List(D) <- D (',' D)* ','?\nIdent <- [a-zA-Z_]\nRoot <- List(Ident)\n");
        let tokens = vec![
            MatcherToken::word("a"),
            MatcherToken::operator(","),
            MatcherToken::word("b"),
            MatcherToken::operator(","),
            MatcherToken::word("c"),
        ];
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        assert_eq!(m.arena().get(root).rule_name, "Root");
        assert_eq!(m.arena().leaf_texts(root), vec!["a", ",", "b", ",", "c"]);
    }

    #[test]
    fn test_parameterized_rule_reused_with_different_arguments() {
        let g = grammar(
            "Parens(D) <- '(' D ')'\nRoot <- Parens('a') Parens(Num)\nNum <- NumberLiteral\n",
        );
        let tokens = vec![
            MatcherToken::operator("("),
            MatcherToken::word("a"),
            MatcherToken::operator(")"),
            MatcherToken::operator("("),
            MatcherToken::number("42"),
            MatcherToken::operator(")"),
        ];
        let mut m = Matcher::new(&g, &tokens);
        assert!(m.match_root("Root").unwrap().is_some());
    }

    #[test]
    fn test_substitution_frame_popped_after_expansion() {
        let g = grammar("Wrap(D) <- D\nRoot <- Wrap('x') D\nD <- 'y'\n");
        let tokens = words(&["x", "y"]);
        let mut m = Matcher::new(&g, &tokens);
        // Inside Wrap, D is the bound literal; outside, D is the rule.
        assert!(m.match_root("Root").unwrap().is_some());
    }

    #[test]
    fn test_formal_forwarded_to_inner_template_under_same_name() {
        // Wrap forwards its own D into List; the inner frame binds D to
        // a reference named D, which must resolve in the call site's
        // environment rather than back into the inner frame.
        let g = grammar("List(D) <- D (',' D)*\nWrap(D) <- List(D)\nRoot <- Wrap('x')\n");
        let tokens = vec![
            MatcherToken::word("x"),
            MatcherToken::operator(","),
            MatcherToken::word("x"),
        ];
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        assert_eq!(m.arena().leaf_texts(root), vec!["x", ",", "x"]);
    }

    #[test]
    fn test_rule_body_reference_ignores_active_frames() {
        // Tail's body mentions D, but Tail is a named rule written
        // outside any template: its D is the rule D, not Wrap's formal.
        let g = grammar("Wrap(D) <- D Tail\nTail <- D\nD <- 'y'\nRoot <- Wrap('x')\n");
        let tokens = words(&["x", "y"]);
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        assert_eq!(m.arena().leaf_texts(root), vec!["x", "y"]);
    }

    #[test]
    fn test_number_and_string_literals() {
        let g = grammar("Root <- NumberLiteral StringLiteral\n");
        let tokens = vec![MatcherToken::number("42"), MatcherToken::string("hello")];
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let children = m.arena().get(root).expect_list().unwrap().to_vec();
        assert_eq!(m.arena().get(children[0]).expect_number().unwrap(), "42");
        assert_eq!(
            m.arena().get(children[1]).expect_string().unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_operator_token_produces_operator_node() {
        let g = grammar("Root <- '='\n");
        let tokens = vec![MatcherToken::operator("=")];
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        assert!(matches!(
            m.arena().get(root).node,
            ParseNode::Operator(ref t) if t == "="
        ));
    }

    #[test]
    fn test_consumed_leaves_round_trip_token_text() {
        let g = grammar("Root <- 'USE'i Identifier ('.' Identifier)*\nIdentifier <- [a-zA-Z_]\n");
        let tokens = vec![
            MatcherToken::word("use"),
            MatcherToken::word("db"),
            MatcherToken::operator("."),
            MatcherToken::word("schema"),
        ];
        let mut m = Matcher::new(&g, &tokens);
        let root = match_root(&mut m, "Root");
        let texts: Vec<String> = m
            .arena()
            .leaf_texts(root)
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let inputs: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, inputs);
    }

    #[test]
    fn test_nullable_child_cannot_loop_forever() {
        let g = grammar("Root <- ('x'?)* 'end'\n");
        let tokens = words(&["end"]);
        let mut m = Matcher::new(&g, &tokens);
        assert!(m.match_root("Root").unwrap().is_some());
    }
}
