//! Phase one of grammar compilation: rule-boundary scanning and
//! tokenization of rule bodies.
//!
//! The scanner walks the grammar text with a small state machine
//! (rule name, `<-` separator, rule definition) so that comments, free
//! whitespace and rule boundaries can be found without needing a full
//! grammar of the meta-grammar itself. Each rule body is reduced to a
//! flat token list which phase two parses into an expression tree.

use crate::error::GrammarError;

/// The kind of a grammar-definition token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrammarTokenKind {
    /// A quoted literal, e.g. `'USE'i`.
    Literal,
    /// A bare identifier referencing another rule.
    Reference,
    /// An identifier immediately followed by `(`: a parameterized call.
    FunctionCall,
    /// One of the PEG operators `/ ? * + ( ) ! & ,`.
    Operator,
    /// A `[...]` character class or `<...>` regex placeholder.
    Pattern,
}

/// One token of a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GrammarToken {
    pub kind: GrammarTokenKind,
    pub text: String,
}

impl GrammarToken {
    fn new(kind: GrammarTokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns true if this is the operator `op`.
    pub(crate) fn is_operator(&self, op: &str) -> bool {
        self.kind == GrammarTokenKind::Operator && self.text == op
    }
}

/// A scanned rule definition, ready for expression parsing.
#[derive(Debug, Clone)]
pub(crate) struct RuleDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub tokens: Vec<GrammarToken>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    RuleName,
    RuleSeparator,
    RuleDefinition,
}

const fn is_peg_operator(c: char) -> bool {
    matches!(c, '/' | '?' | '*' | '+' | '(' | ')' | '!' | '&' | ',')
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans grammar text into a list of rule definitions.
pub(crate) fn scan_rules(input: &str) -> Result<Vec<RuleDefinition>, GrammarError> {
    Scanner::new(input).scan()
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    fn scan(mut self) -> Result<Vec<RuleDefinition>, GrammarError> {
        let mut definitions = Vec::new();
        let mut state = ScanState::RuleName;
        let mut name = String::new();
        let mut parameters: Vec<String> = Vec::new();
        let mut tokens: Vec<GrammarToken> = Vec::new();
        // Open parentheses carry a definition across newlines, as does a
        // trailing '/' (a choice continued on the next line).
        let mut bracket_depth = 0usize;
        let mut pending_choice = false;

        while let Some(c) = self.peek() {
            if c == '#' {
                self.skip_line();
                continue;
            }
            if state == ScanState::RuleDefinition
                && (c == '\n' || c == '\r')
                && bracket_depth == 0
                && !pending_choice
            {
                if tokens.is_empty() {
                    return Err(GrammarError::EmptyRule(name));
                }
                definitions.push(RuleDefinition {
                    name: std::mem::take(&mut name),
                    parameters: std::mem::take(&mut parameters),
                    tokens: std::mem::take(&mut tokens),
                });
                state = ScanState::RuleName;
                self.advance();
                continue;
            }
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            match state {
                ScanState::RuleName => {
                    let offset = self.pos;
                    let ident = self.scan_identifier();
                    if ident.is_empty() {
                        return Err(GrammarError::ExpectedRuleName { offset });
                    }
                    name = ident.to_string();
                    state = ScanState::RuleSeparator;
                }
                ScanState::RuleSeparator => {
                    if self.peek() == Some('(') {
                        self.advance();
                        parameters = self.scan_parameter_list(&name)?;
                    }
                    self.skip_spaces();
                    if !self.input[self.pos..].starts_with("<-") {
                        return Err(GrammarError::ExpectedArrow {
                            rule: name,
                            offset: self.pos,
                        });
                    }
                    self.advance();
                    self.advance();
                    state = ScanState::RuleDefinition;
                }
                ScanState::RuleDefinition => {
                    pending_choice = false;
                    if c == '\'' {
                        tokens.push(self.scan_literal(&name)?);
                    } else if c.is_ascii_alphabetic() || c == '_' {
                        let ident = self.scan_identifier().to_string();
                        // A parameterized call has no space between the
                        // name and the '('; formal parameters are plain
                        // references even when parenthesized text follows.
                        let is_call =
                            self.peek() == Some('(') && !parameters.iter().any(|p| *p == ident);
                        let kind = if is_call {
                            GrammarTokenKind::FunctionCall
                        } else {
                            GrammarTokenKind::Reference
                        };
                        tokens.push(GrammarToken::new(kind, ident));
                    } else if c == '[' || c == '<' {
                        tokens.push(self.scan_pattern(&name)?);
                    } else if is_peg_operator(c) {
                        if c == '(' {
                            bracket_depth += 1;
                        } else if c == ')' {
                            bracket_depth = bracket_depth
                                .checked_sub(1)
                                .ok_or_else(|| GrammarError::UnbalancedParenthesis(name.clone()))?;
                        } else if c == '/' {
                            pending_choice = true;
                        }
                        self.advance();
                        tokens.push(GrammarToken::new(GrammarTokenKind::Operator, c.to_string()));
                    } else {
                        return Err(GrammarError::UnrecognizedCharacter {
                            rule: name,
                            character: c,
                        });
                    }
                }
            }
        }

        // Finalize the very last rule in the text.
        match state {
            ScanState::RuleName => {}
            ScanState::RuleSeparator => {
                return Err(GrammarError::ExpectedArrow {
                    rule: name,
                    offset: self.pos,
                });
            }
            ScanState::RuleDefinition => {
                if tokens.is_empty() {
                    return Err(GrammarError::EmptyRule(name));
                }
                definitions.push(RuleDefinition {
                    name,
                    parameters,
                    tokens,
                });
            }
        }
        Ok(definitions)
    }

    /// Scans `A, B, ...)` after the opening parenthesis of a formal
    /// parameter list.
    fn scan_parameter_list(&mut self, rule: &str) -> Result<Vec<String>, GrammarError> {
        let mut parameters = Vec::new();
        loop {
            self.skip_spaces();
            let param = self.scan_identifier();
            if param.is_empty() {
                return Err(GrammarError::MalformedParameterList(rule.to_string()));
            }
            parameters.push(param.to_string());
            self.skip_spaces();
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Ok(parameters);
                }
                Some(',') => {
                    self.advance();
                }
                _ => return Err(GrammarError::MalformedParameterList(rule.to_string())),
            }
        }
    }

    /// Scans `'text'` with an optional trailing `i` flag. Matching is
    /// always case-insensitive, so the flag is accepted and dropped.
    fn scan_literal(&mut self, rule: &str) -> Result<GrammarToken, GrammarError> {
        let offset = self.pos;
        self.advance();
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '\'') {
            self.advance();
        }
        if self.peek().is_none() {
            return Err(GrammarError::UnclosedLiteral {
                rule: rule.to_string(),
                offset,
            });
        }
        let text = self.input[start..self.pos].to_string();
        self.advance();
        if self.peek() == Some('i') {
            self.advance();
        }
        Ok(GrammarToken::new(GrammarTokenKind::Literal, text))
    }

    /// Scans a `[...]` character class or `<...>` regex placeholder,
    /// honoring backslash escapes inside.
    fn scan_pattern(&mut self, rule: &str) -> Result<GrammarToken, GrammarError> {
        let offset = self.pos;
        let close = if self.peek() == Some('[') { ']' } else { '>' };
        self.advance();
        let start = self.pos;
        loop {
            match self.peek() {
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(c) if c == close => break,
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(GrammarError::UnclosedPattern {
                        rule: rule.to_string(),
                        offset,
                    });
                }
            }
        }
        let text = self.input[start..self.pos].to_string();
        self.advance();
        Ok(GrammarToken::new(GrammarTokenKind::Pattern, text))
    }
}
