//! SQL tokenizer.
//!
//! Splits raw SQL text into the flat [`MatcherToken`] list the matcher
//! consumes. Classification is deliberately coarse: words and quoted
//! identifiers are `Word`, punctuation is `Operator`, literals are
//! `Number`/`String`. Keyword recognition happens in the grammar, not
//! here.

use ferrite_peg::{MatcherToken, TokenKind};

use crate::error::TokenizeError;

/// Tokenizes one SQL statement.
///
/// Stops at an unquoted `;`; anything after it is ignored.
///
/// # Errors
///
/// Returns a [`TokenizeError`] for an unterminated string or quoted
/// identifier, or a character outside the recognized SQL surface.
pub fn tokenize(sql: &str) -> Result<Vec<MatcherToken>, TokenizeError> {
    Tokenizer::new(sql).run()
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn run(mut self) -> Result<Vec<MatcherToken>, TokenizeError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let Some(c) = self.peek() else {
                break;
            };
            match c {
                ';' => break,
                '\'' => tokens.push(self.scan_string()?),
                '"' => tokens.push(self.scan_quoted_identifier()?),
                c if c.is_ascii_digit() => tokens.push(self.scan_number()),
                c if c.is_alphabetic() || c == '_' => tokens.push(self.scan_word()),
                c if is_operator_char(c) => tokens.push(self.scan_operator()),
                c => {
                    return Err(TokenizeError::UnexpectedCharacter {
                        character: c,
                        offset: self.pos,
                    });
                }
            }
        }
        Ok(tokens)
    }

    fn scan_word(&mut self) -> MatcherToken {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        MatcherToken::word(&self.input[start..self.pos])
    }

    /// `'...'` string literal with doubled-quote escapes; the token text
    /// is the unescaped content.
    fn scan_string(&mut self) -> Result<MatcherToken, TokenizeError> {
        let start = self.pos;
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('\'') if self.peek_next() == Some('\'') => {
                    value.push('\'');
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    return Ok(MatcherToken::string(value));
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(TokenizeError::UnterminatedString { offset: start }),
            }
        }
    }

    /// `"..."` quoted identifier; classified as a word so it feeds the
    /// identifier pattern like any bare name.
    fn scan_quoted_identifier(&mut self) -> Result<MatcherToken, TokenizeError> {
        let start = self.pos;
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') if self.peek_next() == Some('"') => {
                    value.push('"');
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    return Ok(MatcherToken::new(TokenKind::Word, value));
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(TokenizeError::UnterminatedQuotedIdentifier { offset: start }),
            }
        }
    }

    /// Integer, decimal or exponent form; the raw text is preserved.
    fn scan_number(&mut self) -> MatcherToken {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        MatcherToken::number(&self.input[start..self.pos])
    }

    fn scan_operator(&mut self) -> MatcherToken {
        let start = self.pos;
        let first = self.advance().unwrap_or_default();
        if let Some(second) = self.peek() {
            let pair = [first, second];
            if matches!(pair, ['<', '='] | ['>', '='] | ['<', '>'] | ['!', '='] | ['|', '|']) {
                self.advance();
            }
        }
        MatcherToken::operator(&self.input[start..self.pos])
    }
}

const fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '=' | '.' | ',' | '(' | ')' | '*' | '+' | '-' | '/' | '%' | '<' | '>' | '!' | '|'
    )
}
