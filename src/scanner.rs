use std::fmt;

use crate::token::{LiteralValue, Token, TokenKind};

/// Classifies a scanner error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input reached before the closing `"`.
    UnterminatedString,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnexpectedCharacter(ch) => write!(f, "unexpected character `{ch}`"),
        }
    }
}

/// Scanner error lifted out of an error token.
///
/// The scanner itself never returns this; it emits
/// [`TokenKind::Error`] in-band. See [`Token::lex_error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

/// Scan a source string into a sequence of tokens.
///
/// Never fails: text that cannot be scanned becomes an error token
/// and scanning resumes after it. The result always ends with exactly
/// one [`TokenKind::Eof`] token.
#[must_use]
pub fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source).scan()
}

/// Every scanner error carried by `tokens`, in source order.
#[must_use]
pub fn lex_errors(tokens: &[Token]) -> Vec<LexError> {
    tokens.iter().filter_map(Token::lex_error).collect()
}

struct Scanner<'a> {
    source: &'a str,
    input: &'a [u8],
    start: usize,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        let start = if source.starts_with('\u{FEFF}') { 3 } else { 0 };
        Self {
            source,
            input: source.as_bytes(),
            start,
            pos: start,
            line: 1,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            self.start = self.pos;

            let Some(ch) = self.advance() else {
                tokens.push(Token::new(TokenKind::Eof, "", self.line));
                break;
            };

            tokens.push(self.scan_token(ch));
        }

        tokens
    }

    fn scan_token(&mut self, ch: u8) -> Token {
        match ch {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b'[' => self.make_token(TokenKind::LeftBracket),
            b']' => self.make_token(TokenKind::RightBracket),
            b'+' => self.make_token(TokenKind::Plus),
            b'-' => self.make_token(TokenKind::Minus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),
            b'=' => self.either(b'=', TokenKind::EqualEqual, TokenKind::Equal),
            b'!' => self.either(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b'<' => self.either(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.either(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'"' => self.read_string(),
            b'0'..=b'9' => self.read_number(),
            c if is_alpha(c) => self.read_identifier(),
            _ => self.unexpected_character(),
        }
    }

    /// Two-character operator if the next byte is `second`,
    /// otherwise the single-character one.
    fn either(&mut self, second: u8, double: TokenKind, single: TokenKind) -> Token {
        if self.peek() == Some(second) {
            self.pos += 1;
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\r' | b'\t' => self.pos += 1,
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                _ => return,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.pos]
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.line)
    }

    fn read_string(&mut self) -> Token {
        while let Some(ch) = self.peek() {
            if ch == b'"' {
                break;
            }
            if ch == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }

        if self.advance().is_none() {
            return self.make_token(TokenKind::Error(LexErrorKind::UnterminatedString));
        }

        let value = &self.source[self.start + 1..self.pos - 1];
        Token {
            literal: Some(LiteralValue::Text(value.to_string())),
            ..self.make_token(TokenKind::String)
        }
    }

    fn read_number(&mut self) -> Token {
        self.skip_digits();

        // A trailing `.` without a digit after it is left for the next token.
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.skip_digits();
        }

        let text = self.lexeme();
        // Digits with at most one interior `.` always parse.
        let value = text.parse::<f64>().unwrap_or_default();
        Token {
            literal: Some(LiteralValue::Number(value)),
            ..self.make_token(TokenKind::Number)
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn read_identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_alphanumeric) {
            self.pos += 1;
        }

        let kind = TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn unexpected_character(&mut self) -> Token {
        // Consume the whole character so the lexeme stays valid UTF-8.
        let ch = self.source[self.start..].chars().next().unwrap_or_default();
        self.pos = self.start + ch.len_utf8();
        self.make_token(TokenKind::Error(LexErrorKind::UnexpectedCharacter(ch)))
    }
}

const fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

const fn is_alphanumeric(c: u8) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
