use std::fmt;

use crate::scanner::{LexError, LexErrorKind};

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Always the last token of a scan.
    Eof,
    /// Identifier that is not a reserved word.
    Identifier,
    /// Number literal (`42`, `3.14`).
    Number,
    /// Double-quoted string literal.
    String,
    True,
    False,
    Nil,

    /// `=`
    Equal,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `==`
    EqualEqual,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,

    If,
    Else,
    For,
    In,
    Var,
    Repo,
    Branch,

    /// Text the scanner could not turn into a token.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Look up `text` in the reserved-word table.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "true" => Self::True,
            "false" => Self::False,
            "nil" => Self::Nil,
            "if" => Self::If,
            "else" => Self::Else,
            "for" => Self::For,
            "in" => Self::In,
            "var" => Self::Var,
            "repo" => Self::Repo,
            "branch" => Self::Branch,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind is a statement-level reserved word.
    ///
    /// These end a command's argument list. The literal keywords
    /// `true`, `false` and `nil` are not included.
    #[must_use]
    pub const fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Self::If | Self::Else | Self::For | Self::In | Self::Var | Self::Repo | Self::Branch
        )
    }

    /// The fixed spelling of this kind, if it has one.
    ///
    /// Identifiers, literals, errors and end of input have no
    /// fixed spelling.
    #[must_use]
    pub const fn fixed_lexeme(&self) -> Option<&'static str> {
        let text = match self {
            Self::True => "true",
            Self::False => "false",
            Self::Nil => "nil",
            Self::Equal => "=",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::EqualEqual => "==",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::Var => "var",
            Self::Repo => "repo",
            Self::Branch => "branch",
            Self::Eof | Self::Identifier | Self::Number | Self::String | Self::Error(_) => {
                return None;
            }
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Identifier => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Error(kind) => write!(f, "error ({kind})"),
            other => match other.fixed_lexeme() {
                Some(text) => write!(f, "'{text}'"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}

/// Zeros after the leading `1` in the text printed for an infinite
/// number; `1e309` is the first power of ten above `f64::MAX`.
const INFINITE_DIGITS: usize = 309;

/// Decoded literal value.
///
/// Tokens only ever carry `Number` and `Text`; the AST uses all four.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // A literal past `f64::MAX` scans to infinity; print digits
            // that scan back to it instead of `inf`.
            Self::Number(n) if n.is_infinite() => {
                let sign = if n.is_sign_negative() { "-" } else { "" };
                write!(f, "{sign}1{}", "0".repeat(INFINITE_DIGITS))
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Nil => write!(f, "nil"),
        }
    }
}

/// A single token with its kind, source text, decoded literal and line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text covered by the token.
    pub lexeme: String,
    pub literal: Option<LiteralValue>,
    /// 1-based line on which the token ends.
    pub line: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    /// The scanner error carried by this token, if it is an error token.
    #[must_use]
    pub fn lex_error(&self) -> Option<LexError> {
        match &self.kind {
            TokenKind::Error(kind) => Some(LexError {
                kind: kind.clone(),
                line: self.line,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {:?} '{}'", self.line, self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, " {literal}")?;
        }
        Ok(())
    }
}
