use std::fmt;

use crate::ast::{CommandStmt, Expression, ForStmt, IfStmt, Statement, VarStmt};
use crate::scanner::LexErrorKind;
use crate::token::{LiteralValue, Token, TokenKind};

/// Classifies a syntax error.
///
/// `found` holds the lexeme of the offending token, or `None` when
/// the parser ran out of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Expected an identifier after `var`.
    ExpectedVariableName { found: Option<String> },
    /// Expected `=` after a variable name.
    ExpectedEqual { found: Option<String> },
    /// Expected an identifier after `for`.
    ExpectedLoopVariable { found: Option<String> },
    /// Expected `in` after a loop variable.
    ExpectedIn { found: Option<String> },
    /// Expected `{` to open a block.
    ExpectedOpenBrace { found: Option<String> },
    /// Expected `}` to close a block.
    ExpectedCloseBrace { found: Option<String> },
    /// Expected `)` after a parenthesized expression.
    ExpectedCloseParen { found: Option<String> },
    /// Expected the start of an expression.
    ExpectedExpression { found: Option<String> },
    /// Token that cannot start a statement.
    UnexpectedToken { found: Option<String> },
    /// The offending token is a scanner error token.
    Lex(LexErrorKind),
    /// Blocks or expressions nested deeper than the configured limit.
    NestingTooDeep { limit: usize },
}

fn write_found(f: &mut fmt::Formatter<'_>, expected: &str, found: Option<&String>) -> fmt::Result {
    match found {
        Some(t) => write!(f, "{expected}, got '{t}'"),
        None => write!(f, "{expected}, got end of input"),
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedVariableName { found } => {
                write_found(f, "expected variable name after 'var'", found.as_ref())
            }
            Self::ExpectedEqual { found } => {
                write_found(f, "expected '=' after variable name", found.as_ref())
            }
            Self::ExpectedLoopVariable { found } => {
                write_found(f, "expected loop variable after 'for'", found.as_ref())
            }
            Self::ExpectedIn { found } => {
                write_found(f, "expected 'in' after loop variable", found.as_ref())
            }
            Self::ExpectedOpenBrace { found } => write_found(f, "expected '{'", found.as_ref()),
            Self::ExpectedCloseBrace { found } => write_found(f, "expected '}'", found.as_ref()),
            Self::ExpectedCloseParen { found } => {
                write_found(f, "expected ')' after expression", found.as_ref())
            }
            Self::ExpectedExpression { found } => {
                write_found(f, "expected expression", found.as_ref())
            }
            Self::UnexpectedToken { found: Some(t) } => write!(f, "unexpected token '{t}'"),
            Self::UnexpectedToken { found: None } => write!(f, "unexpected end of input"),
            Self::Lex(kind) => write!(f, "{kind}"),
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: usize,
}

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum combined depth of nested blocks and expressions.
    ///
    /// A parenthesized expression climbs every precedence tier again,
    /// so each level can cost several stack frames. The default stays
    /// inside a 2 MB thread stack in unoptimized builds.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_nesting: 128 }
    }
}

/// Parse a token stream into a sequence of statements.
///
/// # Errors
///
/// Returns `SyntaxError` for the first grammar violation found,
/// including any scanner error token the parser reaches.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>, SyntaxError> {
    parse_with(tokens, ParseOptions::default())
}

/// Like [`parse`], with explicit options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(tokens: &[Token], options: ParseOptions) -> Result<Vec<Statement>, SyntaxError> {
    Parser::new(tokens, options).parse()
}

const EQUALITY: &[TokenKind] = &[TokenKind::EqualEqual, TokenKind::BangEqual];
const COMPARISON: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];
const TERM: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const FACTOR: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash];
const UNARY: &[TokenKind] = &[TokenKind::Bang, TokenKind::Minus];

type ParseResult<T> = Result<T, SyntaxError>;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn parse(mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    // -- Statements --

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let Some(token) = self.peek() else {
            return Err(self.error_here(|found| SyntaxErrorKind::UnexpectedToken { found }));
        };

        match token.kind {
            TokenKind::Var => {
                self.pos += 1;
                self.parse_var().map(Statement::Var)
            }
            TokenKind::If => {
                self.pos += 1;
                self.parse_if().map(Statement::If)
            }
            TokenKind::For => {
                self.pos += 1;
                self.parse_for().map(Statement::For)
            }
            TokenKind::Identifier => {
                self.pos += 1;
                self.parse_command(token.clone()).map(Statement::Command)
            }
            _ => Err(self.error_here(|found| SyntaxErrorKind::UnexpectedToken { found })),
        }
    }

    fn parse_var(&mut self) -> ParseResult<VarStmt> {
        let name = self.consume(&TokenKind::Identifier, |found| {
            SyntaxErrorKind::ExpectedVariableName { found }
        })?;
        self.consume(&TokenKind::Equal, |found| SyntaxErrorKind::ExpectedEqual {
            found,
        })?;
        let value = self.parse_expression()?;
        Ok(VarStmt {
            name: name.clone(),
            value,
        })
    }

    fn parse_if(&mut self) -> ParseResult<IfStmt> {
        let condition = self.parse_expression()?;
        let then_body = self.parse_block()?;

        let else_body = if self.advance_if(&TokenKind::Else).is_some() {
            if self.advance_if(&TokenKind::If).is_some() {
                self.enter()?;
                let nested = self.parse_if()?;
                self.leave();
                Some(vec![Statement::If(nested)])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(IfStmt {
            condition,
            then_body,
            else_body,
        })
    }

    fn parse_for(&mut self) -> ParseResult<ForStmt> {
        let iterator = self.consume(&TokenKind::Identifier, |found| {
            SyntaxErrorKind::ExpectedLoopVariable { found }
        })?;
        self.consume(&TokenKind::In, |found| SyntaxErrorKind::ExpectedIn { found })?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(ForStmt {
            iterator: iterator.clone(),
            iterable,
            body,
        })
    }

    fn parse_command(&mut self, name: Token) -> ParseResult<CommandStmt> {
        let mut args = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::RightBrace || token.kind.is_reserved_word() {
                break;
            }
            args.push(self.parse_expression()?);
        }
        Ok(CommandStmt { name, args })
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.consume(&TokenKind::LeftBrace, |found| {
            SyntaxErrorKind::ExpectedOpenBrace { found }
        })?;
        self.enter()?;

        let mut statements = Vec::new();
        while self
            .peek()
            .is_some_and(|token| token.kind != TokenKind::RightBrace)
        {
            statements.push(self.parse_statement()?);
        }

        self.leave();
        self.consume(&TokenKind::RightBrace, |found| {
            SyntaxErrorKind::ExpectedCloseBrace { found }
        })?;
        Ok(statements)
    }

    // -- Expressions, lowest precedence first --

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.enter()?;
        let expr = self.parse_equality()?;
        self.leave();
        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(EQUALITY, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(COMPARISON, Self::parse_term)
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(TERM, Self::parse_factor)
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(FACTOR, Self::parse_unary)
    }

    /// `operand ( op operand )*`, folded to the left.
    fn parse_left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let mut expr = operand(self)?;
        while let Some(operator) = self.advance_if_any(operators) {
            let right = operand(self)?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator: operator.clone(),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let Some(operator) = self.advance_if_any(UNARY) else {
            return self.parse_primary();
        };

        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expression::Unary {
            operator: operator.clone(),
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.peek() else {
            return Err(self.error_here(|found| SyntaxErrorKind::ExpectedExpression { found }));
        };

        let expr = match token.kind {
            TokenKind::True => Expression::Literal(LiteralValue::Boolean(true)),
            TokenKind::False => Expression::Literal(LiteralValue::Boolean(false)),
            TokenKind::Nil => Expression::Literal(LiteralValue::Nil),
            TokenKind::Number | TokenKind::String => match decoded_literal(token) {
                Some(value) => Expression::Literal(value),
                None => {
                    return Err(
                        self.error_here(|found| SyntaxErrorKind::ExpectedExpression { found })
                    );
                }
            },
            TokenKind::Identifier => Expression::Variable {
                name: token.clone(),
            },
            TokenKind::LeftParen => {
                self.pos += 1;
                let inner = self.parse_expression()?;
                self.consume(&TokenKind::RightParen, |found| {
                    SyntaxErrorKind::ExpectedCloseParen { found }
                })?;
                return Ok(inner);
            }
            _ => {
                return Err(self.error_here(|found| SyntaxErrorKind::ExpectedExpression { found }));
            }
        };

        self.pos += 1;
        Ok(expr)
    }

    // -- Token cursor --

    /// Current token, or `None` at end of input.
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).filter(|token| !token.is_eof())
    }

    fn advance_if(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        self.advance_if_any(std::slice::from_ref(kind))
    }

    fn advance_if_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        let token = self.peek().filter(|token| kinds.contains(&token.kind))?;
        self.pos += 1;
        Some(token)
    }

    fn consume(
        &mut self,
        kind: &TokenKind,
        error: impl FnOnce(Option<String>) -> SyntaxErrorKind,
    ) -> ParseResult<&'a Token> {
        self.advance_if(kind).ok_or_else(|| self.error_here(error))
    }

    /// Error at the current token. Scanner error tokens are reported
    /// as themselves rather than as the expected construct.
    fn error_here(&self, error: impl FnOnce(Option<String>) -> SyntaxErrorKind) -> SyntaxError {
        match self.peek() {
            Some(token) => {
                let kind = match &token.kind {
                    TokenKind::Error(lex) => SyntaxErrorKind::Lex(lex.clone()),
                    _ => error(Some(token.lexeme.clone())),
                };
                SyntaxError {
                    kind,
                    line: token.line,
                }
            }
            None => SyntaxError {
                kind: error(None),
                line: self.eof_line(),
            },
        }
    }

    fn eof_line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |token| token.line)
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_nesting {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::NestingTooDeep {
                    limit: self.options.max_nesting,
                },
                line: self.peek().map_or_else(|| self.eof_line(), |token| token.line),
            });
        }
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// The token's decoded value, falling back to its lexeme for tokens
/// that were built by hand without one.
fn decoded_literal(token: &Token) -> Option<LiteralValue> {
    if let Some(value) = &token.literal {
        return Some(value.clone());
    }
    match token.kind {
        TokenKind::Number => token.lexeme.parse().ok().map(LiteralValue::Number),
        TokenKind::String => token
            .lexeme
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .map(|text| LiteralValue::Text(text.to_string())),
        _ => None,
    }
}
