//! Build statements and expressions without going through source text.
//!
//! Tokens created here are synthetic and carry line 0.

use crate::ast::{CommandStmt, Expression, ForStmt, IfStmt, Statement, VarStmt};
use crate::token::{LiteralValue, Token, TokenKind};

fn identifier(name: &str) -> Token {
    Token::new(TokenKind::Identifier, name, 0)
}

fn operator(kind: TokenKind) -> Token {
    let lexeme = kind.fixed_lexeme().unwrap_or_default();
    Token::new(kind, lexeme, 0)
}

impl Expression {
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(LiteralValue::Number(value))
    }

    /// String literal.
    ///
    /// String literals have no escape sequences, so `value` must not
    /// contain `"`; the formatted source would not scan otherwise.
    /// Use [`Expression::try_text`] for text from outside the program.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Literal(LiteralValue::Text(value.to_string()))
    }

    /// String literal, or `None` if `value` contains `"`.
    #[must_use]
    pub fn try_text(value: &str) -> Option<Self> {
        (!value.contains('"')).then(|| Self::text(value))
    }

    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(LiteralValue::Boolean(value))
    }

    #[must_use]
    pub const fn nil() -> Self {
        Self::Literal(LiteralValue::Nil)
    }

    /// Reference to a variable by name.
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self::Variable {
            name: identifier(name),
        }
    }

    /// Prefix operator application. `operator` should be
    /// [`TokenKind::Bang`] or [`TokenKind::Minus`].
    #[must_use]
    pub fn unary(kind: TokenKind, operand: Self) -> Self {
        Self::Unary {
            operator: operator(kind),
            operand: Box::new(operand),
        }
    }

    /// Binary operator application, e.g. `Expression::binary(a, TokenKind::Plus, b)`.
    #[must_use]
    pub fn binary(left: Self, kind: TokenKind, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator: operator(kind),
            right: Box::new(right),
        }
    }
}

impl VarStmt {
    /// Create `var name = value`.
    #[must_use]
    pub fn new(name: &str, value: Expression) -> Self {
        Self {
            name: identifier(name),
            value,
        }
    }
}

impl CommandStmt {
    /// Create a command with no arguments.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: identifier(name),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: Expression) -> Self {
        self.args.push(arg);
        self
    }

    /// Append a variable reference argument.
    #[must_use]
    pub fn var_arg(self, name: &str) -> Self {
        self.arg(Expression::variable(name))
    }

    /// Append a string literal argument. See [`Expression::text`].
    #[must_use]
    pub fn text_arg(self, value: &str) -> Self {
        self.arg(Expression::text(value))
    }
}

impl IfStmt {
    /// Create an `if` with an empty body and no `else`.
    #[must_use]
    pub const fn new(condition: Expression) -> Self {
        Self {
            condition,
            then_body: Vec::new(),
            else_body: None,
        }
    }

    /// Append a statement to the `then` body.
    #[must_use]
    pub fn then(mut self, stmt: impl Into<Statement>) -> Self {
        self.then_body.push(stmt.into());
        self
    }

    /// Append a statement to the `else` body, creating it if needed.
    #[must_use]
    pub fn otherwise(mut self, stmt: impl Into<Statement>) -> Self {
        self.else_body.get_or_insert_with(Vec::new).push(stmt.into());
        self
    }

    /// Replace the `else` clause with an `else if`.
    #[must_use]
    pub fn else_if(mut self, nested: Self) -> Self {
        self.else_body = Some(vec![Statement::If(nested)]);
        self
    }
}

impl ForStmt {
    /// Create `for iterator in iterable { }`.
    #[must_use]
    pub fn new(iterator: &str, iterable: Expression) -> Self {
        Self {
            iterator: identifier(iterator),
            iterable,
            body: Vec::new(),
        }
    }

    /// Append a statement to the loop body.
    #[must_use]
    pub fn body(mut self, stmt: impl Into<Statement>) -> Self {
        self.body.push(stmt.into());
        self
    }
}

impl From<VarStmt> for Statement {
    fn from(stmt: VarStmt) -> Self {
        Self::Var(stmt)
    }
}

impl From<IfStmt> for Statement {
    fn from(stmt: IfStmt) -> Self {
        Self::If(stmt)
    }
}

impl From<ForStmt> for Statement {
    fn from(stmt: ForStmt) -> Self {
        Self::For(stmt)
    }
}

impl From<CommandStmt> for Statement {
    fn from(stmt: CommandStmt) -> Self {
        Self::Command(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format;

    #[test]
    fn command_with_args() {
        let cmd = CommandStmt::new("checkout").text_arg("main").var_arg("force");
        assert_eq!(cmd.name.lexeme, "checkout");
        assert_eq!(cmd.name.line, 0);
        assert_eq!(cmd.args.len(), 2);
    }

    #[test]
    fn binary_uses_fixed_lexeme() {
        let expr = Expression::binary(Expression::number(1.0), TokenKind::LessEqual, Expression::nil());
        let Expression::Binary { operator, .. } = expr else {
            panic!("expected binary");
        };
        assert_eq!(operator.lexeme, "<=");
    }

    #[test]
    fn otherwise_creates_else_body() {
        let stmt = IfStmt::new(Expression::boolean(true))
            .then(CommandStmt::new("a"))
            .otherwise(CommandStmt::new("b"))
            .otherwise(CommandStmt::new("c"));
        assert_eq!(stmt.else_body.map(|body| body.len()), Some(2));
    }

    #[test]
    fn builds_formattable_program() {
        let program: Vec<Statement> = vec![
            VarStmt::new("target", Expression::text("main")).into(),
            ForStmt::new("b", Expression::variable("branches"))
                .body(
                    IfStmt::new(Expression::binary(
                        Expression::variable("b"),
                        TokenKind::BangEqual,
                        Expression::variable("target"),
                    ))
                    .then(CommandStmt::new("merge").var_arg("b")),
                )
                .into(),
        ];

        assert_eq!(
            format(&program),
            "var target = \"main\"\n\
             for b in branches {\n\
             \tif b != target {\n\
             \t\tmerge b\n\
             \t}\n\
             }\n"
        );
    }
}
