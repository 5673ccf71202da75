use crate::token::{LiteralValue, Token};

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Var(VarStmt),
    If(IfStmt),
    For(ForStmt),
    Command(CommandStmt),
}

/// Variable binding: `var name = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub name: Token,
    pub value: Expression,
}

/// Conditional: `if cond { ... } else { ... }`.
///
/// `else if` is an `else_body` holding exactly one nested
/// [`Statement::If`].
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_body: Vec<Statement>,
    /// `None` when there is no `else` clause.
    pub else_body: Option<Vec<Statement>>,
}

/// Loop: `for iterator in iterable { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub iterator: Token,
    pub iterable: Expression,
    pub body: Vec<Statement>,
}

/// Named operation with expression arguments: `checkout "main" force`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStmt {
    pub name: Token,
    pub args: Vec<Expression>,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralValue),
    Variable {
        name: Token,
    },
    Unary {
        operator: Token,
        operand: Box<Self>,
    },
    Binary {
        left: Box<Self>,
        operator: Token,
        right: Box<Self>,
    },
}

impl Statement {
    /// Line of the first token stored in this statement.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Var(stmt) => Some(stmt.name.line),
            Self::For(stmt) => Some(stmt.iterator.line),
            Self::Command(stmt) => Some(stmt.name.line),
            Self::If(stmt) => stmt
                .condition
                .line()
                .or_else(|| stmt.then_body.iter().find_map(Self::line)),
        }
    }
}

impl Expression {
    /// Line of the leftmost token stored in this expression.
    ///
    /// Literals keep only their value, so a bare literal has no line.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Literal(_) => None,
            Self::Variable { name } => Some(name.line),
            Self::Unary { operator, .. } => Some(operator.line),
            Self::Binary {
                left, operator, ..
            } => left.line().or(Some(operator.line)),
        }
    }
}
