//! Pretty-printer that serializes statements back into canonical source.
//!
//! Produces tab-indented output, one statement per line, with the
//! minimum parentheses needed to re-parse to the same tree.

use crate::ast::{CommandStmt, Expression, ForStmt, IfStmt, Statement, VarStmt};
use crate::token::TokenKind;

/// Format statements into canonical niftel source.
///
/// Binary operators are spaced, `else` stays on the closing-brace
/// line, and parentheses are added only where precedence,
/// associativity or command-argument boundaries need them.
#[must_use]
pub fn format(statements: &[Statement]) -> String {
    let mut out = String::new();
    format_statements(&mut out, statements, 0);
    out
}

/// Format a single expression.
#[must_use]
pub fn format_expression(expr: &Expression) -> String {
    let mut out = String::new();
    write_expression(&mut out, expr);
    out
}

fn format_statements(out: &mut String, statements: &[Statement], indent: usize) {
    for stmt in statements {
        push_indent(out, indent);
        format_statement(out, stmt, indent);
    }
}

fn format_statement(out: &mut String, stmt: &Statement, indent: usize) {
    match stmt {
        Statement::Var(var) => format_var(out, var),
        Statement::If(stmt) => format_if(out, stmt, indent),
        Statement::For(stmt) => format_for(out, stmt, indent),
        Statement::Command(cmd) => format_command(out, cmd),
    }
}

fn format_var(out: &mut String, var: &VarStmt) {
    out.push_str("var ");
    out.push_str(&var.name.lexeme);
    out.push_str(" = ");
    write_expression(out, &var.value);
    out.push('\n');
}

fn format_if(out: &mut String, stmt: &IfStmt, indent: usize) {
    out.push_str("if ");
    write_expression(out, &stmt.condition);
    format_block(out, &stmt.then_body, indent);

    match stmt.else_body.as_deref() {
        None => out.push('\n'),
        Some([Statement::If(nested)]) => {
            out.push_str(" else ");
            format_if(out, nested, indent);
        }
        Some(body) => {
            out.push_str(" else");
            format_block(out, body, indent);
            out.push('\n');
        }
    }
}

fn format_for(out: &mut String, stmt: &ForStmt, indent: usize) {
    out.push_str("for ");
    out.push_str(&stmt.iterator.lexeme);
    out.push_str(" in ");
    write_expression(out, &stmt.iterable);
    format_block(out, &stmt.body, indent);
    out.push('\n');
}

fn format_command(out: &mut String, cmd: &CommandStmt) {
    out.push_str(&cmd.name.lexeme);
    for (i, arg) in cmd.args.iter().enumerate() {
        out.push(' ');
        let text = format_expression(arg);
        // `a -b` would re-parse as one subtraction.
        if i > 0 && text.starts_with('-') {
            out.push('(');
            out.push_str(&text);
            out.push(')');
        } else {
            out.push_str(&text);
        }
    }
    out.push('\n');
}

/// Writes ` { ... }` without a trailing newline.
fn format_block(out: &mut String, body: &[Statement], indent: usize) {
    out.push_str(" {\n");
    format_statements(out, body, indent + 1);
    push_indent(out, indent);
    out.push('}');
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

/// Binding strength of a binary operator; higher binds tighter.
const fn precedence(kind: &TokenKind) -> u8 {
    match kind {
        TokenKind::EqualEqual | TokenKind::BangEqual => 1,
        TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual => 2,
        TokenKind::Plus | TokenKind::Minus => 3,
        TokenKind::Star | TokenKind::Slash => 4,
        _ => 0,
    }
}

fn write_expression(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Literal(value) => {
            use std::fmt::Write as _;
            let _ = write!(out, "{value}");
        }
        Expression::Variable { name } => out.push_str(&name.lexeme),
        Expression::Unary { operator, operand } => {
            out.push_str(&operator.lexeme);
            let wrap = matches!(**operand, Expression::Binary { .. });
            write_operand(out, operand, wrap);
        }
        Expression::Binary {
            left,
            operator,
            right,
        } => {
            let own = precedence(&operator.kind);
            let wrap_left = binary_precedence(left).is_some_and(|p| p < own);
            // Same-tier operators associate left, so a right operand
            // at the same tier needs parentheses.
            let wrap_right = binary_precedence(right).is_some_and(|p| p <= own);

            write_operand(out, left, wrap_left);
            out.push(' ');
            out.push_str(&operator.lexeme);
            out.push(' ');
            write_operand(out, right, wrap_right);
        }
    }
}

fn write_operand(out: &mut String, expr: &Expression, wrap: bool) {
    if wrap {
        out.push('(');
        write_expression(out, expr);
        out.push(')');
    } else {
        write_expression(out, expr);
    }
}

fn binary_precedence(expr: &Expression) -> Option<u8> {
    match expr {
        Expression::Binary { operator, .. } => Some(precedence(&operator.kind)),
        _ => None,
    }
}
