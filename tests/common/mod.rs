#![allow(dead_code)]

use niftel::{Expression, Statement, format, parse, parse_str, scan};

/// Parse `input`, format it, and assert the output equals `input`.
pub fn roundtrip(input: &str) {
    let statements = parse(&scan(input)).expect("parse failed");
    let output = format(&statements);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Parse `source`, panicking with the error on failure.
pub fn parse_ok(source: &str) -> Vec<Statement> {
    parse_str(source).unwrap_or_else(|e| panic!("failed to parse: {e}\n--- source ---\n{source}"))
}

/// The value of the single `var` statement in `source`.
pub fn var_value(source: &str) -> Expression {
    match parse_ok(source).into_iter().next() {
        Some(Statement::Var(stmt)) => stmt.value,
        other => panic!("expected var statement, got {other:?}"),
    }
}

/// Operator lexeme of a unary or binary expression.
pub fn operator(expr: &Expression) -> &str {
    match expr {
        Expression::Unary { operator, .. } | Expression::Binary { operator, .. } => {
            &operator.lexeme
        }
        other => panic!("expected operator expression, got {other:?}"),
    }
}
