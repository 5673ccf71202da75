//! Build a niftel script with the builder API and print it.

use niftel::{CommandStmt, Expression, ForStmt, IfStmt, Statement, TokenKind, VarStmt};

fn main() {
    let program: Vec<Statement> = vec![
        VarStmt::new("base", Expression::text("main")).into(),
        ForStmt::new("b", Expression::variable("branches"))
            .body(
                IfStmt::new(Expression::binary(
                    Expression::variable("b"),
                    TokenKind::EqualEqual,
                    Expression::variable("base"),
                ))
                .then(CommandStmt::new("pull").text_arg("origin").var_arg("b"))
                .otherwise(CommandStmt::new("rebase").var_arg("b").var_arg("base")),
            )
            .into(),
    ];

    print!("{}", niftel::format(&program));
}
