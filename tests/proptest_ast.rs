//! Property-based tests with proptest.
//!
//! Generate random ASTs, format them, parse them back, and verify the
//! formatter reaches a fixpoint after one parse.
//!
//! We check `format(parse(format(p))) == format(p)` for a parsed `p`
//! rather than `ast == parse(format(ast))` because command arguments
//! are greedy: two generated commands in a row re-parse as one.

use niftel::{
    CommandStmt, Expression, ForStmt, IfStmt, Statement, TokenKind, VarStmt, format, lex_errors,
    parse_str, scan,
};
use proptest::prelude::*;

// -- Leaf strategies --

/// Identifier that is not a reserved word.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,7}".prop_filter("reserved word", |s| TokenKind::keyword(s).is_none())
}

/// String literal content: anything printable except `"`.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ./:_-]{0,12}"
}

fn literal() -> impl Strategy<Value = Expression> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| Expression::number(f64::from(n) / 4.0)),
        text().prop_map(|s| Expression::text(&s)),
        any::<bool>().prop_map(Expression::boolean),
        Just(Expression::nil()),
    ]
}

fn binary_operator() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        Just(TokenKind::EqualEqual),
        Just(TokenKind::BangEqual),
        Just(TokenKind::Less),
        Just(TokenKind::LessEqual),
        Just(TokenKind::Greater),
        Just(TokenKind::GreaterEqual),
        Just(TokenKind::Plus),
        Just(TokenKind::Minus),
        Just(TokenKind::Star),
        Just(TokenKind::Slash),
    ]
}

fn unary_operator() -> impl Strategy<Value = TokenKind> {
    prop_oneof![Just(TokenKind::Bang), Just(TokenKind::Minus)]
}

/// Expression trees up to a few levels deep.
fn expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        2 => literal(),
        1 => identifier().prop_map(|name| Expression::variable(&name)),
    ];

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (unary_operator(), inner.clone())
                .prop_map(|(op, operand)| Expression::unary(op, operand)),
            (inner.clone(), binary_operator(), inner)
                .prop_map(|(left, op, right)| Expression::binary(left, op, right)),
        ]
    })
}

// -- Statement strategies --

fn simple_statement() -> impl Strategy<Value = Statement> {
    prop_oneof![
        (identifier(), expression()).prop_map(|(name, value)| VarStmt::new(&name, value).into()),
        (identifier(), prop::collection::vec(expression(), 0..=3)).prop_map(|(name, args)| {
            let mut cmd = CommandStmt::new(&name);
            for arg in args {
                cmd = cmd.arg(arg);
            }
            cmd.into()
        }),
    ]
}

fn statement() -> impl Strategy<Value = Statement> {
    simple_statement().prop_recursive(3, 24, 3, |inner| {
        let body = prop::collection::vec(inner, 0..=3);
        prop_oneof![
            (expression(), body.clone(), prop::option::of(body.clone())).prop_map(
                |(condition, then_body, else_body)| {
                    Statement::If(IfStmt {
                        condition,
                        then_body,
                        else_body,
                    })
                }
            ),
            (identifier(), expression(), body).prop_map(|(iterator, iterable, stmts)| {
                let mut stmt = ForStmt::new(&iterator, iterable);
                for s in stmts {
                    stmt = stmt.body(s);
                }
                stmt.into()
            }),
        ]
    })
}

fn program() -> impl Strategy<Value = Vec<Statement>> {
    prop::collection::vec(statement(), 0..=5)
}

// -- Property tests --

proptest! {
    /// Formatted output always re-parses, and formatting a parsed
    /// program is a fixpoint.
    #[test]
    fn format_reaches_fixpoint(statements in program()) {
        let first = format(&statements);
        let parsed = parse_str(&first).map_err(|e| {
            TestCaseError::fail(std::format!("parse error: {e}\n--- output ---\n{first}"))
        })?;
        let second = format(&parsed);
        let reparsed = parse_str(&second).map_err(|e| {
            TestCaseError::fail(std::format!("parse error: {e}\n--- output ---\n{second}"))
        })?;
        prop_assert_eq!(&second, &format(&reparsed));
    }

    /// Formatted output never contains text the scanner rejects.
    #[test]
    fn format_never_produces_lex_error(statements in program()) {
        let formatted = format(&statements);
        prop_assert!(lex_errors(&scan(&formatted)).is_empty(), "{}", formatted);
    }

    /// A lone expression survives format and parse structurally.
    #[test]
    fn expression_roundtrip(expr in expression()) {
        let stmt: Statement = VarStmt::new("x", expr).into();
        let formatted = format(std::slice::from_ref(&stmt));
        let parsed = parse_str(&formatted).map_err(|e| {
            TestCaseError::fail(std::format!("parse error: {e}\n--- output ---\n{formatted}"))
        })?;
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(format(&parsed), formatted);
    }

    /// Scanning any text ends in exactly one end-of-input token, with
    /// lines never decreasing.
    #[test]
    fn scan_is_total(source in "\\PC{0,64}") {
        let tokens = scan(&source);
        prop_assert!(tokens.last().is_some_and(niftel::Token::is_eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
        prop_assert!(tokens.windows(2).all(|w| w[0].line <= w[1].line));
    }

    /// Parsing arbitrary token soup returns a result instead of panicking.
    #[test]
    fn parse_never_panics(source in "[a-z0-9(){}\\[\\]=!<>+*/\" \n.-]{0,48}") {
        let _ = parse_str(&source);
    }
}
