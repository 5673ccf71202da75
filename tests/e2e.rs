//! End-to-end scenarios: source text through scanner and parser.

mod common;

use common::parse_ok;
use niftel::{Expression, LiteralValue, Statement, SyntaxErrorKind, TokenKind, parse, parse_str, scan};

#[test]
fn var_with_arithmetic() {
    let statements = parse_ok("var x = 1 + 2 * 3");
    assert_eq!(statements.len(), 1);
    let Statement::Var(stmt) = &statements[0] else {
        panic!("expected var");
    };
    assert_eq!(stmt.name.lexeme, "x");

    let Expression::Binary {
        left,
        operator,
        right,
    } = &stmt.value
    else {
        panic!("expected binary");
    };
    assert_eq!(operator.kind, TokenKind::Plus);
    assert_eq!(**left, Expression::Literal(LiteralValue::Number(1.0)));

    let Expression::Binary {
        left,
        operator,
        right,
    } = &**right
    else {
        panic!("expected nested binary");
    };
    assert_eq!(operator.kind, TokenKind::Star);
    assert_eq!(**left, Expression::Literal(LiteralValue::Number(2.0)));
    assert_eq!(**right, Expression::Literal(LiteralValue::Number(3.0)));
}

#[test]
fn if_else_if_else_chain() {
    let statements = parse_ok("if a { b } else if c { d } else { e }");
    assert_eq!(statements.len(), 1);
    let Statement::If(outer) = &statements[0] else {
        panic!("expected if");
    };
    assert!(matches!(&outer.condition, Expression::Variable { name } if name.lexeme == "a"));
    assert_eq!(outer.then_body.len(), 1);

    let else_body = outer.else_body.as_ref().expect("else body");
    assert_eq!(else_body.len(), 1);
    let Statement::If(inner) = &else_body[0] else {
        panic!("expected nested if");
    };
    assert!(matches!(&inner.condition, Expression::Variable { name } if name.lexeme == "c"));

    let last = inner.else_body.as_ref().expect("final else");
    assert_eq!(last.len(), 1);
    let Statement::Command(cmd) = &last[0] else {
        panic!("expected command");
    };
    assert_eq!(cmd.name.lexeme, "e");
    assert!(cmd.args.is_empty());
}

#[test]
fn for_loop_over_variable() {
    let statements = parse_ok("for x in items { use x }");
    let Statement::For(stmt) = &statements[0] else {
        panic!("expected for");
    };
    assert_eq!(stmt.iterator.lexeme, "x");
    assert!(matches!(&stmt.iterable, Expression::Variable { name } if name.lexeme == "items"));
    let [Statement::Command(cmd)] = &stmt.body[..] else {
        panic!("expected one command");
    };
    assert_eq!(cmd.name.lexeme, "use");
    assert!(matches!(&cmd.args[..], [Expression::Variable { name }] if name.lexeme == "x"));
}

#[test]
fn command_argument_boundary() {
    let statements = parse_ok("run a b var x = 1");
    assert_eq!(statements.len(), 2);
    let Statement::Command(cmd) = &statements[0] else {
        panic!("expected command");
    };
    assert_eq!(cmd.name.lexeme, "run");
    let names: Vec<_> = cmd
        .args
        .iter()
        .map(|arg| match arg {
            Expression::Variable { name } => name.lexeme.as_str(),
            other => panic!("expected variable, got {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let Statement::Var(var) = &statements[1] else {
        panic!("expected var");
    };
    assert_eq!(var.name.lexeme, "x");
}

#[test]
fn fail_fast_on_unterminated_expression() {
    let result = parse_str("if (");
    let err = result.expect_err("should fail");
    assert_eq!(err.kind, SyntaxErrorKind::ExpectedExpression { found: None });
    assert_eq!(err.line, 1);
}

#[test]
fn no_partial_ast_after_error() {
    let result = parse_str("var ok = 1\nrun ok\nfor x y { }");
    assert!(result.is_err());
}

#[test]
fn scan_and_parse_are_deterministic() {
    let source = "\
repo_name \"app\"
var base = \"main\"
for b in branches {
\tif b != base {
\t\trebase b base
\t} else {
\t\tskip
\t}
}
";
    let first_tokens = scan(source);
    let second_tokens = scan(source);
    assert_eq!(first_tokens, second_tokens);
    assert_eq!(
        parse(&first_tokens).expect("parse"),
        parse(&second_tokens).expect("parse")
    );
}

#[test]
fn realistic_script() {
    let source = "\
var remote = \"origin\"
var max = 3
fetch remote
for b in branches {
\tif b == \"main\" {
\t\tpull remote b
\t} else if count >= max {
\t\twarn \"too many\" count
\t} else {
\t\tpush remote b -1
\t}
}
";
    let statements = parse_ok(source);
    assert_eq!(statements.len(), 4);
    assert!(matches!(statements[0], Statement::Var(_)));
    assert!(matches!(statements[2], Statement::Command(_)));

    let Statement::For(stmt) = &statements[3] else {
        panic!("expected for");
    };
    let Statement::If(chain) = &stmt.body[0] else {
        panic!("expected if");
    };
    let Some([Statement::If(second)]) = chain.else_body.as_deref() else {
        panic!("expected else if");
    };
    let Some([Statement::Command(push)]) = second.else_body.as_deref() else {
        panic!("expected final else");
    };
    // `b -1` is a subtraction, not two arguments.
    assert_eq!(push.args.len(), 2);
}
