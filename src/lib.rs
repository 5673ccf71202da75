//! Scanner, parser and formatter for niftel scripts.
//!
//! niftel is a small scripting language for driving repository and
//! branch commands, with variables, `if`/`else` and `for` loops.
//! This crate turns source text into a typed AST, or reports the
//! first syntax error with its line.
//!
//! # Quick start
//!
//! ## Scan and parse
//!
//! ```
//! use niftel::{Statement, parse, scan};
//!
//! let tokens = scan("for b in branches {\n\tpush b\n}\n");
//! let statements = parse(&tokens).unwrap();
//! assert!(matches!(statements[0], Statement::For(_)));
//! ```
//!
//! ## Build and format
//!
//! ```
//! use niftel::{CommandStmt, Expression, Statement, VarStmt, format};
//!
//! let program: Vec<Statement> = vec![
//!     VarStmt::new("target", Expression::text("main")).into(),
//!     CommandStmt::new("checkout").var_arg("target").into(),
//! ];
//!
//! assert_eq!(format(&program), "var target = \"main\"\ncheckout target\n");
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod formatter;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{CommandStmt, Expression, ForStmt, IfStmt, Statement, VarStmt};
pub use formatter::{format, format_expression};
pub use parser::{ParseOptions, SyntaxError, SyntaxErrorKind, parse, parse_with};
pub use scanner::{LexError, LexErrorKind, lex_errors, scan};
pub use token::{LiteralValue, Token, TokenKind};

/// Scan and parse a source string in one step.
///
/// Scanner errors surface as [`SyntaxErrorKind::Lex`] at the point
/// the parser reaches them.
pub fn parse_str(source: &str) -> Result<Vec<Statement>, SyntaxError> {
    parse(&scan(source))
}
