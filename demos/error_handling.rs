//! Demonstrate scanner and parser errors for invalid input.

use niftel::SyntaxErrorKind;

fn main() {
    // Scanner errors stay in the token stream.
    let tokens = niftel::scan("push \"unclosed\n");
    for e in niftel::lex_errors(&tokens) {
        println!("Lex error: {e}");
        println!("  Kind: {:?}", e.kind);
    }

    println!();

    // The parser stops at the first error.
    for source in ["for b branches { push b }", "if a { push a", "var = 1", "run @"] {
        match niftel::parse_str(source) {
            Ok(_) => println!("Parsed OK (unexpected)"),
            Err(e) => {
                println!("Syntax error: {e}");
                if let SyntaxErrorKind::Lex(kind) = &e.kind {
                    println!("  Caused by scanner: {kind}");
                }
            }
        }
    }
}
