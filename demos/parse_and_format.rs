//! Parse a niftel script and re-format it.

use niftel::Statement;

fn main() {
    let input = "\
var remote   = \"origin\"
fetch remote
for b in branches { if b != \"main\" { rebase b \"main\" } else { pull remote b } }
";

    let statements = niftel::parse_str(input).expect("parse failed");

    println!("Statements: {}", statements.len());
    for stmt in &statements {
        let kind = match stmt {
            Statement::Var(var) => format!("var {}", var.name.lexeme),
            Statement::If(_) => "if".to_string(),
            Statement::For(stmt) => format!("for {}", stmt.iterator.lexeme),
            Statement::Command(cmd) => {
                format!("command {} ({} args)", cmd.name.lexeme, cmd.args.len())
            }
        };
        println!("  line {}: {kind}", stmt.line().unwrap_or_default());
    }

    let output = niftel::format(&statements);
    println!("\nFormatted output:\n{output}");
}
