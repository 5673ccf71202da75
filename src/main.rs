//! CLI tool to inspect, validate and format niftel scripts.

use std::fs;
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("Usage: niftel <command> [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  parse     Print the statements parsed from each file");
    eprintln!("  tokens    Print the token stream of each file");
    eprintln!("  validate  Check that each file parses");
    eprintln!("  fmt       Format each file and print to stdout");
    eprintln!("  check     Check that each file is formatted");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  niftel parse deploy.nif");
    eprintln!("  niftel fmt deploy.nif");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    if !matches!(command, "parse" | "tokens" | "validate" | "fmt" | "check") {
        eprintln!("Unknown command: {command}");
        return usage();
    }

    let files = &args[2..];
    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let ok = match command {
            "tokens" => print_tokens(path, &content),
            "parse" => run_parsed(path, &content, |statements| {
                println!("Parsed {} statements:", statements.len());
                for stmt in statements {
                    println!("{stmt:#?}");
                }
                true
            }),
            "validate" => run_parsed(path, &content, |statements| {
                eprintln!("{path}: valid ({} statement(s))", statements.len());
                true
            }),
            "fmt" => run_parsed(path, &content, |statements| {
                print!("{}", niftel::format(statements));
                true
            }),
            _ => run_parsed(path, &content, |statements| {
                if niftel::format(statements) == content {
                    eprintln!("{path}: formatted");
                    true
                } else {
                    eprintln!("{path}: not formatted");
                    false
                }
            }),
        };

        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_parsed(
    path: &str,
    content: &str,
    on_success: impl FnOnce(&[niftel::Statement]) -> bool,
) -> bool {
    match niftel::parse_str(content) {
        Ok(statements) => on_success(&statements),
        Err(e) => {
            eprintln!("{path}: {e}");
            false
        }
    }
}

fn print_tokens(path: &str, content: &str) -> bool {
    let tokens = niftel::scan(content);
    for token in &tokens {
        println!("{token}");
    }

    let errors = niftel::lex_errors(&tokens);
    for e in &errors {
        eprintln!("{path}: {e}");
    }
    errors.is_empty()
}
