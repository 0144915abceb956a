//! bexpr CLI
//!
//! Parse and evaluate `b-` attribute expressions from the command line.

use bexprc::commands::{attr_command, eval_command, parse_command, parse_let, LetBinding};
use bexprc::{init_tracing, CliError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "parse" => {
            let Some(source) = args.get(2) else {
                usage_error("Usage: bexpr parse <expr>");
            };
            parse_command(source)
        }
        "eval" => {
            let Some(source) = args.get(2) else {
                usage_error("Usage: bexpr eval <expr> [--let name=<expr>]...");
            };
            collect_lets(&args[3..]).and_then(|lets| eval_command(source, &lets))
        }
        "attr" => {
            let (Some(name), Some(value)) = (args.get(2), args.get(3)) else {
                usage_error("Usage: bexpr attr <name> <value> [--let name=<expr>]...");
            };
            collect_lets(&args[4..]).and_then(|lets| attr_command(name, value, &lets))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Accepts both `--let name=expr` and `--let=name=expr`.
fn collect_lets(rest: &[String]) -> Result<Vec<LetBinding>, CliError> {
    let mut lets = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        if let Some(binding) = arg.strip_prefix("--let=") {
            lets.push(parse_let(binding)?);
            i += 1;
        } else if arg == "--let" && i + 1 < rest.len() {
            lets.push(parse_let(&rest[i + 1])?);
            i += 2;
        } else {
            return Err(CliError::Usage(format!("unexpected argument `{arg}`")));
        }
    }
    Ok(lets)
}

fn usage_error(usage: &str) -> ! {
    eprintln!("{usage}");
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("bexpr - evaluate b- attribute expressions");
    eprintln!();
    eprintln!("Usage: bexpr <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  parse <expr>                   Print the parsed node tree");
    eprintln!("  eval <expr> [--let n=<expr>]   Evaluate against the standard functions");
    eprintln!("  attr <name> <value> [--let ..] Read and evaluate an instrumented attribute");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=bexpr_eval=trace) for debug output.");
}
