//! Brace CLI
//!
//! Inspect how the reduced model sees a C-family source file.

use std::path::Path;

use brace_doc::commands::{
    classify, indent, match_brace, parse_indent_options, read_source, state, CommandError,
};

fn main() {
    brace_doc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let mut stdout = std::io::stdout().lock();

    let result = match command.as_str() {
        "classify" => {
            if args.len() < 3 {
                eprintln!("Usage: brace classify <file>");
                std::process::exit(1);
            }
            read_source(Path::new(&args[2]))
                .and_then(|text| classify(&text, &mut stdout))
        }
        "indent" => {
            if args.len() < 3 {
                eprintln!("Usage: brace indent <file> [--indent=N]");
                std::process::exit(1);
            }
            parse_indent_options(&args[3..]).and_then(|config| {
                let text = read_source(Path::new(&args[2]))?;
                indent(&text, config, &mut stdout)
            })
        }
        "match" => {
            if args.len() < 4 {
                eprintln!("Usage: brace match <file> <offset>");
                std::process::exit(1);
            }
            read_source(Path::new(&args[2]))
                .and_then(|text| match_brace(&text, &args[3], &mut stdout))
        }
        "state" => {
            if args.len() < 4 {
                eprintln!("Usage: brace state <file> <offset>");
                std::process::exit(1);
            }
            read_source(Path::new(&args[2]))
                .and_then(|text| state(&text, &args[3], &mut stdout))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("brace {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        if matches!(err, CommandError::Usage(_)) {
            eprintln!();
            print_usage();
        }
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Brace: reduced-model lexical analysis for C-family sources");
    println!();
    println!("Usage: brace <command> [options]");
    println!();
    println!("Commands:");
    println!("  classify <file>           Dump the classified span sequence");
    println!("  indent <file>             Print the file re-indented");
    println!("  match <file> <offset>     Bracket match for a caret at <offset>");
    println!("  state <file> <offset>     Lexical state and shadowing at <offset>");
    println!("  help                      Show this help message");
    println!("  version                   Show version information");
    println!();
    println!("Indent options:");
    println!("  --indent=<n>              Spaces per indent level (default: 2)");
    println!();
    println!("Set RUST_LOG to enable logging, BRACE_LOG_TREE for indented output.");
}
