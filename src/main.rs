//! carminer CLI - Command-line interface
//!
//! Commands:
//!   mine     - Mine the best class rules of an ARFF dataset
//!   schema   - Print JSON schema for config or output
//!   version  - Print version

mod cli;

use carminer::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    cli::util::init_logging(args.iter().any(|a| a == "--verbose" || a == "-v"));

    let result = match args[1].as_str() {
        "mine" => cli::cmd_mine(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("carminer {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
carminer - Predictive class association rule mining

USAGE:
    carminer <COMMAND> [OPTIONS]

COMMANDS:
    mine <data.arff>                 Mine the best class rules
    schema [config|rules]            Print JSON schema for config or output
    version                          Print version
    help                             Print this message

OPTIONS:
    -n, --num-rules <N>              Number of rules to return (default: all)
    --class <first|last|IDX>         Class attribute (default: last)
    -c, --config <file.yaml>         Load settings from a YAML file
    --seed <S>                       Seed for prior estimation (default: 0)
    -o, --output <file>              Output file (default: stdout)
    --json                           JSON output format
    -v, --verbose                    Debug logging on stderr (RUST_LOG overrides)

EXAMPLES:
    carminer mine weather.arff -n 10
    carminer mine vote.arff --class first --json > rules.json
    carminer mine data.arff --config miner.yaml --verbose
"#
    );
}
