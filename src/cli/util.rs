//! CLI utility helpers

use carminer::{Error, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Value following `--name` or its short form
pub fn parse_value_arg<'a>(args: &'a [String], long: &str, short: Option<&str>) -> Option<&'a str> {
    for (i, arg) in args.iter().enumerate() {
        if arg == long || Some(arg.as_str()) == short {
            if let Some(value) = args.get(i + 1) {
                return Some(value.as_str());
            }
        }
    }
    None
}

/// Parse --output argument to determine output file path
pub fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    parse_value_arg(args, "--output", Some("-o")).map(PathBuf::from)
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "carminer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
