//! Mine CLI command

use super::util::{has_flag, parse_output_arg, parse_value_arg, write_output};
use carminer::*;
use std::path::Path;

pub const USAGE: &str = "Usage: carminer mine <data.arff> [-n N] [--class first|last|IDX] [--config file.yaml] [--seed S] [--json] [--output file]";

pub fn cmd_mine(args: &[String]) -> Result<()> {
    let data_path = match args.first() {
        Some(path) if !path.starts_with('-') => path,
        _ => return Err(USAGE.into()),
    };

    let config = build_config(args)?;
    let output = parse_output_arg(args);
    let json_output = has_flag(args, "--json");

    let dataset = read_arff(data_path)?;
    let result = PredictiveApriori::new(config).mine(&dataset)?;

    let content = if json_output {
        serde_json::to_string_pretty(&result)?
    } else {
        result.rules.to_report(&dataset)
    };
    write_output(&output, &content)
}

/// Config file (if any) overridden by command-line options
fn build_config(args: &[String]) -> Result<MinerConfig> {
    let mut config = match parse_value_arg(args, "--config", Some("-c")) {
        Some(path) => MinerConfig::load(Path::new(path))?,
        None => MinerConfig::default(),
    };

    if let Some(n) = parse_value_arg(args, "--num-rules", Some("-n")) {
        let n: usize = n
            .parse()
            .map_err(|_| Error::Config(format!("invalid rule count '{}'", n)))?;
        config = config.with_num_rules(n);
    }
    if let Some(class) = parse_value_arg(args, "--class", None) {
        config = config.with_class_index(class.parse()?);
    }
    if let Some(seed) = parse_value_arg(args, "--seed", None) {
        let seed: u64 = seed
            .parse()
            .map_err(|_| Error::Config(format!("invalid seed '{}'", seed)))?;
        config = config.with_seed(seed);
    }

    config.validate()?;
    Ok(config)
}
