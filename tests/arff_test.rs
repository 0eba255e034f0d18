//! File-based tests: ARFF datasets and YAML configs loaded from disk

use carminer::{read_arff, Error, MinerConfig, PredictiveApriori};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const WEATHER: &str = r#"% nominal weather data
@relation weather.symbolic

@attribute outlook {sunny, overcast, rainy}
@attribute temperature {hot, mild, cool}
@attribute humidity {high, normal}
@attribute windy {TRUE, FALSE}
@attribute play {yes, no}

@data
sunny,hot,high,FALSE,no
sunny,hot,high,TRUE,no
overcast,hot,high,FALSE,yes
rainy,mild,high,FALSE,yes
rainy,cool,normal,FALSE,yes
rainy,cool,normal,TRUE,no
overcast,cool,normal,TRUE,yes
sunny,mild,high,FALSE,no
sunny,cool,normal,FALSE,yes
rainy,mild,normal,FALSE,yes
sunny,mild,normal,TRUE,yes
overcast,mild,high,TRUE,yes
overcast,hot,normal,FALSE,yes
rainy,mild,high,TRUE,no
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_mine_weather_file() {
    let dir = TempDir::new().unwrap();
    let data = read_arff(write(&dir, "weather.arff", WEATHER)).unwrap();
    assert_eq!(data.relation(), "weather.symbolic");
    assert_eq!(data.num_attributes(), 5);
    assert_eq!(data.num_records(), 14);

    let config = MinerConfig::default().with_num_rules(5);
    let result = PredictiveApriori::new(config).mine(&data).unwrap();
    assert_eq!(result.rules.len(), 5);
    assert_eq!(result.class_index, 4);

    // outlook=overcast ==> play=yes holds on all four overcast days
    let overcast = result
        .rules
        .iter()
        .find(|r| r.premise.display(&data) == "outlook=overcast")
        .unwrap();
    assert_eq!(overcast.consequence.display(&data), "play=yes");
    assert_eq!(overcast.premise.support(), 4);
    assert_eq!(overcast.consequence.support(), 4);

    let report = result.rules.to_report(&data);
    assert!(report.starts_with("Best rules found:\n\n1. "));
    assert_eq!(report.lines().filter(|l| l.contains("==>")).count(), 5);
}

#[test]
fn test_config_file_drives_mining() {
    let dir = TempDir::new().unwrap();
    let data = read_arff(write(&dir, "weather.arff", WEATHER)).unwrap();
    let config_path = write(
        &dir,
        "miner.yaml",
        "num_rules: 2\nclass_index: first\nseed: 3\nnum_random_rules: 300\n",
    );

    let config = MinerConfig::load(&config_path).unwrap();
    assert_eq!(config.num_rules, Some(2));
    assert_eq!(config.num_random_rules, 300);

    let result = PredictiveApriori::new(config).mine(&data).unwrap();
    assert_eq!(result.class_index, 0);
    assert!(result.rules.len() <= 2);
    for rule in result.rules.iter() {
        assert!(rule.consequence.display(&data).starts_with("outlook="));
    }
}

#[test]
fn test_numeric_column_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "mixed.arff",
        "@relation mixed\n@attribute temp numeric\n@attribute play {yes,no}\n@data\n85,no\n?,yes\n",
    );
    let data = read_arff(path).unwrap();
    let err = PredictiveApriori::new(MinerConfig::default())
        .mine(&data)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedAttribute { .. }));
    assert_eq!(
        err.to_string(),
        "Unsupported attribute 'temp': numeric attributes cannot be mined"
    );
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bad.arff",
        "@relation bad\n@attribute a {x,y}\n@attribute c {p,q}\n@data\nx,p\nz,q\n",
    );
    match read_arff(path) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 6),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        read_arff(dir.path().join("absent.arff")),
        Err(Error::Io(_))
    ));
}
