//! Miner configuration
//!
//! Handles loading and validating the YAML configuration for a mining run.
//! Every field has a default, so an empty file (or no file) is a valid config.
//!
//! ```yaml
//! num_rules: 10
//! class_index: last
//! safety_margin: 5
//! num_random_rules: 1000
//! num_intervals: 100
//! seed: 0
//! ```

use crate::error::{Error, Result};
use crate::prior::PriorOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which attribute is the class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ClassIndexRepr", into = "ClassIndexRepr")]
pub enum ClassIndex {
    First,
    #[default]
    Last,
    /// 0-based attribute index
    Index(usize),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ClassIndexRepr {
    Index(usize),
    Alias(String),
}

impl TryFrom<ClassIndexRepr> for ClassIndex {
    type Error = Error;

    fn try_from(repr: ClassIndexRepr) -> Result<Self> {
        match repr {
            ClassIndexRepr::Index(i) => Ok(ClassIndex::Index(i)),
            ClassIndexRepr::Alias(s) => s.parse(),
        }
    }
}

impl From<ClassIndex> for ClassIndexRepr {
    fn from(index: ClassIndex) -> Self {
        match index {
            ClassIndex::First => ClassIndexRepr::Alias("first".to_string()),
            ClassIndex::Last => ClassIndexRepr::Alias("last".to_string()),
            ClassIndex::Index(i) => ClassIndexRepr::Index(i),
        }
    }
}

impl ClassIndex {
    /// Resolve to a concrete attribute index
    pub fn resolve(self, num_attributes: usize) -> Result<usize> {
        if num_attributes == 0 {
            return Err(Error::InvalidClassIndex(
                "dataset has no attributes".to_string(),
            ));
        }
        match self {
            ClassIndex::First => Ok(0),
            ClassIndex::Last => Ok(num_attributes - 1),
            ClassIndex::Index(i) if i < num_attributes => Ok(i),
            ClassIndex::Index(i) => Err(Error::InvalidClassIndex(format!(
                "{} is out of range for {} attributes",
                i, num_attributes
            ))),
        }
    }
}

impl FromStr for ClassIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ClassIndex::First),
            "last" => Ok(ClassIndex::Last),
            _ => s.parse::<usize>().map(ClassIndex::Index).map_err(|_| {
                Error::InvalidClassIndex(format!(
                    "'{}' is neither 'first', 'last' nor a 0-based index",
                    s
                ))
            }),
        }
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassIndex::First => write!(f, "first"),
            ClassIndex::Last => write!(f, "last"),
            ClassIndex::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Configuration for one mining run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MinerConfig {
    /// Number of rules to return (absent = unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_rules: Option<usize>,

    /// Class attribute: "first", "last" or a 0-based index
    #[serde(default)]
    #[schemars(with = "String")]
    pub class_index: ClassIndex,

    /// Extra ranking slots kept during the search and trimmed from the result
    #[serde(default = "default_safety_margin")]
    pub safety_margin: usize,

    /// Random rules drawn per premise length for prior estimation
    #[serde(default = "default_num_random_rules")]
    pub num_random_rules: usize,

    /// Number of confidence bins in the prior
    #[serde(default = "default_num_intervals")]
    pub num_intervals: usize,

    /// Seed for the prior estimation sampler
    #[serde(default)]
    pub seed: u64,
}

fn default_safety_margin() -> usize {
    5
}

fn default_num_random_rules() -> usize {
    1000
}

fn default_num_intervals() -> usize {
    100
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            num_rules: None,
            class_index: ClassIndex::default(),
            safety_margin: default_safety_margin(),
            num_random_rules: default_num_random_rules(),
            num_intervals: default_num_intervals(),
            seed: 0,
        }
    }
}

impl MinerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: MinerConfig = serde_norway::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_num_rules(mut self, n: usize) -> Self {
        self.num_rules = Some(n);
        self
    }

    pub fn with_class_index(mut self, class_index: ClassIndex) -> Self {
        self.class_index = class_index;
        self
    }

    pub fn with_safety_margin(mut self, margin: usize) -> Self {
        self.safety_margin = margin;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.num_rules == Some(0) {
            return Err(Error::Config("num_rules must be at least 1".to_string()));
        }
        if self.num_intervals == 0 {
            return Err(Error::Config("num_intervals must be at least 1".to_string()));
        }
        if self.num_random_rules == 0 {
            return Err(Error::Config(
                "num_random_rules must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for prior estimation
    pub fn prior_options(&self) -> PriorOptions {
        PriorOptions {
            num_random_rules: self.num_random_rules,
            num_intervals: self.num_intervals,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_class_index_aliases() {
        assert_eq!("first".parse::<ClassIndex>().unwrap(), ClassIndex::First);
        assert_eq!("LAST".parse::<ClassIndex>().unwrap(), ClassIndex::Last);
        assert_eq!("2".parse::<ClassIndex>().unwrap(), ClassIndex::Index(2));
        assert!("middle".parse::<ClassIndex>().is_err());
        assert!("-1".parse::<ClassIndex>().is_err());
    }

    #[test]
    fn test_class_index_resolve() {
        assert_eq!(ClassIndex::First.resolve(4).unwrap(), 0);
        assert_eq!(ClassIndex::Last.resolve(4).unwrap(), 3);
        assert_eq!(ClassIndex::Index(1).resolve(4).unwrap(), 1);
        assert!(matches!(
            ClassIndex::Index(4).resolve(4),
            Err(Error::InvalidClassIndex(_))
        ));
        assert!(ClassIndex::Last.resolve(0).is_err());
    }

    #[test]
    fn test_defaults_from_empty_yaml() {
        assert_eq!(MinerConfig::from_yaml("").unwrap(), MinerConfig::default());
        let config = MinerConfig::from_yaml("num_rules: 3").unwrap();
        assert_eq!(config.num_rules, Some(3));
        assert_eq!(config.safety_margin, 5);
        assert_eq!(config.class_index, ClassIndex::Last);
    }

    #[test]
    fn test_yaml_class_index_forms() {
        let config = MinerConfig::from_yaml("class_index: first").unwrap();
        assert_eq!(config.class_index, ClassIndex::First);
        let config = MinerConfig::from_yaml("class_index: 1").unwrap();
        assert_eq!(config.class_index, ClassIndex::Index(1));
        assert!(MinerConfig::from_yaml("class_index: middle").is_err());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        assert!(MinerConfig::from_yaml("num_rules: 0").is_err());
        assert!(MinerConfig::from_yaml("num_intervals: 0").is_err());
        assert!(MinerConfig::from_yaml("num_random_rules: 0").is_err());
        assert!(MinerConfig::from_yaml("unknown_key: 1").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("miner.yaml");
        fs::write(&path, "num_rules: 7\nclass_index: 0\nseed: 42\n").unwrap();

        let config = MinerConfig::load(&path).unwrap();
        assert_eq!(
            config,
            MinerConfig::default()
                .with_num_rules(7)
                .with_class_index(ClassIndex::Index(0))
                .with_seed(42)
        );
    }

    #[test]
    fn test_yaml_roundtrip_keeps_aliases() {
        let config = MinerConfig::default().with_class_index(ClassIndex::First);
        let yaml = serde_norway::to_string(&config).unwrap();
        assert!(yaml.contains("class_index: first"));
    }
}
