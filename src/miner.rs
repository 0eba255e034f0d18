//! Mining entry point
//!
//! Wires the dataset checks, prior estimation, lattice and search together.
//!
//! ```rust,ignore
//! use carminer::{parse_arff, MinerConfig, PredictiveApriori};
//!
//! let data = parse_arff(&std::fs::read_to_string("weather.arff")?)?;
//! let result = PredictiveApriori::new(MinerConfig::default().with_num_rules(10)).mine(&data)?;
//! print!("{}", result.rules.to_report(&data));
//! ```

use crate::config::MinerConfig;
use crate::dataset::Dataset;
use crate::engine::{finalize, BestRuleSet, LevelReport, MinedRules, SearchController, Termination};
use crate::error::{Error, Result};
use crate::lattice::AprioriLattice;
use crate::prior::BayesianPrior;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of a mining run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MiningResult {
    /// Rules, best first
    pub rules: MinedRules,
    /// Resolved class attribute
    pub class_index: usize,
    pub levels: Vec<LevelReport>,
    pub termination: Termination,
    /// Support floor when the search stopped
    pub premise_count: usize,
}

/// Predictive Apriori class rule miner
#[derive(Debug, Clone, Default)]
pub struct PredictiveApriori {
    config: MinerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl PredictiveApriori {
    pub fn new(config: MinerConfig) -> Self {
        PredictiveApriori {
            config,
            cancel: None,
        }
    }

    /// Stop between search levels once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine the best class rules of `dataset`
    #[instrument(skip_all, fields(relation = dataset.relation(), num_rules = ?self.config.num_rules))]
    pub fn mine(&self, dataset: &Dataset) -> Result<MiningResult> {
        self.config.validate()?;

        if dataset.num_attributes() == 0 {
            return Err(Error::EmptyDataset("dataset has no attributes".to_string()));
        }
        dataset.ensure_categorical()?;
        let class_index = self.config.class_index.resolve(dataset.num_attributes())?;
        if dataset.num_attributes() < 2 {
            return Err(Error::EmptyDataset(
                "at least two attributes are needed to form a rule".to_string(),
            ));
        }
        if dataset.num_records() == 0 {
            return Err(Error::EmptyDataset("dataset has no records".to_string()));
        }

        let prior = BayesianPrior::estimate(dataset, class_index, &self.config.prior_options())?;
        debug!(intervals = prior.num_intervals(), "prior estimated");

        let lattice = AprioriLattice::new(class_index);
        let mut controller = SearchController::new(&lattice, &prior, dataset, class_index);
        if let Some(flag) = &self.cancel {
            controller = controller.with_cancel(Arc::clone(flag));
        }

        let best = BestRuleSet::new(self.config.num_rules, self.config.safety_margin);
        let outcome = controller.run(best)?;

        Ok(MiningResult {
            rules: finalize(outcome.best, self.config.num_rules),
            class_index,
            levels: outcome.levels,
            termination: outcome.termination,
            premise_count: outcome.context.premise_count,
        })
    }
}

/// Mine `dataset` with `config`
pub fn mine(dataset: &Dataset, config: &MinerConfig) -> Result<MiningResult> {
    PredictiveApriori::new(config.clone()).mine(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassIndex;
    use crate::dataset::Attribute;

    fn weather() -> Dataset {
        let mut data = Dataset::new(
            "weather",
            vec![
                Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]),
                Attribute::nominal("windy", ["false", "true"]),
                Attribute::nominal("play", ["yes", "no"]),
            ],
        );
        let rows = [
            ["sunny", "false", "no"],
            ["sunny", "true", "no"],
            ["overcast", "false", "yes"],
            ["rainy", "false", "yes"],
            ["rainy", "true", "no"],
            ["overcast", "true", "yes"],
            ["sunny", "false", "no"],
            ["rainy", "false", "yes"],
            ["overcast", "false", "yes"],
        ];
        for row in rows {
            data.push_labels(&row).unwrap();
        }
        data
    }

    #[test]
    fn test_mine_returns_ranked_rules() {
        let data = weather();
        let result = mine(&data, &MinerConfig::default().with_num_rules(3)).unwrap();
        assert_eq!(result.class_index, 2);
        assert!(result.rules.len() <= 3);
        assert!(!result.rules.is_empty());
        assert!(result
            .rules
            .accuracies
            .windows(2)
            .all(|w| w[0] >= w[1]));
        for rule in result.rules.iter() {
            assert!(rule.consequence.item(2).is_some());
            assert!(rule.premise.item(2).is_none());
        }
    }

    #[test]
    fn test_mine_rejects_single_attribute() {
        let mut data = Dataset::new("one", vec![Attribute::nominal("c", ["a", "b"])]);
        data.push_labels(&["a"]).unwrap();
        assert!(matches!(
            mine(&data, &MinerConfig::default()),
            Err(Error::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_mine_rejects_empty_records() {
        let data = Dataset::new(
            "none",
            vec![
                Attribute::nominal("a", ["x"]),
                Attribute::nominal("c", ["y"]),
            ],
        );
        assert!(matches!(
            mine(&data, &MinerConfig::default()),
            Err(Error::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_mine_invalid_class_index() {
        let config = MinerConfig::default().with_class_index(ClassIndex::Index(7));
        assert!(matches!(
            mine(&weather(), &config),
            Err(Error::InvalidClassIndex(_))
        ));
    }

    #[test]
    fn test_mine_cancelled() {
        let miner = PredictiveApriori::new(MinerConfig::default())
            .with_cancel(Arc::new(AtomicBool::new(true)));
        assert!(matches!(miner.mine(&weather()), Err(Error::Cancelled)));
    }
}
