// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # carminer: predictive class association rule mining
//!
//! Finds the N class association rules with the highest *expected predictive
//! accuracy* in a categorical dataset, without a user-chosen support or
//! confidence threshold.
//!
//! ## Core Concept
//!
//! A rule `premise ==> class=value` is scored by the Bayesian expectation of
//! its true accuracy, given how often the premise occurs and how often the
//! rule holds. The prior over accuracies is estimated from the dataset itself
//! by sampling random rules. Rare premises get pulled toward the prior, so a
//! rule seen once at 100% ranks below one seen fifty times at 95%.
//!
//! The search walks the itemset lattice level by level. Once N rules are held,
//! the worst of them sets a bound, and the minimum premise support rises until
//! a rule that held on every matching record could still beat it. Everything
//! below that floor is pruned.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carminer::{read_arff, MinerConfig, PredictiveApriori};
//!
//! let data = read_arff("weather.arff")?;
//! let config = MinerConfig::default().with_num_rules(10);
//! let result = PredictiveApriori::new(config).mine(&data)?;
//!
//! print!("{}", result.rules.to_report(&data));
//! for rule in result.rules.iter() {
//!     println!("{} => {}", rule.premise.display(&data), rule.accuracy);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  ARFF / Dataset ──► ensure_categorical, resolve class       │
//! │       │                                                     │
//! │       ├──► BayesianPrior::estimate ──► PriorModel           │
//! │       │                                                     │
//! │       └──► SearchController                                 │
//! │               │  AprioriLattice (ItemsetLattice)            │
//! │               │  RuleExpander ──► BestRuleSet               │
//! │               └──► finalize ──► MinedRules                  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod miner;
pub mod prior;

pub use config::{ClassIndex, MinerConfig};
pub use dataset::{parse_arff, read_arff, Attribute, AttributeKind, Dataset, Record};
pub use engine::{
    finalize, BestRuleSet, LevelReport, MinedRule, MinedRules, RuleExpander, RuleItem,
    SearchContext, SearchController, SearchOutcome, Termination,
};
pub use error::{Error, Result};
pub use lattice::{AprioriLattice, Itemset, ItemsetIndex, ItemsetLattice};
pub use miner::{mine, MiningResult, PredictiveApriori};
pub use prior::{BayesianPrior, PriorModel, PriorOptions};

/// Version of carminer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
