//! # Search-and-ranking engine
//!
//! The adaptive search that turns itemsets into a ranked list of class rules.
//!
//! ## Overview
//!
//! - [`BestRuleSet`]: ordered, bounded, subsumption-aware rule collection
//! - [`RuleExpander`]: itemset → scored candidate rule
//! - [`SearchController`]: level loop with the adaptive support floor
//! - [`finalize`]: drains the best set into [`MinedRules`]
//!
//! The controller borrows its lattice and prior model through the
//! [`ItemsetLattice`](crate::lattice::ItemsetLattice) and
//! [`PriorModel`](crate::prior::PriorModel) traits, and keeps all search state
//! in an explicit [`SearchContext`], so independent runs never share state.

pub mod best;
pub mod controller;
pub mod expand;
pub mod finalize;
pub mod rule;

pub use best::BestRuleSet;
pub use controller::{
    LevelExpansion, LevelReport, SearchContext, SearchController, SearchOutcome, Termination,
};
pub use expand::RuleExpander;
pub use finalize::{finalize, MinedRule, MinedRules};
pub use rule::RuleItem;
