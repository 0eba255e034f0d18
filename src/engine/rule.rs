//! Candidate rules and their ranking order

use crate::lattice::Itemset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A class association rule with its expected accuracy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleItem {
    premise: Itemset,
    consequence: Itemset,
    accuracy: f64,
    /// Generation sequence, breaks accuracy ties (earlier ranks higher)
    sequence: u64,
}

impl RuleItem {
    /// Build a rule from a premise (counted with its own support) and a
    /// single-item consequence (counted with the rule support)
    pub fn new(premise: Itemset, consequence: Itemset, accuracy: f64, sequence: u64) -> Self {
        RuleItem {
            premise,
            consequence,
            accuracy,
            sequence,
        }
    }

    pub fn premise(&self) -> &Itemset {
        &self.premise
    }

    pub fn consequence(&self) -> &Itemset {
        &self.consequence
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Records matching the premise
    pub fn premise_support(&self) -> usize {
        self.premise.support()
    }

    /// Records matching premise and consequence
    pub fn support(&self) -> usize {
        self.consequence.support()
    }

    pub(crate) fn rank_key(&self) -> RankKey {
        RankKey {
            accuracy: self.accuracy,
            sequence: self.sequence,
        }
    }

    /// `self` makes `other` redundant: same consequence, a premise that is a
    /// subset of `other`'s, and at least the same accuracy
    pub fn subsumes(&self, other: &RuleItem) -> bool {
        self.accuracy >= other.accuracy
            && self.consequence.items() == other.consequence.items()
            && self.premise.is_subset_of(&other.premise)
    }
}

/// Ranking position: accuracy descending, then sequence ascending
#[derive(Debug, Clone, Copy)]
pub(crate) struct RankKey {
    accuracy: f64,
    sequence: u64,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .accuracy
            .total_cmp(&self.accuracy)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}
