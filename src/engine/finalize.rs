//! Final rule list

use super::best::BestRuleSet;
use crate::dataset::Dataset;
use crate::lattice::Itemset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mined rules as three index-aligned sequences, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MinedRules {
    pub premises: Vec<Itemset>,
    pub consequences: Vec<Itemset>,
    pub accuracies: Vec<f64>,
}

/// Borrowed view of one mined rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinedRule<'a> {
    pub premise: &'a Itemset,
    pub consequence: &'a Itemset,
    pub accuracy: f64,
}

/// Drain `best` from best to worst, keeping at most `limit` rules
/// (defaults to the set's target)
pub fn finalize(mut best: BestRuleSet, limit: Option<usize>) -> MinedRules {
    let limit = limit.or(best.target()).unwrap_or(usize::MAX);
    let mut rules = MinedRules::default();

    while rules.len() < limit {
        let Some(rule) = best.pop_best() else {
            break;
        };
        let accuracy = rule.accuracy();
        rules.premises.push(rule.premise().clone());
        rules.consequences.push(rule.consequence().clone());
        rules.accuracies.push(accuracy);
    }
    rules
}

impl MinedRules {
    pub fn len(&self) -> usize {
        self.accuracies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accuracies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<MinedRule<'_>> {
        Some(MinedRule {
            premise: self.premises.get(index)?,
            consequence: self.consequences.get(index)?,
            accuracy: *self.accuracies.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = MinedRule<'_>> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Human-readable rule listing
    pub fn to_report(&self, dataset: &Dataset) -> String {
        if self.is_empty() {
            return "No rules found.\n".to_string();
        }

        let mut out = String::from("Best rules found:\n\n");
        let width = self.len().to_string().len();
        for (i, rule) in self.iter().enumerate() {
            out.push_str(&format!(
                "{:>width$}. {} {} ==> {} {}    acc:({:.5})\n",
                i + 1,
                rule.premise.display(dataset),
                rule.premise.support(),
                rule.consequence.display(dataset),
                rule.consequence.support(),
                rule.accuracy,
                width = width,
            ));
        }
        out
    }
}
