//! Bounded, subsumption-aware collection of the best rules found so far
//!
//! Rules are ordered by [`RankKey`]. The set keeps up to `target + margin`
//! rules: the margin absorbs entries that a later, more general rule evicts
//! through subsumption, so the top `target` survive that churn.

use super::rule::{RankKey, RuleItem};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::trace;

type Items = Vec<Option<usize>>;

/// Ordered top-N rule collection
#[derive(Debug, Clone)]
pub struct BestRuleSet {
    rules: BTreeMap<RankKey, RuleItem>,
    /// Consequence items -> ranks of retained rules with that consequence
    by_consequence: HashMap<Items, BTreeSet<RankKey>>,
    pairs: HashSet<(Items, Items)>,
    target: Option<usize>,
    margin: usize,
    bound: f64,
    changed: bool,
}

impl BestRuleSet {
    /// Collection for `target` rules (`None` = unbounded) with `margin` spare slots
    pub fn new(target: Option<usize>, margin: usize) -> Self {
        BestRuleSet {
            rules: BTreeMap::new(),
            by_consequence: HashMap::new(),
            pairs: HashSet::new(),
            target,
            margin,
            bound: 0.0,
            changed: false,
        }
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Working capacity, `target + margin`
    pub fn capacity(&self) -> Option<usize> {
        self.target.map(|n| n.saturating_add(self.margin))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Worst accuracy a rule may have and still matter
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Whether the last operation moved [`bound`](Self::bound)
    pub fn was_changed(&self) -> bool {
        self.changed
    }

    pub fn peek_best(&self) -> Option<&RuleItem> {
        self.rules.values().next()
    }

    pub fn peek_worst(&self) -> Option<&RuleItem> {
        self.rules.values().next_back()
    }

    /// Rules from best to worst
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RuleItem> {
        self.rules.values()
    }

    /// Rules from worst to best
    pub fn iter_worst_first(&self) -> impl Iterator<Item = &RuleItem> {
        self.rules.values().rev()
    }

    /// Offer a candidate; returns whether it was admitted
    pub fn try_insert(&mut self, candidate: RuleItem) -> bool {
        self.changed = false;

        let cons = candidate.consequence().items().to_vec();
        let pair = (candidate.premise().items().to_vec(), cons.clone());
        if self.pairs.contains(&pair) {
            return false;
        }

        let mut subsumed = Vec::new();
        if let Some(keys) = self.by_consequence.get(&cons) {
            for key in keys {
                let Some(existing) = self.rules.get(key) else {
                    continue;
                };
                if existing.subsumes(&candidate) {
                    trace!(sequence = candidate.sequence(), "candidate subsumed");
                    return false;
                }
                if candidate.subsumes(existing) {
                    subsumed.push(*key);
                }
            }
        }

        let key = candidate.rank_key();
        if subsumed.is_empty() && self.is_full() {
            match self.rules.keys().next_back() {
                Some(worst) if key > *worst => return false,
                _ => {}
            }
        }

        for old in subsumed {
            trace!("evicting subsumed rule");
            self.remove(&old);
        }

        self.pairs.insert(pair);
        self.by_consequence.entry(cons).or_default().insert(key);
        self.rules.insert(key, candidate);

        if let Some(capacity) = self.capacity() {
            while self.rules.len() > capacity {
                match self.rules.keys().next_back().copied() {
                    Some(worst) => {
                        self.remove(&worst);
                    }
                    None => break,
                }
            }
        }

        self.refresh_bound();
        true
    }

    /// Remove and return the best rule
    pub fn pop_best(&mut self) -> Option<RuleItem> {
        let key = *self.rules.keys().next()?;
        let rule = self.remove(&key);
        self.refresh_bound();
        rule
    }

    fn is_full(&self) -> bool {
        self.capacity().is_some_and(|c| self.rules.len() >= c)
    }

    fn remove(&mut self, key: &RankKey) -> Option<RuleItem> {
        let rule = self.rules.remove(key)?;
        let cons = rule.consequence().items().to_vec();
        if let Some(keys) = self.by_consequence.get_mut(&cons) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_consequence.remove(&cons);
            }
        }
        self.pairs
            .remove(&(rule.premise().items().to_vec(), cons));
        Some(rule)
    }

    fn refresh_bound(&mut self) {
        let bound = match (self.target, self.peek_worst()) {
            (Some(n), Some(worst)) if self.rules.len() >= n => worst.accuracy(),
            _ => 0.0,
        };
        self.changed = bound.to_bits() != self.bound.to_bits();
        self.bound = bound;
    }
}
