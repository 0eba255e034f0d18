//! Apriori-style lattice over categorical records
//!
//! Every itemset pairs a premise over the non-class attributes with one class
//! value. Two level-`(k-1)` itemsets merge when they agree on the class value
//! and on their first `k-2` premise items (in attribute order) and differ in
//! the attribute of their last premise item.

use super::{Itemset, ItemsetIndex, ItemsetLattice};
use crate::dataset::Dataset;

/// Lattice for class association rules with a fixed class attribute
#[derive(Debug, Clone, Copy)]
pub struct AprioriLattice {
    class_index: usize,
}

impl AprioriLattice {
    pub fn new(class_index: usize) -> Self {
        AprioriLattice { class_index }
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    fn premise_items(&self, set: &Itemset) -> Vec<(usize, usize)> {
        set.assigned(Some(self.class_index)).collect()
    }
}

impl ItemsetLattice for AprioriLattice {
    fn singletons(&self, dataset: &Dataset) -> Vec<Itemset> {
        let num_attributes = dataset.num_attributes();
        let class_values = dataset
            .attribute(self.class_index)
            .map(|a| a.num_values())
            .unwrap_or(0);

        let mut singletons = Vec::new();
        for (attr, attribute) in dataset.attributes().iter().enumerate() {
            if attr == self.class_index {
                continue;
            }
            for value in 0..attribute.num_values() {
                for class_value in 0..class_values {
                    let mut items = vec![None; num_attributes];
                    items[attr] = Some(value);
                    items[self.class_index] = Some(class_value);
                    singletons.push(Itemset::new(items));
                }
            }
        }
        singletons
    }

    fn count(&self, itemsets: &mut [Itemset], dataset: &Dataset) {
        let mut counts = vec![(0usize, 0usize); itemsets.len()];

        for record in dataset.records() {
            let class_value = record.get(self.class_index).copied().flatten();
            for (set, (support, premise)) in itemsets.iter().zip(counts.iter_mut()) {
                if !set.matches(record, Some(self.class_index)) {
                    continue;
                }
                *premise += 1;
                match set.item(self.class_index) {
                    None => *support += 1,
                    Some(c) if class_value == Some(c) => *support += 1,
                    Some(_) => {}
                }
            }
        }

        for (set, (support, premise)) in itemsets.iter_mut().zip(counts) {
            set.set_counts(support, premise);
        }
    }

    fn filter_by_support(&self, itemsets: Vec<Itemset>, min_support: usize) -> Vec<Itemset> {
        itemsets
            .into_iter()
            .filter(|s| s.support() >= min_support && s.support() > 0)
            .collect()
    }

    fn merge_level(&self, previous: &[Itemset], k: usize) -> Vec<Itemset> {
        if k < 2 {
            return Vec::new();
        }

        let premises: Vec<Vec<(usize, usize)>> =
            previous.iter().map(|s| self.premise_items(s)).collect();

        let mut merged = Vec::new();
        for (i, a) in previous.iter().enumerate() {
            let pa = &premises[i];
            if pa.len() != k - 1 {
                continue;
            }
            for (j, b) in previous.iter().enumerate().skip(i + 1) {
                let pb = &premises[j];
                if pb.len() != k - 1 || a.item(self.class_index) != b.item(self.class_index) {
                    continue;
                }
                if pa[..k - 2] != pb[..k - 2] {
                    continue;
                }
                let (last_a, last_b) = (pa[k - 2], pb[k - 2]);
                if last_a.0 == last_b.0 {
                    continue;
                }

                let mut items = a.items().to_vec();
                items[last_b.0] = Some(last_b.1);
                merged.push(Itemset::new(items));
            }
        }
        merged
    }

    fn prune_by_index(&self, candidates: Vec<Itemset>, index: &ItemsetIndex) -> Vec<Itemset> {
        candidates
            .into_iter()
            .filter(|candidate| {
                let premise = self.premise_items(candidate);
                premise.len() < 2
                    || premise
                        .iter()
                        .all(|(attr, _)| index.contains(candidate.without(*attr).items()))
            })
            .collect()
    }
}
