//! # Itemset lattice
//!
//! Level-wise itemset production for the search. Level `k` holds itemsets
//! with `k` premise items plus the class item. The search drives a lattice
//! through the [`ItemsetLattice`] trait, so tests can substitute a fake that
//! yields a fixed itemset sequence.
//!
//! The Apriori closure property holds between levels: a level-`k` candidate
//! is kept only if every level-`(k-1)` itemset obtained by dropping one premise
//! item survived, which is enforced through an [`ItemsetIndex`].

pub mod apriori;
pub mod itemset;

pub use apriori::AprioriLattice;
pub use itemset::Itemset;

use crate::dataset::Dataset;
use std::collections::HashSet;

/// Level-wise itemset generation, counting and pruning
pub trait ItemsetLattice {
    /// Level-1 itemsets: one premise item plus a class item, uncounted
    fn singletons(&self, dataset: &Dataset) -> Vec<Itemset>;

    /// Recount support and premise support of every itemset
    fn count(&self, itemsets: &mut [Itemset], dataset: &Dataset);

    /// Keep itemsets whose rule support (premise and class item together)
    /// reaches `min_support`
    fn filter_by_support(&self, itemsets: Vec<Itemset>, min_support: usize) -> Vec<Itemset>;

    /// Join surviving level-`(k-1)` itemsets into level-`k` candidates
    fn merge_level(&self, previous: &[Itemset], k: usize) -> Vec<Itemset>;

    /// Index of a level for closure pruning
    fn build_index(&self, level: &[Itemset]) -> ItemsetIndex {
        ItemsetIndex::from_itemsets(level)
    }

    /// Drop candidates with a `(k-1)`-subset missing from `index`
    fn prune_by_index(&self, candidates: Vec<Itemset>, index: &ItemsetIndex) -> Vec<Itemset>;
}

/// Hash index over the item assignments of one level
#[derive(Debug, Clone, Default)]
pub struct ItemsetIndex {
    keys: HashSet<Vec<Option<usize>>>,
}

impl ItemsetIndex {
    pub fn from_itemsets(itemsets: &[Itemset]) -> Self {
        ItemsetIndex {
            keys: itemsets.iter().map(|s| s.items().to_vec()).collect(),
        }
    }

    pub fn contains(&self, items: &[Option<usize>]) -> bool {
        self.keys.contains(items)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
