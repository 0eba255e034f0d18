//! Itemset representation
//!
//! An itemset assigns values to a subset of attributes. It is stored as one
//! slot per attribute, where `None` means the attribute is not part of the set.
//! Itemsets produced by the lattice always carry the class item; the premise is
//! every other assigned attribute.

use crate::dataset::{Dataset, Record};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A partial assignment of attribute values with its support counts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Itemset {
    items: Vec<Option<usize>>,
    /// Records matching every item
    support: usize,
    /// Records matching every item except the class item
    premise_support: usize,
}

impl Itemset {
    /// Create an uncounted itemset
    pub fn new(items: Vec<Option<usize>>) -> Self {
        Itemset {
            items,
            support: 0,
            premise_support: 0,
        }
    }

    /// Create an itemset with known counts
    pub fn with_counts(items: Vec<Option<usize>>, support: usize, premise_support: usize) -> Self {
        Itemset {
            items,
            support,
            premise_support,
        }
    }

    pub fn items(&self) -> &[Option<usize>] {
        &self.items
    }

    /// Value assigned to `attr`, if any
    pub fn item(&self, attr: usize) -> Option<usize> {
        self.items.get(attr).copied().flatten()
    }

    /// Number of assigned attributes
    pub fn size(&self) -> usize {
        self.items.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }

    pub fn support(&self) -> usize {
        self.support
    }

    pub fn premise_support(&self) -> usize {
        self.premise_support
    }

    pub(crate) fn set_counts(&mut self, support: usize, premise_support: usize) {
        self.support = support;
        self.premise_support = premise_support;
    }

    /// Assigned `(attribute, value)` pairs in attribute order, skipping `skip`
    pub fn assigned(&self, skip: Option<usize>) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(move |(attr, _)| Some(*attr) != skip)
            .filter_map(|(attr, v)| v.map(|v| (attr, v)))
    }

    /// Whether the record matches every item, ignoring attribute `skip`
    pub fn matches(&self, record: &Record, skip: Option<usize>) -> bool {
        self.items.iter().enumerate().all(|(attr, item)| match item {
            None => true,
            Some(_) if Some(attr) == skip => true,
            Some(v) => record.get(attr).copied().flatten() == Some(*v),
        })
    }

    /// Whether every item of `self` also appears in `other`
    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.is_none() || a == b)
    }

    /// Copy with `attr` removed
    pub fn without(&self, attr: usize) -> Itemset {
        let mut items = self.items.clone();
        if let Some(slot) = items.get_mut(attr) {
            *slot = None;
        }
        Itemset::new(items)
    }

    /// Copy keeping only `attr`
    pub fn only(&self, attr: usize) -> Itemset {
        let items = (0..self.items.len())
            .map(|i| if i == attr { self.item(i) } else { None })
            .collect();
        Itemset::new(items)
    }

    /// Render as `name=value` pairs
    pub fn display(&self, dataset: &Dataset) -> String {
        self.assigned(None)
            .map(|(attr, value)| {
                let name = dataset
                    .attribute(attr)
                    .map(|a| a.name.as_str())
                    .unwrap_or("?");
                format!("{}={}", name, dataset.label(attr, value))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Attribute;

    #[test]
    fn test_matches_with_skip() {
        let set = Itemset::new(vec![Some(1), None, Some(0)]);
        assert!(set.matches(&vec![Some(1), Some(0), Some(0)], None));
        assert!(!set.matches(&vec![Some(1), Some(0), Some(1)], None));
        assert!(set.matches(&vec![Some(1), Some(0), Some(1)], Some(2)));
        assert!(!set.matches(&vec![None, Some(0), Some(0)], None));
    }

    #[test]
    fn test_subset() {
        let general = Itemset::new(vec![Some(1), None, None]);
        let specific = Itemset::new(vec![Some(1), Some(0), None]);
        let other = Itemset::new(vec![Some(0), Some(0), None]);
        assert!(general.is_subset_of(&specific));
        assert!(general.is_subset_of(&general));
        assert!(!specific.is_subset_of(&general));
        assert!(!general.is_subset_of(&other));
        assert!(Itemset::new(vec![None, None, None]).is_subset_of(&other));
    }

    #[test]
    fn test_without_and_only() {
        let set = Itemset::with_counts(vec![Some(1), Some(2), Some(0)], 3, 4);
        assert_eq!(set.without(2).items(), &[Some(1), Some(2), None]);
        assert_eq!(set.only(2).items(), &[None, None, Some(0)]);
        assert_eq!(set.without(2).support(), 0);
        assert_eq!(set.size(), 3);
    }

    #[test]
    fn test_display() {
        let data = Dataset::new(
            "d",
            vec![
                Attribute::nominal("a", ["0", "1"]),
                Attribute::nominal("c", ["no", "yes"]),
            ],
        );
        let set = Itemset::new(vec![Some(1), Some(0)]);
        assert_eq!(set.display(&data), "a=1 c=no");
        assert_eq!(set.without(1).display(&data), "a=1");
    }
}
