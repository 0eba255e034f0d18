//! Itemset to rule expansion

use super::best::BestRuleSet;
use super::controller::SearchContext;
use super::rule::RuleItem;
use crate::lattice::Itemset;
use crate::prior::PriorModel;

/// Turns counted itemsets into scored class rules
pub struct RuleExpander<'a, P: PriorModel + ?Sized> {
    prior: &'a P,
    class_index: usize,
}

impl<'a, P: PriorModel + ?Sized> RuleExpander<'a, P> {
    pub fn new(prior: &'a P, class_index: usize) -> Self {
        RuleExpander { prior, class_index }
    }

    /// Split an itemset into premise and class consequence and score it.
    /// Itemsets without the class item yield no rule.
    pub fn candidate(&self, itemset: &Itemset, sequence: u64) -> Option<RuleItem> {
        itemset.item(self.class_index)?;

        let mut premise = itemset.without(self.class_index);
        premise.set_counts(itemset.premise_support(), itemset.premise_support());
        let mut consequence = itemset.only(self.class_index);
        consequence.set_counts(itemset.support(), itemset.support());

        let accuracy = self
            .prior
            .expected_accuracy(itemset.support(), itemset.premise_support());
        Some(RuleItem::new(premise, consequence, accuracy, sequence))
    }

    /// Offer the rule of `itemset` to `best`; returns whether it was admitted
    pub fn expand(&self, itemset: &Itemset, ctx: &mut SearchContext, best: &mut BestRuleSet) -> bool {
        if itemset.item(self.class_index).is_none() {
            return false;
        }

        // Support below this cannot beat the current bound for this premise
        if ctx.expectation > 0.0 {
            match self
                .prior
                .min_support_to_beat(itemset.premise_support(), ctx.expectation)
            {
                Some(min) if itemset.support() >= min => {}
                _ => return false,
            }
        }

        match self.candidate(itemset, ctx.next_sequence()) {
            Some(rule) => best.try_insert(rule),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prior::BayesianPrior;

    #[test]
    fn test_candidate_splits_class() {
        let prior = BayesianPrior::uniform(100);
        let expander = RuleExpander::new(&prior, 2);
        let set = Itemset::with_counts(vec![Some(1), None, Some(0)], 4, 5);

        let rule = expander.candidate(&set, 3).unwrap();
        assert_eq!(rule.premise().items(), &[Some(1), None, None]);
        assert_eq!(rule.consequence().items(), &[None, None, Some(0)]);
        assert_eq!(rule.premise_support(), 5);
        assert_eq!(rule.support(), 4);
        assert_eq!(rule.sequence(), 3);
        assert!((rule.accuracy() - prior.expected_accuracy(4, 5)).abs() < 1e-12);
    }

    #[test]
    fn test_itemset_without_class_gives_no_rule() {
        let prior = BayesianPrior::uniform(100);
        let expander = RuleExpander::new(&prior, 2);
        let set = Itemset::with_counts(vec![Some(1), Some(0), None], 4, 4);
        assert!(expander.candidate(&set, 0).is_none());

        let mut ctx = SearchContext::new();
        let mut best = BestRuleSet::new(None, 0);
        assert!(!expander.expand(&set, &mut ctx, &mut best));
        assert!(best.is_empty());
    }

    #[test]
    fn test_expand_skips_hopeless_support() {
        let prior = BayesianPrior::uniform(100);
        let expander = RuleExpander::new(&prior, 1);
        let mut ctx = SearchContext::new();
        ctx.expectation = prior.expected_accuracy(5, 6);
        let mut best = BestRuleSet::new(None, 0);

        let weak = Itemset::with_counts(vec![Some(0), Some(1)], 2, 6);
        assert!(!expander.expand(&weak, &mut ctx, &mut best));
        assert_eq!(ctx.generation, 0);

        let strong = Itemset::with_counts(vec![Some(1), Some(1)], 6, 6);
        assert!(expander.expand(&strong, &mut ctx, &mut best));
        assert_eq!(best.len(), 1);
        assert_eq!(ctx.generation, 1);
    }
}
