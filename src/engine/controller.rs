//! Level-wise search with an adaptive support floor
//!
//! Each level generates itemsets at the current floor, expands them into
//! rules and offers those to the [`BestRuleSet`]. When the set's bound moves,
//! the floor rises while a perfect rule at the floor, `E(p, p)`, could not beat
//! the bound. The search stops when the floor passes the number of records or
//! the levels run out.

use super::best::BestRuleSet;
use super::expand::RuleExpander;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::lattice::{Itemset, ItemsetLattice};
use crate::prior::PriorModel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Mutable state threaded through one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchContext {
    /// Minimum support for an itemset to be considered
    pub premise_count: usize,
    /// Accuracy a new rule has to beat
    pub expectation: f64,
    /// Candidate rules generated so far
    pub generation: u64,
}

impl SearchContext {
    pub fn new() -> Self {
        SearchContext {
            premise_count: 1,
            expectation: 0.0,
            generation: 0,
        }
    }

    /// Sequence number for the next candidate rule
    pub fn next_sequence(&mut self) -> u64 {
        let seq = self.generation;
        self.generation += 1;
        seq
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every level was visited, or no itemset survived to seed the next one
    LevelsExhausted,
    /// The support floor passed the number of records
    FloorUnreachable,
}

/// Summary of one search level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LevelReport {
    pub level: usize,
    /// Itemsets that survived counting at this level
    pub itemsets: usize,
    /// Rules admitted into the best set
    pub admitted: usize,
    /// Support floor after the level
    pub premise_count: usize,
    /// Bound after the level
    pub expectation: f64,
}

/// Result of [`SearchController::run`]
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: BestRuleSet,
    pub levels: Vec<LevelReport>,
    pub termination: Termination,
    pub context: SearchContext,
}

/// Rules admitted during one level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelExpansion {
    pub admitted: usize,
    /// Whether the best set's bound moved
    pub changed: bool,
}

/// Drives the level loop over an injected lattice and prior model
pub struct SearchController<'a, L: ItemsetLattice + ?Sized, P: PriorModel + ?Sized> {
    lattice: &'a L,
    prior: &'a P,
    dataset: &'a Dataset,
    class_index: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, L: ItemsetLattice + ?Sized, P: PriorModel + ?Sized> SearchController<'a, L, P> {
    pub fn new(lattice: &'a L, prior: &'a P, dataset: &'a Dataset, class_index: usize) -> Self {
        SearchController {
            lattice,
            prior,
            dataset,
            class_index,
            cancel: None,
        }
    }

    /// Stop between levels once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run the search to completion
    #[instrument(skip_all, fields(records = self.dataset.num_records(), class = self.class_index))]
    pub fn run(&self, mut best: BestRuleSet) -> Result<SearchOutcome> {
        let num_records = self.dataset.num_records();
        let mut ctx = SearchContext::new();
        let mut levels = Vec::new();
        let mut previous: Vec<Itemset> = Vec::new();
        let mut termination = Termination::LevelsExhausted;

        for k in 1..self.dataset.num_attributes() {
            if self.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let level = self.generate_level(k, &previous, &ctx);
            let expansion = self.expand_level(&level, &mut ctx, &mut best);

            let floor_before = ctx.premise_count;
            if expansion.changed {
                self.escalate(&mut ctx);
            }

            debug!(
                level = k,
                itemsets = level.len(),
                admitted = expansion.admitted,
                premise_count = ctx.premise_count,
                expectation = ctx.expectation,
                "level done"
            );
            levels.push(LevelReport {
                level: k,
                itemsets: level.len(),
                admitted: expansion.admitted,
                premise_count: ctx.premise_count,
                expectation: ctx.expectation,
            });

            if ctx.premise_count > num_records {
                termination = Termination::FloorUnreachable;
                break;
            }

            previous = if ctx.premise_count != floor_before {
                self.lattice.filter_by_support(level, ctx.premise_count)
            } else {
                level
            };
            if previous.is_empty() {
                break;
            }
        }

        info!(
            rules = best.len(),
            levels = levels.len(),
            premise_count = ctx.premise_count,
            ?termination,
            "search finished"
        );

        Ok(SearchOutcome {
            best,
            levels,
            termination,
            context: ctx,
        })
    }

    /// Counted itemsets of level `k` at the current floor
    pub fn generate_level(&self, k: usize, previous: &[Itemset], ctx: &SearchContext) -> Vec<Itemset> {
        let mut candidates = if k == 1 {
            self.lattice.singletons(self.dataset)
        } else {
            if previous.is_empty() {
                return Vec::new();
            }
            let merged = self.lattice.merge_level(previous, k);
            let index = self.lattice.build_index(previous);
            self.lattice.prune_by_index(merged, &index)
        };

        self.lattice.count(&mut candidates, self.dataset);
        self.lattice.filter_by_support(candidates, ctx.premise_count)
    }

    /// Offer every itemset of a level to `best`, tracking the bound in `ctx`
    pub fn expand_level(
        &self,
        level: &[Itemset],
        ctx: &mut SearchContext,
        best: &mut BestRuleSet,
    ) -> LevelExpansion {
        let expander = RuleExpander::new(self.prior, self.class_index);
        let mut expansion = LevelExpansion::default();

        for itemset in level {
            if expander.expand(itemset, ctx, best) {
                expansion.admitted += 1;
                if best.was_changed() {
                    expansion.changed = true;
                    ctx.expectation = best.bound();
                }
            }
        }
        expansion
    }

    /// Raise the floor while a perfect rule at the floor cannot beat the bound.
    /// Returns whether the floor moved.
    pub fn escalate(&self, ctx: &mut SearchContext) -> bool {
        let start = ctx.premise_count;
        let num_records = self.dataset.num_records();

        while self
            .prior
            .expected_accuracy(ctx.premise_count, ctx.premise_count)
            <= ctx.expectation
        {
            ctx.premise_count += 1;
            if ctx.premise_count > num_records {
                break;
            }
        }

        if ctx.premise_count != start {
            debug!(from = start, to = ctx.premise_count, "raised support floor");
        }
        ctx.premise_count != start
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
