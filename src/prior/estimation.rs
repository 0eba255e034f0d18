//! Prior estimation from random rules
//!
//! For each premise length, a fixed number of random class rules is drawn and
//! their confidences are binned. The per-length histograms are combined with
//! weights proportional to the number of rules of that length,
//! `C(m, len) · (2^len - 1)` for `m` premise attributes, giving one prior
//! probability per confidence bin.

use super::{log_sum_exp, PriorModel};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::lattice::Itemset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Options for [`BayesianPrior::estimate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorOptions {
    /// Random rules drawn per premise length
    pub num_random_rules: usize,
    /// Number of confidence bins
    pub num_intervals: usize,
    /// Sampler seed
    pub seed: u64,
}

impl Default for PriorOptions {
    fn default() -> Self {
        PriorOptions {
            num_random_rules: 1000,
            num_intervals: 100,
            seed: 0,
        }
    }
}

/// Discretized prior over rule confidence
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianPrior {
    midpoints: Vec<f64>,
    priors: Vec<f64>,
}

impl BayesianPrior {
    /// Attribute limit for estimation
    pub const MAX_ATTRIBUTES: usize = 1024;

    /// Estimate priors for class rules predicting `class_index`
    pub fn estimate(dataset: &Dataset, class_index: usize, options: &PriorOptions) -> Result<Self> {
        let num_attributes = dataset.num_attributes();
        if num_attributes == 0 {
            return Err(Error::EmptyDataset("dataset has no attributes".to_string()));
        }
        if num_attributes >= Self::MAX_ATTRIBUTES {
            return Err(Error::TooManyAttributes {
                count: num_attributes,
                max: Self::MAX_ATTRIBUTES - 1,
            });
        }
        if dataset.num_records() == 0 {
            return Err(Error::EmptyDataset("dataset has no records".to_string()));
        }
        dataset.ensure_categorical()?;
        if options.num_intervals == 0 || options.num_random_rules == 0 {
            return Err(Error::Config(
                "prior estimation needs at least one interval and one random rule".to_string(),
            ));
        }

        let class_values = dataset
            .attribute(class_index)
            .map(|a| a.num_values())
            .ok_or_else(|| Error::InvalidClassIndex(class_index.to_string()))?;
        if class_values == 0 {
            return Err(Error::Dataset("class attribute has no values".to_string()));
        }

        let premise_attrs: Vec<usize> = (0..num_attributes).filter(|&a| a != class_index).collect();
        let m = premise_attrs.len();
        if m == 0 {
            return Err(Error::EmptyDataset(
                "dataset has no attributes besides the class".to_string(),
            ));
        }

        let intervals = options.num_intervals;
        let mut rng = StdRng::seed_from_u64(options.seed);
        let mut histograms = vec![vec![0usize; intervals]; m + 1];
        let mut observed = vec![0usize; m + 1];

        for len in 1..=m {
            for _ in 0..options.num_random_rules {
                let Some((premise, class_value)) =
                    random_rule(&mut rng, dataset, &premise_attrs, len, class_index, class_values)
                else {
                    continue;
                };

                let (mut premise_count, mut rule_count) = (0usize, 0usize);
                for record in dataset.records() {
                    if premise.matches(record, None) {
                        premise_count += 1;
                        if record.get(class_index).copied().flatten() == Some(class_value) {
                            rule_count += 1;
                        }
                    }
                }

                if premise_count > 0 {
                    let confidence = rule_count as f64 / premise_count as f64;
                    histograms[len][bin_of(confidence, intervals)] += 1;
                    observed[len] += 1;
                }
            }
        }

        let log_weights: Vec<f64> = (1..=m)
            .map(|len| ln_binomial(m, len) + ln_two_pow_minus_one(len))
            .collect();
        let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_weights.iter().map(|w| (w - max).exp()).collect();
        let total_weight: f64 = weights.iter().sum();

        let mut priors = vec![0.0; intervals];
        for (len, weight) in (1..=m).zip(&weights) {
            if observed[len] == 0 {
                continue;
            }
            for (bin, prior) in priors.iter_mut().enumerate() {
                *prior += weight * histograms[len][bin] as f64 / observed[len] as f64;
            }
        }
        for prior in priors.iter_mut() {
            *prior /= total_weight;
        }

        if priors.iter().all(|p| *p <= 0.0) {
            debug!("no random rule matched any record, using a uniform prior");
            return Ok(Self::uniform(intervals));
        }

        debug!(
            intervals,
            premise_attributes = m,
            sampled = observed.iter().sum::<usize>(),
            "estimated accuracy prior"
        );

        Ok(BayesianPrior {
            midpoints: midpoints(intervals),
            priors,
        })
    }

    /// Equal prior mass on every bin
    pub fn uniform(num_intervals: usize) -> Self {
        let n = num_intervals.max(1);
        BayesianPrior {
            midpoints: midpoints(n),
            priors: vec![1.0 / n as f64; n],
        }
    }

    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    pub fn num_intervals(&self) -> usize {
        self.midpoints.len()
    }
}

impl PriorModel for BayesianPrior {
    fn expected_accuracy(&self, support: usize, premise_support: usize) -> f64 {
        let hits = support as f64;
        let misses = premise_support.saturating_sub(support) as f64;

        let mut numerator = Vec::with_capacity(self.priors.len());
        let mut denominator = Vec::with_capacity(self.priors.len());
        for (&m, &prior) in self.midpoints.iter().zip(&self.priors) {
            if prior <= 0.0 {
                continue;
            }
            let log_weight = prior.ln() + hits * m.ln() + misses * (1.0 - m).ln();
            numerator.push(log_weight + m.ln());
            denominator.push(log_weight);
        }

        if denominator.is_empty() {
            return 0.0;
        }
        (log_sum_exp(&numerator) - log_sum_exp(&denominator)).exp()
    }
}

fn random_rule(
    rng: &mut StdRng,
    dataset: &Dataset,
    premise_attrs: &[usize],
    len: usize,
    class_index: usize,
    class_values: usize,
) -> Option<(Itemset, usize)> {
    let mut items = vec![None; dataset.num_attributes()];
    for i in rand::seq::index::sample(rng, premise_attrs.len(), len).iter() {
        let attr = premise_attrs[i];
        let num_values = dataset.attribute(attr).map(|a| a.num_values()).unwrap_or(0);
        if num_values == 0 {
            return None;
        }
        items[attr] = Some(rng.gen_range(0..num_values));
    }
    let class_value = rng.gen_range(0..class_values);
    debug_assert!(items[class_index].is_none());
    Some((Itemset::new(items), class_value))
}

/// Midpoints of `n` equal-width bins over [0, 1]
fn midpoints(n: usize) -> Vec<f64> {
    let width = 1.0 / n as f64;
    (0..n).map(|i| width * i as f64 + width / 2.0).collect()
}

/// Bin holding `confidence`; 1.0 falls in the last bin
fn bin_of(confidence: f64, n: usize) -> usize {
    ((confidence * n as f64).floor() as usize).min(n - 1)
}

fn ln_binomial(n: usize, k: usize) -> f64 {
    (1..=k)
        .map(|i| ((n - k + i) as f64).ln() - (i as f64).ln())
        .sum()
}

/// `ln(2^k - 1)`
fn ln_two_pow_minus_one(k: usize) -> f64 {
    k as f64 * std::f64::consts::LN_2 + (-(0.5f64.powi(k as i32))).ln_1p()
}
