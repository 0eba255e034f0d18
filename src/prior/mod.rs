//! # Accuracy prior
//!
//! Expected predictive accuracy of a rule with `c` matching records out of `n`
//! premise matches, under a discretized prior `π` over confidence bins with
//! midpoints `m_i`:
//!
//! ```text
//!            Σ π_i · m_i^(c+1) · (1 - m_i)^(n-c)
//! E(c, n) = ------------------------------------
//!            Σ π_i · m_i^c     · (1 - m_i)^(n-c)
//! ```
//!
//! `E` grows with `c` for a fixed `n`, and `E(n, n)` grows with `n`. The search
//! relies on both to prune itemsets and to raise its support floor.

pub mod estimation;

pub use estimation::{BayesianPrior, PriorOptions};

/// Scores rules by expected predictive accuracy
pub trait PriorModel {
    /// Expected accuracy of a rule with `support` hits among `premise_support` matches
    fn expected_accuracy(&self, support: usize, premise_support: usize) -> f64;

    /// Smallest rule support whose expected accuracy exceeds `bound`,
    /// or `None` when even a perfect rule cannot.
    fn min_support_to_beat(&self, premise_support: usize, bound: f64) -> Option<usize> {
        if premise_support == 0
            || self.expected_accuracy(premise_support, premise_support) <= bound
        {
            return None;
        }

        let (mut lo, mut hi) = (1, premise_support);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.expected_accuracy(mid, premise_support) > bound {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }
}

/// Numerically stable `ln(Σ exp(x))`
pub(crate) fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Laplace estimate, a closed-form stand-in for the discretized model
    struct Laplace;

    impl PriorModel for Laplace {
        fn expected_accuracy(&self, support: usize, premise_support: usize) -> f64 {
            (support as f64 + 1.0) / (premise_support as f64 + 2.0)
        }
    }

    #[test]
    fn test_min_support_to_beat() {
        // (c + 1) / 12 > 0.5  <=>  c >= 6
        assert_eq!(Laplace.min_support_to_beat(10, 0.5), Some(6));
        assert_eq!(Laplace.min_support_to_beat(10, 0.0), Some(1));
        // 11 / 12 is the best a 10-match premise can do
        assert_eq!(Laplace.min_support_to_beat(10, 0.95), None);
        assert_eq!(Laplace.min_support_to_beat(0, 0.0), None);
    }

    #[test]
    fn test_log_sum_exp() {
        let v = [1.0f64.ln(), 2.0f64.ln(), 3.0f64.ln()];
        assert!((log_sum_exp(&v) - 6.0f64.ln()).abs() < 1e-12);
        assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
    }
}
