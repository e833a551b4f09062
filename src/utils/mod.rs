//! Utility functions for statistics and dataset inspection

use crate::core::Sample;

/// Basic statistics over flat numeric sequences
pub mod stats {
    use crate::core::{KernelError, Result};

    /// Arithmetic mean; NaN for an empty slice
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Population variance; NaN for an empty slice
    pub fn variance(values: &[f64]) -> f64 {
        let m = mean(values);
        values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
    }

    /// Pearson linear correlation coefficient between two equal-length sequences.
    ///
    /// Fails when the lengths differ, when fewer than two values are given,
    /// or when either sequence is constant (correlation undefined). The
    /// result is clamped to [-1, 1] to absorb rounding.
    pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
        if x.len() != y.len() {
            return Err(KernelError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(KernelError::InvalidInput(format!(
                "correlation needs at least 2 values, got {}",
                x.len()
            )));
        }
        if is_constant(x) || is_constant(y) {
            return Err(KernelError::ZeroVariance(
                "an input is constant, correlation coefficient is not defined".to_string(),
            ));
        }

        let mean_x = mean(x);
        let mean_y = mean(y);

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        let mut syy = 0.0;
        for (&a, &b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        if sxx == 0.0 || syy == 0.0 {
            return Err(KernelError::ZeroVariance(
                "an input has zero variance, correlation coefficient is not defined".to_string(),
            ));
        }

        Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
    }

    fn is_constant(values: &[f64]) -> bool {
        values.iter().all(|&v| v == values[0])
    }
}

/// Dataset validation helpers
pub mod validation {
    use super::*;

    /// Number of distinct target values, treating targets as exact
    pub fn count_distinct_targets(samples: &[Sample]) -> usize {
        let mut targets: Vec<f64> = samples.iter().map(|s| s.target).collect();
        targets.sort_by(|a, b| a.total_cmp(b));
        targets.dedup();
        targets.len()
    }

    /// True when every feature value is finite
    pub fn all_features_finite(samples: &[Sample]) -> bool {
        samples
            .iter()
            .all(|s| s.features.values.iter().all(|v| v.is_finite()))
    }
}

/// Memory estimates for kernel analysis
pub mod memory {
    /// Bytes needed to hold `num_kernels` dense `n_samples x n_samples` matrices
    pub fn estimate_bucket_memory(num_kernels: usize, n_samples: usize) -> usize {
        num_kernels * n_samples * n_samples * std::mem::size_of::<f64>()
    }

    /// Number of metric evaluations for an n x n pairwise similarity matrix
    /// (upper triangle including the diagonal)
    pub fn pairwise_evaluations(num_kernels: usize) -> usize {
        num_kernels * (num_kernels + 1) / 2
    }
}
