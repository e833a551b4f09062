//! Chi-Square Kernel Implementation
//!
//! K(x, y) = exp(-γ * χ²(x, y)), where χ²(x, y) = Σᵢ (xᵢ - yᵢ)² / (xᵢ + yᵢ)
//! over indices with xᵢ + yᵢ ≠ 0.
//!
//! Only defined for non-negative features (histograms, counts), which is why
//! it is never part of a preset bucket and has to be added explicitly.

use crate::core::{KernelError, Result, Sample, SparseVector};
use crate::kernel::traits::{check_finite, require_positive, Kernel, ParametrizedKernel};

/// Chi-square kernel for histogram and distribution data
#[derive(Debug, Clone)]
pub struct ChiSquareKernel {
    /// Scaling parameter gamma (must be positive)
    pub gamma: f64,
    skip_input_checks: bool,
}

impl ChiSquareKernel {
    /// Creates a new Chi-square kernel with the specified gamma parameter
    pub fn new(gamma: f64) -> Result<Self> {
        Ok(Self {
            gamma: require_positive("chi2", "gamma", gamma)?,
            skip_input_checks: false,
        })
    }
}

impl Default for ChiSquareKernel {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            skip_input_checks: false,
        }
    }
}

impl Kernel for ChiSquareKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        (-self.gamma * chi_square_distance(x, y)).exp()
    }

    fn name(&self) -> &'static str {
        "chi2"
    }

    fn describe(&self) -> String {
        format!("chi2(gamma={})", self.gamma)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }

    fn check_inputs(&self, samples: &[Sample]) -> Result<()> {
        check_finite(self.name(), samples)?;
        for (i, sample) in samples.iter().enumerate() {
            if let Some(v) = sample.features.values.iter().find(|&&v| v < 0.0) {
                return Err(KernelError::InvalidInput(format!(
                    "chi2: sample {i} has negative feature value {v}; \
                     chi-square kernel requires non-negative features"
                )));
            }
        }
        Ok(())
    }
}

impl ParametrizedKernel for ChiSquareKernel {
    const PARAMS: &'static [&'static str] = &["gamma"];

    fn set_param(&mut self, param: &str, value: f64) -> Result<()> {
        match param {
            "gamma" => {
                self.gamma = require_positive("chi2", param, value)?;
                Ok(())
            }
            _ => Err(KernelError::UnknownParameter {
                kernel: "chi2",
                param: param.to_string(),
            }),
        }
    }

    fn set_skip_input_checks(&mut self, skip: bool) {
        self.skip_input_checks = skip;
    }
}

/// χ²(x, y) over the union of non-zero indices
fn chi_square_distance(x: &SparseVector, y: &SparseVector) -> f64 {
    let mut distance = 0.0;
    x.merge(y, |a, b| {
        let sum = a + b;
        if sum != 0.0 {
            let diff = a - b;
            distance += diff * diff / sum;
        }
    });
    distance
}
