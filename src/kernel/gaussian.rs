//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-||x - y||² / (2σ²))
//! where σ (sigma) is the bandwidth controlling the kernel width.

use crate::core::{KernelError, Result, SparseVector};
use crate::kernel::traits::{require_positive, Kernel, ParametrizedKernel};

/// Gaussian kernel: K(x, y) = exp(-||x - y||² / (2σ²))
///
/// The sigma parameter controls the "reach" of each sample:
/// - Small sigma: only very close points are similar (matrix tends to identity)
/// - Large sigma: distant points remain similar (matrix tends to all-ones)
#[derive(Debug, Clone, Copy)]
pub struct GaussianKernel {
    sigma: f64,
    gamma: f64,
    skip_input_checks: bool,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with bandwidth `sigma` (must be positive)
    pub fn new(sigma: f64) -> Result<Self> {
        let sigma = require_positive("gaussian", "sigma", sigma)?;
        Ok(Self {
            sigma,
            gamma: 1.0 / (2.0 * sigma * sigma),
            skip_input_checks: false,
        })
    }

    /// Get the sigma parameter
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Equivalent RBF gamma, `1 / (2σ²)`
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for GaussianKernel {
    /// Default Gaussian kernel with sigma = 2.0
    fn default() -> Self {
        Self {
            sigma: 2.0,
            gamma: 0.125,
            skip_input_checks: false,
        }
    }
}

impl Kernel for GaussianKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        (-self.gamma * x.squared_distance(y)).exp()
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn describe(&self) -> String {
        format!("gaussian(sigma={})", self.sigma)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl ParametrizedKernel for GaussianKernel {
    const PARAMS: &'static [&'static str] = &["sigma"];

    fn set_param(&mut self, param: &str, value: f64) -> Result<()> {
        match param {
            "sigma" => {
                let skip = self.skip_input_checks;
                *self = Self::new(value)?;
                self.skip_input_checks = skip;
                Ok(())
            }
            _ => Err(KernelError::UnknownParameter {
                kernel: "gaussian",
                param: param.to_string(),
            }),
        }
    }

    fn set_skip_input_checks(&mut self, skip: bool) {
        self.skip_input_checks = skip;
    }
}
