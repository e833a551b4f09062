//! Laplacian kernel implementation
//!
//! K(x, y) = exp(-γ * ||x - y||₁)
//!
//! Like the Gaussian kernel it is stationary, but it uses the L1 distance
//! and so decays more slowly for far-apart points.

use crate::core::{KernelError, Result, SparseVector};
use crate::kernel::traits::{require_positive, Kernel, ParametrizedKernel};

/// Laplacian kernel: K(x, y) = exp(-γ * ||x - y||₁)
#[derive(Debug, Clone, Copy)]
pub struct LaplacianKernel {
    gamma: f64,
    skip_input_checks: bool,
}

impl LaplacianKernel {
    /// Create a new Laplacian kernel (gamma must be positive)
    pub fn new(gamma: f64) -> Result<Self> {
        Ok(Self {
            gamma: require_positive("laplacian", "gamma", gamma)?,
            skip_input_checks: false,
        })
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for LaplacianKernel {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            skip_input_checks: false,
        }
    }
}

impl Kernel for LaplacianKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        (-self.gamma * x.l1_distance(y)).exp()
    }

    fn name(&self) -> &'static str {
        "laplacian"
    }

    fn describe(&self) -> String {
        format!("laplacian(gamma={})", self.gamma)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl ParametrizedKernel for LaplacianKernel {
    const PARAMS: &'static [&'static str] = &["gamma"];

    fn set_param(&mut self, param: &str, value: f64) -> Result<()> {
        match param {
            "gamma" => {
                self.gamma = require_positive("laplacian", param, value)?;
                Ok(())
            }
            _ => Err(KernelError::UnknownParameter {
                kernel: "laplacian",
                param: param.to_string(),
            }),
        }
    }

    fn set_skip_input_checks(&mut self, skip: bool) {
        self.skip_input_checks = skip;
    }
}
