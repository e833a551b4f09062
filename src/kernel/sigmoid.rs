//! Sigmoid (Tanh) Kernel Implementation
//!
//! K(x, y) = tanh(γ * <x, y> + offset)
//!
//! The sigmoid kernel is not positive semi-definite for every parameter
//! choice, so its normalized form can contain entries that the normalization
//! guard in `KernelMatrix` zeroes out (negative diagonal products).

use crate::core::{KernelError, Result, SparseVector};
use crate::kernel::traits::{require_finite, require_positive, Kernel, ParametrizedKernel};

/// Sigmoid (Hyperbolic Tangent) kernel
#[derive(Debug, Clone)]
pub struct SigmoidKernel {
    /// Scaling parameter for the dot product (must be positive)
    pub gamma: f64,
    /// Bias/offset parameter (any finite value)
    pub offset: f64,
    skip_input_checks: bool,
}

impl SigmoidKernel {
    /// Creates a new Sigmoid kernel with specified parameters
    ///
    /// # Examples
    /// ```
    /// use kernelbucket::kernel::SigmoidKernel;
    ///
    /// let kernel = SigmoidKernel::new(0.1, -1.0).unwrap();
    /// assert_eq!(kernel.gamma, 0.1);
    /// assert_eq!(kernel.offset, -1.0);
    /// ```
    pub fn new(gamma: f64, offset: f64) -> Result<Self> {
        Ok(Self {
            gamma: require_positive("sigmoid", "gamma", gamma)?,
            offset: require_finite("sigmoid", "offset", offset)?,
            skip_input_checks: false,
        })
    }
}

impl Default for SigmoidKernel {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            offset: 1.0,
            skip_input_checks: false,
        }
    }
}

impl Kernel for SigmoidKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        (self.gamma * x.dot(y) + self.offset).tanh()
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn describe(&self) -> String {
        format!("sigmoid(gamma={}, offset={})", self.gamma, self.offset)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl ParametrizedKernel for SigmoidKernel {
    const PARAMS: &'static [&'static str] = &["gamma", "offset"];

    fn set_param(&mut self, param: &str, value: f64) -> Result<()> {
        match param {
            "gamma" => self.gamma = require_positive("sigmoid", param, value)?,
            "offset" => self.offset = require_finite("sigmoid", param, value)?,
            _ => {
                return Err(KernelError::UnknownParameter {
                    kernel: "sigmoid",
                    param: param.to_string(),
                })
            }
        }
        Ok(())
    }

    fn set_skip_input_checks(&mut self, skip: bool) {
        self.skip_input_checks = skip;
    }
}
