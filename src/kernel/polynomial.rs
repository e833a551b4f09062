//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (b + γ * <x, y>)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - b: independent (offset) term
//! - d (degree): degree of the polynomial, a positive integer

use crate::core::{KernelError, Result, SparseVector};
use crate::kernel::traits::{require_finite, require_positive, Kernel, ParametrizedKernel};

/// Polynomial kernel with configurable degree, gamma, and offset
#[derive(Debug, Clone)]
pub struct PolynomialKernel {
    /// Degree of the polynomial (default: 3)
    pub degree: u32,
    /// Scaling factor for the dot product (default: 1.0)
    pub gamma: f64,
    /// Independent term in the polynomial (default: 1.0)
    pub b: f64,
    skip_input_checks: bool,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Examples
    /// ```
    /// use kernelbucket::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (1 + x·y)²
    /// let quad = PolynomialKernel::new(2, 1.0, 1.0).unwrap();
    /// assert_eq!(quad.degree, 2);
    /// assert!(PolynomialKernel::new(0, 1.0, 1.0).is_err());
    /// ```
    pub fn new(degree: u32, gamma: f64, b: f64) -> Result<Self> {
        Ok(Self {
            degree: check_degree(degree)?,
            gamma: require_positive("poly", "gamma", gamma)?,
            b: require_finite("poly", "b", b)?,
            skip_input_checks: false,
        })
    }
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self {
            degree: 3,
            gamma: 1.0,
            b: 1.0,
            skip_input_checks: false,
        }
    }
}

/// Largest accepted degree; `compute` raises to an `i32` power
pub const MAX_DEGREE: u32 = i32::MAX as u32;

fn check_degree(degree: u32) -> Result<u32> {
    if (1..=MAX_DEGREE).contains(&degree) {
        Ok(degree)
    } else {
        Err(KernelError::InvalidParameter(format!(
            "poly: degree must be an integer in [1, {MAX_DEGREE}], got {degree}"
        )))
    }
}

/// Degree values arrive as `f64` from parameter grids; only exact positive
/// integers are accepted.
fn degree_from_f64(value: f64) -> Result<u32> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= MAX_DEGREE as f64 {
        Ok(value as u32)
    } else {
        Err(KernelError::InvalidParameter(format!(
            "poly: degree must be a positive integer, got {value}"
        )))
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        (self.b + self.gamma * x.dot(y)).powi(i32::try_from(self.degree).unwrap_or(i32::MAX))
    }

    fn name(&self) -> &'static str {
        "poly"
    }

    fn describe(&self) -> String {
        format!("poly(degree={}, gamma={}, b={})", self.degree, self.gamma, self.b)
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl ParametrizedKernel for PolynomialKernel {
    const PARAMS: &'static [&'static str] = &["degree", "gamma", "b"];

    fn set_param(&mut self, param: &str, value: f64) -> Result<()> {
        match param {
            "degree" => self.degree = degree_from_f64(value)?,
            "gamma" => self.gamma = require_positive("poly", param, value)?,
            "b" => self.b = require_finite("poly", param, value)?,
            _ => {
                return Err(KernelError::UnknownParameter {
                    kernel: "poly",
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
