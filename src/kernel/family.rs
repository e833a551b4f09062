//! Registry of kernel families that can be swept over

use crate::core::{KernelError, Result};
use crate::kernel::{
    ChiSquareKernel, GaussianKernel, Kernel, LaplacianKernel, LinearKernel, ParametrizedKernel,
    PolynomialKernel, SigmoidKernel,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kernel-function type, as opposed to a configured instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelFamily {
    Linear,
    Polynomial,
    Gaussian,
    Laplacian,
    Sigmoid,
    ChiSquare,
}

impl KernelFamily {
    pub const ALL: [KernelFamily; 6] = [
        KernelFamily::Linear,
        KernelFamily::Polynomial,
        KernelFamily::Gaussian,
        KernelFamily::Laplacian,
        KernelFamily::Sigmoid,
        KernelFamily::ChiSquare,
    ];

    /// Canonical registry name
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelFamily::Linear => "linear",
            KernelFamily::Polynomial => "poly",
            KernelFamily::Gaussian => "gaussian",
            KernelFamily::Laplacian => "laplacian",
            KernelFamily::Sigmoid => "sigmoid",
            KernelFamily::ChiSquare => "chi2",
        }
    }

    /// Parameter names accepted by this family
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            KernelFamily::Linear => LinearKernel::PARAMS,
            KernelFamily::Polynomial => PolynomialKernel::PARAMS,
            KernelFamily::Gaussian => GaussianKernel::PARAMS,
            KernelFamily::Laplacian => LaplacianKernel::PARAMS,
            KernelFamily::Sigmoid => SigmoidKernel::PARAMS,
            KernelFamily::ChiSquare => ChiSquareKernel::PARAMS,
        }
    }

    /// Instantiate the family with one named parameter set
    pub fn build(&self, param: &str, value: f64, skip_input_checks: bool) -> Result<Box<dyn Kernel>> {
        match self {
            KernelFamily::Linear => LinearKernel::with_param(param, value, skip_input_checks),
            KernelFamily::Polynomial => PolynomialKernel::with_param(param, value, skip_input_checks),
            KernelFamily::Gaussian => GaussianKernel::with_param(param, value, skip_input_checks),
            KernelFamily::Laplacian => LaplacianKernel::with_param(param, value, skip_input_checks),
            KernelFamily::Sigmoid => SigmoidKernel::with_param(param, value, skip_input_checks),
            KernelFamily::ChiSquare => ChiSquareKernel::with_param(param, value, skip_input_checks),
        }
    }
}

impl fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelFamily {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(KernelFamily::Linear),
            "poly" | "polynomial" => Ok(KernelFamily::Polynomial),
            "gaussian" | "rbf" => Ok(KernelFamily::Gaussian),
            "laplacian" | "laplace" => Ok(KernelFamily::Laplacian),
            "sigmoid" | "tanh" => Ok(KernelFamily::Sigmoid),
            "chi2" | "chi_square" | "chisquare" => Ok(KernelFamily::ChiSquare),
            _ => Err(KernelError::InvalidKernelFunction(format!(
                "'{s}' (known kernel functions: {})",
                KernelFamily::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}
