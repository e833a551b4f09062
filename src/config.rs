//! Parameter grids for the bucket presets
//!
//! Powers of two are spelled out so the grids read the same as they are
//! iterated.

use crate::core::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Valid names for `make_kernel_bucket`
pub const KERNEL_BUCKET_STRATEGIES: [&str; 3] = ["exhaustive", "light", "linear_only"];

pub const DEFAULT_DEGREE_VALUES_POLY_KERNEL: [f64; 3] = [2.0, 3.0, 4.0];
// 2^-5 ..= 2^5, odd exponents
pub const DEFAULT_SIGMA_VALUES_GAUSSIAN_KERNEL: [f64; 6] =
    [0.03125, 0.125, 0.5, 2.0, 8.0, 32.0];
// 2^1, 2^3, 2^5
pub const DEFAULT_GAMMA_VALUES_LAPLACIAN_KERNEL: [f64; 3] = [2.0, 8.0, 32.0];
pub const DEFAULT_GAMMA_VALUES_SIGMOID_KERNEL: [f64; 3] = [2.0, 8.0, 32.0];
pub const DEFAULT_OFFSET_VALUES_SIGMOID_KERNEL: [f64; 2] = [-2.0, 1.0];

pub const LIGHT_DEGREE_VALUES_POLY_KERNEL: [f64; 2] = [2.0, 3.0];
// 2^-3, 2^-1, 2^1
pub const LIGHT_SIGMA_VALUES_GAUSSIAN_KERNEL: [f64; 3] = [0.125, 0.5, 2.0];
pub const LIGHT_GAMMA_VALUES_LAPLACIAN_KERNEL: [f64; 1] = [2.0];
pub const LIGHT_GAMMA_VALUES_SIGMOID_KERNEL: [f64; 1] = [2.0];
pub const LIGHT_OFFSET_VALUES_SIGMOID_KERNEL: [f64; 1] = [1.0];

/// One value list per swept (family, parameter) pair; `None` skips the pair
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelGrids {
    pub poly_degree_values: Option<Vec<f64>>,
    pub rbf_sigma_values: Option<Vec<f64>>,
    pub laplace_gamma_values: Option<Vec<f64>>,
    pub sigmoid_gamma_values: Option<Vec<f64>>,
    pub sigmoid_offset_values: Option<Vec<f64>>,
}

impl KernelGrids {
    /// Wide grids for a thorough sweep
    pub fn exhaustive() -> Self {
        Self {
            poly_degree_values: Some(DEFAULT_DEGREE_VALUES_POLY_KERNEL.to_vec()),
            rbf_sigma_values: Some(DEFAULT_SIGMA_VALUES_GAUSSIAN_KERNEL.to_vec()),
            laplace_gamma_values: Some(DEFAULT_GAMMA_VALUES_LAPLACIAN_KERNEL.to_vec()),
            sigmoid_gamma_values: Some(DEFAULT_GAMMA_VALUES_SIGMOID_KERNEL.to_vec()),
            sigmoid_offset_values: Some(DEFAULT_OFFSET_VALUES_SIGMOID_KERNEL.to_vec()),
        }
    }

    /// Narrow grids for fast iteration and testing
    pub fn light() -> Self {
        Self {
            poly_degree_values: Some(LIGHT_DEGREE_VALUES_POLY_KERNEL.to_vec()),
            rbf_sigma_values: Some(LIGHT_SIGMA_VALUES_GAUSSIAN_KERNEL.to_vec()),
            laplace_gamma_values: Some(LIGHT_GAMMA_VALUES_LAPLACIAN_KERNEL.to_vec()),
            sigmoid_gamma_values: Some(LIGHT_GAMMA_VALUES_SIGMOID_KERNEL.to_vec()),
            sigmoid_offset_values: Some(LIGHT_OFFSET_VALUES_SIGMOID_KERNEL.to_vec()),
        }
    }

    /// Every family skipped; a bucket built from this holds only the linear kernel
    pub fn none() -> Self {
        Self::default()
    }

    /// Number of kernels these grids request, excluding the linear kernel
    pub fn num_requested(&self) -> usize {
        [
            &self.poly_degree_values,
            &self.rbf_sigma_values,
            &self.laplace_gamma_values,
            &self.sigmoid_gamma_values,
            &self.sigmoid_offset_values,
        ]
        .iter()
        .map(|v| v.as_ref().map_or(0, |v| v.len()))
        .sum()
    }
}

/// Grids selected by the `exhaustive` and `light` strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridPresets {
    pub exhaustive: KernelGrids,
    pub light: KernelGrids,
}

impl Default for GridPresets {
    fn default() -> Self {
        Self {
            exhaustive: KernelGrids::exhaustive(),
            light: KernelGrids::light(),
        }
    }
}

impl GridPresets {
    /// Load presets from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let presets = serde_json::from_reader(BufReader::new(file))?;
        Ok(presets)
    }
}
