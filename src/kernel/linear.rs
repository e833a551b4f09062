//! Linear kernel implementation

use crate::core::{KernelError, Result, SparseVector};
use crate::kernel::{Kernel, ParametrizedKernel};

/// Linear kernel: K(x, y) = x^T * y
///
/// Parameter-free. Every bucket starts with one of these.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel {
    skip_input_checks: bool,
}

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether input validation is skipped
    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64 {
        x.dot(y)
    }

    fn name(&self) -> &'static str {
        "linear"
    }

    fn describe(&self) -> String {
        "linear".to_string()
    }

    fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }
}

impl ParametrizedKernel for LinearKernel {
    const PARAMS: &'static [&'static str] = &[];

    fn set_param(&mut self, param: &str, _value: f64) -> Result<()> {
        Err(KernelError::UnknownParameter {
            kernel: "linear",
            param: param.to_string(),
        })
    }

    fn set_skip_input_checks(&mut self, skip: bool) {
        self.skip_input_checks = skip;
    }
}
