//! Kernel trait definition

use crate::core::{KernelError, Result, Sample, SparseVector};
use std::fmt;

/// Kernel function trait
///
/// A kernel function K(x, y) is a symmetric similarity between two feature
/// vectors. Implementations carry their own parameters and know how to
/// describe themselves, which is how an entry in a bucket stays attributable
/// to its (family, parameter, value) triple.
pub trait Kernel: Send + Sync + fmt::Debug {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &SparseVector, y: &SparseVector) -> f64;

    /// Short family name, e.g. `"gaussian"`
    fn name(&self) -> &'static str;

    /// Family name with parameters, e.g. `"gaussian(sigma=0.5)"`
    fn describe(&self) -> String;

    /// Whether input validation on attached samples is skipped
    fn skip_input_checks(&self) -> bool {
        false
    }

    /// Validate samples before a kernel matrix is computed from them.
    ///
    /// The default rejects non-finite feature values.
    fn check_inputs(&self, samples: &[Sample]) -> Result<()> {
        check_finite(self.name(), samples)
    }
}

/// A kernel that can be built from defaults by setting named parameters.
///
/// This is the capability the bucket sweeps over: one named parameter is set
/// per instance, every other parameter keeps its default.
pub trait ParametrizedKernel: Kernel + Default + Sized + 'static {
    /// Names of the parameters accepted by `set_param`
    const PARAMS: &'static [&'static str];

    /// Set a named parameter, validating its value
    fn set_param(&mut self, param: &str, value: f64) -> Result<()>;

    /// Forward the input-check flag
    fn set_skip_input_checks(&mut self, skip: bool);

    /// Build a boxed kernel with a single parameter overridden
    fn with_param(param: &str, value: f64, skip_input_checks: bool) -> Result<Box<dyn Kernel>> {
        let mut kernel = Self::default();
        kernel.set_param(param, value)?;
        kernel.set_skip_input_checks(skip_input_checks);
        Ok(Box::new(kernel))
    }
}

/// Reject samples containing NaN or infinite feature values
pub fn check_finite(kernel: &str, samples: &[Sample]) -> Result<()> {
    for (i, sample) in samples.iter().enumerate() {
        if let Some(v) = sample.features.values.iter().find(|v| !v.is_finite()) {
            return Err(KernelError::InvalidInput(format!(
                "{kernel}: sample {i} has non-finite feature value {v}"
            )));
        }
    }
    Ok(())
}

/// Validate that a kernel parameter is finite and strictly positive
pub(crate) fn require_positive(kernel: &str, param: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(KernelError::InvalidParameter(format!(
            "{kernel}: {param} must be a positive finite number, got {value}"
        )))
    }
}

/// Validate that a kernel parameter is finite
pub(crate) fn require_finite(kernel: &str, param: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(KernelError::InvalidParameter(format!(
            "{kernel}: {param} must be finite, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        let good = vec![Sample::new(SparseVector::new(vec![0], vec![1.0]), 1.0)];
        assert!(check_finite("linear", &good).is_ok());

        let bad = vec![
            Sample::new(SparseVector::new(vec![0], vec![1.0]), 1.0),
            Sample::new(SparseVector::new(vec![1], vec![f64::NAN]), -1.0),
        ];
        let err = check_finite("linear", &bad).unwrap_err();
        assert!(err.to_string().contains("sample 1"));
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("k", "gamma", 0.5).unwrap(), 0.5);
        assert!(require_positive("k", "gamma", 0.0).is_err());
        assert!(require_positive("k", "gamma", -1.0).is_err());
        assert!(require_positive("k", "gamma", f64::INFINITY).is_err());
        assert!(require_finite("k", "offset", -2.0).is_ok());
        assert!(require_finite("k", "offset", f64::NAN).is_err());
    }
}
