//! Kernel bucket: a kernel set populated by sweeping parameter grids
//!
//! A bucket always starts with the linear kernel, then adds one kernel
//! matrix per value of each swept parameter, in a fixed order:
//! polynomial degree, Gaussian sigma, Laplacian gamma, sigmoid gamma,
//! sigmoid offset. Construction is strict about its configuration but
//! tolerant of individual parameter values that fail to produce a kernel:
//! those are skipped with a warning and recorded as diagnostics.
//!
//! ```
//! use kernelbucket::bucket::{BucketConfig, KernelBucket};
//! use kernelbucket::config::KernelGrids;
//!
//! let config = BucketConfig::new("demo")
//!     .with_grids(KernelGrids::none())
//!     .with_rbf_sigma_values(Some(vec![0.5, 2.0]));
//! let bucket = KernelBucket::new(config).unwrap();
//! assert_eq!(bucket.size(), 3);
//! assert_eq!(bucket[0].name(), "linear");
//! ```

pub mod factory;

pub use self::factory::*;

use crate::config::KernelGrids;
use crate::core::{KernelCollection, KernelError, Result, Sample};
use crate::kernel::{KernelFamily, LinearKernel};
use crate::matrix::{KernelMatrix, KernelSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;

/// Immutable configuration of a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    /// Label identifying the bucket
    pub name: String,
    /// Store every kernel matrix normalized
    pub normalize_kernels: bool,
    /// Forwarded to every kernel function; skips validation of input samples
    pub skip_input_checks: bool,
    /// Parameter values per swept family
    #[serde(default)]
    pub grids: KernelGrids,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self::new("KernelBucket")
    }
}

impl BucketConfig {
    /// Configuration with exhaustive grids, normalization on and input checks on
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            normalize_kernels: true,
            skip_input_checks: false,
            grids: KernelGrids::exhaustive(),
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_normalize_kernels(mut self, normalize: bool) -> Self {
        self.normalize_kernels = normalize;
        self
    }

    pub fn with_skip_input_checks(mut self, skip: bool) -> Self {
        self.skip_input_checks = skip;
        self
    }

    /// Replace all five value lists at once
    pub fn with_grids(mut self, grids: KernelGrids) -> Self {
        self.grids = grids;
        self
    }

    pub fn with_poly_degree_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.grids.poly_degree_values = values;
        self
    }

    pub fn with_rbf_sigma_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.grids.rbf_sigma_values = values;
        self
    }

    pub fn with_laplace_gamma_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.grids.laplace_gamma_values = values;
        self
    }

    pub fn with_sigmoid_gamma_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.grids.sigmoid_gamma_values = values;
        self
    }

    pub fn with_sigmoid_offset_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.grids.sigmoid_offset_values = values;
        self
    }
}

/// A parameter value that could not be turned into a kernel matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedKernel {
    pub kernel: KernelFamily,
    pub param: String,
    pub value: f64,
    pub reason: String,
}

/// Outcome of one parametrized expansion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionReport {
    /// Number of kernel matrices appended
    pub added: usize,
    /// Values that were skipped, in iteration order
    pub skipped: Vec<SkippedKernel>,
}

/// Ordered, named collection of candidate kernel matrices
#[derive(Debug)]
pub struct KernelBucket {
    set: KernelSet,
    normalize_kernels: bool,
    skip_input_checks: bool,
    skipped: Vec<SkippedKernel>,
}

impl KernelBucket {
    /// Build a bucket from its configuration.
    ///
    /// Fails if any value list is present but empty. Values that fail to
    /// produce a kernel are skipped (see `skipped()`).
    pub fn new(config: BucketConfig) -> Result<Self> {
        let BucketConfig {
            name,
            normalize_kernels,
            skip_input_checks,
            grids,
        } = config;

        let linear = LinearKernel::new().with_skip_input_checks(skip_input_checks);
        let set = KernelSet::with_matrices(
            name,
            vec![KernelMatrix::from_kernel(linear, normalize_kernels)],
        );

        let mut bucket = Self {
            set,
            normalize_kernels,
            skip_input_checks,
            skipped: Vec::new(),
        };

        let sweeps = [
            (KernelFamily::Polynomial, "degree", &grids.poly_degree_values),
            (KernelFamily::Gaussian, "sigma", &grids.rbf_sigma_values),
            (KernelFamily::Laplacian, "gamma", &grids.laplace_gamma_values),
            (KernelFamily::Sigmoid, "gamma", &grids.sigmoid_gamma_values),
            (KernelFamily::Sigmoid, "offset", &grids.sigmoid_offset_values),
        ];
        for (family, param, values) in sweeps {
            bucket.add_parametrized_kernels(family, param, values.as_deref())?;
        }

        debug!(
            "Built bucket '{}' with {} kernels ({} skipped)",
            bucket.name(),
            bucket.size(),
            bucket.skipped.len()
        );
        Ok(bucket)
    }

    /// Bucket with the default (exhaustive) configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(BucketConfig::default())
    }

    /// Add one kernel matrix per value of `param` for `family`.
    ///
    /// `None` is a no-op. An empty list is a configuration error. A value
    /// whose kernel cannot be built or attached is skipped with a warning.
    pub fn add_parametrized_kernels(
        &mut self,
        family: KernelFamily,
        param: &str,
        values: Option<&[f64]>,
    ) -> Result<ExpansionReport> {
        let Some(values) = values else {
            return Ok(ExpansionReport::default());
        };

        if values.is_empty() {
            return Err(KernelError::InvalidParameter(format!(
                "values for {family} {param} must be an iterable set of param values (n>=1)"
            )));
        }

        let mut report = ExpansionReport::default();
        for &value in values {
            let outcome = family
                .build(param, value, self.skip_input_checks)
                .and_then(|kernel| {
                    self.set
                        .append(KernelMatrix::new(kernel, self.normalize_kernels))
                });

            match outcome {
                Ok(()) => report.added += 1,
                Err(e) => {
                    warn!("Unable to add {family} to the bucket for {param}={value}. Skipping it: {e}");
                    report.skipped.push(SkippedKernel {
                        kernel: family,
                        param: param.to_string(),
                        value,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.skipped.extend(report.skipped.iter().cloned());
        Ok(report)
    }

    /// Same as `add_parametrized_kernels`, resolving the kernel type by name.
    ///
    /// An unrecognized name is a domain error and leaves the bucket untouched.
    pub fn add_parametrized_kernels_by_name(
        &mut self,
        kernel_type: &str,
        param: &str,
        values: Option<&[f64]>,
    ) -> Result<ExpansionReport> {
        let family: KernelFamily = kernel_type.parse()?;
        self.add_parametrized_kernels(family, param, values)
    }

    /// Attach every kernel matrix to `samples`
    pub fn attach_to<S: Into<Arc<[Sample]>>>(&mut self, samples: S) -> Result<()> {
        self.set.attach_to(samples)
    }

    pub fn name(&self) -> &str {
        self.set.name()
    }

    /// Number of kernel matrices in the bucket
    pub fn size(&self) -> usize {
        self.set.size()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Always false: the linear kernel is never absent
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KernelMatrix> {
        self.set.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KernelMatrix> {
        self.set.iter()
    }

    /// `None` until the bucket is attached to samples
    pub fn num_samples(&self) -> Option<usize> {
        self.set.num_samples()
    }

    pub fn normalize_kernels(&self) -> bool {
        self.normalize_kernels
    }

    pub fn skip_input_checks(&self) -> bool {
        self.skip_input_checks
    }

    /// Every value skipped since construction, in order
    pub fn skipped(&self) -> &[SkippedKernel] {
        &self.skipped
    }

    /// Kernel descriptions, in bucket order
    pub fn kernel_names(&self) -> Vec<String> {
        self.set.kernel_names()
    }

    /// The underlying kernel set
    pub fn as_set(&self) -> &KernelSet {
        &self.set
    }

    pub fn into_set(self) -> KernelSet {
        self.set
    }
}

impl Index<usize> for KernelBucket {
    type Output = KernelMatrix;

    fn index(&self, index: usize) -> &KernelMatrix {
        &self.set[index]
    }
}

impl KernelCollection for KernelBucket {
    fn name(&self) -> &str {
        self.set.name()
    }

    fn size(&self) -> usize {
        self.set.size()
    }

    fn get(&self, index: usize) -> Option<&KernelMatrix> {
        self.set.get(index)
    }
}

impl<'a> IntoIterator for &'a KernelBucket {
    type Item = &'a KernelMatrix;
    type IntoIter = std::slice::Iter<'a, KernelMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SparseVector;

    fn linear_only_config() -> BucketConfig {
        BucketConfig::new("test").with_grids(KernelGrids::none())
    }

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(SparseVector::new(vec![0, 1], vec![0.5, 0.2]), 1.0),
            Sample::new(SparseVector::new(vec![0, 1], vec![-0.4, -0.3]), -1.0),
            Sample::new(SparseVector::new(vec![0, 1], vec![0.1, -0.6]), 1.0),
        ]
    }

    #[test]
    fn test_linear_kernel_always_first() {
        let configs = vec![
            BucketConfig::default(),
            linear_only_config(),
            linear_only_config().with_sigmoid_offset_values(Some(vec![1.0])),
            BucketConfig::new("light").with_grids(KernelGrids::light()),
        ];

        for config in configs {
            let bucket = KernelBucket::new(config).unwrap();
            assert_eq!(bucket[0].kernel().name(), "linear");
        }
    }

    #[test]
    fn test_exhaustive_default_size_and_order() {
        let bucket = KernelBucket::with_defaults().unwrap();
        assert_eq!(bucket.size(), 18);
        assert_eq!(bucket.name(), "KernelBucket");
        assert!(bucket.skipped().is_empty());

        let families: Vec<&str> = bucket.iter().map(|km| km.kernel().name()).collect();
        let mut expected = vec!["linear"];
        expected.extend(["poly"; 3]);
        expected.extend(["gaussian"; 6]);
        expected.extend(["laplacian"; 3]);
        expected.extend(["sigmoid"; 5]);
        assert_eq!(families, expected);

        assert_eq!(bucket[1].name(), "poly(degree=2, gamma=1, b=1)");
        assert_eq!(bucket[4].name(), "gaussian(sigma=0.03125)");
        assert_eq!(bucket[16].name(), "sigmoid(gamma=1, offset=-2)");
    }

    #[test]
    fn test_none_adds_nothing() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let report = bucket
            .add_parametrized_kernels(KernelFamily::Gaussian, "sigma", None)
            .unwrap();

        assert_eq!(report, ExpansionReport::default());
        assert_eq!(bucket.size(), 1);
    }

    #[test]
    fn test_k_values_add_k_kernels() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let report = bucket
            .add_parametrized_kernels(KernelFamily::Laplacian, "gamma", Some(&[0.5, 1.0, 4.0]))
            .unwrap();

        assert_eq!(report.added, 3);
        assert_eq!(bucket.size(), 4);
        assert_eq!(bucket[3].name(), "laplacian(gamma=4)");
    }

    #[test]
    fn test_bad_values_are_skipped_with_diagnostics() {
        let config = linear_only_config()
            .with_poly_degree_values(Some(vec![2.0, 2.5, 3.0]))
            .with_rbf_sigma_values(Some(vec![-1.0, 1.0]));
        let bucket = KernelBucket::new(config).unwrap();

        assert_eq!(bucket.size(), 1 + 2 + 1);
        let skipped = bucket.skipped();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].kernel, KernelFamily::Polynomial);
        assert_eq!(skipped[0].param, "degree");
        assert_eq!(skipped[0].value, 2.5);
        assert_eq!(skipped[1].kernel, KernelFamily::Gaussian);
        assert_eq!(skipped[1].value, -1.0);
        assert!(skipped[1].reason.contains("sigma"));
    }

    #[test]
    fn test_oversized_degree_is_skipped() {
        let config = linear_only_config().with_poly_degree_values(Some(vec![2.0, 3.0e9]));
        let bucket = KernelBucket::new(config).unwrap();

        assert_eq!(bucket.kernel_names(), vec!["linear", "poly(degree=2, gamma=1, b=1)"]);
        let skipped = bucket.skipped();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].param, "degree");
        assert_eq!(skipped[0].value, 3.0e9);
        assert!(skipped[0].reason.contains("degree"));
    }

    #[test]
    fn test_unknown_param_skips_every_value() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let report = bucket
            .add_parametrized_kernels(KernelFamily::Gaussian, "gamma", Some(&[1.0, 2.0]))
            .unwrap();

        assert_eq!(report.added, 0);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(bucket.size(), 1);
    }

    #[test]
    fn test_empty_values_is_error() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let result = bucket.add_parametrized_kernels(KernelFamily::Polynomial, "degree", Some(&[]));
        assert!(matches!(result, Err(KernelError::InvalidParameter(_))));

        let config = linear_only_config().with_laplace_gamma_values(Some(vec![]));
        assert!(matches!(
            KernelBucket::new(config),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_kernel_type_leaves_bucket_unmodified() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let result = bucket.add_parametrized_kernels_by_name("f64", "value", Some(&[1.0, 2.0]));

        assert!(matches!(result, Err(KernelError::InvalidKernelFunction(_))));
        assert_eq!(bucket.size(), 1);
        assert!(bucket.skipped().is_empty());
    }

    #[test]
    fn test_unknown_kernel_type_checked_before_values() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let result = bucket.add_parametrized_kernels_by_name("numeric", "value", None);
        assert!(matches!(result, Err(KernelError::InvalidKernelFunction(_))));
    }

    #[test]
    fn test_add_by_name_after_construction() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        let report = bucket
            .add_parametrized_kernels_by_name("chi2", "gamma", Some(&[0.5, 1.0]))
            .unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(bucket.kernel_names(), vec!["linear", "chi2(gamma=0.5)", "chi2(gamma=1)"]);
    }

    #[test]
    fn test_flags_propagate() {
        let config = linear_only_config()
            .with_normalize_kernels(false)
            .with_skip_input_checks(true)
            .with_sigmoid_gamma_values(Some(vec![2.0]));
        let bucket = KernelBucket::new(config).unwrap();

        assert!(!bucket.normalize_kernels());
        assert!(bucket.skip_input_checks());
        for km in &bucket {
            assert!(!km.is_normalized());
            assert!(km.kernel().skip_input_checks());
        }
    }

    #[test]
    fn test_num_samples_and_late_additions() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        assert_eq!(bucket.num_samples(), None);

        bucket.attach_to(samples()).unwrap();
        assert_eq!(bucket.num_samples(), Some(3));

        bucket
            .add_parametrized_kernels(KernelFamily::Gaussian, "sigma", Some(&[1.0]))
            .unwrap();
        assert_eq!(bucket[1].num_samples(), Some(3));
        assert_eq!(bucket[1].full().unwrap().shape(), (3, 3));
    }

    #[test]
    fn test_failed_attach_after_attachment_is_skipped() {
        let mut bucket = KernelBucket::new(linear_only_config()).unwrap();
        bucket.attach_to(samples()).unwrap();

        // samples have negative features, which chi2 rejects
        let report = bucket
            .add_parametrized_kernels(KernelFamily::ChiSquare, "gamma", Some(&[1.0]))
            .unwrap();
        assert_eq!(report.added, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("non-negative"));
        assert_eq!(bucket.size(), 1);
    }

    #[test]
    fn test_config_json_rejects_non_bool_flag() {
        let json = r#"{"name": "x", "normalize_kernels": "yes", "skip_input_checks": false}"#;
        let result: std::result::Result<BucketConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{"name": "x", "normalize_kernels": true, "skip_input_checks": false}"#;
        let config: BucketConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grids, KernelGrids::none());
    }
}
