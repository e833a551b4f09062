//! Named strategies for populating a kernel bucket

use crate::bucket::{BucketConfig, KernelBucket};
use crate::config::{GridPresets, KernelGrids, KERNEL_BUCKET_STRATEGIES};
use crate::core::{KernelError, Result};
use log::{info, warn};
use std::fmt;
use std::str::FromStr;

/// Preset used to populate a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketStrategy {
    /// Wide grids for every family
    Exhaustive,
    /// Narrow grids, for fast iteration and testing
    Light,
    /// Linear kernel only
    LinearOnly,
}

impl BucketStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketStrategy::Exhaustive => "exhaustive",
            BucketStrategy::Light => "light",
            BucketStrategy::LinearOnly => "linear_only",
        }
    }

    /// Name given to buckets built with this strategy
    pub fn bucket_name(&self) -> &'static str {
        match self {
            BucketStrategy::Exhaustive => "KBucketExhaustive",
            BucketStrategy::Light => "KBucketLight",
            BucketStrategy::LinearOnly => "KBucketLinearOnly",
        }
    }

    /// Select this strategy's grids from `presets`
    pub fn grids(&self, presets: &GridPresets) -> KernelGrids {
        match self {
            BucketStrategy::Exhaustive => presets.exhaustive.clone(),
            BucketStrategy::Light => presets.light.clone(),
            BucketStrategy::LinearOnly => KernelGrids::none(),
        }
    }
}

impl fmt::Display for BucketStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketStrategy {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "exhaustive" => Ok(BucketStrategy::Exhaustive),
            "light" => Ok(BucketStrategy::Light),
            "linear_only" => Ok(BucketStrategy::LinearOnly),
            _ => Err(KernelError::InvalidStrategy {
                given: s.to_string(),
                valid: KERNEL_BUCKET_STRATEGIES.join(", "),
            }),
        }
    }
}

/// What `make_kernel_bucket` should start from
#[derive(Debug)]
pub enum BucketSource {
    /// Strategy given by name, parsed case-insensitively
    Named(String),
    Strategy(BucketStrategy),
    /// An already populated bucket, returned unchanged
    Bucket(KernelBucket),
}

impl From<&str> for BucketSource {
    fn from(name: &str) -> Self {
        BucketSource::Named(name.to_string())
    }
}

impl From<String> for BucketSource {
    fn from(name: String) -> Self {
        BucketSource::Named(name)
    }
}

impl From<BucketStrategy> for BucketSource {
    fn from(strategy: BucketStrategy) -> Self {
        BucketSource::Strategy(strategy)
    }
}

impl From<KernelBucket> for BucketSource {
    fn from(bucket: KernelBucket) -> Self {
        BucketSource::Bucket(bucket)
    }
}

/// Build a bucket from a named strategy using the built-in grids
///
/// # Examples
/// ```
/// use kernelbucket::bucket::make_kernel_bucket;
///
/// let bucket = make_kernel_bucket("linear_only", true, false).unwrap();
/// assert_eq!(bucket.size(), 1);
/// assert!(make_kernel_bucket("everything", true, false).is_err());
/// ```
pub fn make_kernel_bucket<S: Into<BucketSource>>(
    source: S,
    normalize_kernels: bool,
    skip_input_checks: bool,
) -> Result<KernelBucket> {
    make_kernel_bucket_with_presets(source, &GridPresets::default(), normalize_kernels, skip_input_checks)
}

/// Build a bucket from a strategy, selecting grids from `presets`
pub fn make_kernel_bucket_with_presets<S: Into<BucketSource>>(
    source: S,
    presets: &GridPresets,
    normalize_kernels: bool,
    skip_input_checks: bool,
) -> Result<KernelBucket> {
    let strategy = match source.into() {
        BucketSource::Bucket(bucket) => {
            warn!(
                "Input is already a kernel bucket ('{}') - simply returning it!",
                bucket.name()
            );
            return Ok(bucket);
        }
        BucketSource::Named(name) => name.parse::<BucketStrategy>()?,
        BucketSource::Strategy(strategy) => strategy,
    };

    info!("Populating kernel bucket with strategy '{strategy}'");
    let config = BucketConfig::new(strategy.bucket_name())
        .with_normalize_kernels(normalize_kernels)
        .with_skip_input_checks(skip_input_checks)
        .with_grids(strategy.grids(presets));

    KernelBucket::new(config)
}
