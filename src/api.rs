//! High-level API for kernel bucket analysis
//!
//! This module bundles the usual workflow: populate a bucket from a strategy,
//! attach it to a dataset, then compare the kernels with each other or rank
//! them against the targets.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kernelbucket::api::KernelAnalysis;
//! use kernelbucket::bucket::BucketStrategy;
//! use kernelbucket::similarity::SimilarityMetric;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = KernelAnalysis::new()
//!     .with_strategy(BucketStrategy::Light)
//!     .with_metric(SimilarityMetric::Alignment)
//!     .run_from_file("data.libsvm")?;
//!
//! report.print_summary();
//! # Ok(())
//! # }
//! ```

use crate::bucket::{make_kernel_bucket_with_presets, BucketStrategy, KernelBucket};
use crate::config::GridPresets;
use crate::core::{Dataset, DenseMatrix, Result};
use crate::data::{CSVDataset, LibSVMDataset};
use crate::persistence::SimilarityReport;
use crate::similarity::{
    pairwise_similarity_with, rank_by_target_alignment, RankedKernel, SimilarityMetric,
};
use log::info;
use std::path::Path;

/// Kernel bucket analysis with builder pattern
#[derive(Debug, Clone)]
pub struct KernelAnalysis {
    strategy: BucketStrategy,
    presets: GridPresets,
    metric: SimilarityMetric,
    normalize_kernels: bool,
    skip_input_checks: bool,
}

impl KernelAnalysis {
    /// Exhaustive strategy with built-in grids, normalized kernels and alignment
    pub fn new() -> Self {
        Self {
            strategy: BucketStrategy::Exhaustive,
            presets: GridPresets::default(),
            metric: SimilarityMetric::Alignment,
            normalize_kernels: true,
            skip_input_checks: false,
        }
    }

    pub fn with_strategy(mut self, strategy: BucketStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the built-in parameter grids
    pub fn with_presets(mut self, presets: GridPresets) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
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

    pub fn strategy(&self) -> BucketStrategy {
        self.strategy
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// Populate a bucket and attach it to the dataset
    pub fn build_bucket<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<KernelBucket> {
        let mut bucket = make_kernel_bucket_with_presets(
            self.strategy,
            &self.presets,
            self.normalize_kernels,
            self.skip_input_checks,
        )?;
        bucket.attach_to(dataset.samples().to_vec())?;
        info!(
            "Bucket '{}' holds {} kernels over {} samples",
            bucket.name(),
            bucket.size(),
            dataset.len()
        );
        Ok(bucket)
    }

    /// Pairwise similarity matrix of an attached bucket under the configured metric
    pub fn similarity(&self, bucket: &KernelBucket) -> Result<DenseMatrix> {
        pairwise_similarity_with(bucket, self.metric)
    }

    /// Build, attach and compare; the report carries the pairwise matrix
    pub fn run<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<SimilarityReport> {
        let bucket = self.build_bucket(dataset)?;
        let matrix = self.similarity(&bucket)?;
        SimilarityReport::from_analysis(&bucket, self.metric, &matrix)
    }

    /// Build, attach and rank the kernels by alignment with the targets
    pub fn rank<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<Vec<RankedKernel>> {
        let bucket = self.build_bucket(dataset)?;
        rank_by_target_alignment(&bucket, &dataset.targets())
    }

    /// Run on a LibSVM format file
    pub fn run_from_file<P: AsRef<Path>>(&self, path: P) -> Result<SimilarityReport> {
        let dataset = LibSVMDataset::from_file(path)?;
        self.run(&dataset)
    }

    /// Run on a CSV file (automatically detects headers)
    pub fn run_from_csv<P: AsRef<Path>>(&self, path: P) -> Result<SimilarityReport> {
        let dataset = CSVDataset::from_file(path)?;
        self.run(&dataset)
    }
}

impl Default for KernelAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Pairwise similarity of the light bucket on LibSVM data, metric by name
    pub fn similarity_libsvm<P: AsRef<Path>>(path: P, metric: &str) -> Result<SimilarityReport> {
        KernelAnalysis::new()
            .with_strategy(BucketStrategy::Light)
            .with_metric(metric.parse()?)
            .run_from_file(path)
    }

    /// Pairwise similarity of the light bucket on CSV data, metric by name
    pub fn similarity_csv<P: AsRef<Path>>(path: P, metric: &str) -> Result<SimilarityReport> {
        KernelAnalysis::new()
            .with_strategy(BucketStrategy::Light)
            .with_metric(metric.parse()?)
            .run_from_csv(path)
    }

    /// Rank the exhaustive bucket's kernels by target alignment on LibSVM data
    pub fn rank_libsvm<P: AsRef<Path>>(path: P) -> Result<Vec<RankedKernel>> {
        let dataset = LibSVMDataset::from_file(path)?;
        KernelAnalysis::new().rank(&dataset)
    }

    /// Best-aligned kernel of the exhaustive bucket for a dataset
    pub fn best_kernel<D: Dataset + ?Sized>(dataset: &D) -> Result<Option<RankedKernel>> {
        Ok(KernelAnalysis::new().rank(dataset)?.into_iter().next())
    }
}
