//! Similarity between kernel matrices
//!
//! Two metrics compare a pair of kernel matrices of equal shape:
//! - `corr`: Pearson correlation of the row-major flattenings
//! - `align`: centered alignment, 0.0 when a centered matrix vanishes
//!
//! `pairwise_similarity` applies a metric to every pair of entries in a
//! collection; `target_alignment` scores each entry against the ideal kernel
//! built from the labels.

pub mod operations;

pub use self::operations::{alignment_centered, center_km, OnZeroDivision};

use crate::core::{DenseMatrix, KernelCollection, KernelError, Result};
use crate::utils::{memory, stats};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Valid names accepted by `pairwise_similarity`
pub const SIMILARITY_METRICS: [&str; 2] = ["corr", "align"];

/// Metric used to compare two kernel matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    Correlation,
    Alignment,
}

impl SimilarityMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Correlation => "corr",
            SimilarityMetric::Alignment => "align",
        }
    }

    /// Similarity between two kernel matrices under this metric
    pub fn evaluate(&self, km_one: &DenseMatrix, km_two: &DenseMatrix) -> Result<f64> {
        match self {
            SimilarityMetric::Correlation => correlation_km(km_one, km_two),
            SimilarityMetric::Alignment => {
                alignment_centered(km_one, km_two, OnZeroDivision::Value(0.0))
            }
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMetric {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "corr" => Ok(SimilarityMetric::Correlation),
            "align" => Ok(SimilarityMetric::Alignment),
            _ => Err(KernelError::UnknownMetric {
                given: s.to_string(),
                valid: SIMILARITY_METRICS.join(", "),
            }),
        }
    }
}

/// Kernel matrix of an ideal kernel: the outer product `y y^T` of the targets
///
/// # Examples
/// ```
/// use kernelbucket::similarity::ideal_kernel;
///
/// let km = ideal_kernel(&[1.0, -1.0, 1.0]);
/// assert_eq!(km.row(1), &[-1.0, 1.0, -1.0]);
/// ```
pub fn ideal_kernel(targets: &[f64]) -> DenseMatrix {
    let n = targets.len();
    let mut km = DenseMatrix::zeros(n, n);
    for (i, &yi) in targets.iter().enumerate() {
        for (j, &yj) in targets.iter().enumerate() {
            km.set(i, j, yi * yj);
        }
    }
    km
}

/// Pearson correlation between two kernel matrices of the same shape
pub fn correlation_km(km_one: &DenseMatrix, km_two: &DenseMatrix) -> Result<f64> {
    operations::check_same_shape(km_one, km_two)?;
    stats::pearson(km_one.as_slice(), km_two.as_slice())
}

/// Pairwise similarity matrix of a collection, metric given by name
///
/// An unknown metric name fails before any kernel matrix is computed.
/// With `corr`, a single constant kernel matrix (e.g. from duplicated
/// samples) fails the whole call with `ZeroVariance` instead of leaving a
/// NaN cell; use `align` when degenerate entries are expected.
pub fn pairwise_similarity<C>(bucket: &C, metric: &str) -> Result<DenseMatrix>
where
    C: KernelCollection + ?Sized,
{
    let metric = metric.parse::<SimilarityMetric>()?;
    pairwise_similarity_with(bucket, metric)
}

/// Pairwise similarity matrix of a collection
///
/// Entry (i, j) is the similarity between the i-th and j-th kernel matrices.
/// Only the upper triangle (diagonal included) is evaluated; the lower
/// triangle is mirrored from it.
pub fn pairwise_similarity_with<C>(bucket: &C, metric: SimilarityMetric) -> Result<DenseMatrix>
where
    C: KernelCollection + ?Sized,
{
    let num_kernels = bucket.size();
    debug!(
        "Computing pairwise '{}' similarity for '{}': {} kernels, {} evaluations",
        metric,
        bucket.name(),
        num_kernels,
        memory::pairwise_evaluations(num_kernels)
    );

    let mut pairwise = DenseMatrix::filled(num_kernels, num_kernels, f64::NAN);
    for i in 0..num_kernels {
        let km_i = entry(bucket, i)?.full()?;
        for j in i..num_kernels {
            let km_j = entry(bucket, j)?.full()?;
            pairwise.set(i, j, metric.evaluate(km_i, km_j)?);
        }
    }

    for i in 0..num_kernels {
        for j in (i + 1)..num_kernels {
            let value = pairwise.get(i, j);
            pairwise.set(j, i, value);
        }
    }

    Ok(pairwise)
}

/// Centered alignment of every entry in a collection with the ideal kernel
pub fn target_alignment<C>(bucket: &C, targets: &[f64]) -> Result<Vec<f64>>
where
    C: KernelCollection + ?Sized,
{
    let ideal = ideal_kernel(targets);
    (0..bucket.size())
        .map(|i| {
            let km = entry(bucket, i)?.full()?;
            alignment_centered(km, &ideal, OnZeroDivision::Value(0.0))
        })
        .collect()
}

/// One entry of a target-alignment ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedKernel {
    /// Position of the kernel in the collection
    pub index: usize,
    pub name: String,
    pub score: f64,
}

/// Entries of a collection sorted by decreasing alignment with the ideal kernel
pub fn rank_by_target_alignment<C>(bucket: &C, targets: &[f64]) -> Result<Vec<RankedKernel>>
where
    C: KernelCollection + ?Sized,
{
    let scores = target_alignment(bucket, targets)?;
    let mut ranked = scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| {
            Ok(RankedKernel {
                index,
                name: entry(bucket, index)?.name(),
                score,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // stable, so ties keep collection order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

fn entry<C>(bucket: &C, index: usize) -> Result<&crate::matrix::KernelMatrix>
where
    C: KernelCollection + ?Sized,
{
    bucket.get(index).ok_or(KernelError::IndexOutOfBounds {
        index,
        len: bucket.size(),
    })
}
