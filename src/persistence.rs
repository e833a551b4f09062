//! Similarity report serialization and persistence
//!
//! A `SimilarityReport` captures the outcome of one analysis run (the kernel
//! names, the pairwise similarity matrix and the values skipped while
//! populating the bucket) so it can be saved by the CLI and inspected later.

use crate::bucket::{KernelBucket, SkippedKernel};
use crate::core::{DenseMatrix, KernelError, Result};
use crate::similarity::{RankedKernel, SimilarityMetric};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable result of a pairwise similarity analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Name of the analysed bucket
    pub bucket_name: String,
    pub metric: SimilarityMetric,
    /// Kernel descriptions, in bucket order
    pub kernels: Vec<String>,
    /// Pairwise similarity matrix, row by row
    pub matrix: Vec<Vec<f64>>,
    /// Parameter values rejected while populating the bucket
    #[serde(default)]
    pub skipped: Vec<SkippedKernel>,
    /// Kernel-target alignment ranking, when computed
    #[serde(default)]
    pub ranking: Vec<RankedKernel>,
    pub metadata: ReportMetadata,
}

/// Report metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Library version used to create the report
    pub library_version: String,
    pub num_samples: usize,
    pub num_kernels: usize,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl SimilarityReport {
    /// Build a report from an attached bucket and its pairwise similarity matrix
    pub fn from_analysis(
        bucket: &KernelBucket,
        metric: SimilarityMetric,
        matrix: &DenseMatrix,
    ) -> Result<Self> {
        if matrix.shape() != (bucket.size(), bucket.size()) {
            return Err(KernelError::ShapeMismatch {
                left: matrix.shape(),
                right: (bucket.size(), bucket.size()),
            });
        }

        Ok(Self {
            bucket_name: bucket.name().to_string(),
            metric,
            kernels: bucket.kernel_names(),
            matrix: matrix.to_rows(),
            skipped: bucket.skipped().to_vec(),
            ranking: Vec::new(),
            metadata: ReportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                num_samples: bucket.num_samples().unwrap_or(0),
                num_kernels: bucket.size(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        })
    }

    /// Attach a kernel-target alignment ranking
    pub fn with_ranking(mut self, ranking: Vec<RankedKernel>) -> Self {
        self.ranking = ranking;
        self
    }

    /// The similarity matrix as a `DenseMatrix`
    pub fn to_matrix(&self) -> Result<DenseMatrix> {
        DenseMatrix::from_rows(self.matrix.clone())
    }

    /// Save report to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(KernelError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Load report from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let reader = BufReader::new(file);
        let report = serde_json::from_reader(reader)?;
        Ok(report)
    }

    /// Print report summary
    pub fn print_summary(&self) {
        println!("=== Kernel Similarity Report ===");
        println!("Bucket: {}", self.bucket_name);
        println!("Metric: {}", self.metric);
        println!("Samples: {}", self.metadata.num_samples);
        println!("Kernels: {}", self.metadata.num_kernels);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);

        println!("Kernel functions:");
        for (i, name) in self.kernels.iter().enumerate() {
            println!("  [{i:>2}] {name}");
        }

        if !self.skipped.is_empty() {
            println!("Skipped values:");
            for skipped in &self.skipped {
                println!(
                    "  {} {}={}: {}",
                    skipped.kernel, skipped.param, skipped.value, skipped.reason
                );
            }
        }

        if !self.ranking.is_empty() {
            println!("Target alignment ranking:");
            for (rank, item) in self.ranking.iter().enumerate() {
                println!("  {:>2}. {:<32} {:>8.4}", rank + 1, item.name, item.score);
            }
        }
    }
}
