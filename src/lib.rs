//! Kernel buckets: collections of kernel matrices over one dataset
//!
//! A bucket is populated from parameter grids over several kernel families,
//! attached to a set of samples, and then analysed by comparing its kernel
//! matrices with each other (correlation or centered alignment) or with the
//! ideal kernel built from the targets.

pub mod api;
pub mod bucket;
pub mod cache;
pub mod config;
pub mod core;
pub mod data;
pub mod kernel;
pub mod matrix;
pub mod persistence;
pub mod similarity;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::KernelAnalysis;
pub use crate::bucket::{
    make_kernel_bucket, make_kernel_bucket_with_presets, BucketConfig, BucketStrategy,
    KernelBucket, SkippedKernel,
};
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{CSVDataset, LibSVMDataset};
pub use crate::kernel::{Kernel, KernelFamily};
pub use crate::matrix::{KernelMatrix, KernelSet};
pub use crate::persistence::SimilarityReport;
pub use crate::similarity::{
    correlation_km, ideal_kernel, pairwise_similarity, pairwise_similarity_with,
    rank_by_target_alignment, target_alignment, SimilarityMetric,
};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
