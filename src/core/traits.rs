//! Core traits for datasets and kernel collections

use crate::core::Sample;
use crate::matrix::KernelMatrix;

/// Dataset abstraction for loaded samples
pub trait Dataset {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// All samples, in file order
    fn samples(&self) -> &[Sample];

    /// Get all targets as a vector (for the ideal kernel)
    fn targets(&self) -> Vec<f64> {
        self.samples().iter().map(|s| s.target).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered, indexable collection of kernel matrices
pub trait KernelCollection {
    /// Label identifying the collection
    fn name(&self) -> &str;

    /// Number of kernel matrices held
    fn size(&self) -> usize;

    /// Kernel matrix at `index`, if present
    fn get(&self, index: usize) -> Option<&KernelMatrix>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
