//! LibSVM format dataset implementation
//!
//! Supports loading datasets in the libsvm format:
//! target index:value index:value ...
//!
//! Example:
//! +1 1:0.5 3:1.2 7:0.8
//! -1 2:0.3 5:2.1
//!
//! Targets are kept as written; regression targets and multi-class labels
//! are both valid inputs for the ideal kernel.

use crate::core::{Dataset, KernelError, Result, Sample, SparseVector};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for LibSVM format files
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    samples: Vec<Sample>,
    dimensions: usize,
}

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut samples = Vec::new();
        let mut dimensions = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(KernelError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (sample, max_idx) = Self::parse_line(line).map_err(|e| {
                KernelError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;
            if let Some(max_idx) = max_idx {
                dimensions = dimensions.max(max_idx + 1);
            }
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(KernelError::EmptyDataset);
        }

        Ok(LibSVMDataset {
            samples,
            dimensions,
        })
    }

    /// Parse one line; also returns the largest 0-based feature index, if any
    fn parse_line(line: &str) -> Result<(Sample, Option<usize>)> {
        let mut parts = line.split_whitespace();

        let target_str = parts
            .next()
            .ok_or_else(|| KernelError::ParseError("Empty line".to_string()))?;
        let target = target_str
            .parse::<f64>()
            .map_err(|_| KernelError::ParseError(format!("Invalid target: {target_str}")))?;

        let mut indices = Vec::new();
        let mut values = Vec::new();

        for feature_str in parts {
            let (index_str, value_str) = feature_str.split_once(':').ok_or_else(|| {
                KernelError::ParseError(format!("Invalid feature format: {feature_str}"))
            })?;

            let index = index_str.parse::<usize>().map_err(|_| {
                KernelError::ParseError(format!("Invalid feature index: {index_str}"))
            })?;
            let value = value_str.parse::<f64>().map_err(|_| {
                KernelError::ParseError(format!("Invalid feature value: {value_str}"))
            })?;

            // 1-based on disk
            if index == 0 {
                return Err(KernelError::ParseError(
                    "Feature index must be positive: 0".to_string(),
                ));
            }
            if indices.contains(&(index - 1)) {
                return Err(KernelError::ParseError(format!(
                    "Duplicate feature index: {index}"
                )));
            }

            indices.push(index - 1);
            values.push(value);
        }

        let max_index = indices.iter().copied().max();
        Ok((Sample::new(SparseVector::new(indices, values), target), max_index))
    }
}

impl Dataset for LibSVMDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
