//! Core type definitions: sparse samples and dense matrices

use crate::core::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// Sparse vector representation with sorted indices
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    /// Sorted indices of non-zero elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Build a sparse vector from dense values, dropping exact zeros
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Compute squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }

    /// Number of non-zero elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dot product `<x, y>`
    ///
    /// Both index lists are sorted, so this is a single merge pass in
    /// O(nnz(x) + nnz(y)).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut result = 0.0;
        self.merge(other, |a, b| result += a * b);
        result
    }

    /// Squared Euclidean distance `||x - y||²`
    pub fn squared_distance(&self, other: &SparseVector) -> f64 {
        let mut distance_sq = 0.0;
        self.merge(other, |a, b| {
            let diff = a - b;
            distance_sq += diff * diff;
        });
        distance_sq
    }

    /// Manhattan distance `||x - y||₁`
    pub fn l1_distance(&self, other: &SparseVector) -> f64 {
        let mut distance = 0.0;
        self.merge(other, |a, b| distance += (a - b).abs());
        distance
    }

    /// Walk the union of non-zero indices, calling `f(x_i, y_i)` for each.
    ///
    /// Missing entries are passed as 0.0. Callers that only need the
    /// intersection (dot products) still see zeros for the rest, which
    /// contribute nothing.
    pub(crate) fn merge<F: FnMut(f64, f64)>(&self, other: &SparseVector, mut f: F) {
        let mut i = 0;
        let mut j = 0;

        while i < self.indices.len() && j < other.indices.len() {
            let x_idx = self.indices[i];
            let y_idx = other.indices[j];

            if x_idx == y_idx {
                f(self.values[i], other.values[j]);
                i += 1;
                j += 1;
            } else if x_idx < y_idx {
                f(self.values[i], 0.0);
                i += 1;
            } else {
                f(0.0, other.values[j]);
                j += 1;
            }
        }

        for &v in &self.values[i..] {
            f(v, 0.0);
        }
        for &v in &other.values[j..] {
            f(0.0, v);
        }
    }
}

/// A sample: sparse features plus a real-valued target
#[derive(Clone, Debug)]
pub struct Sample {
    /// Feature vector (sparse representation)
    pub features: SparseVector,
    /// Target value (class label or regression target)
    pub target: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: SparseVector, target: f64) -> Self {
        Self { features, target }
    }
}

/// Row-major dense matrix of `f64`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Matrix of the given shape with every entry set to `value`
    pub fn filled(n_rows: usize, n_cols: usize, value: f64) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![value; n_rows * n_cols],
        }
    }

    /// Matrix of zeros
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::filled(n_rows, n_cols, 0.0)
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(KernelError::DimensionMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            n_rows,
            n_cols,
            data,
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    /// Element at (i, j)
    ///
    /// # Panics
    /// Panics if the index is out of bounds
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n_rows && j < self.n_cols, "Matrix index out of bounds");
        self.data[i * self.n_cols + j]
    }

    /// Set the element at (i, j)
    ///
    /// # Panics
    /// Panics if the index is out of bounds
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.n_rows && j < self.n_cols, "Matrix index out of bounds");
        self.data[i * self.n_cols + j] = value;
    }

    /// Row-major flattening of all entries
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n_rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Diagonal entries of a square matrix
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.n_rows.min(self.n_cols))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// True when square and `|a_ij - a_ji| <= tolerance` everywhere.
    /// NaN entries compare unequal.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.n_rows {
            for j in (i + 1)..self.n_cols {
                if !((self.get(i, j) - self.get(j, i)).abs() <= tolerance) {
                    return false;
                }
            }
        }
        true
    }
}
