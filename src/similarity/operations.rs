//! Matrix operations used by the similarity metrics

use crate::core::{DenseMatrix, KernelError, Result};

/// Norms at or below this are treated as zero
const ZERO_NORM_TOLERANCE: f64 = 1e-8;

/// What `alignment_centered` does when a centered matrix has zero norm
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnZeroDivision {
    /// Return `KernelError::ZeroDivision`
    Raise,
    /// Return this value instead
    Value(f64),
}

/// Center a square kernel matrix: K_c = H K H, with H = I - (1/n) 1 1^T
///
/// Entry-wise: K_c[i][j] = K[i][j] - row_mean[i] - col_mean[j] + grand_mean
pub fn center_km(km: &DenseMatrix) -> Result<DenseMatrix> {
    if !km.is_square() {
        return Err(KernelError::InvalidInput(format!(
            "centering requires a square matrix, got {:?}",
            km.shape()
        )));
    }

    let n = km.n_rows();
    if n == 0 {
        return Ok(km.clone());
    }
    let n_f = n as f64;

    let mut row_means = vec![0.0; n];
    let mut col_means = vec![0.0; n];
    let mut grand_mean = 0.0;
    for i in 0..n {
        for (j, &val) in km.row(i).iter().enumerate() {
            row_means[i] += val;
            col_means[j] += val;
            grand_mean += val;
        }
    }
    for mean in row_means.iter_mut().chain(col_means.iter_mut()) {
        *mean /= n_f;
    }
    grand_mean /= n_f * n_f;

    let mut centered = DenseMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            centered.set(i, j, km.get(i, j) - row_means[i] - col_means[j] + grand_mean);
        }
    }
    Ok(centered)
}

/// Frobenius inner product <A, B>_F = Σ_ij a_ij b_ij
pub fn frobenius_product(a: &DenseMatrix, b: &DenseMatrix) -> Result<f64> {
    check_same_shape(a, b)?;
    Ok(a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x * y)
        .sum())
}

/// Frobenius norm ||A||_F
pub fn frobenius_norm(a: &DenseMatrix) -> f64 {
    a.as_slice().iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Centered alignment between two kernel matrices:
///
/// A(K1, K2) = <K1c, K2c>_F / (||K1c||_F ||K2c||_F)
pub fn alignment_centered(
    km_one: &DenseMatrix,
    km_two: &DenseMatrix,
    on_zero_division: OnZeroDivision,
) -> Result<f64> {
    check_same_shape(km_one, km_two)?;

    let centered_one = center_km(km_one)?;
    let centered_two = center_km(km_two)?;

    let norm_one = frobenius_norm(&centered_one);
    let norm_two = frobenius_norm(&centered_two);

    if norm_one <= ZERO_NORM_TOLERANCE || norm_two <= ZERO_NORM_TOLERANCE {
        return match on_zero_division {
            OnZeroDivision::Value(value) => Ok(value),
            OnZeroDivision::Raise => Err(KernelError::ZeroDivision(
                "centered kernel matrix has zero Frobenius norm".to_string(),
            )),
        };
    }

    Ok(frobenius_product(&centered_one, &centered_two)? / (norm_one * norm_two))
}

pub(crate) fn check_same_shape(a: &DenseMatrix, b: &DenseMatrix) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(KernelError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}
