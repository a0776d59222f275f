//! Dense square matrix helpers
//!
//! Shape predicates, construction from nested rows, and the products and
//! comparisons used by pivoting, factorization and verification. Every
//! function here is pure: inputs are borrowed, results are freshly allocated.

use crate::error::{LuError, Result};
use crate::traits::RealField;
use ndarray::Array2;

/// Dense row-major matrix
pub type Matrix<T = f64> = Array2<T>;

/// Check that a matrix is non-empty and has as many rows as columns
pub fn is_square<T>(m: &Matrix<T>) -> bool {
    m.nrows() > 0 && m.nrows() == m.ncols()
}

/// Check that nested rows are non-empty and every row is as long as the row count
pub fn is_square_rows<T>(rows: &[Vec<T>]) -> bool {
    !rows.is_empty() && rows.iter().all(|row| row.len() == rows.len())
}

/// Build a square matrix from nested rows.
///
/// Empty, ragged or rectangular input is rejected with [`LuError::NotSquare`];
/// `cols` reports the length of the first row that does not match.
pub fn square_from_rows<T: RealField>(rows: &[Vec<T>]) -> Result<Matrix<T>> {
    let n = rows.len();
    if let Some(bad) = rows.iter().find(|row| row.len() != n) {
        return Err(LuError::NotSquare {
            rows: n,
            cols: bad.len(),
        });
    }
    if n == 0 {
        return Err(LuError::NotSquare { rows: 0, cols: 0 });
    }

    Ok(Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]))
}

/// Copy a matrix back into nested rows
pub fn to_rows<T: Clone>(m: &Matrix<T>) -> Vec<Vec<T>> {
    m.outer_iter().map(|row| row.to_vec()).collect()
}

/// n×n identity matrix
pub fn identity<T: RealField>(n: usize) -> Matrix<T> {
    Array2::eye(n)
}

/// Transposed copy of a matrix
pub fn transpose<T: RealField>(m: &Matrix<T>) -> Matrix<T> {
    m.t().to_owned()
}

fn check_same_square<T>(m: &Matrix<T>, n: &Matrix<T>) -> Result<()> {
    if !is_square(m) || !is_square(n) || m.nrows() != n.nrows() {
        return Err(LuError::dimension_mismatch(m.dim(), n.dim()));
    }
    Ok(())
}

/// Matrix product `M·N` of two square matrices of the same dimension
pub fn multiply<T: RealField>(m: &Matrix<T>, n: &Matrix<T>) -> Result<Matrix<T>> {
    check_same_square(m, n)?;
    Ok(m.dot(n))
}

/// Elementwise comparison: `|M[i][j] - N[i][j]| <= tolerance` for every entry.
///
/// NaN entries never compare equal.
pub fn almost_equal<T: RealField>(m: &Matrix<T>, n: &Matrix<T>, tolerance: T) -> Result<bool> {
    if m.dim() != n.dim() {
        return Err(LuError::dimension_mismatch(m.dim(), n.dim()));
    }
    Ok(m
        .iter()
        .zip(n.iter())
        .all(|(&a, &b)| (a - b).abs() <= tolerance))
}

/// Largest elementwise deviation `max |M[i][j] - N[i][j]|`
pub fn max_abs_diff<T: RealField>(m: &Matrix<T>, n: &Matrix<T>) -> Result<T> {
    if m.dim() != n.dim() {
        return Err(LuError::dimension_mismatch(m.dim(), n.dim()));
    }
    Ok(m
        .iter()
        .zip(n.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())))
}
