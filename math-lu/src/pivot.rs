//! Partial pivoting for Doolittle's method
//!
//! The pivot order is chosen once, from the columns of the input matrix,
//! before any elimination takes place. The factorizer then works on the
//! reordered copy `PA`.

use crate::error::{LuError, Result};
use crate::matrix::{Matrix, is_square};
use crate::traits::RealField;
use ndarray::Array2;

/// Row order selected by partial pivoting.
///
/// Entry `i` is the row of the input that ends up in row `i` of `PA`, so
/// the permutation matrix has a one at `(i, perm[i])`. For each column `j`
/// the row in `j..n` with the largest `|M[r][j]|` is swapped into position
/// `j`; on ties the lowest row index wins.
pub fn pivot_indices<T: RealField>(m: &Matrix<T>) -> Result<Vec<usize>> {
    if !is_square(m) {
        return Err(LuError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }

    let n = m.nrows();
    let mut perm: Vec<usize> = (0..n).collect();

    for j in 0..n {
        let mut max_row = j;
        let mut max_val = m[[j, j]].abs();
        for r in (j + 1)..n {
            let val = m[[r, j]].abs();
            if val > max_val {
                max_val = val;
                max_row = r;
            }
        }

        if max_row != j {
            log::debug!("pivot: column {} swaps rows {} and {}", j, j, max_row);
            perm.swap(j, max_row);
        }
    }

    Ok(perm)
}

/// Build the permutation matrix `P` such that `PA` puts the largest
/// available magnitude on each diagonal position.
///
/// This only determines the row reordering; it does not factor the matrix.
pub fn pivot_matrix<T: RealField>(m: &Matrix<T>) -> Result<Matrix<T>> {
    let perm = pivot_indices(m)?;
    Ok(permutation_matrix(&perm))
}

pub(crate) fn permutation_matrix<T: RealField>(perm: &[usize]) -> Matrix<T> {
    let n = perm.len();
    let mut p = Array2::zeros((n, n));
    for (i, &col) in perm.iter().enumerate() {
        p[[i, col]] = T::one();
    }
    p
}
