//! LU decomposition with partial pivoting
//!
//! Doolittle's method on a pivoted copy of the input: `PA = LU` with `L`
//! unit lower triangular and `U` upper triangular. The input matrix is only
//! borrowed; `P`, `L` and `U` are allocated fresh on every call.

use crate::error::{LuError, Result};
use crate::matrix::{Matrix, is_square, multiply, square_from_rows};
use crate::parallel::{is_parallel_available, parallel_map};
use crate::pivot::{permutation_matrix, pivot_indices};
use crate::traits::RealField;
use crate::verify::verify;
use ndarray::Array2;

/// Pivot magnitude below which the matrix is treated as singular
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// LU factorization result
///
/// Holds the permutation, lower and upper factors such that `P·A ≈ L·U`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition<T: RealField> {
    p: Matrix<T>,
    l: Matrix<T>,
    u: Matrix<T>,
    perm: Vec<usize>,
}

impl<T: RealField> LuDecomposition<T> {
    /// Permutation matrix `P`
    pub fn p(&self) -> &Matrix<T> {
        &self.p
    }

    /// Unit lower triangular factor `L`
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper triangular factor `U`
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Row order of `PA`: `P[i][perm[i]] == 1`
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Matrix dimension
    pub fn dim(&self) -> usize {
        self.perm.len()
    }

    /// Consume the decomposition, returning `(P, L, U)`
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.p, self.l, self.u)
    }

    /// Check `P·A ≈ L·U` against the matrix this decomposition came from
    pub fn verify(&self, a: &Matrix<T>, tolerance: T) -> Result<bool> {
        verify(a, &self.p, &self.l, &self.u, tolerance)
    }
}

/// Compute the LU factorization of `a` with the default pivot tolerance.
///
/// # Example
///
/// ```
/// use math_audio_lu::decompose;
/// use ndarray::array;
///
/// let a = array![[1.0_f64, 2.0], [3.0, 4.0]];
/// let lu = decompose(&a).unwrap();
///
/// assert_eq!(lu.perm(), &[1, 0]);
/// assert!(lu.verify(&a, 1e-10).unwrap());
/// ```
pub fn decompose<T: RealField>(a: &Matrix<T>) -> Result<LuDecomposition<T>> {
    decompose_with_tolerance(a, T::from_real(DEFAULT_PIVOT_TOLERANCE))
}

/// Compute the LU factorization of `a`, failing when a pivot magnitude
/// drops below `tolerance`.
///
/// An exact zero pivot is singular whatever the tolerance, so `0.0` only
/// disables the magnitude check.
pub fn decompose_with_tolerance<T: RealField>(
    a: &Matrix<T>,
    tolerance: T,
) -> Result<LuDecomposition<T>> {
    if !is_square(a) {
        return Err(LuError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let n = a.nrows();
    log::debug!("LU decomposition of a {}x{} matrix", n, n);

    let perm = pivot_indices(a)?;
    let p = permutation_matrix(&perm);
    let pa = multiply(&p, a)?;

    let mut l: Matrix<T> = Array2::zeros((n, n));
    let mut u: Matrix<T> = Array2::zeros((n, n));

    for j in 0..n {
        l[[j, j]] = T::one();

        // Column j of U, rows 0..=j
        for i in 0..=j {
            let mut sum = T::zero();
            for k in 0..i {
                sum += u[[k, j]] * l[[i, k]];
            }
            u[[i, j]] = pa[[i, j]] - sum;
        }

        let pivot = u[[j, j]];
        if pivot.is_nan() || pivot == T::zero() || pivot.abs() < tolerance {
            log::warn!(
                "singular pivot at U[{}][{}]: |{}| < {}",
                j,
                j,
                pivot,
                tolerance
            );
            return Err(LuError::SingularPivot { row: j, col: j });
        }

        // Column j of L below the diagonal
        for i in (j + 1)..n {
            let mut sum = T::zero();
            for k in 0..j {
                sum += u[[k, j]] * l[[i, k]];
            }
            l[[i, j]] = (pa[[i, j]] - sum) / pivot;
        }
    }

    Ok(LuDecomposition { p, l, u, perm })
}

/// Build a matrix from nested rows and factor it.
///
/// Ragged or rectangular rows fail with [`LuError::NotSquare`].
pub fn decompose_rows<T: RealField>(rows: &[Vec<T>]) -> Result<LuDecomposition<T>> {
    let a = square_from_rows(rows)?;
    decompose(&a)
}

/// Factor a batch of independent matrices.
///
/// Each matrix is decomposed on its own; one failure does not affect the
/// others. Results are returned in input order. Runs on the rayon pool when
/// the `rayon` feature is enabled.
pub fn decompose_batch<T: RealField>(
    matrices: &[Matrix<T>],
    tolerance: T,
) -> Vec<Result<LuDecomposition<T>>> {
    log::debug!(
        "LU batch of {} matrices ({})",
        matrices.len(),
        if is_parallel_available() {
            "parallel"
        } else {
            "sequential"
        }
    );
    parallel_map(matrices, |a| decompose_with_tolerance(a, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{identity, transpose};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn example_4x4() -> Matrix<f64> {
        array![
            [7.0, 3.0, -1.0, 2.0],
            [3.0, 8.0, 1.0, -4.0],
            [-1.0, 1.0, 4.0, -1.0],
            [2.0, -4.0, -1.0, 6.0]
        ]
    }

    #[test]
    fn test_lu_example_4x4() {
        let a = example_4x4();
        let lu = decompose(&a).expect("factorization should succeed");

        assert_eq!(lu.p(), &identity::<f64>(4));
        assert_relative_eq!(lu.p()[[0, 0]], 1.0);
        assert!(lu.verify(&a, 1e-10).unwrap());

        // First row of U is the first row of PA
        for j in 0..4 {
            assert_relative_eq!(lu.u()[[0, j]], a[[0, j]]);
        }
        assert_relative_eq!(lu.l()[[1, 0]], 3.0 / 7.0, epsilon = 1e-14);
    }

    #[test]
    fn test_lu_1x1() {
        let a = array![[5.0_f64]];
        let lu = decompose(&a).unwrap();
        assert_eq!(lu.p(), &array![[1.0]]);
        assert_eq!(lu.l(), &array![[1.0]]);
        assert_eq!(lu.u(), &array![[5.0]]);
        assert_eq!(lu.dim(), 1);
    }

    #[test]
    fn test_lu_with_row_swap() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        let lu = decompose(&a).unwrap();

        assert_eq!(lu.perm(), &[1, 0]);
        assert_relative_eq!(lu.u()[[0, 0]], 3.0);
        assert_relative_eq!(lu.u()[[0, 1]], 4.0);
        assert_eq!(lu.u()[[1, 0]], 0.0);
        assert_relative_eq!(lu.u()[[1, 1]], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(lu.l()[[1, 0]], 1.0 / 3.0);
        assert!(lu.verify(&a, 1e-12).unwrap());
    }

    #[test]
    fn test_lu_singular() {
        let a = array![[1.0_f64, 2.0], [2.0, 4.0]];
        let err = decompose(&a).unwrap_err();
        assert_eq!(err, LuError::SingularPivot { row: 1, col: 1 });
        assert!(err.is_numerical_error());
    }

    #[test]
    fn test_lu_zero_first_pivot() {
        let a = Array2::<f64>::zeros((3, 3));
        assert_eq!(
            decompose(&a).unwrap_err(),
            LuError::SingularPivot { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_lu_nan_is_singular() {
        let a = array![[f64::NAN, 1.0], [1.0, 1.0]];
        assert!(matches!(
            decompose(&a),
            Err(LuError::SingularPivot { .. })
        ));
    }

    #[test]
    fn test_lu_not_square() {
        let a = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            decompose(&a).unwrap_err(),
            LuError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn test_lu_custom_tolerance() {
        let a = array![[1e-6_f64, 0.0], [0.0, 1.0]];
        assert!(decompose(&a).is_ok());
        assert_eq!(
            decompose_with_tolerance(&a, 1e-3).unwrap_err(),
            LuError::SingularPivot { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_lu_zero_pivot_with_zero_tolerance() {
        // Exact zero at U[0][0] must not be divided through
        let a = array![[0.0_f64, 1.0], [0.0, 1.0]];
        assert_eq!(
            decompose_with_tolerance(&a, 0.0).unwrap_err(),
            LuError::SingularPivot { row: 0, col: 0 }
        );

        let a = array![[1.0_f64, 2.0], [2.0, 4.0]];
        assert_eq!(
            decompose_with_tolerance(&a, 0.0).unwrap_err(),
            LuError::SingularPivot { row: 1, col: 1 }
        );
    }

    #[test]
    fn test_lu_pivot_at_tolerance_accepted() {
        let a = array![[1e-3_f64, 0.0], [0.0, 1.0]];
        let lu = decompose_with_tolerance(&a, 1e-3).expect("pivot equal to tolerance is accepted");
        assert_eq!(lu.u()[[0, 0]], 1e-3);
        assert!(lu.verify(&a, 1e-12).unwrap());
    }

    #[test]
    fn test_lu_factor_structure() {
        let a = array![[2.0_f64, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]];
        let lu = decompose(&a).unwrap();
        let (p, l, u) = lu.into_parts();

        for i in 0..3 {
            assert_eq!(l[[i, i]], 1.0);
            for j in (i + 1)..3 {
                assert_eq!(l[[i, j]], 0.0);
            }
            for j in 0..i {
                assert_eq!(u[[i, j]], 0.0);
            }
        }
        assert_eq!(multiply(&p, &transpose(&p)).unwrap(), identity::<f64>(3));
    }

    #[test]
    fn test_lu_f32() {
        let a = array![[4.0_f32, 3.0], [6.0, 3.0]];
        let lu = decompose(&a).unwrap();
        assert_eq!(lu.perm(), &[1, 0]);
        assert!(lu.verify(&a, 1e-5).unwrap());
    }

    #[test]
    fn test_decompose_rows() {
        let rows = vec![vec![4.0_f64, 3.0], vec![6.0, 3.0]];
        assert!(decompose_rows(&rows).is_ok());

        let ragged = vec![vec![4.0_f64, 3.0], vec![6.0]];
        assert_eq!(
            decompose_rows(&ragged).unwrap_err(),
            LuError::NotSquare { rows: 2, cols: 1 }
        );
    }

    #[test]
    fn test_decompose_batch_keeps_order() {
        let batch = vec![
            example_4x4(),
            array![[1.0_f64, 2.0], [2.0, 4.0]],
            array![[5.0_f64]],
        ];
        let results = decompose_batch(&batch, 1e-10);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &decompose(&batch[0]).unwrap());
        assert_eq!(
            results[1].as_ref().unwrap_err(),
            &LuError::SingularPivot { row: 1, col: 1 }
        );
        assert_eq!(results[2].as_ref().unwrap().u(), &array![[5.0]]);
    }
}
