//! Correctness checks for a factorization
//!
//! [`verify`] is the oracle `P·A ≈ L·U`. [`verify_report`] adds the
//! structural checks on the factors and the largest reconstruction error.

use crate::error::Result;
use crate::matrix::{Matrix, almost_equal, identity, max_abs_diff, multiply, transpose};
use crate::traits::RealField;
use serde::{Deserialize, Serialize};

/// Default tolerance used when comparing `P·A` with `L·U`
pub const DEFAULT_VERIFY_TOLERANCE: f64 = 1e-10;

/// Check that `P·A` and `L·U` agree elementwise within `tolerance`
pub fn verify<T: RealField>(
    a: &Matrix<T>,
    p: &Matrix<T>,
    l: &Matrix<T>,
    u: &Matrix<T>,
    tolerance: T,
) -> Result<bool> {
    let pa = multiply(p, a)?;
    let lu = multiply(l, u)?;
    almost_equal(&pa, &lu, tolerance)
}

/// Unit diagonal and zeros above it
pub fn is_unit_lower_triangular<T: RealField>(l: &Matrix<T>, tolerance: T) -> bool {
    l.indexed_iter().all(|((i, j), &v)| {
        if i == j {
            (v - T::one()).abs() <= tolerance
        } else if j > i {
            v.is_zero_approx(tolerance)
        } else {
            true
        }
    })
}

/// Zeros below the diagonal
pub fn is_upper_triangular<T: RealField>(u: &Matrix<T>, tolerance: T) -> bool {
    u.indexed_iter()
        .all(|((i, j), &v)| j >= i || v.is_zero_approx(tolerance))
}

/// Every entry is 0 or 1 and `P·Pᵀ ≈ I`
pub fn is_permutation_matrix<T: RealField>(p: &Matrix<T>, tolerance: T) -> bool {
    let binary = p
        .iter()
        .all(|&v| v.is_zero_approx(tolerance) || (v - T::one()).abs() <= tolerance);
    if !binary {
        return false;
    }

    match multiply(p, &transpose(p)) {
        Ok(ppt) => almost_equal(&ppt, &identity(p.nrows()), tolerance).unwrap_or(false),
        Err(_) => false,
    }
}

/// Outcome of all checks on a factorization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// `P·A ≈ L·U` within the tolerance
    pub reconstructs: bool,
    /// `max |P·A - L·U|`
    pub max_abs_error: f64,
    /// `L` has a unit diagonal and nothing above it
    pub lower_unit_triangular: bool,
    /// `U` has nothing below the diagonal
    pub upper_triangular: bool,
    /// `P` is a permutation of the identity
    pub permutation: bool,
    /// Tolerance used for every check
    pub tolerance: f64,
}

impl VerificationReport {
    /// All checks passed
    pub fn passed(&self) -> bool {
        self.reconstructs && self.lower_unit_triangular && self.upper_triangular && self.permutation
    }
}

/// Run the reconstruction oracle and the structural checks together
pub fn verify_report<T: RealField>(
    a: &Matrix<T>,
    p: &Matrix<T>,
    l: &Matrix<T>,
    u: &Matrix<T>,
    tolerance: T,
) -> Result<VerificationReport> {
    let pa = multiply(p, a)?;
    let lu = multiply(l, u)?;

    Ok(VerificationReport {
        reconstructs: almost_equal(&pa, &lu, tolerance)?,
        max_abs_error: max_abs_diff(&pa, &lu)?.to_real(),
        lower_unit_triangular: is_unit_lower_triangular(l, tolerance),
        upper_triangular: is_upper_triangular(u, tolerance),
        permutation: is_permutation_matrix(p, tolerance),
        tolerance: tolerance.to_real(),
    })
}
