//! Scalar trait for the factorization routines
//!
//! [`RealField`] abstracts over the real floating-point types so the same
//! matrix operations, pivoting and elimination code serve `f64` and `f32`.

use ndarray::LinalgScalar;
use num_traits::{Float, NumAssign};
use std::fmt::{Debug, Display};

/// Trait for real scalar types that can be stored in a [`crate::Matrix`].
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for most applications)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Float + NumAssign + LinalgScalar + Send + Sync + Debug + Display + 'static
{
    /// Convert a tolerance or literal given in `f64`
    fn from_real(r: f64) -> Self;

    /// Widen to `f64` for reporting
    fn to_real(self) -> f64;

    /// Check if this is approximately zero
    fn is_zero_approx(&self, tol: Self) -> bool {
        self.abs() <= tol
    }
}

impl RealField for f64 {
    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn to_real(self) -> f64 {
        self
    }
}

impl RealField for f32 {
    #[inline]
    fn from_real(r: f64) -> Self {
        r as f32
    }

    #[inline]
    fn to_real(self) -> f64 {
        self as f64
    }
}
