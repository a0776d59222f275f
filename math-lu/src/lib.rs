//! Dense LU decomposition with partial pivoting
//!
//! This crate factors a square matrix `A` into `PA = LU` using Doolittle's
//! method, where `P` is a row permutation chosen by partial pivoting, `L` is
//! unit lower triangular and `U` is upper triangular.
//!
//! # Features
//!
//! - **Pivoting**: row permutation that moves the largest magnitude of each
//!   column onto the diagonal
//! - **Factorization**: Doolittle elimination on a pivoted copy of the input,
//!   with singular pivots reported by position
//! - **Verification**: `PA ≈ LU` oracle plus structural checks of the factors
//! - **Batches**: independent factorizations on the rayon pool
//! - **Generic Scalar Types**: Works with f64 and f32
//!
//! # Example
//!
//! ```
//! use math_audio_lu::{decompose, verify};
//! use ndarray::array;
//!
//! let a = array![
//!     [7.0_f64, 3.0, -1.0, 2.0],
//!     [3.0, 8.0, 1.0, -4.0],
//!     [-1.0, 1.0, 4.0, -1.0],
//!     [2.0, -4.0, -1.0, 6.0],
//! ];
//!
//! let lu = decompose(&a).unwrap();
//! assert!(verify(&a, lu.p(), lu.l(), lu.u(), 1e-10).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod lu;
pub mod matrix;
pub mod parallel;
pub mod pivot;
pub mod traits;
pub mod verify;

// Re-export main types
pub use config::{ConfigError, LuConfig, LuProblem};
pub use error::{LuError, Result};
pub use lu::{
    DEFAULT_PIVOT_TOLERANCE, LuDecomposition, decompose, decompose_batch, decompose_rows,
    decompose_with_tolerance,
};
pub use matrix::{
    Matrix, almost_equal, identity, is_square, is_square_rows, max_abs_diff, multiply,
    square_from_rows, to_rows, transpose,
};
pub use pivot::{pivot_indices, pivot_matrix};
pub use traits::RealField;
pub use verify::{
    DEFAULT_VERIFY_TOLERANCE, VerificationReport, is_permutation_matrix, is_unit_lower_triangular,
    is_upper_triangular, verify, verify_report,
};
