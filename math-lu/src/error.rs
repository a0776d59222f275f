//! Error types for LU factorization.
//!
//! Every error is terminal for the call that produced it: no partial
//! factors are returned alongside an error.

use thiserror::Error;

/// Errors that can occur while building, factoring or comparing matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LuError {
    /// The input is empty, ragged, or has a different number of rows and columns.
    #[error("matrix must be square: got {rows} rows and {cols} columns")]
    NotSquare {
        /// Number of rows supplied
        rows: usize,
        /// Number of columns of the first offending row
        cols: usize,
    },

    /// A pivot fell below the tolerance during elimination.
    #[error("zero pivot encountered at U[{row}][{col}]")]
    SingularPivot {
        /// Row of the offending pivot
        row: usize,
        /// Column of the offending pivot
        col: usize,
    },

    /// Operands of an auxiliary matrix operation have incompatible shapes.
    #[error(
        "matrix dimensions mismatch: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}"
    )]
    DimensionMismatch {
        /// Rows of the left operand
        left_rows: usize,
        /// Columns of the left operand
        left_cols: usize,
        /// Rows of the right operand
        right_rows: usize,
        /// Columns of the right operand
        right_cols: usize,
    },
}

/// A specialized `Result` type for LU operations.
pub type Result<T> = std::result::Result<T, LuError>;

impl LuError {
    /// Returns `true` if the caller supplied malformed input.
    ///
    /// This includes `NotSquare` and `DimensionMismatch`.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            LuError::NotSquare { .. } | LuError::DimensionMismatch { .. }
        )
    }

    /// Returns `true` if the input was well formed but numerically degenerate.
    pub fn is_numerical_error(&self) -> bool {
        matches!(self, LuError::SingularPivot { .. })
    }

    pub(crate) fn dimension_mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        LuError::DimensionMismatch {
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }
}
