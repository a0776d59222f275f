//! JSON configuration for LU problems
//!
//! A problem file carries the matrix to factor and, optionally, the
//! tolerances used for pivot detection and verification:
//!
//! ```json
//! {
//!   "matrix": [[7, 3, -1, 2], [3, 8, 1, -4], [-1, 1, 4, -1], [2, -4, -1, 6]],
//!   "config": { "pivot_tolerance": 1e-10, "verify_tolerance": 1e-10 },
//!   "description": "diagonally dominant example"
//! }
//! ```

use crate::error::LuError;
use crate::lu::DEFAULT_PIVOT_TOLERANCE;
use crate::matrix::{Matrix, square_from_rows};
use crate::verify::DEFAULT_VERIFY_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a problem file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access problem file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {name}: {value} (must be {requirement})")]
    InvalidTolerance {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("invalid matrix: {0}")]
    Matrix(#[from] LuError),
}

/// Tolerances for factorization and verification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuConfig {
    /// Pivots with a smaller magnitude are reported as singular
    #[serde(default = "default_pivot_tolerance")]
    pub pivot_tolerance: f64,
    /// Largest accepted elementwise deviation between `P·A` and `L·U`
    #[serde(default = "default_verify_tolerance")]
    pub verify_tolerance: f64,
}

impl Default for LuConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: default_pivot_tolerance(),
            verify_tolerance: default_verify_tolerance(),
        }
    }
}

fn default_pivot_tolerance() -> f64 {
    DEFAULT_PIVOT_TOLERANCE
}

fn default_verify_tolerance() -> f64 {
    DEFAULT_VERIFY_TOLERANCE
}

impl LuConfig {
    /// Reject NaN or infinite tolerances, a non-positive pivot tolerance
    /// and a negative verification tolerance
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pivot = self.pivot_tolerance;
        if !pivot.is_finite() || pivot <= 0.0 {
            return Err(ConfigError::InvalidTolerance {
                name: "pivot_tolerance",
                value: pivot,
                requirement: "finite and > 0",
            });
        }

        let verify = self.verify_tolerance;
        if !verify.is_finite() || verify < 0.0 {
            return Err(ConfigError::InvalidTolerance {
                name: "verify_tolerance",
                value: verify,
                requirement: "finite and >= 0",
            });
        }
        Ok(())
    }
}

/// A matrix to factor together with its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuProblem {
    /// Input matrix as nested rows
    pub matrix: Vec<Vec<f64>>,
    /// Tolerances
    #[serde(default)]
    pub config: LuConfig,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl LuProblem {
    /// Create a problem with default tolerances
    pub fn new(matrix: Vec<Vec<f64>>) -> Self {
        Self {
            matrix,
            config: LuConfig::default(),
            description: String::new(),
        }
    }

    /// Parse a problem from a JSON string and validate its tolerances
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let problem: LuProblem = serde_json::from_str(json)?;
        problem.config.validate()?;
        Ok(problem)
    }

    /// Load a problem from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Save the problem to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The input as a square matrix
    pub fn to_matrix(&self) -> Result<Matrix<f64>, ConfigError> {
        Ok(square_from_rows(&self.matrix)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_config_missing() {
        let problem = LuProblem::from_json_str(r#"{ "matrix": [[1, 2], [3, 4]] }"#).unwrap();
        assert_eq!(problem.config, LuConfig::default());
        assert_eq!(problem.config.pivot_tolerance, 1e-10);
        assert!(problem.description.is_empty());
        assert_eq!(problem.to_matrix().unwrap().dim(), (2, 2));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "matrix": [[1]], "config": { "verify_tolerance": 1e-6 } }"#;
        let problem = LuProblem::from_json_str(json).unwrap();
        assert_eq!(problem.config.pivot_tolerance, 1e-10);
        assert_eq!(problem.config.verify_tolerance, 1e-6);
    }

    #[test]
    fn test_invalid_tolerance() {
        let json = r#"{ "matrix": [[1]], "config": { "pivot_tolerance": -1.0 } }"#;
        assert!(matches!(
            LuProblem::from_json_str(json),
            Err(ConfigError::InvalidTolerance {
                name: "pivot_tolerance",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_pivot_tolerance_rejected() {
        let json = r#"{ "matrix": [[1, 2], [2, 4]], "config": { "pivot_tolerance": 0.0 } }"#;
        let err = LuProblem::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTolerance {
                name: "pivot_tolerance",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid pivot_tolerance: 0 (must be finite and > 0)"
        );

        // An exact comparison is still allowed when verifying
        let json = r#"{ "matrix": [[1]], "config": { "verify_tolerance": 0.0 } }"#;
        assert!(LuProblem::from_json_str(json).is_ok());
    }

    #[test]
    fn test_ragged_matrix() {
        let problem = LuProblem::new(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            problem.to_matrix(),
            Err(ConfigError::Matrix(LuError::NotSquare { rows: 2, cols: 1 }))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut problem = LuProblem::new(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
        problem.description = "symmetric".to_string();
        let json = serde_json::to_string(&problem).unwrap();
        assert_eq!(LuProblem::from_json_str(&json).unwrap(), problem);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("lu_problem_{}.json", std::process::id()));
        let problem = LuProblem::new(vec![vec![5.0]]);
        problem.to_file(&path).unwrap();
        assert_eq!(LuProblem::from_file(&path).unwrap(), problem);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            LuProblem::from_file("/nonexistent/lu_problem.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
