//! Parallel utilities with feature-gated implementations
//!
//! Uses rayon when the `rayon` feature is enabled, with a sequential fallback.

/// Check if parallel processing is available
#[cfg(feature = "rayon")]
pub fn is_parallel_available() -> bool {
    true
}

/// Check if parallel processing is available
#[cfg(not(feature = "rayon"))]
pub fn is_parallel_available() -> bool {
    false
}

/// Parallel map over a slice, preserving order
#[cfg(feature = "rayon")]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    data.par_iter().map(f).collect()
}

/// Sequential map (fallback when parallel is not available)
#[cfg(not(feature = "rayon"))]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    data.iter().map(f).collect()
}
