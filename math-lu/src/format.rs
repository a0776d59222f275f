//! Text rendering of matrices
//!
//! Pure string builders for callers that want to print factors; the
//! factorization itself never formats or prints anything.

use crate::matrix::Matrix;

/// Rendering style for [`render_matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixStyle {
    /// One bracketed line per row, fixed width and precision
    #[default]
    Plain,
    /// Box-drawing frame; integral entries are printed without decimals
    Boxed,
}

/// Render a matrix in the requested style
pub fn render_matrix(m: &Matrix<f64>, precision: usize, style: MatrixStyle) -> String {
    match style {
        MatrixStyle::Plain => format_matrix(m, precision),
        MatrixStyle::Boxed => format_boxed(m, precision),
    }
}

/// One `[ ... ]` line per row, each entry right-aligned in `precision + 3` columns
pub fn format_matrix(m: &Matrix<f64>, precision: usize) -> String {
    let width = precision + 3;
    m.outer_iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|&x| format!("{:>width$.precision$}", clean_zero(x)))
                .collect();
            format!("[{}]", cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Box-drawing frame around the matrix, columns separated by `│`
pub fn format_boxed(m: &Matrix<f64>, precision: usize) -> String {
    let cells: Vec<Vec<String>> = m
        .outer_iter()
        .map(|row| row.iter().map(|&x| format_entry(x, precision)).collect())
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);
    let ncols = m.ncols();
    let inner = width * ncols + 3 * ncols.saturating_sub(1) + 2;

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format!("┌{}┐", "─".repeat(inner)));
    for row in &cells {
        let padded: Vec<String> = row.iter().map(|s| format!("{:>width$}", s)).collect();
        lines.push(format!("│ {} │", padded.join(" │ ")));
    }
    lines.push(format!("└{}┘", "─".repeat(inner)));
    lines.join("\n")
}

/// Integral values without decimals, everything else with `precision` decimals
fn format_entry(x: f64, precision: usize) -> String {
    if (x - x.round()).abs() < 1e-10 {
        format!("{:.0}", clean_zero(x.round()))
    } else {
        format!("{:.precision$}", x)
    }
}

fn clean_zero(x: f64) -> f64 {
    // -0.0 + 0.0 == +0.0
    x + 0.0
}
