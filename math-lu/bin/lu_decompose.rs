//! LU decomposition report
//!
//! Factors a matrix into PA = LU, verifies the result and prints the factors.
//!
//! Usage:
//!     cargo run --bin lu-decompose -- --input problem.json --style boxed
//!     cargo run --bin lu-decompose -- --json

use anyhow::Context;
use clap::{Parser, ValueEnum};
use math_audio_lu::format::{MatrixStyle, render_matrix};
use math_audio_lu::{
    LuConfig, LuProblem, Matrix, VerificationReport, decompose_with_tolerance, multiply, to_rows,
    verify_report,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "lu-decompose",
    about = "Factor a square matrix into PA = LU with partial pivoting and verify the result"
)]
struct Cli {
    /// JSON problem file ({"matrix": [[...]], "config": {...}}); defaults to a built-in 4x4 example
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of decimal places in the printed matrices
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Output layout for the matrices
    #[arg(long, value_enum, default_value_t = StyleChoice::Plain)]
    style: StyleChoice,

    /// Override the pivot tolerance from the problem file
    #[arg(long)]
    pivot_tolerance: Option<f64>,

    /// Override the verification tolerance from the problem file
    #[arg(long)]
    verify_tolerance: Option<f64>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StyleChoice {
    Plain,
    Boxed,
}

impl From<StyleChoice> for MatrixStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Plain => MatrixStyle::Plain,
            StyleChoice::Boxed => MatrixStyle::Boxed,
        }
    }
}

#[derive(Debug, Serialize)]
struct LuReport {
    description: String,
    config: LuConfig,
    a: Vec<Vec<f64>>,
    p: Vec<Vec<f64>>,
    l: Vec<Vec<f64>>,
    u: Vec<Vec<f64>>,
    perm: Vec<usize>,
    verification: VerificationReport,
}

fn demo_problem() -> LuProblem {
    let mut problem = LuProblem::new(vec![
        vec![7.0, 3.0, -1.0, 2.0],
        vec![3.0, 8.0, 1.0, -4.0],
        vec![-1.0, 1.0, 4.0, -1.0],
        vec![2.0, -4.0, -1.0, 6.0],
    ]);
    problem.description = "built-in 4x4 example".to_string();
    problem
}

fn load_problem(args: &Cli) -> anyhow::Result<LuProblem> {
    let mut problem = match &args.input {
        Some(path) => LuProblem::from_file(path)
            .with_context(|| format!("loading problem from {}", path.display()))?,
        None => demo_problem(),
    };

    if let Some(tol) = args.pivot_tolerance {
        problem.config.pivot_tolerance = tol;
    }
    if let Some(tol) = args.verify_tolerance {
        problem.config.verify_tolerance = tol;
    }
    problem.config.validate()?;

    Ok(problem)
}

fn print_section(title: &str, m: &Matrix<f64>, precision: usize, style: MatrixStyle) {
    println!("\n{}:", title);
    println!("{}", render_matrix(m, precision, style));
}

fn print_check(label: &str, ok: bool) {
    let mark = if ok { "✓" } else { "✗" };
    println!("{} {}", mark, label);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let problem = load_problem(&args)?;
    let config = problem.config;
    let a = problem.to_matrix()?;

    log::info!(
        "Decomposing {}x{} matrix ({})",
        a.nrows(),
        a.ncols(),
        if problem.description.is_empty() {
            "no description"
        } else {
            problem.description.as_str()
        }
    );

    let lu = decompose_with_tolerance(&a, config.pivot_tolerance)
        .context("LU decomposition failed")?;
    let report = verify_report(&a, lu.p(), lu.l(), lu.u(), config.verify_tolerance)?;

    if args.json {
        let out = LuReport {
            description: problem.description.clone(),
            config,
            a: to_rows(&a),
            p: to_rows(lu.p()),
            l: to_rows(lu.l()),
            u: to_rows(lu.u()),
            perm: lu.perm().to_vec(),
            verification: report.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let style = MatrixStyle::from(args.style);
        let precision = args.precision;

        println!("LU Decomposition Analysis");
        println!("{}", "=".repeat(50));

        print_section("Original Matrix A", &a, precision, style);
        print_section("Permutation Matrix P", lu.p(), precision, style);
        print_section("Lower Triangular Matrix L", lu.l(), precision, style);
        print_section("Upper Triangular Matrix U", lu.u(), precision, style);

        print_section("PA", &multiply(lu.p(), &a)?, precision, style);
        print_section("LU", &multiply(lu.l(), lu.u())?, precision, style);

        println!("\nVerification (tolerance {:.1e}):", report.tolerance);
        println!("{}", "=".repeat(50));
        print_check("PA = LU", report.reconstructs);
        print_check("L is unit lower triangular", report.lower_unit_triangular);
        print_check("U is upper triangular", report.upper_triangular);
        print_check("P is a permutation", report.permutation);
        println!("Max absolute error in PA = LU: {:.2e}", report.max_abs_error);
    }

    if !report.passed() {
        eprintln!("Error: verification failed");
        process::exit(1);
    }

    Ok(())
}
