//! Command-line argument parsing for Hückel calculations

use super::Preset;
use clap::Parser;

/// Hückel π-orbital calculator with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Run a built-in molecule instead of reading the configuration file
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write all successful results as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Override eigensolver iteration limit
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Override eigensolver convergence threshold
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Override accepted eigenpair residual
    #[arg(long)]
    pub residual_tolerance: Option<f64>,

    /// Print per-atom coefficients of every orbital
    #[arg(long)]
    pub coefficients: bool,

    /// Log matrices and raw eigenvalues
    #[arg(short, long)]
    pub verbose: bool,
}
