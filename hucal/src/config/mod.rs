//! Configuration management for Hückel calculations
//!
//! A YAML file lists the molecules to compute and optional solver and report
//! settings. Missing settings are filled in by `with_defaults`; command-line
//! arguments take precedence over both.

mod args;
mod preset;

pub use args::Args;
pub use preset::Preset;

use color_eyre::eyre::{eyre, Result, WrapErr};
use huckel::{MolecularGraph, NalgebraEigensolver};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub molecules: Vec<MoleculeSpec>,
    #[serde(default)]
    pub solver: SolverParams,
    #[serde(default)]
    pub report: ReportParams,
}

/// One molecule: either a preset or an explicit atom count with 0-based bonds
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MoleculeSpec {
    pub name: Option<String>,
    pub preset: Option<Preset>,
    pub atoms: Option<usize>,
    pub bonds: Option<Vec<[usize; 2]>>,
}

/// Eigensolver parameters
///
/// Without `max_iterations` the iteration limit grows with the molecule size.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SolverParams {
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
    pub residual_tolerance: Option<f64>,
}

impl Default for SolverParams {
    fn default() -> Self {
        let solver = NalgebraEigensolver::default();
        SolverParams {
            max_iterations: solver.max_iterations,
            tolerance: Some(solver.eps),
            residual_tolerance: Some(solver.residual_tolerance),
        }
    }
}

impl SolverParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.max_iterations.is_none() {
            self.max_iterations = defaults.max_iterations;
        }
        if self.tolerance.is_none() {
            self.tolerance = defaults.tolerance;
        }
        if self.residual_tolerance.is_none() {
            self.residual_tolerance = defaults.residual_tolerance;
        }
        self
    }

    /// Command-line values take precedence over these.
    pub fn overridden_by(
        &self,
        max_iterations: Option<usize>,
        tolerance: Option<f64>,
        residual_tolerance: Option<f64>,
    ) -> Self {
        SolverParams {
            max_iterations: max_iterations.or(self.max_iterations),
            tolerance: tolerance.or(self.tolerance),
            residual_tolerance: residual_tolerance.or(self.residual_tolerance),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == Some(0) {
            return Err("Eigensolver iteration limit must be positive".to_string());
        }
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(format!("Eigensolver tolerance must be positive, got {}", tol));
            }
        }
        if let Some(tol) = self.residual_tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(format!("Residual tolerance must be positive, got {}", tol));
            }
        }
        Ok(())
    }
}

/// Report parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportParams {
    pub coefficients: Option<bool>,
    pub json: Option<String>,
}

impl Default for ReportParams {
    fn default() -> Self {
        ReportParams {
            coefficients: Some(false),
            json: None,
        }
    }
}

impl ReportParams {
    pub fn with_defaults(mut self) -> Self {
        if self.coefficients.is_none() {
            self.coefficients = Self::default().coefficients;
        }
        self
    }
}

impl MoleculeSpec {
    pub fn from_preset(preset: Preset) -> Self {
        MoleculeSpec {
            name: Some(preset.name().to_string()),
            preset: Some(preset),
            atoms: None,
            bonds: None,
        }
    }

    /// Display name; falls back to the preset name or the position in the file.
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .or_else(|| self.preset.map(|p| p.name().to_string()))
            .unwrap_or_else(|| format!("molecule {}", index + 1))
    }

    pub fn graph(&self) -> Result<MolecularGraph> {
        match (self.preset, self.atoms) {
            (Some(preset), None) => preset
                .graph()
                .wrap_err_with(|| format!("Invalid preset {}", preset.name())),
            (None, Some(atoms)) => {
                let pairs = self
                    .bonds
                    .iter()
                    .flatten()
                    .map(|&[i, j]| (i, j));
                MolecularGraph::from_bonds(atoms, pairs).wrap_err("Invalid bond list")
            }
            (Some(_), Some(_)) => Err(eyre!(
                "A molecule takes either a preset or an atom count, not both"
            )),
            (None, None) => Err(eyre!("A molecule needs a preset or an atom count")),
        }
    }
}

impl Config {
    /// Single-molecule configuration for `--preset`.
    pub fn from_preset(preset: Preset) -> Self {
        Config {
            molecules: vec![MoleculeSpec::from_preset(preset)],
            solver: SolverParams::default(),
            report: ReportParams::default(),
        }
    }

    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.solver = self.solver.with_defaults();
        self.report = self.report.with_defaults();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.molecules.is_empty() {
            return Err("Configuration lists no molecules".to_string());
        }
        self.solver.validate()
    }

    pub fn coefficients_enabled(&self) -> bool {
        self.report.coefficients.unwrap_or(false)
    }
}
