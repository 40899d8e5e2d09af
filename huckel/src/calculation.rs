//! Hückel calculation pipeline
//!
//! validate → build → decompose → assemble → group, run once per request on an
//! immutable graph snapshot. The result is a self-contained value; nothing is
//! updated incrementally when the graph changes.

use crate::degeneracy::{group, DegenerateGroup};
use crate::eigen::{NalgebraEigensolver, SymmetricEigensolver};
use crate::error::HuckelError;
use crate::graph::MolecularGraph;
use crate::hamiltonian::build;
use crate::orbital::{assemble, MolecularOrbital};
use crate::validate::validate;
use serde::Serialize;
use tracing::info;

#[cfg(test)]
mod tests;

/// Orbitals and energy levels of one molecule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuckelResult {
    atom_count: usize,
    orbitals: Vec<MolecularOrbital>,
    degenerate_groups: Vec<DegenerateGroup>,
}

impl HuckelResult {
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Orbitals ordered by rank (ascending energy).
    pub fn orbitals(&self) -> &[MolecularOrbital] {
        &self.orbitals
    }

    pub fn degenerate_groups(&self) -> &[DegenerateGroup] {
        &self.degenerate_groups
    }

    /// Orbital `ψrank`, 1-based.
    pub fn orbital(&self, rank: usize) -> Option<&MolecularOrbital> {
        rank.checked_sub(1).and_then(|idx| self.orbitals.get(idx))
    }

    pub fn occupied(&self) -> impl Iterator<Item = &MolecularOrbital> + '_ {
        self.orbitals.iter().filter(|o| o.is_occupied())
    }

    pub fn pi_electrons(&self) -> usize {
        self.occupied().map(|o| o.occupation().electrons()).sum()
    }

    pub fn homo(&self) -> Option<&MolecularOrbital> {
        self.occupied().last()
    }

    pub fn lumo(&self) -> Option<&MolecularOrbital> {
        self.orbitals.iter().find(|o| !o.is_occupied())
    }

    /// `E(LUMO) - E(HOMO)` in units of |β|.
    pub fn homo_lumo_gap(&self) -> Option<f64> {
        match (self.homo(), self.lumo()) {
            (Some(homo), Some(lumo)) => Some(lumo.energy() - homo.energy()),
            _ => None,
        }
    }

    /// Total π energy relative to `nα`, in units of |β| (negative is stabilising).
    pub fn total_pi_energy(&self) -> f64 {
        self.occupied()
            .map(|o| o.occupation().electrons() as f64 * o.energy())
            .sum()
    }

    /// Energy level containing `ψrank`.
    pub fn group_of(&self, rank: usize) -> Option<&DegenerateGroup> {
        self.degenerate_groups.iter().find(|g| g.contains(rank))
    }
}

/// Runs the pipeline with a pluggable eigensolver backend.
#[derive(Debug, Clone, Default)]
pub struct HuckelCalculator<S: SymmetricEigensolver = NalgebraEigensolver> {
    solver: S,
}

impl<S: SymmetricEigensolver> HuckelCalculator<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn calculate(&self, graph: &MolecularGraph) -> Result<HuckelResult, HuckelError> {
        info!(
            "Hückel calculation: {} atoms, {} bonds",
            graph.atom_count(),
            graph.bond_count()
        );
        validate(graph)?;

        let hamiltonian = build(graph);
        let eigen = self.solver.decompose(&hamiltonian)?;
        let orbitals = assemble(eigen);
        let degenerate_groups = group(&orbitals);

        info!(
            "Obtained {} orbitals on {} energy levels",
            orbitals.len(),
            degenerate_groups.len()
        );

        Ok(HuckelResult {
            atom_count: graph.atom_count(),
            orbitals,
            degenerate_groups,
        })
    }
}

/// Calculate with the default nalgebra backend.
pub fn calculate(graph: &MolecularGraph) -> Result<HuckelResult, HuckelError> {
    HuckelCalculator::<NalgebraEigensolver>::default().calculate(graph)
}

/// Holds the last successful result across recalculations.
///
/// A failed recalculation returns the error and leaves the previous result in
/// place; a successful one replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct CalculationSession<S: SymmetricEigensolver = NalgebraEigensolver> {
    calculator: HuckelCalculator<S>,
    latest: Option<HuckelResult>,
}

impl<S: SymmetricEigensolver> CalculationSession<S> {
    pub fn new(calculator: HuckelCalculator<S>) -> Self {
        Self {
            calculator,
            latest: None,
        }
    }

    pub fn recalculate(&mut self, graph: &MolecularGraph) -> Result<&HuckelResult, HuckelError> {
        let result = self.calculator.calculate(graph)?;
        Ok(&*self.latest.insert(result))
    }

    pub fn calculator(&self) -> &HuckelCalculator<S> {
        &self.calculator
    }

    pub fn latest(&self) -> Option<&HuckelResult> {
        self.latest.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}
