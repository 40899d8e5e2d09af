//! Tests for the calculation pipeline

use super::*;
use crate::eigen::{decompose, EigenResult};
use crate::error::StructuralError;
use crate::hamiltonian::HuckelMatrix;
use crate::orbital::Occupation;
use nalgebra::{DMatrix, DVector};
use std::cell::Cell;

const TOL: f64 = 1e-8;

/// Solver that always reports non-convergence.
struct NonConvergingSolver;

impl SymmetricEigensolver for NonConvergingSolver {
    fn decompose(&self, _h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
        Err(HuckelError::decomposition_failed("no convergence (mock)"))
    }
}

/// Solver that drops the last eigenpair.
struct TruncatingSolver;

impl SymmetricEigensolver for TruncatingSolver {
    fn decompose(&self, h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
        let full = decompose(h)?;
        let n = h.dim();
        let values = DVector::from_iterator(n - 1, full.eigenvalues().take(n - 1));
        let vectors = DMatrix::from_columns(
            &full.pairs()[..n - 1]
                .iter()
                .map(|p| p.vector.clone())
                .collect::<Vec<_>>(),
        );
        EigenResult::from_raw(h, &values, &vectors, 1e-8)
    }
}

/// Delegates to nalgebra and counts invocations.
#[derive(Default)]
struct CountingSolver {
    calls: Cell<usize>,
}

impl SymmetricEigensolver for CountingSolver {
    fn decompose(&self, h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
        self.calls.set(self.calls.get() + 1);
        decompose(h)
    }
}

/// Fails on demand, otherwise delegates to nalgebra.
#[derive(Default)]
struct SwitchableSolver {
    fail: Cell<bool>,
}

impl SymmetricEigensolver for SwitchableSolver {
    fn decompose(&self, h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
        if self.fail.get() {
            return Err(HuckelError::decomposition_failed("forced failure"));
        }
        decompose(h)
    }
}

fn energies(result: &HuckelResult) -> Vec<f64> {
    result.orbitals().iter().map(|o| o.rounded_energy()).collect()
}

fn naphthalene() -> MolecularGraph {
    MolecularGraph::from_bonds(
        10,
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 9),
            (9, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
        ],
    )
    .unwrap()
}

/// Σ c_r² over the members of a level, per atom.
fn subspace_density(result: &HuckelResult, group: &DegenerateGroup) -> Vec<f64> {
    let mut density = vec![0.0; result.atom_count()];
    for orbital in group.members(result.orbitals()) {
        for (r, c) in orbital.coefficients().iter().enumerate() {
            density[r] += c * c;
        }
    }
    density
}

#[test]
fn test_ethylene() {
    let result = calculate(&MolecularGraph::linear_chain(2)).unwrap();

    assert_eq!(energies(&result), vec![-1.0, 1.0]);
    let psi1 = result.orbital(1).unwrap();
    let psi2 = result.orbital(2).unwrap();
    assert_eq!(psi1.occupation(), Occupation::Occupied);
    assert_eq!(psi2.occupation(), Occupation::Vacant);
    for orbital in result.orbitals() {
        let c = orbital.rounded_coefficients();
        assert_eq!(c[0].abs(), 0.7071);
        assert_eq!(c[1].abs(), 0.7071);
    }
    assert_eq!(result.homo().unwrap().name(), "ψ1");
    assert_eq!(result.lumo().unwrap().name(), "ψ2");
    assert!((result.homo_lumo_gap().unwrap() - 2.0).abs() < TOL);
    assert!((result.total_pi_energy() + 2.0).abs() < TOL);
}

#[test]
fn test_cyclobutadiene() {
    let result = calculate(&MolecularGraph::ring(4)).unwrap();

    assert_eq!(energies(&result), vec![-2.0, 0.0, 0.0, 2.0]);
    let groups = result.degenerate_groups();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1].ranks(), &[2, 3]);
    assert_eq!(groups[1].energy(), 0.0);

    // HOMO and LUMO sit in the same non-bonding pair
    assert_eq!(result.homo().unwrap().rank(), 2);
    assert_eq!(result.lumo().unwrap().rank(), 3);
    assert!(result.homo_lumo_gap().unwrap().abs() < TOL);
    assert!((result.total_pi_energy() + 4.0).abs() < TOL);

    for density in subspace_density(&result, &groups[1]) {
        assert!((density - 0.5).abs() < TOL);
    }
}

#[test]
fn test_benzene() {
    let result = calculate(&MolecularGraph::ring(6)).unwrap();

    assert_eq!(energies(&result), vec![-2.0, -1.0, -1.0, 1.0, 1.0, 2.0]);
    let occupied: Vec<usize> = result.occupied().map(|o| o.rank()).collect();
    assert_eq!(occupied, vec![1, 2, 3]);
    assert!(result.orbitals()[3..].iter().all(|o| !o.is_occupied()));
    assert_eq!(result.pi_electrons(), 6);

    let degenerate: Vec<&DegenerateGroup> = result
        .degenerate_groups()
        .iter()
        .filter(|g| g.is_degenerate())
        .collect();
    assert_eq!(degenerate.len(), 2);
    assert!(degenerate.iter().all(|g| g.len() == 2));

    for group in degenerate {
        for density in subspace_density(&result, group) {
            assert!((density - 1.0 / 3.0).abs() < TOL);
        }
    }

    // ψ1 is the fully in-phase combination
    for c in result.orbital(1).unwrap().coefficients().iter() {
        assert!((c - 1.0 / 6f64.sqrt()).abs() < TOL);
    }
    assert!((result.total_pi_energy() + 8.0).abs() < TOL);
}

#[test]
fn test_butadiene_energies() {
    let result = calculate(&MolecularGraph::linear_chain(4)).unwrap();
    assert_eq!(energies(&result), vec![-1.618, -0.618, 0.618, 1.618]);
    assert!((result.total_pi_energy() + 2.0 * 5f64.sqrt()).abs() < TOL);
}

#[test]
fn test_naphthalene_properties() {
    let graph = naphthalene();
    let result = calculate(&graph).unwrap();

    assert_eq!(result.orbitals().len(), 10);
    let trace: f64 = result.orbitals().iter().map(|o| o.energy()).sum();
    assert!(trace.abs() < TOL);
    assert_eq!(result.occupied().count(), 5);
    assert_eq!(result.homo().unwrap().rounded_energy(), -0.618);
    assert_eq!(result.lumo().unwrap().rounded_energy(), 0.618);
    assert!(result.degenerate_groups().iter().all(|g| !g.is_degenerate()));
}

#[test]
fn test_group_of_rank() {
    let result = calculate(&MolecularGraph::ring(6)).unwrap();
    assert_eq!(result.group_of(5).unwrap().ranks(), &[4, 5]);
    assert!(result.group_of(7).is_none());
    assert!(result.orbital(0).is_none());
}

#[test]
fn test_validation_short_circuits_before_solver() {
    let calculator = HuckelCalculator::new(CountingSolver::default());

    let cases = [
        (MolecularGraph::new(0), StructuralError::EmptyStructure),
        (MolecularGraph::new(3), StructuralError::NoBonds),
        (
            MolecularGraph::from_bonds(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)])
                .unwrap(),
            StructuralError::Disconnected,
        ),
    ];
    for (graph, expected) in cases {
        assert_eq!(
            calculator.calculate(&graph),
            Err(HuckelError::Structural(expected))
        );
    }
    assert_eq!(calculator.solver().calls.get(), 0);

    calculator.calculate(&MolecularGraph::ring(5)).unwrap();
    assert_eq!(calculator.solver().calls.get(), 1);
}

#[test]
fn test_solver_failure_surfaces() {
    let err = HuckelCalculator::new(NonConvergingSolver)
        .calculate(&MolecularGraph::ring(6))
        .unwrap_err();
    assert!(err.is_numerical());
}

#[test]
fn test_partial_decomposition_is_rejected() {
    let err = HuckelCalculator::new(TruncatingSolver)
        .calculate(&MolecularGraph::ring(6))
        .unwrap_err();
    assert!(matches!(err, HuckelError::DecompositionFailed { .. }));
}

#[test]
fn test_iteration_limit_is_enforced() {
    let solver = NalgebraEigensolver::new(f64::EPSILON, Some(1), 1e-8);
    let err = HuckelCalculator::new(solver)
        .calculate(&naphthalene())
        .unwrap_err();
    assert!(err.is_numerical());
}

#[test]
fn test_session_keeps_last_good_result() {
    let mut session = CalculationSession::<NalgebraEigensolver>::default();
    assert!(session.latest().is_none());

    session.recalculate(&MolecularGraph::ring(6)).unwrap();
    assert_eq!(session.latest().unwrap().atom_count(), 6);

    let err = session.recalculate(&MolecularGraph::new(4)).unwrap_err();
    assert!(err.is_structural());
    assert_eq!(session.latest().unwrap().atom_count(), 6);

    let butadiene = session.recalculate(&MolecularGraph::linear_chain(4)).unwrap();
    assert_eq!(butadiene.atom_count(), 4);
    assert_eq!(session.latest().unwrap().atom_count(), 4);
}

#[test]
fn test_session_keeps_result_on_numerical_failure() {
    let mut session = CalculationSession::new(HuckelCalculator::new(SwitchableSolver::default()));
    session.recalculate(&MolecularGraph::linear_chain(2)).unwrap();
    let before = session.latest().cloned();

    session.calculator().solver().fail.set(true);
    let err = session.recalculate(&MolecularGraph::ring(6)).unwrap_err();
    assert!(err.is_numerical());
    assert_eq!(session.latest().cloned(), before);
}

#[test]
fn test_edit_then_recalculate() {
    // benzene -> open hexatriene by breaking one ring bond
    let mut graph = MolecularGraph::ring(6);
    let before = calculate(&graph).unwrap();
    assert!(!graph.toggle_bond(5, 0).unwrap());
    let after = calculate(&graph).unwrap();

    assert_eq!(before.degenerate_groups().len(), 4);
    assert_eq!(after.degenerate_groups().len(), 6);
    assert_eq!(before.orbitals().len(), after.orbitals().len());
}
