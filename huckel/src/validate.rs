//! Pre-flight structural checks run before any matrix is built.

use crate::error::StructuralError;
use crate::graph::MolecularGraph;
use tracing::warn;

/// Reject graphs whose Hamiltonian would be chemically meaningless.
///
/// Checks run in order: no atoms, no bonds, more than one component.
pub fn validate(graph: &MolecularGraph) -> Result<(), StructuralError> {
    let verdict = if graph.atom_count() == 0 {
        Err(StructuralError::EmptyStructure)
    } else if graph.bond_count() == 0 {
        Err(StructuralError::NoBonds)
    } else if !graph.is_connected() {
        Err(StructuralError::Disconnected)
    } else {
        Ok(())
    };

    if let Err(err) = &verdict {
        warn!(
            "Rejected structure with {} atoms and {} bonds: {:?}",
            graph.atom_count(),
            graph.bond_count(),
            err
        );
    }
    verdict
}
