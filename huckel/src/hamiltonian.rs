//! Hückel Hamiltonian from the bond graph.
//!
//! With the Coulomb integral α taken as the energy zero and the resonance
//! integral β as the unit, `H = -A` where `A` is the adjacency matrix.

use crate::graph::MolecularGraph;
use nalgebra::DMatrix;
use serde::Serialize;
use std::ops::Deref;
use tracing::debug;

/// Off-diagonal element for a bonded pair.
pub const RESONANCE_INTEGRAL: f64 = -1.0;

/// Diagonal element of every π-centre.
pub const REFERENCE_ENERGY: f64 = 0.0;

/// Real symmetric N×N Hückel matrix.
///
/// Only [`build`] creates one, so symmetry holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuckelMatrix(DMatrix<f64>);

impl HuckelMatrix {
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.0
    }
}

impl Deref for HuckelMatrix {
    type Target = DMatrix<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// 0/1 adjacency matrix of the graph.
pub fn adjacency_matrix(graph: &MolecularGraph) -> DMatrix<f64> {
    let n = graph.atom_count();
    let mut adjacency = DMatrix::zeros(n, n);
    for bond in graph.bonds() {
        adjacency[(bond.i, bond.j)] = 1.0;
        adjacency[(bond.j, bond.i)] = 1.0;
    }
    adjacency
}

/// Build `H` with `H[i][i] = 0` and `H[i][j] = H[j][i] = -1` for bonded pairs.
pub fn build(graph: &MolecularGraph) -> HuckelMatrix {
    let n = graph.atom_count();
    let mut h = DMatrix::from_element(n, n, 0.0);
    for i in 0..n {
        h[(i, i)] = REFERENCE_ENERGY;
    }
    for bond in graph.bonds() {
        h[(bond.i, bond.j)] = RESONANCE_INTEGRAL;
        h[(bond.j, bond.i)] = RESONANCE_INTEGRAL;
    }

    debug!("Adjacency matrix:{}", adjacency_matrix(graph));
    debug!("Hückel matrix:{}", h);

    HuckelMatrix(h)
}
