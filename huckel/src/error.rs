//! Error types for Hückel calculations.
//!
//! Errors fall into three classes: malformed bond references raised while
//! editing a [`MolecularGraph`](crate::MolecularGraph), structural problems
//! caught by [`validate`](crate::validate) before any matrix work, and
//! numerical failures of the eigensolver.

use thiserror::Error;

/// Malformed edits of a molecular graph.
///
/// These are caller programming errors; the core never repairs them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A bond or atom index lies outside `0..atom_count`.
    #[error("invalid atom index in bond ({i}, {j}): molecule has {atom_count} atoms")]
    InvalidIndex {
        i: usize,
        j: usize,
        atom_count: usize,
    },

    /// A bond from an atom to itself.
    #[error("invalid bond ({index}, {index}): an atom cannot bond to itself")]
    SelfLoop { index: usize },

    /// Removal of an atom that does not exist.
    #[error("cannot remove atom {index}: molecule has {atom_count} atoms")]
    MissingAtom { index: usize, atom_count: usize },
}

/// Structural reasons a graph cannot be handed to the Hamiltonian builder.
///
/// The messages are meant to be shown to the user unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("Please add atoms to the structure.")]
    EmptyStructure,

    #[error("Please add bonds between atoms.")]
    NoBonds,

    #[error("The molecular structure is disconnected. Please ensure all atoms are connected.")]
    Disconnected,
}

/// Top-level error returned by the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HuckelError {
    #[error(transparent)]
    InvalidIndex(#[from] GraphError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The eigensolver did not produce a complete, finite decomposition.
    #[error("The calculation did not converge ({reason}). Try a different or simpler structure.")]
    DecompositionFailed { reason: String },
}

impl HuckelError {
    pub fn decomposition_failed(reason: impl Into<String>) -> Self {
        Self::DecompositionFailed {
            reason: reason.into(),
        }
    }

    /// True for failures the user can fix by editing the structure.
    pub fn is_structural(&self) -> bool {
        matches!(self, HuckelError::Structural(_))
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, HuckelError::DecompositionFailed { .. })
    }
}
