//! Simple Hückel molecular-orbital engine for conjugated hydrocarbons
//!
//! A [`MolecularGraph`] (atom count plus bond set) is validated, turned into a
//! [`HuckelMatrix`], diagonalised and assembled into an energy-ordered list of
//! [`MolecularOrbital`]s with occupations and degenerate levels.
//!
//! ```rust,ignore
//! use huckel::{calculate, MolecularGraph};
//!
//! let benzene = MolecularGraph::ring(6);
//! let result = calculate(&benzene)?;
//! for orbital in result.orbitals() {
//!     println!("{} {:.4}", orbital.name(), orbital.rounded_energy());
//! }
//! ```

pub mod calculation;
pub mod degeneracy;
pub mod eigen;
pub mod error;
pub mod graph;
pub mod hamiltonian;
pub mod orbital;
pub mod validate;

pub use calculation::{calculate, CalculationSession, HuckelCalculator, HuckelResult};
pub use degeneracy::{group, DegenerateGroup};
pub use eigen::{EigenPair, EigenResult, NalgebraEigensolver, SymmetricEigensolver};
pub use error::{GraphError, HuckelError, StructuralError};
pub use graph::{Bond, MolecularGraph};
pub use hamiltonian::{build, HuckelMatrix};
pub use orbital::{assemble, MolecularOrbital, Occupation, OrbitalCharacter};
pub use validate::validate;
