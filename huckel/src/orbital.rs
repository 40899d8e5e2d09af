//! Energy-ranked molecular orbitals built from a raw eigen-decomposition.

use crate::eigen::{serialize_vector, EigenPair, EigenResult};
use nalgebra::DVector;
use serde::Serialize;
use std::fmt;

/// Decimal places used for displayed energies and coefficients.
pub const DISPLAY_DECIMALS: usize = 4;

const DISPLAY_SCALE: f64 = 1e4;

/// Magnitudes this close to the largest coefficient count as tied when
/// choosing the phase of an orbital.
const PHASE_TOLERANCE: f64 = 1e-8;

/// Energy quantised to [`DISPLAY_DECIMALS`] places, as an exact integer key.
pub(crate) fn quantize(x: f64) -> i64 {
    (x * DISPLAY_SCALE).round() as i64
}

/// Round to [`DISPLAY_DECIMALS`] places; never yields `-0.0`.
pub fn round_to_display(x: f64) -> f64 {
    quantize(x) as f64 / DISPLAY_SCALE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Occupation {
    Occupied,
    Vacant,
}

impl Occupation {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Occupation::Occupied)
    }

    /// π electrons held by an orbital in this state.
    pub fn electrons(&self) -> usize {
        match self {
            Occupation::Occupied => 2,
            Occupation::Vacant => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Occupation::Occupied => "Occ",
            Occupation::Vacant => "Vac",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Position of an orbital relative to the reference energy α.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrbitalCharacter {
    Bonding,
    NonBonding,
    Antibonding,
}

/// One molecular orbital `ψk`, where `k` is the 1-based energy rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolecularOrbital {
    rank: usize,
    name: String,
    energy: f64,
    rounded_energy: f64,
    #[serde(serialize_with = "serialize_vector")]
    coefficients: DVector<f64>,
    rounded_coefficients: Vec<f64>,
    occupation: Occupation,
    character: OrbitalCharacter,
}

impl MolecularOrbital {
    fn new(rank: usize, pair: EigenPair, occupation: Occupation) -> Self {
        let coefficients = align_phase(pair.vector);
        let rounded_coefficients = coefficients.iter().map(|&c| round_to_display(c)).collect();
        let character = match quantize(pair.value) {
            q if q < 0 => OrbitalCharacter::Bonding,
            0 => OrbitalCharacter::NonBonding,
            _ => OrbitalCharacter::Antibonding,
        };

        MolecularOrbital {
            rank,
            name: format!("ψ{}", rank),
            energy: pair.value,
            rounded_energy: round_to_display(pair.value),
            coefficients,
            rounded_coefficients,
            occupation,
            character,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full-precision eigenvalue in units of |β| relative to α.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn rounded_energy(&self) -> f64 {
        self.rounded_energy
    }

    /// `x` in `E = α + xβ` (β < 0), rounded for display.
    pub fn beta_coefficient(&self) -> f64 {
        round_to_display(-self.energy)
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn rounded_coefficients(&self) -> &[f64] {
        &self.rounded_coefficients
    }

    pub fn occupation(&self) -> Occupation {
        self.occupation
    }

    pub fn is_occupied(&self) -> bool {
        self.occupation.is_occupied()
    }

    pub fn character(&self) -> OrbitalCharacter {
        self.character
    }

    pub(crate) fn energy_key(&self) -> i64 {
        quantize(self.energy)
    }
}

/// Flip `v` so that its largest-magnitude coefficient is positive.
///
/// Among coefficients tied for the largest magnitude the first one decides.
fn align_phase(mut v: DVector<f64>) -> DVector<f64> {
    let max = v.amax();
    let lead = v.iter().copied().find(|c| c.abs() >= max - PHASE_TOLERANCE);
    if matches!(lead, Some(c) if c < 0.0) {
        v.neg_mut();
    }
    v
}

/// Sort eigenpairs by energy and turn them into ranked, occupied/vacant orbitals.
///
/// Exactly equal eigenvalues keep the solver's order. The lowest `N / 2`
/// orbitals are occupied (one π electron per atom, two per orbital).
pub fn assemble(eigen: EigenResult) -> Vec<MolecularOrbital> {
    let mut pairs = eigen.into_pairs();
    pairs.sort_by(|a, b| a.value.total_cmp(&b.value));

    let occupied = pairs.len() / 2;
    pairs
        .into_iter()
        .enumerate()
        .map(|(idx, pair)| {
            let rank = idx + 1;
            let occupation = if rank <= occupied {
                Occupation::Occupied
            } else {
                Occupation::Vacant
            };
            MolecularOrbital::new(rank, pair, occupation)
        })
        .collect()
}
