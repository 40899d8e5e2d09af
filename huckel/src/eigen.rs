//! Eigen-decomposition of the Hückel matrix.
//!
//! The pipeline talks to a [`SymmetricEigensolver`]; the default backend is
//! nalgebra's implicit symmetric QR iteration. Whatever the backend returns is
//! checked before it leaves this module: exactly N finite eigenpairs with
//! unit-norm eigenvectors that actually satisfy `H·v = λv`.

use crate::error::HuckelError;
use crate::hamiltonian::HuckelMatrix;
use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Serializer};
use tracing::debug;

/// Allowed deviation of an eigenvector norm from 1.
const NORM_TOLERANCE: f64 = 1e-8;

/// Default iteration budget per atom when no explicit limit is set.
const ITERATIONS_PER_ATOM: usize = 30;

/// Floor of the default iteration budget.
const MIN_ITERATIONS: usize = 1000;

/// Write a vector as a flat list of its entries.
pub(crate) fn serialize_vector<S: Serializer>(
    vector: &DVector<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    vector.as_slice().serialize(serializer)
}

/// Largest accepted `‖Hv - λv‖` for a matrix of dimension `n`.
///
/// The QR sweep is backward stable, so its residuals grow with `‖H‖` and `n`.
fn residual_bound(h: &HuckelMatrix, tolerance: f64) -> f64 {
    tolerance * h.as_matrix().norm().max(1.0) * h.dim().max(1) as f64
}

/// One eigenvalue with its (unit-norm) eigenvector.
///
/// The sign of `vector` is arbitrary: `v` and `-v` describe the same state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenPair {
    pub value: f64,
    #[serde(serialize_with = "serialize_vector")]
    pub vector: DVector<f64>,
}

/// Complete set of eigenpairs in the order the solver produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenResult {
    pairs: Vec<EigenPair>,
}

impl EigenResult {
    /// Check a raw decomposition of `h` and package it.
    ///
    /// `vectors` holds one eigenvector per column, matching `values`. The
    /// residual of every pair must stay below `residual_tolerance` scaled by
    /// `max(1, ‖H‖_F) · N`.
    pub fn from_raw(
        h: &HuckelMatrix,
        values: &DVector<f64>,
        vectors: &DMatrix<f64>,
        residual_tolerance: f64,
    ) -> Result<Self, HuckelError> {
        let n = h.dim();
        if values.len() != n || vectors.ncols() != n || vectors.nrows() != n {
            return Err(HuckelError::decomposition_failed(format!(
                "expected {} eigenpairs of length {}, got {} values and a {}x{} vector block",
                n,
                n,
                values.len(),
                vectors.nrows(),
                vectors.ncols()
            )));
        }
        if values.iter().chain(vectors.iter()).any(|x| !x.is_finite()) {
            return Err(HuckelError::decomposition_failed(
                "non-finite value in eigen-decomposition",
            ));
        }

        let bound = residual_bound(h, residual_tolerance);
        let mut pairs = Vec::with_capacity(n);
        for (k, &value) in values.iter().enumerate() {
            let vector = vectors.column(k).into_owned();
            let norm = vector.norm();
            if (norm - 1.0).abs() > NORM_TOLERANCE {
                return Err(HuckelError::decomposition_failed(format!(
                    "eigenvector {} has norm {:.3e}",
                    k, norm
                )));
            }
            let residual = (h.as_matrix() * &vector - &vector * value).norm();
            if residual > bound {
                return Err(HuckelError::decomposition_failed(format!(
                    "eigenpair {} has residual {:.3e} (bound {:.3e})",
                    k, residual, bound
                )));
            }
            pairs.push(EigenPair { value, vector });
        }

        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[EigenPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<EigenPair> {
        self.pairs
    }

    pub fn eigenvalues(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|p| p.value)
    }
}

/// Dense eigensolver for real symmetric matrices.
pub trait SymmetricEigensolver {
    fn decompose(&self, h: &HuckelMatrix) -> Result<EigenResult, HuckelError>;
}

/// nalgebra-backed solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NalgebraEigensolver {
    /// Off-diagonal convergence threshold of the QR sweep.
    pub eps: f64,
    /// Iteration limit; exceeding it is a decomposition failure.
    ///
    /// `None` scales the limit with the matrix dimension. `Some(0)` lifts
    /// the limit entirely, as in nalgebra.
    pub max_iterations: Option<usize>,
    /// Relative residual tolerance, see [`EigenResult::from_raw`].
    pub residual_tolerance: f64,
}

impl Default for NalgebraEigensolver {
    fn default() -> Self {
        NalgebraEigensolver {
            eps: f64::EPSILON,
            max_iterations: None,
            residual_tolerance: 1e-8,
        }
    }
}

impl NalgebraEigensolver {
    pub fn new(eps: f64, max_iterations: Option<usize>, residual_tolerance: f64) -> Self {
        Self {
            eps,
            max_iterations,
            residual_tolerance,
        }
    }

    /// Iteration limit handed to nalgebra for an `n`×`n` matrix.
    pub fn iteration_limit(&self, n: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| (ITERATIONS_PER_ATOM * n).max(MIN_ITERATIONS))
    }
}

impl SymmetricEigensolver for NalgebraEigensolver {
    fn decompose(&self, h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
        if h.dim() == 0 {
            return Ok(EigenResult { pairs: Vec::new() });
        }

        let limit = self.iteration_limit(h.dim());
        let eig = h
            .as_matrix()
            .clone()
            .try_symmetric_eigen(self.eps, limit)
            .ok_or_else(|| {
                HuckelError::decomposition_failed(format!(
                    "symmetric eigensolver did not converge within {} iterations",
                    limit
                ))
            })?;

        debug!("Eigenvalues: {:?}", eig.eigenvalues.as_slice());
        debug!("Eigenvectors:{}", eig.eigenvectors);

        EigenResult::from_raw(
            h,
            &eig.eigenvalues,
            &eig.eigenvectors,
            self.residual_tolerance,
        )
    }
}

/// Decompose with the default backend.
pub fn decompose(h: &HuckelMatrix) -> Result<EigenResult, HuckelError> {
    NalgebraEigensolver::default().decompose(h)
}
