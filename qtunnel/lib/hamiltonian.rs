//! Assembly of the discrete Hamiltonian operator.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ Arr1, grid::{ Grid, Potential } };

/// The discrete operator H = -∂²/∂x² + V(x) in naturalized units (ħ = 1,
/// energies in ħ²/2mΔa²; see [`units`][crate::units]).
///
/// The second derivative is the centered three-point stencil
/// (ψᵢ₋₁ - 2ψᵢ + ψᵢ₊₁)/Δx², which makes H a real symmetric tridiagonal
/// matrix: a constant off-diagonal -1/Δx² and a diagonal 2/Δx² + Vᵢ. The
/// boundary rows take the wavefunction pinned to zero outside the domain
/// (Dirichlet), so they simply lose one neighbor term. Only the diagonal and
/// the off-diagonal constant are stored.
///
/// An operator is built once from a grid and potential and is immutable for
/// the lifetime of a simulation; reconfiguration means rebuilding.
#[derive(Clone, Debug)]
pub struct Hamiltonian {
    diag: nd::Array1<f64>,
    off: f64,
    dx: f64,
}

impl Hamiltonian {
    /// Build the operator from a grid and a potential profile sampled on it.
    ///
    /// *Panics if the grid and potential lengths disagree*; both always come
    /// from the same [`Config`][crate::config::Config] in normal use.
    pub fn new(grid: &Grid, potential: &Potential) -> Self {
        assert_eq!(grid.len(), potential.len());
        let idx2 = grid.dx.powi(2).recip();
        let diag = potential.values.mapv(|vk| 2.0 * idx2 + vk);
        Self { diag, off: -idx2, dx: grid.dx }
    }

    /// Operator dimension.
    pub fn len(&self) -> usize { self.diag.len() }

    pub fn is_empty(&self) -> bool { self.diag.is_empty() }

    /// Grid spacing the stencil was built with.
    pub fn dx(&self) -> f64 { self.dx }

    /// Diagonal entries 2/Δx² + Vᵢ.
    pub fn diag(&self) -> &nd::Array1<f64> { &self.diag }

    /// The constant off-diagonal entry -1/Δx².
    pub fn off(&self) -> f64 { self.off }

    /// Apply the operator: y = H·q, with q pinned to zero outside the domain.
    pub fn apply<S>(&self, q: &Arr1<S>) -> nd::Array1<C64>
    where S: nd::Data<Elem = C64>
    {
        let n = self.len();
        let mut y = nd::Array1::zeros(n);
        y[0] = self.diag[0] * q[0] + self.off * q[1];
        for i in 1..n - 1 {
            y[i] = self.off * (q[i - 1] + q[i + 1]) + self.diag[i] * q[i];
        }
        y[n - 1] = self.off * q[n - 2] + self.diag[n - 1] * q[n - 1];
        y
    }
}
