//! Derived quantities of a single wavefunction snapshot.
//!
//! Everything here is a pure function of its input: no shared mutable state,
//! safe to invoke concurrently for different snapshots (e.g. while the
//! stepping engine is producing the next one).

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    hamiltonian::Hamiltonian,
    utils::{ do_fft, fft_freq, fft_shift, trapz, wf_dot },
};

/// Per-snapshot quantities for visualization or export.
#[derive(Clone, Debug)]
pub struct Observables {
    /// Re ψ at each grid point.
    pub re: nd::Array1<f64>,
    /// Im ψ at each grid point.
    pub im: nd::Array1<f64>,
    /// |ψ|² at each grid point.
    pub density: nd::Array1<f64>,
    /// DFT of the amplitude sequence, in FFT index order; present only when
    /// requested. See [`momentum_spectrum`] for the centered momentum-space
    /// view.
    pub spectrum: Option<nd::Array1<C64>>,
}

/// Compute the real part, imaginary part, and probability density of a
/// snapshot, plus its discrete Fourier transform when `compute_spectrum` is
/// set.
pub fn extract<S>(q: &Arr1<S>, compute_spectrum: bool) -> Observables
where S: nd::Data<Elem = C64>
{
    Observables {
        re: q.mapv(|qk| qk.re),
        im: q.mapv(|qk| qk.im),
        density: density(q),
        spectrum: compute_spectrum.then(|| do_fft(q)),
    }
}

/// Probability density |ψ|² at each grid point.
pub fn density<S>(q: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.mapv(|qk| qk.norm_sqr())
}

/// Position of the probability centroid ∫x|ψ|²dx / ∫|ψ|²dx.
///
/// *Panics if `x` and `q` have different lengths or fewer than 2 elements*.
pub fn centroid<S, T>(x: &Arr1<S>, q: &Arr1<T>, dx: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    assert_eq!(x.len(), q.len());
    let rho = density(q);
    let weighted: nd::Array1<f64>
        = x.iter().zip(&rho).map(|(xk, rk)| xk * rk).collect();
    trapz(&weighted, dx) / trapz(&rho, dx)
}

/// Probability weight on either side of (and inside) the barrier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionProbabilities {
    /// Σ|ψᵢ|²Δx over i < span.0 (reflected side).
    pub left: f64,
    /// Σ|ψᵢ|²Δx over span.0 ≤ i < span.1.
    pub barrier: f64,
    /// Σ|ψᵢ|²Δx over i ≥ span.1 (transmitted side).
    pub right: f64,
}

impl RegionProbabilities {
    /// Total probability; matches the discrete norm up to the vanishing
    /// boundary terms of the trapezoidal rule.
    pub fn total(&self) -> f64 { self.left + self.barrier + self.right }
}

/// Split the probability of a snapshot into the regions left of, inside, and
/// right of the barrier index span `[span.0, span.1)`.
pub fn region_probabilities<S>(q: &Arr1<S>, span: (usize, usize), dx: f64)
    -> RegionProbabilities
where S: nd::Data<Elem = C64>
{
    let (i0, i1) = span;
    let mut acc = RegionProbabilities { left: 0.0, barrier: 0.0, right: 0.0 };
    for (i, qk) in q.iter().enumerate() {
        let w = qk.norm_sqr() * dx;
        if i < i0 {
            acc.left += w;
        } else if i < i1 {
            acc.barrier += w;
        } else {
            acc.right += w;
        }
    }
    acc
}

/// Momentum coordinates accompanying [`momentum_spectrum`], increasing and
/// centered on k = 0.
pub fn momentum_axis(n: usize, dx: f64) -> nd::Array1<f64> {
    let k: nd::Array1<f64> = fft_freq(n, dx).mapv(|fk| TAU * fk);
    fft_shift(&k)
}

/// The momentum-space view of a snapshot: centered momentum coordinates and
/// the correspondingly shifted DFT of the amplitudes.
pub fn momentum_spectrum<S>(q: &Arr1<S>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<C64>)
where S: nd::Data<Elem = C64>
{
    let spectrum = do_fft(q);
    (momentum_axis(q.len(), dx), fft_shift(&spectrum))
}

/// Energy expectation value ⟨ψ|H|ψ⟩ (real by Hermiticity; the residual
/// imaginary part is discarded).
pub fn energy<S>(q: &Arr1<S>, h: &Hamiltonian, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    wf_dot(q, &h.apply(q), dx).re
}
