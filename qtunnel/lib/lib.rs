#![allow(dead_code, non_snake_case)]

//! Numerical core for the simulation of a one-dimensional wave packet
//! incident on a rectangular potential barrier, integrating the
//! time-dependent Schrödinger equation (TDSE) with the implicit, unitary
//! Crank–Nicolson scheme.
//!
//! The pipeline is:
//! - [`config`]: a single immutable [`Config`][config::Config] record holds
//!   every input parameter and is validated once, before any numeric work;
//! - [`grid`]: spatial discretization and the barrier potential profile;
//! - [`packet`]: the initial Gaussian wave packet, numerically normalized;
//! - [`hamiltonian`]: the tridiagonal operator H = -∂²/∂x² + V(x);
//! - [`stepper`]: the Crank–Nicolson engine, factorized once, O(N) per step;
//! - [`run`]: the [`Run`][run::Run] life-cycle value owning the snapshot
//!   sequence, with incremental advancement and cooperative cancellation;
//! - [`worker`]: a background stepping thread publishing completed snapshots
//!   over a channel;
//! - [`observe`]: pure derived quantities (density, spectrum, centroid,
//!   region probabilities) for downstream plotting or export.
//!
//! All quantities are naturalized so that ħ = 1 and energies are measured in
//! units of ħ²/2*m*Δa² for a reference mass *m* and length scale Δa; see
//! [`units`] for conversion scaffolding and [`docs`] for theoretical
//! background.

pub mod error;
pub mod units;
pub mod config;
pub mod grid;
pub mod packet;
pub mod hamiltonian;
pub mod stepper;
pub mod run;
pub mod worker;
pub mod observe;
pub mod utils;

pub mod docs;

/// Tolerance on the discrete norm of a wavefunction before drift is reported.
pub(crate) const DEF_NORM_TOL: f64 = 1e-6;
/// Pre-normalization norm below which an initial packet is considered to lie
/// outside the domain.
pub(crate) const DEF_DEGENERATE_NORM: f64 = 1e-12;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
