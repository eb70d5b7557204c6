#![allow(non_upper_case_globals)]

//! Convenience functions and constructs to handle minutiae associated with
//! conversion to and from naturalized units.
//!
//! Concrete physical constants are taken from NIST.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// elementary charge (C)
pub const e: f64 = 1.602176634e-19;
//             +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.1093837015e-31;
//              +/- 0.0000000028e-31

/// A collection of natural unit scaling factors relative to the MKS system.
///
/// The crate integrates the TDSE in units where ħ = 1 and the Hamiltonian is
/// -∂²/∂x² + V(x); that fixes the energy unit to ħ²/2*m*a² and the (angular)
/// time unit to ħ divided by the energy unit, given a particle mass *m* and a
/// base length scale *a*. Constructor methods produce scaling constants whose
/// numerical values are represented in MKS.
///
/// See [`docs#units`][crate::docs#units] for more information.
#[derive(Copy, Clone, Debug)]
pub struct Units {
    /// Particle mass.
    pub m: f64,
    /// Base length scale.
    pub a: f64,
    /// Associated energy scale.
    pub e: f64,
    /// Associated (angular) time scale.
    pub t: f64,
}

impl Units {
    /// Construct from a mass and length scale given in meters/kilograms/seconds
    /// (MKS) units.
    pub fn from_mks(mass: f64, a: f64) -> Self {
        let e_unit = hbar.powi(2) / 2.0 / mass / a.powi(2);
        let t_unit = hbar / e_unit;
        Self { m: mass, a, e: e_unit, t: t_unit }
    }

    /// Convert a quantity with dimensions of length in MKS to natural units.
    pub fn to_nat_length(&self, x: f64) -> f64 { x / self.a }

    /// Convert a dimensionless quantity to one with length units in MKS.
    pub fn from_nat_length(&self, x: f64) -> f64 { x * self.a }

    /// Convert a quantity with dimensions of energy in MKS to natural units.
    pub fn to_nat_energy(&self, en: f64) -> f64 { en / self.e }

    /// Convert a dimensionless quantity to one with energy units in MKS.
    pub fn from_nat_energy(&self, en: f64) -> f64 { en * self.e }

    /// Convert a quantity with dimensions of time in MKS to natural units.
    pub fn to_nat_time(&self, t: f64) -> f64 { t / self.t }

    /// Convert a dimensionless quantity to one with time units in MKS.
    pub fn from_nat_time(&self, t: f64) -> f64 { t * self.t }

    /// Convert a wavevector (m⁻¹) in MKS to natural units.
    pub fn to_nat_wavevector(&self, k: f64) -> f64 { k * self.a }
}

/// The wavevector (m⁻¹) of a massive particle with the given kinetic energy,
/// both in MKS units.
pub fn wavevector_mks(mass: f64, energy: f64) -> f64 {
    (2.0 * mass * energy).sqrt() / hbar
}
