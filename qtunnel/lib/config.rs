//! Immutable simulation configuration.
//!
//! A [`Config`] is the single input record for a [`Run`][crate::run::Run]:
//! domain geometry, time discretization, initial packet, and barrier, all in
//! natural units (see [`units`][crate::units]). It is validated once, at
//! configuration time, before any state is allocated; every derived quantity
//! (Δx, Δt, operator entries) is computed from it exactly once.

use serde::{ Deserialize, Serialize };
use crate::error::{ ConfigError, ConfigResult };

/// Parameters of the initial Gaussian wave packet.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Packet {
    /// Center position x₀.
    pub center: f64,
    /// Envelope width σ.
    pub sigma: f64,
    /// Carrier wavevector k₀.
    pub k0: f64,
}

/// Parameters of the rectangular potential barrier.
///
/// A `height` of zero is valid and yields free propagation.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Barrier {
    /// Physical position of the left barrier edge.
    pub start: f64,
    /// Physical barrier width.
    pub width: f64,
    /// Barrier height.
    pub height: f64,
}

impl Barrier {
    /// Physical position of the right barrier edge.
    pub fn end(&self) -> f64 { self.start + self.width }
}

/// Boundary-condition policy at the domain edges.
///
/// Only pinned-zero (Dirichlet) boundaries are provided: the wavefunction is
/// held at zero outside the domain, so a packet reaching an edge reflects off
/// it. Domains should be sized with enough margin that edge reflections stay
/// negligible over the simulated duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Boundary {
    /// ψ ≡ 0 outside [x_min, x_max].
    #[default]
    Pinned,
}

/// Immutable input record for a simulation run.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Left domain bound.
    pub x_min: f64,
    /// Right domain bound.
    pub x_max: f64,
    /// Number of grid points (≥ 3).
    pub n_points: usize,
    /// Total simulated time.
    pub t_total: f64,
    /// Number of time steps (≥ 1).
    pub n_steps: usize,
    /// Initial packet parameters.
    pub packet: Packet,
    /// Barrier parameters.
    pub barrier: Barrier,
    /// Boundary-condition policy.
    #[serde(default)]
    pub boundary: Boundary,
}

impl Config {
    /// Grid spacing Δx = (x_max - x_min)/(N - 1).
    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / (self.n_points as f64 - 1.0)
    }

    /// Time step Δt = t_total/n_steps.
    pub fn dt(&self) -> f64 { self.t_total / self.n_steps as f64 }

    /// Check every geometric and numeric precondition.
    ///
    /// Packet placement is not checked here: whether the packet carries
    /// probability inside the domain is a numeric property of the sampled
    /// envelope, detected when the initial state is generated
    /// ([`packet::gaussian`][crate::packet::gaussian]).
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_finite("x_min", self.x_min)?;
        ConfigError::check_finite("x_max", self.x_max)?;
        ConfigError::check_grid_size(self.n_points)?;
        ConfigError::check_domain(self.x_min, self.x_max)?;
        ConfigError::check_finite("t_total", self.t_total)?;
        if self.t_total <= 0.0 {
            return Err(ConfigError::BadDuration(self.t_total));
        }
        if self.n_steps == 0 {
            return Err(ConfigError::BadStepCount);
        }
        ConfigError::check_finite("packet.center", self.packet.center)?;
        ConfigError::check_finite("packet.sigma", self.packet.sigma)?;
        ConfigError::check_finite("packet.k0", self.packet.k0)?;
        ConfigError::check_sigma(self.packet.sigma)?;
        ConfigError::check_finite("barrier.start", self.barrier.start)?;
        ConfigError::check_finite("barrier.width", self.barrier.width)?;
        ConfigError::check_finite("barrier.height", self.barrier.height)?;
        if self.barrier.width < 0.0
            || self.barrier.start < self.x_min
            || self.barrier.end() > self.x_max
        {
            return Err(ConfigError::BarrierOutOfDomain {
                start: self.barrier.start,
                end: self.barrier.end(),
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            x_min: -20.0,
            x_max: 20.0,
            n_points: 257,
            t_total: 1.0,
            n_steps: 100,
            packet: Packet { center: -8.0, sigma: 1.5, k0: 2.0 },
            barrier: Barrier { start: 0.0, width: 1.0, height: 4.0 },
            boundary: Boundary::Pinned,
        }
    }

    #[test]
    fn derived_quantities() {
        let cfg = base();
        assert!((cfg.dx() - 40.0 / 256.0).abs() < 1e-15);
        assert!((cfg.dt() - 0.01).abs() < 1e-15);
    }

    #[test]
    fn accepts_zero_height_barrier() {
        let mut cfg = base();
        cfg.barrier.height = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_undersized_grid() {
        let mut cfg = base();
        cfg.n_points = 2;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadGridSize(2))));
    }

    #[test]
    fn rejects_reversed_domain() {
        let mut cfg = base();
        cfg.x_min = 20.0;
        cfg.x_max = -20.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadDomain(..))));
    }

    #[test]
    fn rejects_barrier_past_domain_edge() {
        let mut cfg = base();
        cfg.barrier.start = 19.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BarrierOutOfDomain { .. }),
        ));
    }

    #[test]
    fn rejects_nonpositive_sigma() {
        let mut cfg = base();
        cfg.packet.sigma = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadSigma(_))));
    }

    #[test]
    fn rejects_nan_parameter() {
        let mut cfg = base();
        cfg.packet.k0 = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonFiniteParameter("packet.k0", _)),
        ));
    }
}
