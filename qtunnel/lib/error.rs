//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when a configuration is rejected before any numeric work.
///
/// Every variant is recoverable by supplying corrected input; no simulation
/// state is allocated when one of these is produced.
#[derive(Clone, Debug, Error)]
pub enum ConfigError {
    /// Returned when the grid would have fewer than 3 points.
    #[error("spatial grids must have at least 3 points; got {0}")]
    BadGridSize(usize),

    /// Returned when the domain bounds are non-increasing.
    #[error("domain bounds must satisfy x_min < x_max; got [{0}, {1}]")]
    BadDomain(f64, f64),

    /// Returned when the total simulated time is non-positive or non-finite.
    #[error("total simulated time must be finite and greater than 0; got {0}")]
    BadDuration(f64),

    /// Returned when the step count is zero.
    #[error("step count must be greater than 0")]
    BadStepCount,

    /// Returned when a non-positive packet width is encountered.
    #[error("packet width must be greater than 0; got {0}")]
    BadSigma(f64),

    /// Returned when the barrier interval does not lie within the domain.
    #[error("barrier [{start}, {end}] must lie within the domain [{x_min}, {x_max}]")]
    BarrierOutOfDomain {
        start: f64,
        end: f64,
        x_min: f64,
        x_max: f64,
    },

    /// Returned when a parameter that must be a finite real number is not.
    #[error("parameter `{0}` must be a finite real number; got {1}")]
    NonFiniteParameter(&'static str, f64),

    /// Returned when the initial packet carries essentially no probability
    /// inside the domain, so normalization would divide by (nearly) zero.
    #[error("initial packet lies outside the domain; pre-normalization norm is {0:.3e}")]
    DegeneratePacket(f64),
}

impl ConfigError {
    pub(crate) fn check_finite(name: &'static str, val: f64) -> Result<(), Self> {
        val.is_finite().then_some(()).ok_or(Self::NonFiniteParameter(name, val))
    }

    pub(crate) fn check_sigma(sigma: f64) -> Result<(), Self> {
        (sigma > 0.0).then_some(()).ok_or(Self::BadSigma(sigma))
    }

    pub(crate) fn check_grid_size(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::BadGridSize(n))
    }

    pub(crate) fn check_domain(x_min: f64, x_max: f64) -> Result<(), Self> {
        (x_min < x_max).then_some(()).ok_or(Self::BadDomain(x_min, x_max))
    }
}

/// Returned when the stepping engine must abort the remaining steps of a run.
///
/// Fatal to the current run only: snapshots produced before the failure
/// remain valid and are preserved for inspection.
#[derive(Clone, Debug, Error)]
pub enum StepError {
    /// Returned when a freshly computed state contains a non-finite
    /// amplitude. This signals a configuration error (e.g. a time step far
    /// too large for the chosen spatial resolution); the offending state is
    /// discarded rather than silently carried forward.
    #[error("non-finite amplitude produced by step {0}; aborting the remaining steps")]
    NonFinite(usize),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type StepResult<T> = Result<T, StepError>;
