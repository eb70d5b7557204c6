//! The [`Run`] life-cycle value: one configured simulation, its fixed
//! operators, and the snapshot sequence it grows.

use std::sync::{
    Arc,
    atomic::{ AtomicBool, Ordering },
};
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    config::Config,
    error::{ ConfigResult, StepError, StepResult },
    grid::{ self, Grid, Potential },
    hamiltonian::Hamiltonian,
    packet,
    stepper::CrankNicolson,
    utils::wf_norm,
    DEF_NORM_TOL,
};

/// Cooperative cancellation flag for a [`Run`].
///
/// Cheap to clone and safe to trigger from any thread. Cancellation is only
/// ever honored between completed steps, never mid-solve, and it is sticky:
/// a cancelled run stays cancelled, and resuming means configuring a new run
/// (stepping is deterministic in the configuration, so nothing is lost).
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self(Arc::new(AtomicBool::new(false))) }

    /// Request cancellation; takes effect at the next step boundary.
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// One configured simulation.
///
/// A `Run` owns its grid, potential profile, Hamiltonian, and the ordered
/// snapshot sequence (index 0 is the initial condition). The sequence is
/// append-only with the run as single writer; the grid and operators are
/// immutable after construction and may be read from other threads freely.
/// Parameter changes mean discarding the run and configuring a new one.
pub struct Run {
    config: Config,
    grid: Grid,
    potential: Potential,
    hamiltonian: Hamiltonian,
    stepper: CrankNicolson,
    current: nd::Array1<C64>,
    snapshots: Vec<nd::Array1<C64>>,
    cancel: CancelToken,
    fault: Option<StepError>,
}

impl Run {
    /// Configure a run: validate, build grid and potential, assemble the
    /// Hamiltonian, generate the initial packet, and factorize the stepping
    /// operators. No simulation state is allocated if validation fails.
    pub fn new(config: Config) -> ConfigResult<Self> {
        config.validate()?;
        let (grid, potential) = grid::build(&config)?;
        let hamiltonian = Hamiltonian::new(&grid, &potential);
        let q0 = packet::gaussian(&grid, &config.packet)?;
        let stepper = CrankNicolson::new(&hamiltonian, config.dt());
        debug!(
            n_points = grid.len(),
            dx = grid.dx,
            dt = config.dt(),
            n_steps = config.n_steps,
            "configured run"
        );
        Ok(Self {
            config,
            grid,
            potential,
            hamiltonian,
            stepper,
            current: q0.clone(),
            snapshots: vec![q0],
            cancel: CancelToken::new(),
            fault: None,
        })
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn potential(&self) -> &Potential { &self.potential }

    pub fn hamiltonian(&self) -> &Hamiltonian { &self.hamiltonian }

    /// The initial condition (snapshot 0).
    pub fn initial_state(&self) -> &nd::Array1<C64> { &self.snapshots[0] }

    /// All snapshots produced so far, ordered by step index.
    pub fn snapshots(&self) -> &[nd::Array1<C64>] { &self.snapshots }

    /// Number of steps taken so far.
    pub fn steps_done(&self) -> usize { self.snapshots.len() - 1 }

    /// Steps remaining until the configured total.
    pub fn remaining(&self) -> usize { self.config.n_steps - self.steps_done() }

    /// Time coordinates of the snapshots produced so far.
    pub fn times(&self) -> nd::Array1<f64> {
        let dt = self.config.dt();
        (0..self.snapshots.len()).map(|k| k as f64 * dt).collect()
    }

    /// A handle for requesting cooperative cancellation of this run.
    pub fn cancel_token(&self) -> CancelToken { self.cancel.clone() }

    /// Advance by up to `steps` steps (clamped to the configured total) and
    /// return only the newly produced snapshots.
    ///
    /// Stops early, with a shorter (possibly empty) result, if cancellation
    /// is observed at a step boundary. Fails with [`StepError::NonFinite`]
    /// if a step produces a non-finite amplitude; the offending state is
    /// discarded, every previously appended snapshot stays valid, and all
    /// further calls return the same error.
    pub fn advance(&mut self, steps: usize) -> StepResult<&[nd::Array1<C64>]> {
        if let Some(err) = &self.fault {
            return Err(err.clone());
        }
        let first_new = self.snapshots.len();
        let batch = steps.min(self.remaining());
        for _ in 0..batch {
            if self.cancel.is_cancelled() {
                debug!(steps_done = self.steps_done(), "cancelled at step boundary");
                break;
            }
            self.stepper.step(&mut self.current);
            let step = self.snapshots.len();
            if !all_finite(&self.current) {
                let err = StepError::NonFinite(step);
                self.fault = Some(err.clone());
                return Err(err);
            }
            let norm = wf_norm(&self.current, self.grid.dx);
            if (norm - 1.0).abs() > DEF_NORM_TOL {
                warn!(step, norm, "discrete norm drifted beyond tolerance");
            }
            self.snapshots.push(self.current.clone());
        }
        Ok(&self.snapshots[first_new..])
    }

    /// Advance through every remaining step.
    pub fn run_to_end(&mut self) -> StepResult<&[nd::Array1<C64>]> {
        let remaining = self.remaining();
        self.advance(remaining)
    }
}

fn all_finite(q: &nd::Array1<C64>) -> bool {
    q.iter().all(|qk| qk.re.is_finite() && qk.im.is_finite())
}
