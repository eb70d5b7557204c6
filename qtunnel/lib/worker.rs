//! Background execution of a [`Run`] with channel-based snapshot delivery.
//!
//! Long simulations (thousands of steps) must not occupy an interactive
//! control path, so the stepping engine runs on its own named thread and
//! publishes completed snapshots as owned values over an
//! [`mpsc`][std::sync::mpsc] channel. A consumer can therefore never observe
//! a half-written state, and the sender never calls back into consumer code.
//! Cancellation goes the other way through the run's [`CancelToken`] and is
//! honored at step boundaries only.

use std::sync::mpsc::{ self, Receiver, Sender };
use std::thread;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, info };
use crate::{
    config::Config,
    error::{ ConfigResult, StepError },
    run::{ CancelToken, Run },
};

/// Options for a background simulation.
#[derive(Copy, Clone, Debug)]
pub struct WorkerOptions {
    /// Emit every `emit_every`-th snapshot (plus the initial condition and
    /// the final state). The full sequence is still retained by the [`Run`]
    /// returned from [`SimWorker::join`].
    pub emit_every: usize,
}

impl Default for WorkerOptions {
    fn default() -> Self { Self { emit_every: 1 } }
}

/// Events published by the stepping thread, in order: snapshots and progress
/// while stepping, then exactly one terminal event.
#[derive(Clone, Debug)]
pub enum SimEvent {
    /// A completed snapshot. `step` is its index in the run's sequence
    /// (0 is the initial condition).
    Snapshot { step: usize, state: nd::Array1<C64> },
    /// Stepping progress, suitable for a percentage readout.
    Progress { done: usize, total: usize },
    /// Every configured step completed.
    Finished { steps: usize },
    /// Cancellation was honored at a step boundary.
    Interrupted { steps: usize },
    /// The run aborted; snapshots produced before the failure were already
    /// published and remain valid.
    Failed(StepError),
}

/// Handle to a background simulation thread.
pub struct SimWorker {
    events: Receiver<SimEvent>,
    cancel: CancelToken,
    handle: thread::JoinHandle<Run>,
}

/// Validate `config`, then start stepping it on a background thread.
///
/// Configuration errors surface here, before any thread is spawned.
pub fn spawn(config: Config, opts: WorkerOptions) -> ConfigResult<SimWorker> {
    let run = Run::new(config)?;
    let cancel = run.cancel_token();
    let emit_every = opts.emit_every.max(1);
    let (tx, events) = mpsc::channel();
    let builder = thread::Builder::new().name("qtunnel-stepper".into());
    let handle = builder
        .spawn(move || worker_loop(run, tx, emit_every))
        // thread spawn failure is fatal (resource exhaustion)
        .expect("failed to spawn stepping thread");
    Ok(SimWorker { events, cancel, handle })
}

impl SimWorker {
    /// The event stream; ends after the terminal event when the thread exits.
    pub fn events(&self) -> &Receiver<SimEvent> { &self.events }

    /// Request cancellation; the thread stops at the next step boundary.
    pub fn cancel(&self) { self.cancel.cancel(); }

    /// A cancellation handle that outlives this worker handle.
    pub fn cancel_token(&self) -> CancelToken { self.cancel.clone() }

    /// Wait for the thread to finish and take back the [`Run`] with its full
    /// snapshot history.
    pub fn join(self) -> Run {
        match self.handle.join() {
            Ok(run) => run,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

fn worker_loop(mut run: Run, tx: Sender<SimEvent>, emit_every: usize) -> Run {
    let total = run.config().n_steps;
    debug!(total, emit_every, "stepping thread started");
    let _ = tx.send(SimEvent::Snapshot {
        step: 0,
        state: run.initial_state().clone(),
    });
    while run.remaining() > 0 {
        let produced = match run.advance(1).map(|fresh| fresh.len()) {
            Ok(produced) => produced,
            Err(err) => {
                info!(%err, steps_done = run.steps_done(), "run aborted");
                let _ = tx.send(SimEvent::Failed(err));
                return run;
            }
        };
        // an empty batch means cancellation was observed
        if produced == 0 { break; }
        let done = run.steps_done();
        if done % emit_every == 0 || done == total {
            let state = run.snapshots()[done].clone();
            if tx.send(SimEvent::Snapshot { step: done, state }).is_err() {
                // consumer went away; keep the history and stop
                break;
            }
            let _ = tx.send(SimEvent::Progress { done, total });
        }
    }
    let steps = run.steps_done();
    if run.cancel_token().is_cancelled() && steps < total {
        info!(steps, "simulation interrupted");
        let _ = tx.send(SimEvent::Interrupted { steps });
    } else {
        info!(steps, "simulation finished");
        let _ = tx.send(SimEvent::Finished { steps });
    }
    run
}
