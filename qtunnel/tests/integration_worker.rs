//! Integration tests: background stepping with channel-based delivery.

use qtunnel::config::{ Barrier, Boundary, Config, Packet };
use qtunnel::error::ConfigError;
use qtunnel::worker::{ self, SimEvent, WorkerOptions };

fn short_config() -> Config {
    Config {
        x_min: -15.0,
        x_max: 15.0,
        n_points: 128,
        t_total: 0.06,
        n_steps: 60,
        packet: Packet { center: -5.0, sigma: 1.2, k0: 2.0 },
        barrier: Barrier { start: 0.0, width: 0.8, height: 3.0 },
        boundary: Boundary::Pinned,
    }
}

#[test]
fn worker_steps_to_completion_and_returns_the_run() {
    let worker = worker::spawn(short_config(), WorkerOptions { emit_every: 20 })
        .unwrap();
    let events: Vec<SimEvent> = worker.events().iter().collect();

    let snapshot_steps: Vec<usize> = events.iter()
        .filter_map(|ev| match ev {
            SimEvent::Snapshot { step, .. } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(snapshot_steps, vec![0, 20, 40, 60]);

    let progress: Vec<(usize, usize)> = events.iter()
        .filter_map(|ev| match ev {
            SimEvent::Progress { done, total } => Some((*done, *total)),
            _ => None,
        })
        .collect();
    assert!(progress.windows(2).all(|w| w[0].0 < w[1].0), "progress must be ordered");
    assert!(progress.iter().all(|&(_, total)| total == 60));

    match events.last() {
        Some(SimEvent::Finished { steps }) => assert_eq!(*steps, 60),
        other => panic!("expected Finished as the terminal event, got {other:?}"),
    }

    let run = worker.join();
    assert_eq!(run.steps_done(), 60);
    assert_eq!(run.snapshots().len(), 61);

    // published snapshots are complete copies of the run's own history
    let published0 = events.iter()
        .find_map(|ev| match ev {
            SimEvent::Snapshot { step: 0, state } => Some(state),
            _ => None,
        })
        .unwrap();
    assert_eq!(published0, run.initial_state());
}

#[test]
fn invalid_configuration_fails_before_any_thread_is_spawned() {
    let mut cfg = short_config();
    cfg.n_points = 2;
    let res = worker::spawn(cfg, WorkerOptions::default());
    assert!(matches!(res.err(), Some(ConfigError::BadGridSize(2))));
}

#[test]
fn cancellation_interrupts_at_a_step_boundary() {
    // small state, absurdly many steps: completion would take far longer
    // than the cancellation round-trip
    let cfg = Config {
        x_min: 0.0,
        x_max: 1.0,
        n_points: 16,
        t_total: 200.0,
        n_steps: 200_000,
        packet: Packet { center: 0.5, sigma: 0.1, k0: 0.0 },
        barrier: Barrier { start: 0.7, width: 0.1, height: 1.0 },
        boundary: Boundary::Pinned,
    };
    let worker = worker::spawn(cfg, WorkerOptions { emit_every: 50_000 })
        .unwrap();
    worker.cancel();
    let events: Vec<SimEvent> = worker.events().iter().collect();
    match events.last() {
        Some(SimEvent::Interrupted { steps }) => assert!(*steps < 200_000),
        other => panic!("expected Interrupted as the terminal event, got {other:?}"),
    }
    let run = worker.join();
    assert!(run.steps_done() < 200_000);
    // whatever was produced before the cancellation is still consistent
    assert_eq!(run.snapshots().len(), run.steps_done() + 1);
}
