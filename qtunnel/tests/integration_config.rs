//! Integration tests: configuration validation and deterministic geometry.
//!
//! Bad geometry must be rejected at configuration time, before any run state
//! is allocated, and accepted geometry must map onto the grid the same way
//! every time.

use qtunnel::config::{ Barrier, Boundary, Config, Packet };
use qtunnel::error::ConfigError;
use qtunnel::run::Run;

fn base_config() -> Config {
    Config {
        x_min: -20.0,
        x_max: 20.0,
        n_points: 201,
        t_total: 0.5,
        n_steps: 50,
        packet: Packet { center: -8.0, sigma: 1.5, k0: 2.0 },
        barrier: Barrier { start: 0.0, width: 1.0, height: 4.0 },
        boundary: Boundary::Pinned,
    }
}

#[test]
fn two_point_grid_allocates_no_run() {
    let mut cfg = base_config();
    cfg.n_points = 2;
    let res = Run::new(cfg);
    assert!(
        matches!(res, Err(ConfigError::BadGridSize(2))),
        "N = 2 must be rejected before any state is allocated",
    );
}

#[test]
fn barrier_outside_the_domain_is_rejected() {
    let mut cfg = base_config();
    cfg.barrier.start = 25.0;
    assert!(matches!(
        Run::new(cfg),
        Err(ConfigError::BarrierOutOfDomain { .. }),
    ));

    let mut cfg = base_config();
    cfg.barrier.start = -21.0;
    assert!(matches!(
        Run::new(cfg),
        Err(ConfigError::BarrierOutOfDomain { .. }),
    ));

    // inside on the left, overhanging on the right
    let mut cfg = base_config();
    cfg.barrier.start = 19.5;
    cfg.barrier.width = 2.0;
    assert!(matches!(
        Run::new(cfg),
        Err(ConfigError::BarrierOutOfDomain { .. }),
    ));
}

#[test]
fn reversed_domain_is_rejected() {
    let mut cfg = base_config();
    std::mem::swap(&mut cfg.x_min, &mut cfg.x_max);
    assert!(matches!(Run::new(cfg), Err(ConfigError::BadDomain(..))));
}

#[test]
fn packet_entirely_outside_the_domain_is_rejected() {
    let mut cfg = base_config();
    cfg.packet.center = 300.0;
    assert!(matches!(
        Run::new(cfg),
        Err(ConfigError::DegeneratePacket(_)),
    ));
}

#[test]
fn barrier_bounds_round_to_the_nearest_grid_index() {
    // dx = 0.2; requested bounds 0.29 and 1.31 round to indices of 0.2 and 1.4
    let mut cfg = base_config();
    cfg.barrier = Barrier { start: 0.29, width: 1.02, height: 4.0 };
    let run = Run::new(cfg).unwrap();
    let (i0, i1) = run.potential().span;
    let grid = run.grid();
    assert!((grid.x[i0] - 0.2).abs() < 1e-9, "left edge at {}", grid.x[i0]);
    assert!((grid.x[i1] - 1.4).abs() < 1e-9, "right edge at {}", grid.x[i1]);
    assert!(run.potential().values[i0] == 4.0);
    assert!(run.potential().values[i1 - 1] == 4.0);
    assert!(run.potential().values[i0 - 1] == 0.0);
    assert!(run.potential().values[i1] == 0.0);
}

#[test]
fn configuration_determines_the_operator_exactly_once() {
    let cfg = base_config();
    let a = Run::new(cfg).unwrap();
    let b = Run::new(cfg).unwrap();
    assert_eq!(a.grid().x, b.grid().x);
    assert_eq!(a.potential().values, b.potential().values);
    assert_eq!(a.hamiltonian().diag(), b.hamiltonian().diag());
    assert_eq!(a.initial_state(), b.initial_state());
}
