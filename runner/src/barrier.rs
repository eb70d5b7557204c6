//! Gaussian wave packet tunnelling through a rectangular barrier.
//!
//! Parameters are given in laboratory units (nm / fs / eV / pm / as) for an
//! electron, either on the command line or through a TOML scenario file. The
//! domain is laid out automatically around the packet: a margin of six packet
//! widths separates the launch point from the barrier and pads both ends, so
//! neither the reflected nor the transmitted part reaches a wall during the
//! simulated interval.
//!
//! The simulation runs on a background thread; this process streams emitted
//! snapshots to `frame_XXXXXX.csv` files (re, im, density columns) as they
//! are produced, then writes the grid, potential, final momentum spectrum,
//! and a JSON summary next to them.

use std::fs;
use std::path::PathBuf;
use anyhow::{ bail, Context, Result };
use clap::Parser;
use serde::{ Deserialize, Serialize };
use tracing::{ info, warn };
use qtunnel::{
    config::{ Barrier, Config, Packet },
    grid,
    observe,
    units::{ self, Units },
    utils::wf_norm,
    worker::{ self, SimEvent, WorkerOptions },
};
use runner::{ ensure_outdir, write_columns_csv, write_json };

#[derive(Debug, Parser)]
#[command(name = "barrier", about = "1-D quantum tunnelling of an electron wave packet")]
struct Args {
    /// Packet width σ [nm]
    #[arg(long, default_value_t = 1.0)]
    packet_size: f64,
    /// Barrier width [nm]
    #[arg(long, default_value_t = 1.0)]
    barrier_size: f64,
    /// Simulated duration [fs]
    #[arg(long, default_value_t = 30.0)]
    duration: f64,
    /// Mean packet energy [eV]
    #[arg(long, default_value_t = 1.0)]
    energy: f64,
    /// Barrier height [eV]
    #[arg(long, default_value_t = 1.0)]
    barrier_height: f64,
    /// Grid spacing [pm]
    #[arg(long, default_value_t = 10.0)]
    dx: f64,
    /// Time step [as]
    #[arg(long, default_value_t = 10.0)]
    dt: f64,
    /// Keep every i-th frame
    #[arg(long, default_value_t = 20)]
    stride: usize,
    /// Output directory
    #[arg(long, default_value = "output")]
    outdir: PathBuf,
    /// TOML scenario file overriding the physical parameters above
    #[arg(long)]
    scenario: Option<PathBuf>,
}

/// Physical scenario parameters in laboratory units.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
struct Scenario {
    /// Packet width σ [nm]
    packet_size_nm: f64,
    /// Barrier width [nm]
    barrier_size_nm: f64,
    /// Simulated duration [fs]
    duration_fs: f64,
    /// Mean packet energy [eV]
    energy_ev: f64,
    /// Barrier height [eV]
    barrier_height_ev: f64,
    /// Grid spacing [pm]
    dx_pm: f64,
    /// Time step [as]
    dt_as: f64,
}

impl From<&Args> for Scenario {
    fn from(args: &Args) -> Self {
        Self {
            packet_size_nm: args.packet_size,
            barrier_size_nm: args.barrier_size,
            duration_fs: args.duration,
            energy_ev: args.energy,
            barrier_height_ev: args.barrier_height,
            dx_pm: args.dx,
            dt_as: args.dt,
        }
    }
}

/// Map the laboratory scenario onto a naturalized [`Config`], using the
/// packet width as the base length scale.
///
/// Domain layout (margin = 6σ): the packet launches at 2·margin, the barrier
/// starts one margin further, and 4 margins of empty space follow the
/// barrier's far edge.
fn naturalize(sc: &Scenario) -> Result<(Config, Units)> {
    let sigma = sc.packet_size_nm * 1e-9;
    let uu = Units::from_mks(units::me, sigma);

    let margin = 6.0 * sigma;
    let x0 = 2.0 * margin;
    let barrier_start = x0 + margin;
    let barrier_width = sc.barrier_size_nm * 1e-9;
    let x_max = barrier_start + barrier_width + 4.0 * margin;
    let dx = sc.dx_pm * 1e-12;
    let dt = sc.dt_as * 1e-18;
    let duration = sc.duration_fs * 1e-15;
    if dx <= 0.0 || dt <= 0.0 {
        bail!("dx and dt must be positive");
    }
    let n_points = (x_max / dx).round() as usize + 1;
    let n_steps = (duration / dt).round() as usize;
    let k0 = uu.to_nat_wavevector(
        units::wavevector_mks(units::me, sc.energy_ev * units::e));

    let config = Config {
        x_min: 0.0,
        x_max: uu.to_nat_length(x_max),
        n_points,
        t_total: uu.to_nat_time(duration),
        n_steps,
        packet: Packet {
            center: uu.to_nat_length(x0),
            sigma: 1.0,
            k0,
        },
        barrier: Barrier {
            start: uu.to_nat_length(barrier_start),
            width: uu.to_nat_length(barrier_width),
            height: uu.to_nat_energy(sc.barrier_height_ev * units::e),
        },
        boundary: Default::default(),
    };
    Ok((config, uu))
}

/// Per-run record written as `summary.json`.
#[derive(Debug, Serialize)]
struct Summary {
    scenario: Scenario,
    config: Config,
    steps_done: usize,
    frames_written: usize,
    final_norm: f64,
    reflected: f64,
    in_barrier: f64,
    transmitted: f64,
    energy_natural: f64,
    energy_ev: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    let args = Args::parse();

    let scenario: Scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Scenario::from(&args),
    };
    let (config, uu) = naturalize(&scenario)?;
    info!(
        n_points = config.n_points,
        n_steps = config.n_steps,
        k0 = config.packet.k0,
        barrier_height = config.barrier.height,
        "naturalized scenario"
    );

    ensure_outdir(&args.outdir)?;
    // the grid and potential are pure functions of the configuration, so
    // they can be written before the background run starts
    let (grid, potential) = grid::build(&config)?;
    let x_nm: Vec<f64>
        = grid.x.iter().map(|&xk| uu.from_nat_length(xk) * 1e9).collect();
    let v_ev: Vec<f64>
        = potential.values.iter()
        .map(|&vk| uu.from_nat_energy(vk) / units::e)
        .collect();
    write_columns_csv(
        &args.outdir.join("grid.csv"),
        &["x_nm", "potential_ev"],
        &[&x_nm, &v_ev],
    )?;

    let stride = args.stride.max(1);
    let sim = worker::spawn(config, WorkerOptions { emit_every: stride })?;
    let mut frames = 0_usize;
    let mut last_percent = 0_usize;
    let mut failure = None;
    for event in sim.events().iter() {
        match event {
            SimEvent::Snapshot { step, state } => {
                let obs = observe::extract(&state, false);
                write_columns_csv(
                    &args.outdir.join(format!("frame_{step:06}.csv")),
                    &["re", "im", "density"],
                    &[
                        obs.re.as_slice().unwrap(),
                        obs.im.as_slice().unwrap(),
                        obs.density.as_slice().unwrap(),
                    ],
                )?;
                frames += 1;
            }
            SimEvent::Progress { done, total } => {
                let percent = done * 100 / total;
                if percent >= last_percent + 10 {
                    last_percent = percent;
                    info!(done, total, percent, "stepping");
                }
            }
            SimEvent::Finished { steps } => info!(steps, "finished"),
            SimEvent::Interrupted { steps } => warn!(steps, "interrupted"),
            SimEvent::Failed(err) => failure = Some(err),
        }
    }
    let run = sim.join();
    if let Some(err) = failure {
        bail!("run aborted: {err}");
    }

    let last = run.snapshots().last().expect("at least the initial snapshot");
    let dx = run.grid().dx;
    let (k_axis, spectrum) = observe::momentum_spectrum(last, dx);
    let spec_density: Vec<f64>
        = spectrum.iter().map(|sk| sk.norm_sqr()).collect();
    write_columns_csv(
        &args.outdir.join("spectrum.csv"),
        &["k", "spectral_density"],
        &[k_axis.as_slice().unwrap(), &spec_density],
    )?;

    let probs = observe::region_probabilities(last, run.potential().span, dx);
    let energy_nat = observe::energy(last, run.hamiltonian(), dx);
    let summary = Summary {
        scenario,
        config: *run.config(),
        steps_done: run.steps_done(),
        frames_written: frames,
        final_norm: wf_norm(last, dx),
        reflected: probs.left,
        in_barrier: probs.barrier,
        transmitted: probs.right,
        energy_natural: energy_nat,
        energy_ev: uu.from_nat_energy(energy_nat) / units::e,
    };
    write_json(&args.outdir.join("summary.json"), &summary)?;
    info!(
        transmitted = summary.transmitted,
        reflected = summary.reflected,
        "wrote {} frames to {}",
        frames,
        args.outdir.display()
    );
    Ok(())
}
