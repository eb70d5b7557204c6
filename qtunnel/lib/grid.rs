//! Spatial discretization and the potential-energy profile.

use ndarray as nd;
use crate::{
    config::{ Barrier, Config },
    error::{ ConfigError, ConfigResult },
};

/// A uniform spatial grid of `n` points spanning `[x_min, x_max]`.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Grid positions, strictly increasing.
    pub x: nd::Array1<f64>,
    /// Grid spacing.
    pub dx: f64,
}

impl Grid {
    /// Construct a uniform grid. Positions are generated once; Δx is fixed to
    /// (x_max - x_min)/(n - 1).
    pub fn new(x_min: f64, x_max: f64, n: usize) -> ConfigResult<Self> {
        ConfigError::check_grid_size(n)?;
        ConfigError::check_domain(x_min, x_max)?;
        let x = nd::Array1::linspace(x_min, x_max, n);
        let dx = (x_max - x_min) / (n as f64 - 1.0);
        Ok(Self { x, dx })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Index of the grid point nearest to the physical position `pos`.
    ///
    /// Rounding is to the NEAREST index (not floor or ceiling); this is the
    /// rule that maps requested physical barrier bounds onto the grid, so
    /// edge cases reproduce across runs. Out-of-range positions clamp to the
    /// nearest end of the grid.
    pub fn nearest_index(&self, pos: f64) -> usize {
        let i = ((pos - self.x[0]) / self.dx).round();
        (i.max(0.0) as usize).min(self.len() - 1)
    }
}

/// A potential-energy profile sampled on a [`Grid`].
#[derive(Clone, Debug)]
pub struct Potential {
    /// Energy value at each grid point.
    pub values: nd::Array1<f64>,
    /// Barrier index range `[start, end)`.
    pub span: (usize, usize),
}

impl Potential {
    /// Sample a rectangular barrier on `grid`: zero everywhere except the
    /// contiguous index range covering `[barrier.start, barrier.end())`,
    /// where the value is `barrier.height`.
    ///
    /// The physical bounds are rounded to the nearest grid index, so a
    /// requested width below Δx/2 may produce an empty span.
    pub fn rectangular(grid: &Grid, barrier: &Barrier) -> Self {
        let i0 = grid.nearest_index(barrier.start);
        let i1 = grid.nearest_index(barrier.end());
        let mut values = nd::Array1::zeros(grid.len());
        values.slice_mut(nd::s![i0..i1]).fill(barrier.height);
        Self { values, span: (i0, i1) }
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Build the grid and potential profile for a validated configuration.
pub fn build(config: &Config) -> ConfigResult<(Grid, Potential)> {
    let grid = Grid::new(config.x_min, config.x_max, config.n_points)?;
    let potential = Potential::rectangular(&grid, &config.barrier);
    Ok((grid, potential))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints_and_spacing() {
        let grid = Grid::new(-5.0, 5.0, 101).unwrap();
        assert_eq!(grid.len(), 101);
        assert_eq!(grid.x[0], -5.0);
        assert_eq!(grid.x[100], 5.0);
        assert!((grid.dx - 0.1).abs() < 1e-15);
        for k in 0..100 {
            assert!(grid.x[k] < grid.x[k + 1]);
        }
    }

    #[test]
    fn nearest_index_rounds_not_floors() {
        let grid = Grid::new(0.0, 10.0, 11).unwrap();
        assert_eq!(grid.nearest_index(2.4), 2);
        assert_eq!(grid.nearest_index(2.6), 3);
        assert_eq!(grid.nearest_index(-3.0), 0);
        assert_eq!(grid.nearest_index(42.0), 10);
    }

    #[test]
    fn barrier_occupies_rounded_span() {
        let grid = Grid::new(0.0, 10.0, 11).unwrap();
        let barrier = Barrier { start: 2.4, width: 1.2, height: 7.5 };
        let pot = Potential::rectangular(&grid, &barrier);
        assert_eq!(pot.span, (2, 4));
        assert_eq!(pot.values[1], 0.0);
        assert_eq!(pot.values[2], 7.5);
        assert_eq!(pot.values[3], 7.5);
        assert_eq!(pot.values[4], 0.0);
    }

    #[test]
    fn hairline_barrier_may_vanish() {
        let grid = Grid::new(0.0, 10.0, 11).unwrap();
        let barrier = Barrier { start: 2.1, width: 0.2, height: 7.5 };
        let pot = Potential::rectangular(&grid, &barrier);
        assert_eq!(pot.span, (2, 2));
        assert!(pot.values.iter().all(|&v| v == 0.0));
    }
}
