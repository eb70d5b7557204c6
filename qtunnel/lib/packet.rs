//! Initial-state generation.

use num_complex::Complex64 as C64;
use ndarray as nd;
use crate::{
    config::Packet,
    error::{ ConfigError, ConfigResult },
    grid::Grid,
    utils::{ wf_norm, wf_renormalize },
    DEF_DEGENERATE_NORM,
};

/// Sample a Gaussian wave packet on `grid`:
///
/// ```text
/// ψ(x) ∝ exp(-(x - x₀)² / 4σ² + i k₀ x)
/// ```
///
/// The result is normalized numerically: the discrete norm is accumulated
/// over the grid and all amplitudes are divided by its square root, so the
/// returned state has unit norm to machine precision regardless of how much
/// of the analytic envelope the domain captures.
///
/// Fails with [`ConfigError::BadSigma`] for σ ≤ 0 and with
/// [`ConfigError::DegeneratePacket`] when the envelope carries essentially no
/// probability inside the domain (packet centered far outside it).
pub fn gaussian(grid: &Grid, packet: &Packet) -> ConfigResult<nd::Array1<C64>> {
    ConfigError::check_sigma(packet.sigma)?;
    let Packet { center, sigma, k0 } = *packet;
    let mut q: nd::Array1<C64>
        = grid.x.iter()
        .map(|&xk| {
            (-(xk - center).powi(2) / (4.0 * sigma.powi(2))).exp()
                * C64::cis(k0 * xk)
        })
        .collect();
    let norm = wf_norm(&q, grid.dx);
    if norm < DEF_DEGENERATE_NORM {
        return Err(ConfigError::DegeneratePacket(norm));
    }
    wf_renormalize(&mut q, grid.dx);
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::wf_norm;

    fn grid() -> Grid { Grid::new(-20.0, 20.0, 513).unwrap() }

    #[test]
    fn packet_is_unit_normalized() {
        let q = gaussian(&grid(), &Packet { center: -5.0, sigma: 1.5, k0: 3.0 })
            .unwrap();
        assert!((wf_norm(&q, grid().dx) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn density_peaks_at_the_requested_center() {
        let g = grid();
        let q = gaussian(&g, &Packet { center: -5.0, sigma: 1.5, k0: 3.0 })
            .unwrap();
        let imax = q.iter().map(|qk| qk.norm_sqr()).enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(imax, g.nearest_index(-5.0));
    }

    #[test]
    fn carrier_momentum_is_visible_in_the_phase() {
        let g = grid();
        let q = gaussian(&g, &Packet { center: 0.0, sigma: 2.0, k0: 1.0 })
            .unwrap();
        let i = g.nearest_index(0.0);
        // phase difference between adjacent samples near the center ≈ k₀ Δx
        let dphi = (q[i + 1] * q[i].conj()).arg();
        assert!((dphi - g.dx).abs() < 1e-3, "got {dphi}, expected {}", g.dx);
    }

    #[test]
    fn packet_outside_the_domain_is_degenerate() {
        let res = gaussian(&grid(), &Packet { center: 500.0, sigma: 1.0, k0: 0.0 });
        assert!(matches!(res, Err(ConfigError::DegeneratePacket(_))));
    }

    #[test]
    fn zero_sigma_is_rejected() {
        let res = gaussian(&grid(), &Packet { center: 0.0, sigma: 0.0, k0: 0.0 });
        assert!(matches!(res, Err(ConfigError::BadSigma(_))));
    }
}
