//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1, concatenate };
use num_complex::Complex64 as C64;
use num_traits::Float;
use rustfft as fft;
use crate::Arr1;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    (dx / two) * (y[0] + two * y.slice(nd::s![1..n - 1]).sum() + y[n - 1])
}

/// Calculate the norm of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    let n: usize = q.len();
    (dx / 2.0) * (
        q[0].norm_sqr()
        + 2.0 * q.iter().skip(1).take(n - 2).map(|qk| qk.norm_sqr()).sum::<f64>()
        + q[n - 1].norm_sqr()
    )
}

/// Calculate the inner product of two wavefunctions.
///
/// *Panics if either array has length less than 2*.
pub fn wf_dot<S, T>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: f64,
) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    let n: usize = q.len().min(p.len());
    (dx / 2.0) * (
        q[0].conj() * p[0]
        + 2.0 * q.iter().zip(p).skip(1).take(n - 2)
            .fold(C64::from(0.0), |acc, (qk, pk)| acc + qk.conj() * *pk)
        + q[n - 1].conj() * p[n - 1]
    )
}

/// Renormalize a wavefunction in place.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Return a normalized copy of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    q.mapv(|qk| qk / norm)
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dx`.
pub fn fft_freq(n: usize, dx: f64) -> nd::Array1<f64> {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    let fp = (0..m).map(|k| k as f64 / (n as f64 * dx));
    let fm = (1..n - m + 1).rev().map(|k| -(k as f64) / (n as f64 * dx));
    fp.chain(fm).collect()
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn do_fft<S>(x: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut f = x.to_owned();
    fft_inplace(&mut f);
    f
}

/// Perform the one-dimensional, complex-valued FFT in place.
pub fn fft_inplace<S>(f: &mut Arr1<S>)
where S: nd::DataMut<Elem = C64>
{
    let n: usize = f.len();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(n);
    fft_plan.process(f.as_slice_mut().unwrap());
}

/// Perform the one-dimensional, complex-valued inverse FFT.
pub fn do_ifft<S>(f: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut x = f.to_owned();
    ifft_inplace(&mut x);
    x
}

/// Perform the one-dimensional, complex-valued inverse FFT in place.
pub fn ifft_inplace<S>(x: &mut Arr1<S>)
where S: nd::DataMut<Elem = C64>
{
    let n: usize = x.len();
    let mut plan = fft::FftPlanner::new();
    let ifft_plan = plan.plan_fft_inverse(n);
    ifft_plan.process(x.as_slice_mut().unwrap());
    let n = n as f64;
    x.map_inplace(|xk| { *xk /= n; });
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m)
        = if n % 2 == 0 {
            x.view().split_at(nd::Axis(0), n / 2)
        } else {
            x.view().split_at(nd::Axis(0), n / 2 + 1)
        };
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray as nd;

    #[test]
    fn trapz_integrates_a_line_exactly() {
        let y: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 101);
        let dx = 1.0 / 100.0;
        assert!((trapz(&y, dx) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn renormalize_yields_unit_norm() {
        let mut q: nd::Array1<C64>
            = (0..64).map(|k| C64::new(0.1 * k as f64, -0.05 * k as f64)).collect();
        wf_renormalize(&mut q, 0.25);
        assert!((wf_norm(&q, 0.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fft_freq_splits_positive_and_negative_branches() {
        let f = fft_freq(8, 1.0);
        assert_eq!(f.len(), 8);
        assert!(f[0] == 0.0);
        assert!(f[3] > 0.0 && f[4] < 0.0);
        let f = fft_freq(7, 1.0);
        assert!(f[3] > 0.0 && f[4] < 0.0);
    }

    #[test]
    fn fft_shift_centers_the_zero_frequency() {
        let f = fft_freq(8, 1.0);
        let sh: nd::Array1<f64> = fft_shift(&f);
        for k in 0..7 {
            assert!(sh[k] < sh[k + 1], "shifted axis should be increasing");
        }
        assert_eq!(sh[4], 0.0);
    }
}
