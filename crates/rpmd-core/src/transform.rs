//! Bead-axis transforms.
//!
//! `RingFft` is the complex DFT pair used on closed (ring) paths. Both
//! directions are unit-scale; callers apply the `1/sqrt(N)` symmetry factor
//! to the real samples entering and leaving the frequency domain, so the
//! overall pair is orthonormal.
//!
//! `ChainDct` is the orthonormal DCT-II/III pair used on open (chain)
//! paths. Forward-then-inverse is the identity.

use std::sync::Arc;

use rustdct::{Dct2, Dct3, DctPlanner};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

pub struct RingFft {
    planner: FftPlanner<f64>,
    scratch: Vec<Complex<f64>>,
}

impl RingFft {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            scratch: Vec::new(),
        }
    }

    pub fn forward(&mut self, data: &mut [Complex<f64>]) {
        let fft = self.planner.plan_fft_forward(data.len());
        self.process(fft, data);
    }

    pub fn inverse(&mut self, data: &mut [Complex<f64>]) {
        let fft = self.planner.plan_fft_inverse(data.len());
        self.process(fft, data);
    }

    fn process(&mut self, fft: Arc<dyn Fft<f64>>, data: &mut [Complex<f64>]) {
        let needed = fft.get_inplace_scratch_len();
        if self.scratch.len() < needed {
            self.scratch.resize(needed, Complex::default());
        }
        fft.process_with_scratch(data, &mut self.scratch[..needed]);
    }
}

impl Default for RingFft {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChainDct {
    planner: DctPlanner<f64>,
}

impl ChainDct {
    pub fn new() -> Self {
        Self {
            planner: DctPlanner::new(),
        }
    }

    /// Orthonormal DCT-II.
    pub fn forward(&mut self, data: &mut [f64]) {
        let n = data.len();
        if n == 0 {
            return;
        }
        let dct = self.planner.plan_dct2(n);
        dct.process_dct2(data);
        let s = (2.0 / n as f64).sqrt();
        for v in data.iter_mut() {
            *v *= s;
        }
        data[0] *= std::f64::consts::FRAC_1_SQRT_2;
    }

    /// Orthonormal DCT-III, the inverse of `forward`.
    pub fn inverse(&mut self, data: &mut [f64]) {
        let n = data.len();
        if n == 0 {
            return;
        }
        data[0] *= std::f64::consts::SQRT_2;
        let dct = self.planner.plan_dct3(n);
        dct.process_dct3(data);
        let s = (2.0 / n as f64).sqrt();
        for v in data.iter_mut() {
            *v *= s;
        }
    }
}

impl Default for ChainDct {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (0.3 + i as f64 * 1.7).sin() + 0.25 * i as f64)
            .collect()
    }

    #[test]
    fn ring_round_trip_with_symmetry_scale() {
        let mut fft = RingFft::new();
        for n in [1usize, 2, 3, 4, 5, 8, 12, 17] {
            let input = sample(n);
            let scale = 1.0 / (n as f64).sqrt();
            let mut buf: Vec<Complex<f64>> = input
                .iter()
                .map(|&x| Complex::new(scale * x, 0.0))
                .collect();
            fft.forward(&mut buf);
            fft.inverse(&mut buf);
            for (x, b) in input.iter().zip(&buf) {
                assert!((x - scale * b.re).abs() < 1e-12 * x.abs().max(1.0));
                assert!(b.im.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn chain_forward_matches_orthonormal_definition() {
        let mut dct = ChainDct::new();
        for n in [1usize, 2, 3, 5, 8] {
            let input = sample(n);
            let mut buf = input.clone();
            dct.forward(&mut buf);
            for k in 0..n {
                let s0 = if k == 0 {
                    (1.0 / n as f64).sqrt()
                } else {
                    (2.0 / n as f64).sqrt()
                };
                let mut expect = 0.0;
                for (i, &x) in input.iter().enumerate() {
                    let angle =
                        std::f64::consts::PI * k as f64 * (2 * i + 1) as f64 / (2 * n) as f64;
                    expect += x * angle.cos();
                }
                expect *= s0;
                assert!(
                    (buf[k] - expect).abs() < 1e-12 * expect.abs().max(1.0),
                    "n={n} k={k}: {} vs {expect}",
                    buf[k]
                );
            }
        }
    }

    #[test]
    fn chain_round_trip_is_identity() {
        let mut dct = ChainDct::new();
        for n in [1usize, 2, 3, 4, 5, 7, 9, 16] {
            let input = sample(n);
            let mut buf = input.clone();
            dct.forward(&mut buf);
            dct.inverse(&mut buf);
            for (x, y) in input.iter().zip(&buf) {
                assert!((x - y).abs() < 1e-12 * x.abs().max(1.0), "n={n}");
            }
        }
    }
}
