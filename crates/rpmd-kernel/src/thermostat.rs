//! PILE-L thermostat: a per-mode Ornstein-Uhlenbeck half-step applied to
//! the velocities, with a local Langevin update on the centroid mode and
//! critically damped white noise on the internal modes.

use std::f64::consts::{PI, SQRT_2};

use rustfft::num_complex::Complex;

use rpmd_core::{ChainDct, GaussianRng, RingFft, BOLTZ, HBAR};

use crate::config::RpmdConfig;
use crate::context::System;
use crate::state::BeadState;

pub(crate) fn apply_closed(
    state: &mut BeadState,
    system: &System,
    config: &RpmdConfig,
    fft: &mut RingFft,
    modes: &mut [Complex<f64>],
    rng: &mut GaussianRng,
) {
    let n = state.num_copies();
    let halfdt = 0.5 * config.step_size;
    let scale = 1.0 / (n as f64).sqrt();
    let nkt = n as f64 * BOLTZ * config.temperature;
    let twown = 2.0 * nkt / HBAR;
    let c1_0 = (-halfdt * config.friction).exp();
    let c2_0 = (1.0 - c1_0 * c1_0).sqrt();

    for particle in 0..state.num_particles() {
        let mass = system.particle_mass(particle);
        if mass == 0.0 {
            continue;
        }
        let c3_0 = c2_0 * (nkt / mass).sqrt();
        for component in 0..3 {
            for k in 0..n {
                let v = state.velocities(k)[particle].component(component);
                modes[k] = Complex::new(scale * v, 0.0);
            }
            fft.forward(&mut modes[..n]);

            // Local Langevin update on the centroid mode.
            modes[0].re = modes[0].re * c1_0 + c3_0 * rng.next_gaussian();

            // Critically damped white noise on the remaining modes. The
            // Nyquist mode of an even ring pairs with itself, so it takes a
            // single real deviate at doubled amplitude; every other internal
            // mode gets an independent complex deviate mirrored onto its
            // conjugate partner.
            for k in 1..=n / 2 {
                let nyquist = n % 2 == 0 && k == n / 2;
                let wk = twown * (k as f64 * PI / n as f64).sin();
                let c1 = (-2.0 * wk * halfdt).exp();
                let c2 = ((1.0 - c1 * c1) / 2.0).sqrt() * if nyquist { SQRT_2 } else { 1.0 };
                let c3 = c2 * (nkt / mass).sqrt();
                let rand1 = c3 * rng.next_gaussian();
                let rand2 = if nyquist {
                    0.0
                } else {
                    c3 * rng.next_gaussian()
                };
                modes[k] = modes[k] * c1 + Complex::new(rand1, rand2);
                if k < n - k {
                    modes[n - k] = modes[n - k] * c1 + Complex::new(rand1, -rand2);
                }
            }

            fft.inverse(&mut modes[..n]);
            for k in 0..n {
                let v = scale * modes[k].re;
                state.velocities_mut(k)[particle].set_component(component, v);
            }
        }
    }
}

pub(crate) fn apply_open(
    state: &mut BeadState,
    system: &System,
    config: &RpmdConfig,
    dct: &mut ChainDct,
    modes: &mut [f64],
    rng: &mut GaussianRng,
) {
    let n = state.num_copies();
    let halfdt = 0.5 * config.step_size;
    let nkt = n as f64 * BOLTZ * config.temperature;
    let nkt_m1 = (n as f64 - 1.0) * BOLTZ * config.temperature;
    let twown = 2.0 * nkt_m1 / HBAR;
    let c1_0 = (-halfdt * config.friction).exp();
    let c2_0 = (1.0 - c1_0 * c1_0).sqrt();

    for particle in 0..state.num_particles() {
        let mass = system.particle_mass(particle);
        if mass == 0.0 {
            continue;
        }
        let c3_0 = c2_0 * (nkt / mass).sqrt();
        for component in 0..3 {
            for k in 0..n {
                modes[k] = state.velocities(k)[particle].component(component);
            }
            dct.forward(&mut modes[..n]);

            modes[0] = modes[0] * c1_0 + c3_0 * rng.next_gaussian();

            // Chain modes are real; no pairing and no 1/2 in the
            // fluctuation amplitude.
            for k in 1..n {
                let wk = twown * (k as f64 * PI / n as f64 / 2.0).sin();
                let c1 = (-2.0 * wk * halfdt).exp();
                let c2 = (1.0 - c1 * c1).sqrt();
                let c3 = c2 * (nkt / mass).sqrt();
                modes[k] = modes[k] * c1 + c3 * rng.next_gaussian();
            }

            dct.inverse(&mut modes[..n]);
            for k in 0..n {
                state.velocities_mut(k)[particle].set_component(component, modes[k]);
            }
        }
    }
}
