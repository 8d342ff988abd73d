//! Exact evolution of the free ring polymer in the normal-mode basis.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;

use rpmd_core::{ChainDct, RingFft, BOLTZ, HBAR};

use crate::config::RpmdConfig;
use crate::context::System;
use crate::state::BeadState;

pub(crate) fn evolve_closed(
    state: &mut BeadState,
    system: &System,
    config: &RpmdConfig,
    fft: &mut RingFft,
    mode_q: &mut [Complex<f64>],
    mode_v: &mut [Complex<f64>],
) {
    let n = state.num_copies();
    let dt = config.step_size;
    let scale = 1.0 / (n as f64).sqrt();
    let twown = 2.0 * n as f64 * BOLTZ * config.temperature / HBAR;

    for particle in 0..state.num_particles() {
        if system.particle_mass(particle) == 0.0 {
            continue;
        }
        for component in 0..3 {
            for k in 0..n {
                let x = state.positions(k)[particle].component(component);
                let v = state.velocities(k)[particle].component(component);
                mode_q[k] = Complex::new(scale * x, 0.0);
                mode_v[k] = Complex::new(scale * v, 0.0);
            }
            fft.forward(&mut mode_q[..n]);
            fft.forward(&mut mode_v[..n]);

            // The centroid is a free translation; every other mode is an
            // exact harmonic rotation of the (q, v) pair.
            mode_q[0] += mode_v[0] * dt;
            for k in 1..n {
                let wk = twown * (k as f64 * PI / n as f64).sin();
                let wt = wk * dt;
                let coswt = wt.cos();
                let sinwt = wt.sin();
                let vprime = mode_v[k] * coswt - mode_q[k] * (wk * sinwt);
                mode_q[k] = mode_v[k] * (sinwt / wk) + mode_q[k] * coswt;
                mode_v[k] = vprime;
            }

            fft.inverse(&mut mode_q[..n]);
            fft.inverse(&mut mode_v[..n]);
            for k in 0..n {
                state.positions_mut(k)[particle].set_component(component, scale * mode_q[k].re);
                state.velocities_mut(k)[particle].set_component(component, scale * mode_v[k].re);
            }
        }
    }
}

pub(crate) fn evolve_open(
    state: &mut BeadState,
    system: &System,
    config: &RpmdConfig,
    dct: &mut ChainDct,
    mode_q: &mut [f64],
    mode_v: &mut [f64],
) {
    let n = state.num_copies();
    let dt = config.step_size;
    let twown = 2.0 * (n as f64 - 1.0) * BOLTZ * config.temperature / HBAR;

    for particle in 0..state.num_particles() {
        if system.particle_mass(particle) == 0.0 {
            continue;
        }
        for component in 0..3 {
            for k in 0..n {
                mode_q[k] = state.positions(k)[particle].component(component);
                mode_v[k] = state.velocities(k)[particle].component(component);
            }
            dct.forward(&mut mode_q[..n]);
            dct.forward(&mut mode_v[..n]);

            mode_q[0] += mode_v[0] * dt;
            for k in 1..n {
                let wk = twown * (k as f64 * PI / n as f64 / 2.0).sin();
                let wt = wk * dt;
                let coswt = wt.cos();
                let sinwt = wt.sin();
                let vprime = mode_v[k] * coswt - mode_q[k] * (wk * sinwt);
                mode_q[k] = mode_v[k] * (sinwt / wk) + mode_q[k] * coswt;
                mode_v[k] = vprime;
            }

            dct.inverse(&mut mode_q[..n]);
            dct.inverse(&mut mode_v[..n]);
            for k in 0..n {
                state.positions_mut(k)[particle].set_component(component, mode_q[k]);
                state.velocities_mut(k)[particle].set_component(component, mode_v[k]);
            }
        }
    }
}
