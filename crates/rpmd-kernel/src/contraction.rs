//! Ring-polymer contraction: evaluate slow force groups on a reduced bead
//! count and interpolate the result back onto the full ring. Closed path
//! only.

use rustfft::num_complex::Complex;

use rpmd_core::{RingFft, RpmdResult, Vec3};

use crate::config::ContractionPlan;
use crate::context::Context;
use crate::state::BeadState;

/// Scratch tensors sized at initialization to the largest contraction.
#[derive(Clone, Debug)]
pub(crate) struct ContractionWorkspace {
    num_particles: usize,
    positions: Vec<Vec3>,
    forces: Vec<Vec3>,
    modes: Vec<Complex<f64>>,
}

impl ContractionWorkspace {
    pub(crate) fn new(max_copies: usize, num_copies: usize, num_particles: usize) -> Self {
        Self {
            num_particles,
            positions: vec![Vec3::default(); max_copies * num_particles],
            forces: vec![Vec3::default(); max_copies * num_particles],
            modes: vec![Complex::default(); num_copies],
        }
    }
}

/// Run every `(copies, mask)` entry of the plan and accumulate the
/// interpolated forces into `state`.
pub(crate) fn apply<C: Context + ?Sized>(
    state: &mut BeadState,
    ws: &mut ContractionWorkspace,
    ctx: &mut C,
    plan: &ContractionPlan,
    fft: &mut RingFft,
) -> RpmdResult<()> {
    let n = state.num_copies();
    let num_particles = ws.num_particles;
    let ContractionWorkspace {
        positions: contracted_positions,
        forces: contracted_forces,
        modes: q,
        ..
    } = ws;

    for &(copies, group_mask) in &plan.groups_by_copies {
        // Down-sample positions by spectral truncation: keep the low modes,
        // move the matching high modes of the N-spectrum into the tail of an
        // M-length buffer, and invert at length M.
        let scale1 = 1.0 / n as f64;
        for particle in 0..num_particles {
            for component in 0..3 {
                for k in 0..n {
                    let x = state.positions(k)[particle].component(component);
                    q[k] = Complex::new(x, 0.0);
                }
                fft.forward(&mut q[..n]);
                if copies > 1 {
                    let start = (copies + 1) / 2;
                    let end = n - copies + start;
                    for k in end..n {
                        q[k - (n - copies)] = q[k];
                    }
                    fft.inverse(&mut q[..copies]);
                }
                for k in 0..copies {
                    contracted_positions[k * num_particles + particle]
                        .set_component(component, scale1 * q[k].re);
                }
            }
        }

        // Evaluate the contracted group on each reduced configuration.
        for copy in 0..copies {
            let slice = &contracted_positions[copy * num_particles..(copy + 1) * num_particles];
            ctx.set_positions(slice);
            ctx.compute_virtual_sites();
            ctx.calc_forces_and_energy(true, false, group_mask);
            ctx.get_forces(&mut contracted_forces[copy * num_particles..(copy + 1) * num_particles]);
        }

        // Up-sample forces by zero-padding the central band of the spectrum
        // and accumulate onto the full ring.
        let scale2 = 1.0 / copies as f64;
        for particle in 0..num_particles {
            for component in 0..3 {
                for k in 0..copies {
                    let f = contracted_forces[k * num_particles + particle].component(component);
                    q[k] = Complex::new(f, 0.0);
                }
                if copies > 1 {
                    fft.forward(&mut q[..copies]);
                }
                let start = (copies + 1) / 2;
                let end = n - copies + start;
                for k in end..n {
                    q[k] = q[k - (n - copies)];
                }
                for k in start..end {
                    q[k] = Complex::default();
                }
                fft.inverse(&mut q[..n]);
                for k in 0..n {
                    let f = state.forces_mut(k);
                    let current = f[particle].component(component);
                    f[particle].set_component(component, current + scale2 * q[k].re);
                }
            }
        }
    }
    Ok(())
}
