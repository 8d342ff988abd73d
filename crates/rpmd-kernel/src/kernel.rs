//! Step driver for ring-polymer (closed path) and LePIGS (open path)
//! dynamics.
//!
//! One step is: thermostat half-step, velocity half-kick, exact free-ring
//! evolution, force recomputation, second half-kick, thermostat half-step,
//! then time/step-count advance on the context.

use rustfft::num_complex::Complex;

use rpmd_core::{ChainDct, GaussianRng, RingFft, RpmdResult, Vec3, BOLTZ, HBAR};

use crate::config::{ContractionPlan, RpmdConfig};
use crate::context::{Context, System};
use crate::contraction::{self, ContractionWorkspace};
use crate::forces;
use crate::propagator;
use crate::state::BeadState;
use crate::thermostat;

pub struct RpmdKernel {
    system: System,
    state: BeadState,
    plan: ContractionPlan,
    workspace: ContractionWorkspace,
    fft: RingFft,
    dct: ChainDct,
    rng: GaussianRng,
    mode_q: Vec<Complex<f64>>,
    mode_v: Vec<Complex<f64>>,
    chain_q: Vec<f64>,
    chain_v: Vec<f64>,
    particle_scratch: Vec<Vec3>,
}

impl RpmdKernel {
    /// Validate the descriptor, size every tensor and workspace, and seed
    /// the Gaussian stream. No allocation happens after this.
    pub fn initialize(system: &System, config: &RpmdConfig) -> RpmdResult<Self> {
        let plan = config.contraction_plan()?;
        let n = config.num_copies;
        let num_particles = system.num_particles();
        Ok(Self {
            system: system.clone(),
            state: BeadState::new(n, num_particles),
            workspace: ContractionWorkspace::new(plan.max_contracted_copies, n, num_particles),
            plan,
            fft: RingFft::new(),
            dct: ChainDct::new(),
            rng: GaussianRng::seeded(config.random_seed as u64),
            mode_q: vec![Complex::default(); n],
            mode_v: vec![Complex::default(); n],
            chain_q: vec![0.0; n],
            chain_v: vec![0.0; n],
            particle_scratch: vec![Vec3::default(); num_particles],
        })
    }

    /// Advance the system by one step, dispatching on the path topology.
    pub fn execute<C: Context + ?Sized>(
        &mut self,
        ctx: &mut C,
        config: &RpmdConfig,
        forces_are_valid: bool,
    ) -> RpmdResult<()> {
        if config.use_open_path {
            self.execute_open(ctx, config, forces_are_valid)
        } else {
            self.execute_closed(ctx, config, forces_are_valid)
        }
    }

    fn execute_closed<C: Context + ?Sized>(
        &mut self,
        ctx: &mut C,
        config: &RpmdConfig,
        forces_are_valid: bool,
    ) -> RpmdResult<()> {
        let halfdt = 0.5 * config.step_size;
        if !forces_are_valid {
            self.compute_forces_closed(ctx)?;
        }
        if config.apply_thermostat {
            thermostat::apply_closed(
                &mut self.state,
                &self.system,
                config,
                &mut self.fft,
                &mut self.mode_v,
                &mut self.rng,
            );
        }
        self.half_kick(halfdt);
        propagator::evolve_closed(
            &mut self.state,
            &self.system,
            config,
            &mut self.fft,
            &mut self.mode_q,
            &mut self.mode_v,
        );
        self.compute_forces_closed(ctx)?;
        self.half_kick(halfdt);
        if config.apply_thermostat {
            thermostat::apply_closed(
                &mut self.state,
                &self.system,
                config,
                &mut self.fft,
                &mut self.mode_v,
                &mut self.rng,
            );
        }
        ctx.set_time(ctx.time() + config.step_size);
        ctx.set_step_count(ctx.step_count() + 1);
        Ok(())
    }

    fn execute_open<C: Context + ?Sized>(
        &mut self,
        ctx: &mut C,
        config: &RpmdConfig,
        forces_are_valid: bool,
    ) -> RpmdResult<()> {
        let halfdt = 0.5 * config.step_size;
        if !forces_are_valid {
            self.compute_forces_open(ctx)?;
        }
        if config.apply_thermostat {
            thermostat::apply_open(
                &mut self.state,
                &self.system,
                config,
                &mut self.dct,
                &mut self.chain_v,
                &mut self.rng,
            );
        }
        self.half_kick(halfdt);
        propagator::evolve_open(
            &mut self.state,
            &self.system,
            config,
            &mut self.dct,
            &mut self.chain_q,
            &mut self.chain_v,
        );
        self.compute_forces_open(ctx)?;
        self.half_kick(halfdt);
        if config.apply_thermostat {
            thermostat::apply_open(
                &mut self.state,
                &self.system,
                config,
                &mut self.dct,
                &mut self.chain_v,
                &mut self.rng,
            );
        }
        ctx.set_time(ctx.time() + config.step_size);
        ctx.set_step_count(ctx.step_count() + 1);
        Ok(())
    }

    fn compute_forces_closed<C: Context + ?Sized>(&mut self, ctx: &mut C) -> RpmdResult<()> {
        forces::compute_direct(&mut self.state, ctx, self.plan.groups_not_contracted)?;
        contraction::apply(
            &mut self.state,
            &mut self.workspace,
            ctx,
            &self.plan,
            &mut self.fft,
        )
    }

    fn compute_forces_open<C: Context + ?Sized>(&mut self, ctx: &mut C) -> RpmdResult<()> {
        forces::compute_direct(&mut self.state, ctx, self.plan.groups_not_contracted)?;
        forces::halve_endpoint_forces(&mut self.state);
        if self.plan.has_contractions() {
            return Err(rpmd_core::RpmdError::OpenPathContraction);
        }
        Ok(())
    }

    fn half_kick(&mut self, halfdt: f64) {
        for copy in 0..self.state.num_copies() {
            for particle in 0..self.state.num_particles() {
                let mass = self.system.particle_mass(particle);
                if mass == 0.0 {
                    continue;
                }
                let f = self.state.forces(copy)[particle];
                let v = self.state.velocities_mut(copy);
                v[particle] = v[particle].add(f.scale(halfdt / mass));
            }
        }
    }

    /// Kinetic energy of the state currently installed in the context.
    /// Beads are not summed; call per bead after `copy_to_context`.
    pub fn compute_kinetic_energy<C: Context + ?Sized>(&mut self, ctx: &C) -> f64 {
        let num_particles = self.system.num_particles();
        ctx.get_velocities(&mut self.particle_scratch[..num_particles]);
        let mut energy = 0.0;
        for particle in 0..num_particles {
            let mass = self.system.particle_mass(particle);
            if mass > 0.0 {
                let v = self.particle_scratch[particle];
                energy += mass * v.dot(v);
            }
        }
        0.5 * energy
    }

    /// Harmonic spring energy between adjacent beads of the closed ring:
    /// sum over particles and beads of 1/2 m w_n^2 |x_{k+1} - x_k|^2 with
    /// w_n = N kB T / hbar. Diagnostic; not used by the step itself.
    pub fn free_ring_energy(&self, config: &RpmdConfig) -> f64 {
        let n = self.state.num_copies();
        let wn = n as f64 * BOLTZ * config.temperature / HBAR;
        let mut energy = 0.0;
        for particle in 0..self.state.num_particles() {
            let mass = self.system.particle_mass(particle);
            if mass == 0.0 {
                continue;
            }
            for k in 0..n {
                let next = (k + 1) % n;
                let d = self.state.positions(next)[particle].sub(self.state.positions(k)[particle]);
                energy += 0.5 * mass * wn * wn * d.dot(d);
            }
        }
        energy
    }

    pub fn num_copies(&self) -> usize {
        self.state.num_copies()
    }

    pub fn set_positions(&mut self, copy: usize, positions: &[Vec3]) {
        self.state.set_positions(copy, positions);
    }

    pub fn set_velocities(&mut self, copy: usize, velocities: &[Vec3]) {
        self.state.set_velocities(copy, velocities);
    }

    pub fn copy_to_context<C: Context + ?Sized>(&self, copy: usize, ctx: &mut C) {
        self.state.copy_to_context(copy, ctx);
    }

    pub fn positions(&self, copy: usize) -> &[Vec3] {
        self.state.positions(copy)
    }

    pub fn velocities(&self, copy: usize) -> &[Vec3] {
        self.state.velocities(copy)
    }

    pub fn forces(&self, copy: usize) -> &[Vec3] {
        self.state.forces(copy)
    }
}
