use rpmd_core::Vec3;

use crate::config::RpmdConfig;
use crate::context::{Context, System};
use crate::kernel::RpmdKernel;


/// One contribution to the test potential, gated on a force group.
#[derive(Clone, Copy)]
pub(crate) enum ForceTerm {
    /// F = -k x on every particle.
    Harmonic { group: i32, k: f64 },
    /// The same force on every particle.
    Constant { group: i32, f: Vec3 },
}

/// In-memory force provider double.
pub(crate) struct TestContext {
    masses: Vec<f64>,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    forces: Vec<Vec3>,
    box_vectors: [Vec3; 3],
    terms: Vec<ForceTerm>,
    mutate_box: bool,
    time: f64,
    step_count: u64,
    /// Group masks passed to force evaluations, in call order.
    pub force_evals: Vec<i32>,
}

impl TestContext {
    pub fn new(masses: &[f64]) -> Self {
        let n = masses.len();
        Self {
            masses: masses.to_vec(),
            positions: vec![Vec3::default(); n],
            velocities: vec![Vec3::default(); n],
            forces: vec![Vec3::default(); n],
            box_vectors: [
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(0.0, 0.0, 2.0),
            ],
            terms: Vec::new(),
            mutate_box: false,
            time: 0.0,
            step_count: 0,
            force_evals: Vec::new(),
        }
    }

    pub fn with_term(mut self, term: ForceTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Grow the box inside `update_context_state`, imitating an attached
    /// barostat.
    pub fn with_box_mutation(mut self) -> Self {
        self.mutate_box = true;
        self
    }
}

impl Context for TestContext {
    fn num_particles(&self) -> usize {
        self.masses.len()
    }

    fn set_positions(&mut self, positions: &[Vec3]) {
        self.positions.copy_from_slice(positions);
    }

    fn set_velocities(&mut self, velocities: &[Vec3]) {
        self.velocities.copy_from_slice(velocities);
    }

    fn get_positions(&self, out: &mut [Vec3]) {
        out.copy_from_slice(&self.positions);
    }

    fn get_velocities(&self, out: &mut [Vec3]) {
        out.copy_from_slice(&self.velocities);
    }

    fn get_forces(&self, out: &mut [Vec3]) {
        out.copy_from_slice(&self.forces);
    }

    fn compute_virtual_sites(&mut self) {}

    fn update_context_state(&mut self) {
        if self.mutate_box {
            self.box_vectors[0].x += 0.1;
        }
    }

    fn periodic_box_vectors(&self) -> [Vec3; 3] {
        self.box_vectors
    }

    fn calc_forces_and_energy(&mut self, forces: bool, _energy: bool, groups: i32) -> f64 {
        self.force_evals.push(groups);
        if !forces {
            return 0.0;
        }
        for f in &mut self.forces {
            *f = Vec3::default();
        }
        for term in &self.terms {
            match *term {
                ForceTerm::Harmonic { group, k } => {
                    if groups & (1 << group) != 0 {
                        for (f, x) in self.forces.iter_mut().zip(&self.positions) {
                            *f = f.add(x.scale(-k));
                        }
                    }
                }
                ForceTerm::Constant { group, f: value } => {
                    if groups & (1 << group) != 0 {
                        for f in &mut self.forces {
                            *f = f.add(value);
                        }
                    }
                }
            }
        }
        0.0
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn set_step_count(&mut self, count: u64) {
        self.step_count = count;
    }
}

/// Deterministic, mode-rich bead positions for transform-heavy tests.
pub(crate) fn seed_positions(kernel: &mut RpmdKernel, num_copies: usize, num_particles: usize) {
    for copy in 0..num_copies {
        let mut beads = vec![Vec3::default(); num_particles];
        for (particle, bead) in beads.iter_mut().enumerate() {
            let phase = copy as f64 * 0.7 + particle as f64 * 1.3;
            *bead = Vec3::new(phase.sin() * 0.1, (phase * 1.9).cos() * 0.1, phase * 0.01);
        }
        kernel.set_positions(copy, &beads);
    }
}

pub(crate) fn seed_velocities(kernel: &mut RpmdKernel, num_copies: usize, num_particles: usize) {
    for copy in 0..num_copies {
        let mut beads = vec![Vec3::default(); num_particles];
        for (particle, bead) in beads.iter_mut().enumerate() {
            let phase = copy as f64 * 1.1 + particle as f64 * 0.5 + 0.3;
            *bead = Vec3::new((phase * 2.3).cos(), phase.sin() * 0.5, (phase * 0.7).sin());
        }
        kernel.set_velocities(copy, &beads);
    }
}

/// Total bead kinetic energy, summed over copies.
pub(crate) fn total_kinetic_energy(kernel: &RpmdKernel, system: &System, num_copies: usize) -> f64 {
    let mut energy = 0.0;
    for copy in 0..num_copies {
        for (particle, v) in kernel.velocities(copy).iter().enumerate() {
            let mass = system.particle_mass(particle);
            if mass > 0.0 {
                energy += 0.5 * mass * v.dot(*v);
            }
        }
    }
    energy
}
