use rpmd_core::Vec3;

/// Immutable particle table shared by the kernel and the force provider.
#[derive(Clone, Debug, Default)]
pub struct System {
    masses: Vec<f64>,
}

impl System {
    pub fn new(masses: Vec<f64>) -> Self {
        Self { masses }
    }

    pub fn num_particles(&self) -> usize {
        self.masses.len()
    }

    /// Mass in amu. Zero marks a frozen or virtual particle, which the
    /// integrator and thermostat skip.
    pub fn particle_mass(&self, particle: usize) -> f64 {
        self.masses[particle]
    }
}

/// Contract of the external force provider.
///
/// The kernel installs one bead's state, lets the provider update itself,
/// reads the possibly adjusted state back, and then requests forces for a
/// force-group mask. All calls are synchronous; the provider may
/// parallelize internally.
pub trait Context {
    fn num_particles(&self) -> usize;

    fn set_positions(&mut self, positions: &[Vec3]);
    fn set_velocities(&mut self, velocities: &[Vec3]);

    fn get_positions(&self, out: &mut [Vec3]);
    fn get_velocities(&self, out: &mut [Vec3]);
    fn get_forces(&self, out: &mut [Vec3]);

    /// Re-derive virtual site coordinates from the installed positions.
    fn compute_virtual_sites(&mut self);

    /// Let attached context-state owners (thermostats, plugins) run. The
    /// kernel verifies that the periodic box is unchanged across this call.
    fn update_context_state(&mut self);

    fn periodic_box_vectors(&self) -> [Vec3; 3];

    /// Evaluate the selected force groups; returns the potential energy when
    /// requested, otherwise 0.
    fn calc_forces_and_energy(&mut self, forces: bool, energy: bool, groups: i32) -> f64;

    fn time(&self) -> f64;
    fn set_time(&mut self, time: f64);
    fn step_count(&self) -> u64;
    fn set_step_count(&mut self, count: u64);
}
