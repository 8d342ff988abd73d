use rpmd_core::Vec3;

use crate::context::Context;

/// Positions, velocities, and forces for every bead of every particle.
///
/// Storage is flat and bead-major; accessors hand out the particle slice of
/// one copy. Shapes are fixed at construction.
#[derive(Clone, Debug)]
pub struct BeadState {
    num_copies: usize,
    num_particles: usize,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    forces: Vec<Vec3>,
}

impl BeadState {
    pub fn new(num_copies: usize, num_particles: usize) -> Self {
        let len = num_copies * num_particles;
        Self {
            num_copies,
            num_particles,
            positions: vec![Vec3::default(); len],
            velocities: vec![Vec3::default(); len],
            forces: vec![Vec3::default(); len],
        }
    }

    pub fn num_copies(&self) -> usize {
        self.num_copies
    }

    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    fn range(&self, copy: usize) -> std::ops::Range<usize> {
        let start = copy * self.num_particles;
        start..start + self.num_particles
    }

    pub fn positions(&self, copy: usize) -> &[Vec3] {
        &self.positions[self.range(copy)]
    }

    pub fn positions_mut(&mut self, copy: usize) -> &mut [Vec3] {
        let r = self.range(copy);
        &mut self.positions[r]
    }

    pub fn velocities(&self, copy: usize) -> &[Vec3] {
        &self.velocities[self.range(copy)]
    }

    pub fn velocities_mut(&mut self, copy: usize) -> &mut [Vec3] {
        let r = self.range(copy);
        &mut self.velocities[r]
    }

    pub fn forces(&self, copy: usize) -> &[Vec3] {
        &self.forces[self.range(copy)]
    }

    pub fn forces_mut(&mut self, copy: usize) -> &mut [Vec3] {
        let r = self.range(copy);
        &mut self.forces[r]
    }

    pub fn set_positions(&mut self, copy: usize, positions: &[Vec3]) {
        self.positions_mut(copy).copy_from_slice(positions);
    }

    pub fn set_velocities(&mut self, copy: usize, velocities: &[Vec3]) {
        self.velocities_mut(copy).copy_from_slice(velocities);
    }

    /// Install one bead's positions and velocities into the provider.
    pub fn copy_to_context<C: Context + ?Sized>(&self, copy: usize, ctx: &mut C) {
        ctx.set_positions(self.positions(copy));
        ctx.set_velocities(self.velocities(copy));
    }
}
