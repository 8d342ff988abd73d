use rpmd_core::{RpmdError, RpmdResult};

use crate::context::Context;
use crate::state::BeadState;

/// Evaluate the non-contracted force groups on every bead.
///
/// For each copy: install its state, resolve virtual sites, let the context
/// update itself (verifying the periodic box is untouched), read the state
/// back, and store the forces for the complement mask.
pub(crate) fn compute_direct<C: Context + ?Sized>(
    state: &mut BeadState,
    ctx: &mut C,
    groups_not_contracted: i32,
) -> RpmdResult<()> {
    for copy in 0..state.num_copies() {
        ctx.set_positions(state.positions(copy));
        ctx.set_velocities(state.velocities(copy));
        ctx.compute_virtual_sites();
        let initial_box = ctx.periodic_box_vectors();
        ctx.update_context_state();
        let final_box = ctx.periodic_box_vectors();
        if initial_box != final_box {
            return Err(RpmdError::BarostatNotSupported);
        }
        ctx.get_positions(state.positions_mut(copy));
        ctx.get_velocities(state.velocities_mut(copy));
        ctx.calc_forces_and_energy(true, false, groups_not_contracted);
        ctx.get_forces(state.forces_mut(copy));
    }
    Ok(())
}

/// The first and last bead of an open chain see half the physical
/// potential, so half the force. With a single bead both endpoints are the
/// same copy and it is halved twice.
pub(crate) fn halve_endpoint_forces(state: &mut BeadState) {
    let last = state.num_copies() - 1;
    for f in state.forces_mut(0) {
        *f = f.scale(0.5);
    }
    for f in state.forces_mut(last) {
        *f = f.scale(0.5);
    }
}
