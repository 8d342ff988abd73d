#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod kernel;
pub mod state;

mod contraction;
mod forces;
mod propagator;
mod thermostat;

pub use config::{ContractionPlan, RpmdConfig};
pub use context::{Context, System};
pub use kernel::RpmdKernel;
pub use rpmd_core::{RpmdError, RpmdResult, Vec3};
pub use state::BeadState;

#[cfg(test)]
mod tests;
