#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod geom;
pub mod rng;
pub mod transform;

pub use constants::{AVOGADRO, BOLTZ, BOLTZMANN, HBAR};
pub use error::{RpmdError, RpmdResult};
pub use geom::Vec3;
pub use rng::GaussianRng;
pub use transform::{ChainDct, RingFft};
