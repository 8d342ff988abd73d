//! Physical constants in the kJ/mol, nm, ps, amu unit system.

/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380658e-23;

/// Avogadro's number, 1/mol.
pub const AVOGADRO: f64 = 6.0221367e23;

/// Boltzmann constant, kJ/mol/K.
pub const BOLTZ: f64 = BOLTZMANN * AVOGADRO / 1.0e3;

/// Reduced Planck constant, kJ/mol*ps.
pub const HBAR: f64 = 1.054571628e-34 * AVOGADRO / (1000.0 * 1e-12);
