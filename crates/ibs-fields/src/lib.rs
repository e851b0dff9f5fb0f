//! Interpolated 3D field maps for space-charge and beam-beam kicks.

pub mod grid;
pub mod interpolated;

pub use grid::GridSpec;
pub use interpolated::{FieldQuantities, FieldValues, PoissonSolver, TriLinearInterpolatedFieldMap};
