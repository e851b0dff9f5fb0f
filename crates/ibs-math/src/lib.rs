//! Mathematical primitives for SCPN IBS Core.

pub mod elliptic;
pub mod formulary;
pub mod integrate;
pub mod interp;
