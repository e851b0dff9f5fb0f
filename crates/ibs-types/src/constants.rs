// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Speed of light in vacuum (m/s).
pub const C_LIGHT: f64 = 299_792_458.0;

/// Reduced Planck constant (J·s).
pub const HBAR: f64 = 1.054_571_817e-34;

/// Elementary charge (C)
pub const Q_ELEMENTARY: f64 = 1.602_176_634e-19;

/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// Proton rest mass (eV).
pub const PROTON_MASS_EV: f64 = 938.272_088_16e6;

/// Electron rest mass (eV).
pub const ELECTRON_MASS_EV: f64 = 0.510_998_950e6;

/// Fully stripped lead-208 ion rest mass (eV), as used for SPS/LHC ion runs.
pub const LEAD_208_MASS_EV: f64 = 193.687_272_9e9;
