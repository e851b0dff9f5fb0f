// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Coulomb Logarithm
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coulomb logarithm ln Λ = ln(r_max / r_min) for a Gaussian beam.
//!
//! Follows the Physics Vade Mecum formulae as used by MAD-X `twclog`:
//! r_max is the smaller of σx and the Debye length, r_min the larger of the
//! classical distance of closest approach and the quantum diffraction limit.
//! Lengths are in cm and temperatures in eV inside this module.

use ibs_math::integrate::ring_average;
use ibs_types::beam::BeamParameters;
use ibs_types::constants::{C_LIGHT, HBAR};
use ibs_types::optics::OpticsParameters;
use log::debug;
use std::f64::consts::PI;

/// Debye length prefactor [cm·sqrt(cm⁻³/eV)].
const DEBYE_PREFACTOR: f64 = 743.4;

/// e²/(4πε₀) [eV·cm].
const CLASSICAL_APPROACH: f64 = 1.44e-7;

/// Length-weighted ring averages of the optics functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAverages {
    pub betx: f64,
    pub bety: f64,
    pub dx: f64,
    pub dy: f64,
}

impl RingAverages {
    /// Integral of the linearly interpolated functions over [s₀, s_last],
    /// divided by the circumference.
    pub fn from_optics(optics: &OpticsParameters) -> Self {
        debug!("Computing ring-averaged beta and dispersion functions");
        let c = optics.circumference;
        RingAverages {
            betx: ring_average(&optics.betx, &optics.s, c),
            bety: ring_average(&optics.bety, &optics.s, c),
            dx: ring_average(&optics.dx, &optics.s, c),
            dy: ring_average(&optics.dy, &optics.s, c),
        }
    }
}

/// Coulomb logarithm from geometric emittances.
///
/// Zero σ_δ or zero emittances are not trapped and give inf/NaN.
#[allow(clippy::too_many_arguments)]
pub fn coulomb_log(
    beam: &BeamParameters,
    optics: &OpticsParameters,
    averages: &RingAverages,
    geom_epsx: f64,
    geom_epsy: f64,
    sigma_delta: f64,
    bunch_length: f64,
    bunched: bool,
) -> f64 {
    let gamma = beam.gamma_rel();
    let beta = beam.beta_rel();
    let mass_gev = beam.particle_mass_ev * 1e-9;
    let energy_gev = beam.total_energy_ev * 1e-9;
    let charge = beam.particle_charge as f64;

    // Transverse temperature as 2·p·x', the transverse energy being T/2
    let e_trans = 5e8 * (gamma * energy_gev - mass_gev) * (geom_epsx / averages.betx);
    let temperature_ev = 2.0 * e_trans;

    let dispersive = |d: f64| (d * sigma_delta * beta * beta).powi(2);
    let sigma_x_cm = 100.0 * (geom_epsx * averages.betx + dispersive(averages.dx)).sqrt();
    let sigma_y_cm = 100.0 * (geom_epsy * averages.bety + dispersive(averages.dy)).sqrt();
    let sigma_t_cm = 100.0 * bunch_length;

    let volume = if bunched {
        8.0 * PI.powi(3).sqrt() * sigma_x_cm * sigma_y_cm * sigma_t_cm
    } else {
        4.0 * PI * sigma_x_cm * sigma_y_cm * 100.0 * optics.circumference
    };
    let density = beam.n_part / volume;
    let debye_length = DEBYE_PREFACTOR * (temperature_ev / density).sqrt() / charge.abs();

    let rmin_classical = CLASSICAL_APPROACH * charge * charge / temperature_ev;
    let rmin_quantum = HBAR * C_LIGHT * 1e5 / (2.0 * (2e-3 * e_trans * mass_gev).sqrt());

    let bmin = rmin_classical.max(rmin_quantum);
    let bmax = sigma_x_cm.min(debye_length);
    (bmax / bmin).ln()
}
