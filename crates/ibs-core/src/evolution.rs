// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Emittance Evolution
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-step emittance evolution under constant growth rates.
//!
//! All emittances here are geometric. Growth rates are amplitude rates,
//! so emittances grow as exp(T·dt) and σ_δ, bunch length as exp(T·dt/2).

use ibs_math::formulary::relative_change;
use ibs_types::radiation::SynchrotronRadiationInputs;
use ibs_types::state::{BeamState, IbsGrowthRates, ReferenceValues};

/// IBS-only step.
pub fn evolve_without_sr(state: &BeamState, rates: &IbsGrowthRates, dt: f64) -> BeamState {
    let longitudinal = (dt * 0.5 * rates.tz).exp();
    BeamState {
        epsx: state.epsx * (dt * rates.tx).exp(),
        epsy: state.epsy * (dt * rates.ty).exp(),
        sigma_delta: state.sigma_delta * longitudinal,
        bunch_length: state.bunch_length * longitudinal,
    }
}

/// Exact solution of dε/dt = T·ε − 2(ε − ε_eq)/τ over `dt`.
fn relax(value: f64, equilibrium: f64, rate: f64, tau: f64, dt: f64) -> f64 {
    let k = rate / 2.0 * tau - 1.0;
    (-equilibrium + (equilibrium + value * k) * (2.0 * dt * (rate / 2.0 - 1.0 / tau)).exp()) / k
}

/// IBS step with synchrotron-radiation damping and quantum excitation.
///
/// σ_δ and bunch length are relaxed as squares, both towards σ_δ,eq².
pub fn evolve_with_sr(
    state: &BeamState,
    rates: &IbsGrowthRates,
    dt: f64,
    sr: &SynchrotronRadiationInputs,
) -> BeamState {
    let eq_longitudinal_sq = sr.equilibrium_sigma_delta.powi(2);

    let sigma_delta_sq = relax(
        state.sigma_delta.powi(2),
        eq_longitudinal_sq,
        rates.tz,
        sr.tau_z,
        dt,
    );
    let bunch_length_sq = relax(
        state.bunch_length.powi(2),
        eq_longitudinal_sq,
        rates.tz,
        sr.tau_z,
        dt,
    );

    BeamState {
        epsx: relax(state.epsx, sr.equilibrium_epsx, rates.tx, sr.tau_x, dt),
        epsy: relax(state.epsy, sr.equilibrium_epsy, rates.ty, sr.tau_y, dt),
        sigma_delta: sigma_delta_sq.sqrt(),
        bunch_length: bunch_length_sq.sqrt(),
    }
}

/// Whether any quantity moved by more than `percent`% from the refs.
pub fn exceeds_threshold(refs: &ReferenceValues, new: &BeamState, percent: f64) -> bool {
    let threshold = percent / 100.0;
    refs.as_array()
        .iter()
        .zip(new.as_array())
        .any(|(&reference, value)| relative_change(value, reference).abs() > threshold)
}
