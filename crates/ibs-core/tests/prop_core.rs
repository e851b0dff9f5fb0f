// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Property-Based Tests (proptest) for ibs-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for ibs-core using proptest.
//!
//! Covers: evolution step identities, drift threshold, agreement of the
//! two formalisms without dispersion, particle-number scaling.

use ibs_core::evolution::{evolve_with_sr, evolve_without_sr, exceeds_threshold};
use ibs_core::{AnalyticalIbs, BjorkenMtingwaIbs, GrowthRateOptions, NagaitsevIbs};
use ibs_types::beam::BeamParameters;
use ibs_types::constants::PROTON_MASS_EV;
use ibs_types::optics::{OpticsParameters, TwissTable};
use ibs_types::radiation::SynchrotronRadiationInputs;
use ibs_types::state::{BeamState, IbsGrowthRates};
use proptest::prelude::*;
use std::sync::Arc;

fn beam_state() -> impl Strategy<Value = BeamState> {
    (1e-9f64..1e-6, 1e-9f64..1e-6, 1e-4f64..3e-3, 0.01f64..1.0)
        .prop_map(|(ex, ey, sd, bl)| BeamState::new(ex, ey, sd, bl))
}

/// Short ring with β-beating and no dispersion.
fn dispersion_free_optics(beam: &BeamParameters, beta_mean: f64, beating: f64) -> OpticsParameters {
    let n = 21;
    let circumference = 800.0;
    let s: Vec<f64> = (0..n).map(|i| i as f64 * circumference / (n - 1) as f64).collect();
    let t: Vec<f64> = s.iter().map(|s| 2.0 * std::f64::consts::PI * 4.0 * s / circumference).collect();
    let table = TwissTable {
        betx: t.iter().map(|t| beta_mean * (1.0 + beating * t.sin())).collect(),
        bety: t.iter().map(|t| beta_mean * (1.0 - beating * t.sin())).collect(),
        alfx: t.iter().map(|t| -beating * t.cos()).collect(),
        alfy: t.iter().map(|t| beating * t.cos()).collect(),
        dx: vec![0.0; n],
        dy: vec![0.0; n],
        dpx: vec![0.0; n],
        dpy: vec![0.0; n],
        s,
        revolution_frequency: None,
    };
    OpticsParameters::from_twiss(table, beam).unwrap()
}

// ── Evolution Step Properties ────────────────────────────────────────

proptest! {
    /// dt = 0 leaves the state unchanged, with or without SR.
    #[test]
    fn zero_step_is_identity(
        state in beam_state(),
        tx in -0.1f64..0.1, ty in -0.1f64..0.1, tz in -0.1f64..0.1,
        tau in 0.01f64..100.0,
    ) {
        let rates = IbsGrowthRates::new(tx, ty, tz);
        prop_assert_eq!(evolve_without_sr(&state, &rates, 0.0), state);
        let sr = SynchrotronRadiationInputs::new(
            state.epsx * 0.3, state.epsy * 0.3, state.sigma_delta * 0.5, tau, tau, tau / 2.0,
        );
        let new = evolve_with_sr(&state, &rates, 0.0, &sr);
        for (a, b) in new.as_array().iter().zip(state.as_array()) {
            prop_assert!((a - b).abs() / b < 1e-10, "{} vs {}", a, b);
        }
    }

    /// With SR, σ_δ² and bunch length² both relax towards σ_δ,eq² in closed form.
    #[test]
    fn sr_longitudinal_step_closed_form(
        state in beam_state(),
        tz in -0.1f64..0.1,
        tau_z in 0.01f64..5.0,
        eq_sd in 1e-5f64..1e-3,
        dt in 0.0f64..10.0,
    ) {
        let rates = IbsGrowthRates::new(0.0, 0.0, tz);
        let sr = SynchrotronRadiationInputs::new(state.epsx, state.epsy, eq_sd, 1.0, 1.0, tau_z);
        let new = evolve_with_sr(&state, &rates, dt, &sr);

        let k = tz / 2.0 * tau_z - 1.0;
        let decay = (2.0 * dt * (tz / 2.0 - 1.0 / tau_z)).exp();
        let eq = eq_sd * eq_sd;
        let closed = |v: f64| (-eq + (eq + v * v * k) * decay) / k;
        let sd_sq = closed(state.sigma_delta);
        let bl_sq = closed(state.bunch_length);
        prop_assert!((new.sigma_delta.powi(2) - sd_sq).abs() / sd_sq < 1e-10);
        prop_assert!((new.bunch_length.powi(2) - bl_sq).abs() / bl_sq < 1e-10);
    }

    /// Two half steps equal one full step under constant rates.
    #[test]
    fn steps_compose(state in beam_state(), t in 0.0f64..0.05, dt in 0.0f64..20.0) {
        let rates = IbsGrowthRates::new(t, 0.5 * t, 2.0 * t);
        let full = evolve_without_sr(&state, &rates, dt);
        let half = evolve_without_sr(&state, &rates, dt / 2.0);
        let twice = evolve_without_sr(&half, &rates, dt / 2.0);
        for (a, b) in full.as_array().iter().zip(twice.as_array()) {
            prop_assert!((a - b).abs() / a < 1e-12);
        }
    }

    /// Identical states never exceed the threshold; a relative drift just
    /// above the percentage always does.
    #[test]
    fn threshold_is_relative(state in beam_state(), percent in 0.1f64..50.0, which in 0usize..4) {
        prop_assert!(!exceeds_threshold(&state, &state, percent));
        let mut values = state.as_array();
        values[which] *= 1.0 + 1.01 * percent / 100.0;
        let drifted = BeamState::new(values[0], values[1], values[2], values[3]);
        prop_assert!(exceeds_threshold(&state, &drifted, percent));
    }
}

// ── Formalism Properties ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Without dispersion Nagaitsev and Bjorken-Mtingwa describe the same
    /// physics and agree to quadrature precision.
    #[test]
    fn formalisms_agree_without_dispersion(
        gamma in 1.5f64..50.0,
        beta_mean in 10.0f64..100.0,
        beating in 0.0f64..0.5,
        state in beam_state(),
    ) {
        let beam = Arc::new(BeamParameters::from_gamma(1, PROTON_MASS_EV, gamma, 1e11).unwrap());
        let optics = Arc::new(dispersion_free_optics(&beam, beta_mean, beating));
        let mut nag = NagaitsevIbs::new(beam.clone(), optics.clone());
        let mut bm = BjorkenMtingwaIbs::new(beam, optics);
        let a = nag.growth_rates(&state, GrowthRateOptions::default());
        let b = bm.growth_rates(&state, GrowthRateOptions::default());
        for (x, y) in [(a.tx, b.tx), (a.ty, b.ty), (a.tz, b.tz)] {
            let scale = a.tx.abs().max(a.ty.abs()).max(a.tz.abs());
            prop_assert!((x - y).abs() / scale < 1e-6, "{} vs {}", x, y);
        }
    }

    /// Rates divided by the Coulomb logarithm are linear in the particle
    /// number.
    #[test]
    fn rates_linear_in_intensity(n_part in 1e9f64..1e12, factor in 1.5f64..10.0, state in beam_state()) {
        let build = |n: f64| {
            let beam = Arc::new(BeamParameters::from_gamma(1, PROTON_MASS_EV, 20.0, n).unwrap());
            let optics = Arc::new(dispersion_free_optics(&beam, 40.0, 0.2));
            NagaitsevIbs::new(beam, optics)
        };
        let mut low = build(n_part);
        let mut high = build(n_part * factor);
        let options = GrowthRateOptions::default();
        let rl = low.growth_rates(&state, options).tz / low.coulomb_log(&state, options);
        let rh = high.growth_rates(&state, options).tz / high.coulomb_log(&state, options);
        prop_assert!((rh / rl - factor).abs() / factor < 1e-10);
    }
}
