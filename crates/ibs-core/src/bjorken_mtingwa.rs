// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Bjorken-Mtingwa Formalism
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bjorken-Mtingwa IBS growth rates, in the form derived in the MAD-X IBS
//! module note (F. Antoniou, F. Zimmermann, CERN-ATS-2012-066).
//!
//! For every element the 3×3 L matrix of the scattering kernel has the
//! characteristic polynomial λ³ + aλ² + bλ + c. Each plane's rate is the
//! ring average of
//!
//! ∫₀^∞ √λ (a_i λ + b_i) / (λ³ + aλ² + bλ + c)^{3/2} dλ
//!
//! with per-plane coefficients (a_i, b_i). Vertical dispersion is
//! supported.
//!
//! The plane coefficients here already carry the trace normalisation of
//! the note's Table 1: the horizontal pair is multiplied by γ²Hx/εx, the
//! vertical pair by βy/εy and the longitudinal pair by γ²/σ_δ². This keeps
//! elements without horizontal dispersion regular.

use crate::analytical::{AnalyticalIbs, GrowthRateOptions, IbsState};
use crate::coulomb;
use ibs_math::formulary::{dispersion_invariant, phi_array};
use ibs_math::integrate::{left_riemann, simpson};
use ibs_types::beam::BeamParameters;
use ibs_types::constants::C_LIGHT;
use ibs_types::optics::OpticsParameters;
use ibs_types::state::{BeamState, IbsGrowthRates};
use log::{debug, info};
use ndarray::{Array1, Zip};
use std::f64::consts::PI;
use std::sync::Arc;

/// Simpson intervals for the λ-integral in ln λ.
const LAMBDA_INTERVALS: usize = 256;

/// Extra e-folds of λ beyond the eigenvalue bracket [c/b, a].
const LAMBDA_MARGIN: f64 = 20.0;

/// Optics of one element, dispersion already in the Δp/p frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementOptics {
    pub betx: f64,
    pub bety: f64,
    pub dx: f64,
    pub dy: f64,
    pub phix: f64,
    pub phiy: f64,
    pub hx: f64,
    pub hy: f64,
}

/// Polynomial and per-plane coefficients at one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub ax: f64,
    pub bx: f64,
    pub ay: f64,
    pub by: f64,
    pub az: f64,
    pub bz: f64,
}

impl ElementOptics {
    /// Coefficients for geometric emittances `epsx`, `epsy`.
    pub fn coefficients(
        &self,
        gamma: f64,
        epsx: f64,
        epsy: f64,
        sigma_delta: f64,
    ) -> ElementCoefficients {
        let ElementOptics {
            betx,
            bety,
            dx,
            dy,
            phix,
            phiy,
            hx,
            hy,
        } = *self;
        let g2 = gamma * gamma;
        let g4 = g2 * g2;
        let isd = 1.0 / (sigma_delta * sigma_delta);
        let bxe = betx / epsx;
        let bye = bety / epsy;
        let px2 = phix * phix;
        let py2 = phiy * phiy;
        let hxe = hx / epsx;
        let hye = hy / epsy;
        let bxby_ee = betx * bety / (epsx * epsy);
        // g2·D²/(εβ) summed over planes plus g2/σ_δ²
        let disp_sum = g2 * dx * dx / (epsx * betx) + g2 * dy * dy / (epsy * bety) + g2 * isd;
        // Σ β²φ²/ε² weighted, as it recurs in the plane terms
        let phi_sum = bxe * bxe * px2 + bye * bye * py2;

        let a = g2 * (hxe + hye) + g2 * isd + (bxe + bye);
        let b = (bxe + bye) * disp_sum + bxby_ee * g2 * (px2 + py2) + bxby_ee;
        let c = bxby_ee * disp_sum;

        // Horizontal
        let h = g2 * hxe;
        let q = g2 * isd * (bxe - 2.0 * bye)
            + bxe * bye
            + 6.0 * bxe * bye * g2 * px2
            + g2 * (2.0 * bye * bye * py2 - bxe * bxe * px2);
        let ax = h * (2.0 * g2 * (hxe + hye + isd) - 2.0 * bxe - bye)
            - g2 * betx * hy / (epsx * epsy)
            + bxe * (2.0 * bxe - bye - g2 * isd + 6.0 * bxe * g2 * px2);
        let bx = h * ((bxe + bye) * g2 * (hxe + hye + isd) - g2 * phi_sum + bxe * (bxe - 4.0 * bye))
            + bxe * q
            + g2 * betx * hy / (epsx * epsy) * (bxe - 2.0 * bye);

        // Vertical
        let hyb = hy / bety;
        let ay = (-g2 * (hxe + 2.0 * hye + betx * hy / (bety * epsx) + isd)
            + 2.0 * g4 * hyb * (hye + hxe)
            + 2.0 * g4 * hyb * isd
            - (bxe - 2.0 * bye)
            + 6.0 * bye * g2 * py2)
            * bye;
        let by = (g2 * (bye - 2.0 * bxe) * (hxe + isd)
            + g2 * hye * (bye - 4.0 * bxe)
            + bxby_ee
            + g2 * (2.0 * bxe * bxe * px2 - bye * bye * py2)
            + g4 * hyb * (bxe + bye) * (hye + isd)
            + g4 * hx * hyb / epsx * (bxe + bye)
            - g4 * hyb * phi_sum
            + 6.0 * g2 * py2 * bxe * bye)
            * bye;

        // Longitudinal
        let az = (2.0 * g2 * (hxe + hye + isd) - bxe - bye) * g2 * isd;
        let bz = ((bxe + bye) * g2 * (hxe + hye + isd) - 2.0 * bxe * bye - g2 * phi_sum) * g2 * isd;

        ElementCoefficients {
            a,
            b,
            c,
            ax,
            bx,
            ay,
            by,
            az,
            bz,
        }
    }
}

/// ∫₀^∞ √λ (ai·λ + bi) / (λ³ + aλ² + bλ + c)^{3/2} dλ.
///
/// Integrated in u = ln λ, where the integrand is a smooth bump between
/// the smallest and largest root scales.
pub fn lambda_integral(a: f64, b: f64, c: f64, ai: f64, bi: f64) -> f64 {
    let lower = (c / b).ln() - LAMBDA_MARGIN;
    let upper = a.ln() + LAMBDA_MARGIN;
    let integrand = |u: f64| {
        let lambda = u.exp();
        let d = ((lambda + a) * lambda + b) * lambda + c;
        lambda * lambda.sqrt() * (ai * lambda + bi) / (d * d.sqrt())
    };
    simpson(integrand, lower, upper, LAMBDA_INTERVALS)
}

/// Bjorken-Mtingwa engine. Holds no intermediate results beyond the
/// shared [`IbsState`].
#[derive(Debug, Clone)]
pub struct BjorkenMtingwaIbs {
    state: IbsState,
}

impl BjorkenMtingwaIbs {
    pub fn new(beam: Arc<BeamParameters>, optics: Arc<OpticsParameters>) -> Self {
        BjorkenMtingwaIbs {
            state: IbsState::new(beam, optics),
        }
    }

    /// 6D phase-space invariant Γ with masses in MeV.
    ///
    /// Bunched: (2π)³(βγ)³m³εxεyσ_δσ_z. Coasting: 4π^{5/2}(βγ)³m³εxεyσ_δC.
    pub fn gamma_invariant(
        &self,
        epsx: f64,
        epsy: f64,
        sigma_delta: f64,
        bunch_length: f64,
        bunched: bool,
    ) -> f64 {
        let beam = self.state.beam();
        let bg = beam.beta_rel() * beam.gamma_rel();
        let mass_mev = beam.particle_mass_ev * 1e-3;
        let common = bg.powi(3) * mass_mev.powi(3) * epsx * epsy * sigma_delta;
        if bunched {
            (2.0 * PI).powi(3) * common * bunch_length
        } else {
            4.0 * PI.powf(2.5) * common * self.state.optics().circumference
        }
    }

    /// Per-element optics in the Δp/p frame.
    pub fn element_optics(&self) -> Array1<ElementOptics> {
        let optics = self.state.optics();
        let beta = self.state.beam().beta_rel();
        let dx = &optics.dx * beta;
        let dy = &optics.dy * beta;
        let dpx = &optics.dpx * beta;
        let dpy = &optics.dpy * beta;
        let phix = phi_array(&optics.betx, &optics.alfx, &dx, &dpx);
        let phiy = phi_array(&optics.bety, &optics.alfy, &dy, &dpy);
        let hx = dispersion_invariant(&optics.betx, &dx, &phix);
        let hy = dispersion_invariant(&optics.bety, &dy, &phiy);

        // (β, D, φ, H) per plane
        let plane = |b: &Array1<f64>, d: &Array1<f64>, p: &Array1<f64>, h: &Array1<f64>| {
            Zip::from(b)
                .and(d)
                .and(p)
                .and(h)
                .map_collect(|&b, &d, &p, &h| (b, d, p, h))
        };
        let horizontal = plane(&optics.betx, &dx, &phix, &hx);
        let vertical = plane(&optics.bety, &dy, &phiy, &hy);

        Zip::from(&horizontal).and(&vertical).map_collect(
            |&(betx, dx, phix, hx), &(bety, dy, phiy, hy)| ElementOptics {
                betx,
                bety,
                dx,
                dy,
                phix,
                phiy,
                hx,
                hy,
            },
        )
    }

    /// Coefficients at every element for the given beam state.
    pub fn coefficients(
        &self,
        epsx: f64,
        epsy: f64,
        sigma_delta: f64,
        normalized_emittances: bool,
    ) -> Array1<ElementCoefficients> {
        let (epsx, epsy) = self
            .state
            .geometric_emittances(epsx, epsy, normalized_emittances);
        let gamma = self.state.beam().gamma_rel();
        self.element_optics()
            .map(|element| element.coefficients(gamma, epsx, epsy, sigma_delta))
    }
}

impl AnalyticalIbs for BjorkenMtingwaIbs {
    fn state(&self) -> &IbsState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IbsState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "bjorken-mtingwa"
    }

    fn growth_rates(&mut self, beam_state: &BeamState, options: GrowthRateOptions) -> IbsGrowthRates {
        info!("Computing IBS growth rates for defined beam and optics parameters");
        let (epsx, epsy) = self.state.geometric_emittances(
            beam_state.epsx,
            beam_state.epsy,
            options.normalized_emittances,
        );
        let sigma_delta = beam_state.sigma_delta;
        let bunch_length = beam_state.bunch_length;

        let big_gamma = self.gamma_invariant(epsx, epsy, sigma_delta, bunch_length, options.bunched);
        let clog = coulomb::coulomb_log(
            self.state.beam(),
            self.state.optics(),
            self.state.ring_averages(),
            epsx,
            epsy,
            sigma_delta,
            bunch_length,
            options.bunched,
        );

        debug!("Computing integrand coefficients and integrals at each element");
        let coefficients = self.coefficients(epsx, epsy, sigma_delta, false);
        let integral = |pick: fn(&ElementCoefficients) -> (f64, f64)| -> Array1<f64> {
            coefficients.map(|k| {
                let (ai, bi) = pick(k);
                lambda_integral(k.a, k.b, k.c, ai, bi)
            })
        };
        let tx_integrand = integral(|k| (k.ax, k.bx));
        let ty_integrand = integral(|k| (k.ay, k.by));
        let tz_integrand = integral(|k| (k.az, k.bz));

        let beam = self.state.beam();
        let optics = self.state.optics();
        let r0 = beam.particle_classical_radius_m();
        let mass_mev = beam.particle_mass_ev * 1e-3;
        let constant = PI * PI * r0 * r0 * C_LIGHT * mass_mev.powi(3) * beam.n_part * clog
            / (beam.gamma_rel() * big_gamma);
        let average = |f: &Array1<f64>| left_riemann(f, &optics.s) / optics.circumference;

        let rates = IbsGrowthRates::new(
            constant * average(&tx_integrand),
            constant * average(&ty_integrand),
            constant * average(&tz_integrand),
        );

        let refs = BeamState::new(epsx, epsy, sigma_delta, bunch_length);
        self.state.record(rates, refs);
        rates
    }
}
