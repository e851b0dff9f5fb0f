// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Nagaitsev Formalism
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nagaitsev IBS growth rates (PRSTAB 8, 064403, 2005).
//!
//! The diffusion integrals reduce to Carlson R_D evaluations per element.
//! Vertical dispersion is ignored; use Bjorken-Mtingwa when it matters.

use crate::analytical::{AnalyticalIbs, GrowthRateOptions, IbsState};
use crate::coulomb;
use ibs_math::elliptic::carlson_rd_array;
use ibs_math::formulary::phi_array;
use ibs_math::integrate::left_riemann;
use ibs_types::beam::BeamParameters;
use ibs_types::constants::C_LIGHT;
use ibs_types::optics::OpticsParameters;
use ibs_types::state::{BeamState, EllipticIntegrals, IbsGrowthRates};
use log::{debug, info, warn};
use ndarray::{Array1, Zip};
use std::f64::consts::PI;
use std::sync::Arc;

/// Nagaitsev engine. Caches the last elliptic integrals on top of the
/// shared [`IbsState`].
#[derive(Debug, Clone)]
pub struct NagaitsevIbs {
    state: IbsState,
    elliptic_integrals: Option<EllipticIntegrals>,
}

impl NagaitsevIbs {
    pub fn new(beam: Arc<BeamParameters>, optics: Arc<OpticsParameters>) -> Self {
        NagaitsevIbs {
            state: IbsState::new(beam, optics),
            elliptic_integrals: None,
        }
    }

    /// Last computed elliptic integrals, if any.
    pub fn elliptic_integrals(&self) -> Option<EllipticIntegrals> {
        self.elliptic_integrals
    }

    /// Ring-integrated Ix, Iy, Iz for the given beam state. The result is
    /// cached and reused by `growth_rates_with(.., compute_integrals = false)`.
    pub fn integrals(
        &mut self,
        epsx: f64,
        epsy: f64,
        sigma_delta: f64,
        normalized_emittances: bool,
    ) -> EllipticIntegrals {
        debug!("Computing elliptic integrals for defined beam and optics parameters");
        let (epsx, epsy) = self
            .state
            .geometric_emittances(epsx, epsy, normalized_emittances);
        let integrals = elliptic_integrals(
            self.state.beam(),
            self.state.optics(),
            epsx,
            epsy,
            sigma_delta,
        );
        self.elliptic_integrals = Some(integrals);
        integrals
    }

    /// Growth rates, optionally reusing the cached elliptic integrals.
    ///
    /// A coasting beam is treated as a bunch of length C/(2π) with all rates
    /// halved. If `compute_integrals` is false but nothing is cached yet, the
    /// integrals are computed anyway.
    pub fn growth_rates_with(
        &mut self,
        beam_state: &BeamState,
        options: GrowthRateOptions,
        compute_integrals: bool,
    ) -> IbsGrowthRates {
        info!("Computing IBS growth rates for defined beam and optics parameters");
        let (epsx, epsy) = self.state.geometric_emittances(
            beam_state.epsx,
            beam_state.epsy,
            options.normalized_emittances,
        );
        let sigma_delta = beam_state.sigma_delta;

        let mut bunch_length = beam_state.bunch_length;
        if !options.bunched {
            warn!(
                "Using the Nagaitsev formalism for a coasting beam is an approximation: \
                 bunch length is set to C/(2π) and rates are halved"
            );
            bunch_length = self.state.optics().circumference / (2.0 * PI);
        }

        let integrals = match self.elliptic_integrals {
            Some(cached) if !compute_integrals => cached,
            _ => self.integrals(epsx, epsy, sigma_delta, false),
        };

        let beam = self.state.beam();
        let optics = self.state.optics();
        let clog = coulomb::coulomb_log(
            beam,
            optics,
            self.state.ring_averages(),
            epsx,
            epsy,
            sigma_delta,
            bunch_length,
            options.bunched,
        );

        let beta = beam.beta_rel();
        let gamma = beam.gamma_rel();
        let r0 = beam.particle_classical_radius_m();
        let constant = beam.n_part * r0 * r0 * C_LIGHT
            / (12.0 * PI * beta.powi(3) * gamma.powi(5) * bunch_length)
            * clog;

        let mut rates = IbsGrowthRates::new(
            integrals.ix * constant / epsx,
            integrals.iy * constant / epsy,
            integrals.iz * constant / (sigma_delta * sigma_delta),
        );
        if !options.bunched {
            rates.tx /= 2.0;
            rates.ty /= 2.0;
            rates.tz /= 2.0;
        }

        let refs = BeamState::new(epsx, epsy, sigma_delta, bunch_length);
        self.state.record(rates, refs);
        rates
    }
}

impl AnalyticalIbs for NagaitsevIbs {
    fn state(&self) -> &IbsState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IbsState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "nagaitsev"
    }

    fn growth_rates(&mut self, beam_state: &BeamState, options: GrowthRateOptions) -> IbsGrowthRates {
        self.growth_rates_with(beam_state, options, true)
    }
}

/// Per-element Ix, Iy, Iz integrands, integrated with the left sum.
fn elliptic_integrals(
    beam: &BeamParameters,
    optics: &OpticsParameters,
    epsx: f64,
    epsy: f64,
    sigma_delta: f64,
) -> EllipticIntegrals {
    let gamma = beam.gamma_rel();
    let g2 = gamma * gamma;
    let circumference = optics.circumference;

    let sigx = Zip::from(&optics.betx)
        .and(&optics.dx)
        .map_collect(|&b, &d| (b * epsx + (d * sigma_delta).powi(2)).sqrt());
    let sigy = Zip::from(&optics.bety)
        .and(&optics.dy)
        .map_collect(|&b, &d| (b * epsy + (d * sigma_delta).powi(2)).sqrt());
    let phix = phi_array(&optics.betx, &optics.alfx, &optics.dx, &optics.dpx);

    let ax = &optics.betx / epsx;
    // Dx²/βx² + φx²
    let dispersive = Zip::from(&optics.dx)
        .and(&optics.betx)
        .and(&phix)
        .map_collect(|&d, &b, &p| (d / b).powi(2) + p * p);
    let a_s = &ax * &dispersive + 1.0 / (sigma_delta * sigma_delta);
    let a1 = (&ax + &(g2 * &a_s)) * 0.5;
    let a2 = (&ax - &(g2 * &a_s)) * 0.5;
    let disc = Zip::from(&a2)
        .and(&ax)
        .and(&phix)
        .map_collect(|&a2, &ax, &p| (a2 * a2 + g2 * ax * ax * p * p).sqrt());

    let lambda_1 = &optics.bety / epsy;
    let lambda_2 = &a1 + &disc;
    let lambda_3 = &a1 - &disc;
    let inv_1 = lambda_1.mapv(f64::recip);
    let inv_2 = lambda_2.mapv(f64::recip);
    let inv_3 = lambda_3.mapv(f64::recip);

    let r1 = carlson_rd_array(&inv_2, &inv_3, &inv_1) / &lambda_1;
    let r2 = carlson_rd_array(&inv_3, &inv_1, &inv_2) / &lambda_2;
    let r3 = Zip::from(&lambda_1)
        .and(&lambda_2)
        .and(&lambda_3)
        .and(&r1)
        .and(&r2)
        .map_collect(|&l1, &l2, &l3, &r1, &r2| {
            3.0 * (l1 * l2 / l3).sqrt() - l1 * r1 / l3 - l2 * r2 / l3
        });

    let ratio = &a2 / &disc * 3.0;
    let sp = Zip::from(&r1)
        .and(&r2)
        .and(&r3)
        .and(&ratio)
        .map_collect(|&r1, &r2, &r3, &q| (2.0 * r1 - r2 * (1.0 - q) - r3 * (1.0 + q)) * 0.5 * g2);
    let sx = Zip::from(&r1)
        .and(&r2)
        .and(&r3)
        .and(&ratio)
        .map_collect(|&r1, &r2, &r3, &q| (2.0 * r1 - r2 * (1.0 + q) - r3 * (1.0 - q)) * 0.5);
    let sxp = Zip::from(&phix)
        .and(&ax)
        .and(&r3)
        .and(&r2)
        .and(&disc)
        .map_collect(|&p, &ax, &r3, &r2, &d| 3.0 * g2 * p * p * ax * (r3 - r2) / d);

    let norm: Array1<f64> = Zip::from(&sigx)
        .and(&sigy)
        .map_collect(|&sx, &sy| 1.0 / (circumference * sx * sy));
    let sx_total = &sx + &sxp;

    let ix = Zip::from(&optics.betx)
        .and(&norm)
        .and(&sx_total)
        .and(&sp)
        .and(&dispersive)
        .map_collect(|&b, &n, &sx, &sp, &d| b * n * (sx + sp * d));
    let iy = Zip::from(&optics.bety)
        .and(&norm)
        .and(&r1)
        .and(&r2)
        .and(&r3)
        .map_collect(|&b, &n, &r1, &r2, &r3| b * n * (r2 + r3 - 2.0 * r1));
    let iz = &sp * &norm;

    EllipticIntegrals::new(
        left_riemann(&ix, &optics.s),
        left_riemann(&iy, &optics.s),
        left_riemann(&iz, &optics.s),
    )
}
