// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Analytical IBS
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Behaviour shared by every analytical IBS formalism.
//!
//! An engine owns an [`IbsState`]: shared beam and optics snapshots plus
//! the last computed growth rates, the beam state they were computed at
//! and a computation counter. Methods that refresh the cache take
//! `&mut self`; sharing one engine between threads needs a lock.

use crate::coulomb::{self, RingAverages};
use crate::evolution;
use ibs_types::beam::BeamParameters;
use ibs_types::optics::OpticsParameters;
use ibs_types::radiation::SynchrotronRadiationInputs;
use ibs_types::state::{BeamState, IbsGrowthRates, ReferenceValues};
use log::{debug, info};
use std::sync::Arc;

/// Flags for a growth-rate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthRateOptions {
    /// Bunched beam (true) or coasting beam (false).
    pub bunched: bool,
    /// Emittances are normalized (×βγ) rather than geometric.
    pub normalized_emittances: bool,
}

impl Default for GrowthRateOptions {
    fn default() -> Self {
        GrowthRateOptions {
            bunched: true,
            normalized_emittances: false,
        }
    }
}

/// Settings for one emittance-evolution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionOptions {
    /// Time step [s]; one revolution period when `None`.
    pub dt: Option<f64>,
    pub normalized_emittances: bool,
    /// Refresh the growth rates when a quantity would drift by more than
    /// this percentage from its value at the last computation.
    pub auto_recompute_rates_percent: Option<f64>,
    /// Bunched beam (true) or coasting beam (false), used whenever growth
    /// rates are (re)computed during evolution.
    pub bunched: bool,
    /// Include synchrotron-radiation damping and quantum excitation.
    pub synchrotron_radiation: Option<SynchrotronRadiationInputs>,
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        EvolutionOptions {
            dt: None,
            normalized_emittances: false,
            auto_recompute_rates_percent: None,
            bunched: true,
            synchrotron_radiation: None,
        }
    }
}

impl EvolutionOptions {
    pub fn growth_rate_options(&self) -> GrowthRateOptions {
        GrowthRateOptions {
            bunched: self.bunched,
            normalized_emittances: self.normalized_emittances,
        }
    }
}

/// Cached state owned by each formalism instance.
#[derive(Debug, Clone)]
pub struct IbsState {
    beam: Arc<BeamParameters>,
    optics: Arc<OpticsParameters>,
    ring_averages: RingAverages,
    growth_rates: Option<IbsGrowthRates>,
    refs: Option<ReferenceValues>,
    computations: usize,
}

impl IbsState {
    pub fn new(beam: Arc<BeamParameters>, optics: Arc<OpticsParameters>) -> Self {
        let ring_averages = RingAverages::from_optics(&optics);
        IbsState {
            beam,
            optics,
            ring_averages,
            growth_rates: None,
            refs: None,
            computations: 0,
        }
    }

    pub fn beam(&self) -> &BeamParameters {
        &self.beam
    }

    pub fn optics(&self) -> &OpticsParameters {
        &self.optics
    }

    pub fn ring_averages(&self) -> &RingAverages {
        &self.ring_averages
    }

    pub fn growth_rates(&self) -> Option<IbsGrowthRates> {
        self.growth_rates
    }

    pub fn refs(&self) -> Option<ReferenceValues> {
        self.refs
    }

    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Store freshly computed rates and the geometric state they belong to.
    pub fn record(&mut self, rates: IbsGrowthRates, refs: ReferenceValues) {
        self.growth_rates = Some(rates);
        self.refs = Some(refs);
        self.computations += 1;
    }

    /// Replace the cached rates without touching refs or the counter.
    pub fn override_growth_rates(&mut self, rates: IbsGrowthRates) {
        self.growth_rates = Some(rates);
    }

    /// Convert a pair of emittances to geometric ones if needed.
    pub fn geometric_emittances(&self, epsx: f64, epsy: f64, normalized: bool) -> (f64, f64) {
        if normalized {
            (
                self.beam.geometric_emittance(epsx),
                self.beam.geometric_emittance(epsy),
            )
        } else {
            (epsx, epsy)
        }
    }

    /// True when any quantity in `new` differs from the refs by more than
    /// `percent`% relative. Rates without refs count as stale.
    pub fn exceeds_threshold(&self, new: &BeamState, percent: f64) -> bool {
        match &self.refs {
            Some(refs) => evolution::exceeds_threshold(refs, new, percent),
            None => true,
        }
    }
}

/// Analytical IBS formalism.
///
/// Implementors provide `growth_rates`; Coulomb logarithm, emittance
/// evolution and the cache accessors come for free.
pub trait AnalyticalIbs {
    fn state(&self) -> &IbsState;

    fn state_mut(&mut self) -> &mut IbsState;

    /// Short formalism name for logs.
    fn name(&self) -> &'static str;

    /// Compute growth rates at `beam_state`, cache them together with the
    /// geometric reference state and bump the computation counter.
    fn growth_rates(
        &mut self,
        beam_state: &BeamState,
        options: GrowthRateOptions,
    ) -> IbsGrowthRates;

    fn beam(&self) -> &BeamParameters {
        self.state().beam()
    }

    fn optics(&self) -> &OpticsParameters {
        self.state().optics()
    }

    /// Last computed (or user-supplied) growth rates.
    fn ibs_growth_rates(&self) -> Option<IbsGrowthRates> {
        self.state().growth_rates()
    }

    /// Overwrite the cached growth rates, e.g. with externally known values.
    fn set_ibs_growth_rates(&mut self, rates: IbsGrowthRates) {
        self.state_mut().override_growth_rates(rates);
    }

    fn reference_values(&self) -> Option<ReferenceValues> {
        self.state().refs()
    }

    /// How many times growth rates were computed by this instance.
    fn growth_rate_computations(&self) -> usize {
        self.state().computations()
    }

    /// Coulomb logarithm for the instance's beam and optics.
    fn coulomb_log(&self, beam_state: &BeamState, options: GrowthRateOptions) -> f64 {
        debug!("Computing Coulomb logarithm for defined beam and optics parameters");
        let state = self.state();
        let (geom_epsx, geom_epsy) = state.geometric_emittances(
            beam_state.epsx,
            beam_state.epsy,
            options.normalized_emittances,
        );
        coulomb::coulomb_log(
            state.beam(),
            state.optics(),
            state.ring_averages(),
            geom_epsx,
            geom_epsy,
            beam_state.sigma_delta,
            beam_state.bunch_length,
            options.bunched,
        )
    }

    /// Advance the beam by one time step under IBS (and optionally SR).
    ///
    /// Growth rates are computed first if none are cached. With
    /// `auto_recompute_rates_percent`, a step that would move any quantity
    /// too far from the last computation is redone with rates refreshed at
    /// the pre-step values. Emittances are returned in the caller's
    /// convention.
    fn emittance_evolution(
        &mut self,
        beam_state: BeamState,
        options: &EvolutionOptions,
    ) -> BeamState {
        let growth_options = options.growth_rate_options();
        let normalized = options.normalized_emittances;

        let mut rates = match self.ibs_growth_rates() {
            Some(rates) => rates,
            None => {
                debug!("Emittance evolution requested without growth rates, computing them");
                self.growth_rates(&beam_state, growth_options)
            }
        };
        info!("Computing new emittances from IBS growth rates");

        let (geom_epsx, geom_epsy) =
            self.state().geometric_emittances(beam_state.epsx, beam_state.epsy, normalized);
        let geometric = BeamState::new(
            geom_epsx,
            geom_epsy,
            beam_state.sigma_delta,
            beam_state.bunch_length,
        );

        let sr = options.synchrotron_radiation.map(|sr| {
            let (eq_epsx, eq_epsy) = self.state().geometric_emittances(
                sr.equilibrium_epsx,
                sr.equilibrium_epsy,
                normalized,
            );
            SynchrotronRadiationInputs {
                equilibrium_epsx: eq_epsx,
                equilibrium_epsy: eq_epsy,
                ..sr
            }
        });

        let dt = match options.dt {
            Some(dt) => dt,
            None => {
                debug!("No time step provided, defaulting to 1 / frev");
                self.optics().revolution_period()
            }
        };

        let step = |rates: &IbsGrowthRates| match &sr {
            Some(sr) => evolution::evolve_with_sr(&geometric, rates, dt, sr),
            None => evolution::evolve_without_sr(&geometric, rates, dt),
        };

        let mut new = step(&rates);
        if let Some(percent) = options.auto_recompute_rates_percent {
            if self.state().exceeds_threshold(&new, percent) {
                debug!(
                    "One value would change by more than {percent}% compared to last update of the \
                     growth rates, updating growth rates before re-computing evolutions."
                );
                rates = self.growth_rates(&beam_state, growth_options);
                new = step(&rates);
            }
        }

        if normalized {
            let beam = self.beam();
            new.epsx = beam.normalized_emittance(new.epsx);
            new.epsy = beam.normalized_emittance(new.epsy);
        }
        new
    }

    /// Apply [`emittance_evolution`](Self::emittance_evolution) `steps`
    /// times. Returns `steps + 1` states, starting with `initial`.
    fn evolve(
        &mut self,
        initial: BeamState,
        options: &EvolutionOptions,
        steps: usize,
    ) -> Vec<BeamState> {
        info!("Evolving beam over {steps} steps with {} formalism", self.name());
        let mut states = Vec::with_capacity(steps + 1);
        states.push(initial);
        let mut current = initial;
        for _ in 0..steps {
            current = self.emittance_evolution(current, options);
            states.push(current);
        }
        states
    }
}
