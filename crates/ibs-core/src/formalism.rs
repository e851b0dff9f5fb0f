// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Formalism Selection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Choosing an analytical formalism by name and running it from a JSON
//! configuration.

use crate::analytical::{AnalyticalIbs, EvolutionOptions, GrowthRateOptions};
use crate::bjorken_mtingwa::BjorkenMtingwaIbs;
use crate::nagaitsev::NagaitsevIbs;
use ibs_types::beam::BeamParameters;
use ibs_types::config::IbsRunConfig;
use ibs_types::error::{IbsError, IbsResult};
use ibs_types::optics::OpticsParameters;
use ibs_types::state::{BeamState, IbsGrowthRates};
use log::info;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Available analytical formalisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formalism {
    Nagaitsev,
    BjorkenMtingwa,
}

impl FromStr for Formalism {
    type Err = IbsError;

    /// Case-insensitive; accepts "nagaitsev", "bjorken-mtingwa",
    /// "bjorken_mtingwa", "b&m" and "bm".
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "nagaitsev" => Ok(Formalism::Nagaitsev),
            "bjorken-mtingwa" | "bjorken_mtingwa" | "b&m" | "bm" => Ok(Formalism::BjorkenMtingwa),
            _ => Err(IbsError::UnknownFormalism(name.to_string())),
        }
    }
}

impl fmt::Display for Formalism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formalism::Nagaitsev => write!(f, "nagaitsev"),
            Formalism::BjorkenMtingwa => write!(f, "bjorken-mtingwa"),
        }
    }
}

impl Formalism {
    /// Instantiate the engine for this formalism.
    pub fn build(
        self,
        beam: Arc<BeamParameters>,
        optics: Arc<OpticsParameters>,
    ) -> Box<dyn AnalyticalIbs> {
        match self {
            Formalism::Nagaitsev => Box::new(NagaitsevIbs::new(beam, optics)),
            Formalism::BjorkenMtingwa => Box::new(BjorkenMtingwaIbs::new(beam, optics)),
        }
    }
}

/// An engine set up from an [`IbsRunConfig`], together with the run's
/// initial beam state and flags.
pub struct IbsRun {
    config: IbsRunConfig,
    formalism: Formalism,
    engine: Box<dyn AnalyticalIbs>,
}

impl IbsRun {
    /// Build the beam, load the Twiss table (relative to `config_dir`) and
    /// instantiate the configured formalism.
    pub fn new(config: IbsRunConfig, config_dir: &Path) -> IbsResult<Self> {
        let formalism: Formalism = config.formalism.parse()?;
        let (beam, optics) = config.load(config_dir)?;
        info!(
            "Run '{}': {} formalism, {} elements, C = {} m",
            config.run_name,
            formalism,
            optics.len(),
            optics.circumference
        );
        let engine = formalism.build(Arc::new(beam), Arc::new(optics));
        Ok(IbsRun {
            config,
            formalism,
            engine,
        })
    }

    /// Load a run from a JSON config file. The Twiss file is resolved
    /// against the config file's directory.
    pub fn from_file(path: &str) -> IbsResult<Self> {
        let config = IbsRunConfig::from_file(path)?;
        let config_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
        Self::new(config, config_dir)
    }

    pub fn config(&self) -> &IbsRunConfig {
        &self.config
    }

    pub fn formalism(&self) -> Formalism {
        self.formalism
    }

    pub fn engine(&self) -> &dyn AnalyticalIbs {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn AnalyticalIbs {
        self.engine.as_mut()
    }

    pub fn initial_state(&self) -> BeamState {
        self.config.initial_state
    }

    pub fn growth_rate_options(&self) -> GrowthRateOptions {
        GrowthRateOptions {
            bunched: self.config.bunched,
            normalized_emittances: self.config.normalized_emittances,
        }
    }

    pub fn evolution_options(&self) -> EvolutionOptions {
        let evolution = &self.config.evolution;
        EvolutionOptions {
            dt: evolution.dt,
            normalized_emittances: self.config.normalized_emittances,
            auto_recompute_rates_percent: evolution.auto_recompute_rates_percent,
            bunched: self.config.bunched,
            synchrotron_radiation: evolution.synchrotron_radiation,
        }
    }

    /// Growth rates at the configured initial state.
    pub fn growth_rates(&mut self) -> IbsGrowthRates {
        let initial = self.initial_state();
        let options = self.growth_rate_options();
        self.engine.growth_rates(&initial, options)
    }

    /// Evolve the initial state over the configured number of steps.
    pub fn evolve(&mut self) -> Vec<BeamState> {
        let initial = self.initial_state();
        let options = self.evolution_options();
        let steps = self.config.evolution.n_steps;
        self.engine.evolve(initial, &options, steps)
    }
}

/// One-call growth rates for a JSON run configuration.
pub fn growth_rates_from_config(path: &str) -> IbsResult<IbsGrowthRates> {
    let mut run = IbsRun::from_file(path)?;
    Ok(run.growth_rates())
}
