// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::beam::{BeamConfig, BeamParameters};
use crate::error::IbsResult;
use crate::optics::{OpticsParameters, TwissTable};
use crate::radiation::SynchrotronRadiationInputs;
use crate::state::BeamState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level IBS run configuration.
/// Maps 1:1 to the JSON files under `configs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbsRunConfig {
    pub run_name: String,
    /// "nagaitsev", "bjorken-mtingwa" or "b&m"
    pub formalism: String,
    /// Twiss table JSON, relative to the directory of this config file.
    pub twiss_file: String,
    pub beam: BeamConfig,
    pub initial_state: BeamState,
    /// Whether `initial_state` and SR equilibrium emittances are normalized.
    #[serde(default)]
    pub normalized_emittances: bool,
    #[serde(default = "default_bunched")]
    pub bunched: bool,
    #[serde(default)]
    pub evolution: EvolutionConfig,
}

/// Emittance evolution settings (optional in JSON config).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Time step [s]. One revolution period when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// Number of evolution steps to run.
    #[serde(default)]
    pub n_steps: usize,
    /// Refresh growth rates when any quantity drifts by more than this
    /// percentage from the last computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_recompute_rates_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchrotron_radiation: Option<SynchrotronRadiationInputs>,
}

fn default_bunched() -> bool {
    true
}

impl IbsRunConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> IbsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Twiss table path resolved against `config_dir`.
    pub fn twiss_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.twiss_file)
    }

    /// Build the beam and load the optics referenced by this config.
    pub fn load(&self, config_dir: &Path) -> IbsResult<(BeamParameters, OpticsParameters)> {
        let beam = self.beam.build()?;
        let path = self.twiss_path(config_dir);
        let table = TwissTable::from_file(&path.to_string_lossy())?;
        let optics = OpticsParameters::from_twiss(table, &beam)?;
        Ok((beam, optics))
    }
}
