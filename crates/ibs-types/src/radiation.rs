// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Synchrotron Radiation Inputs
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Equilibrium values and damping times used when emittance evolution
//! includes synchrotron-radiation damping.

use crate::error::{IbsError, IbsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accepted (lowercase) keys of a name→value SR input bag.
pub const SR_INPUT_KEYS: [&str; 6] = [
    "sr_equilibrium_epsx",
    "sr_equilibrium_epsy",
    "sr_equilibrium_sigma_delta",
    "sr_tau_x",
    "sr_tau_y",
    "sr_tau_z",
];

/// SR equilibrium emittances, momentum spread and damping times [s].
///
/// The emittances follow the same geometric/normalized convention as the
/// beam emittances they are evolved alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynchrotronRadiationInputs {
    pub equilibrium_epsx: f64,
    pub equilibrium_epsy: f64,
    pub equilibrium_sigma_delta: f64,
    pub tau_x: f64,
    pub tau_y: f64,
    pub tau_z: f64,
}

impl SynchrotronRadiationInputs {
    pub fn new(
        equilibrium_epsx: f64,
        equilibrium_epsy: f64,
        equilibrium_sigma_delta: f64,
        tau_x: f64,
        tau_y: f64,
        tau_z: f64,
    ) -> Self {
        SynchrotronRadiationInputs {
            equilibrium_epsx,
            equilibrium_epsy,
            equilibrium_sigma_delta,
            tau_x,
            tau_y,
            tau_z,
        }
    }

    /// Build from a name→value bag. Keys are matched case-insensitively and
    /// all six of [`SR_INPUT_KEYS`] must be present; extra keys are ignored.
    pub fn from_map(values: &HashMap<String, f64>) -> IbsResult<Self> {
        let lowercase: HashMap<String, f64> = values
            .iter()
            .map(|(key, value)| (key.to_lowercase(), *value))
            .collect();

        let missing = SR_INPUT_KEYS.iter().any(|key| !lowercase.contains_key(*key));
        if missing {
            let mut provided: Vec<String> = lowercase.keys().cloned().collect();
            provided.sort();
            return Err(IbsError::MissingSynchrotronRadiationInputs {
                expected: SR_INPUT_KEYS.iter().map(|k| k.to_string()).collect(),
                provided,
            });
        }

        let get = |key: &str| lowercase.get(key).copied().unwrap_or(f64::NAN);
        Ok(SynchrotronRadiationInputs {
            equilibrium_epsx: get("sr_equilibrium_epsx"),
            equilibrium_epsy: get("sr_equilibrium_epsy"),
            equilibrium_sigma_delta: get("sr_equilibrium_sigma_delta"),
            tau_x: get("sr_tau_x"),
            tau_y: get("sr_tau_y"),
            tau_z: get("sr_tau_z"),
        })
    }
}
