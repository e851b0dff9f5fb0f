// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Optics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ring optics snapshot: per-element Twiss functions aligned by index.

use crate::beam::BeamParameters;
use crate::constants::C_LIGHT;
use crate::error::{IbsError, IbsResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Per-element optics functions along the ring.
///
/// Every array has the same length and index `i` refers to the same
/// lattice location in all of them. `s` is non-decreasing and the
/// circumference is `s[last]`.
#[derive(Debug, Clone)]
pub struct OpticsParameters {
    pub s: Array1<f64>,
    pub betx: Array1<f64>,
    pub bety: Array1<f64>,
    pub alfx: Array1<f64>,
    pub alfy: Array1<f64>,
    pub dx: Array1<f64>,
    pub dy: Array1<f64>,
    pub dpx: Array1<f64>,
    pub dpy: Array1<f64>,
    pub circumference: f64,
    /// Revolution frequency [Hz].
    pub revolution_frequency: f64,
}

/// Raw Twiss columns as exported by a lattice code.
///
/// Matches the JSON layout `{"s": [...], "betx": [...], ...}`. The
/// revolution frequency is optional; when absent it is derived from the
/// beam velocity and the circumference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwissTable {
    pub s: Vec<f64>,
    pub betx: Vec<f64>,
    pub bety: Vec<f64>,
    pub alfx: Vec<f64>,
    pub alfy: Vec<f64>,
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
    pub dpx: Vec<f64>,
    pub dpy: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revolution_frequency: Option<f64>,
}

impl TwissTable {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> IbsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table: Self = serde_json::from_str(&contents)?;
        Ok(table)
    }
}

impl OpticsParameters {
    /// Build from aligned arrays, checking the alignment invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s: Array1<f64>,
        betx: Array1<f64>,
        bety: Array1<f64>,
        alfx: Array1<f64>,
        alfy: Array1<f64>,
        dx: Array1<f64>,
        dy: Array1<f64>,
        dpx: Array1<f64>,
        dpy: Array1<f64>,
        revolution_frequency: f64,
    ) -> IbsResult<Self> {
        let n = s.len();
        if n < 2 {
            return Err(IbsError::InvalidOptics(format!(
                "at least 2 lattice elements are required, got {n}"
            )));
        }
        let columns = [
            ("betx", &betx),
            ("bety", &bety),
            ("alfx", &alfx),
            ("alfy", &alfy),
            ("dx", &dx),
            ("dy", &dy),
            ("dpx", &dpx),
            ("dpy", &dpy),
        ];
        for (name, column) in columns {
            if column.len() != n {
                return Err(IbsError::InvalidOptics(format!(
                    "column '{name}' has {} entries, s has {n}",
                    column.len()
                )));
            }
        }
        if let Some(i) = (1..n).find(|&i| s[i] < s[i - 1]) {
            return Err(IbsError::InvalidOptics(format!(
                "s must be non-decreasing, s[{}] = {} > s[{i}] = {}",
                i - 1,
                s[i - 1],
                s[i]
            )));
        }
        if !revolution_frequency.is_finite() || revolution_frequency <= 0.0 {
            return Err(IbsError::InvalidOptics(format!(
                "revolution frequency must be finite and > 0, got {revolution_frequency}"
            )));
        }

        let circumference = s[n - 1];
        Ok(OpticsParameters {
            s,
            betx,
            bety,
            alfx,
            alfy,
            dx,
            dy,
            dpx,
            dpy,
            circumference,
            revolution_frequency,
        })
    }

    /// Build from a Twiss table. Without an explicit revolution frequency,
    /// f_rev = β c / C for the given beam.
    pub fn from_twiss(table: TwissTable, beam: &BeamParameters) -> IbsResult<Self> {
        let circumference = table.s.last().copied().unwrap_or(0.0);
        let revolution_frequency = match table.revolution_frequency {
            Some(frev) => frev,
            None => beam.beta_rel() * C_LIGHT / circumference,
        };
        Self::new(
            Array1::from(table.s),
            Array1::from(table.betx),
            Array1::from(table.bety),
            Array1::from(table.alfx),
            Array1::from(table.alfy),
            Array1::from(table.dx),
            Array1::from(table.dy),
            Array1::from(table.dpx),
            Array1::from(table.dpy),
            revolution_frequency,
        )
    }

    /// Number of lattice elements.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Revolution period 1 / f_rev [s].
    pub fn revolution_period(&self) -> f64 {
        1.0 / self.revolution_frequency
    }
}
