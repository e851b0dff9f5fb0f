// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Result records and beam-state snapshots.

use serde::{Deserialize, Serialize};

/// IBS amplitude growth rates [1/s] in the three planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IbsGrowthRates {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
}

impl IbsGrowthRates {
    pub fn new(tx: f64, ty: f64, tz: f64) -> Self {
        IbsGrowthRates { tx, ty, tz }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.tx, self.ty, self.tz)
    }

    /// Growth times 1/T [s].
    pub fn inversed(&self) -> (f64, f64, f64) {
        (1.0 / self.tx, 1.0 / self.ty, 1.0 / self.tz)
    }
}

/// Ring-integrated Nagaitsev elliptic-integral terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipticIntegrals {
    pub ix: f64,
    pub iy: f64,
    pub iz: f64,
}

impl EllipticIntegrals {
    pub fn new(ix: f64, iy: f64, iz: f64) -> Self {
        EllipticIntegrals { ix, iy, iz }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.ix, self.iy, self.iz)
    }
}

/// The four quantities an emittance-evolution step advances.
///
/// Whether `epsx`/`epsy` are geometric or normalized is decided by the
/// caller's `normalized_emittances` flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamState {
    pub epsx: f64,
    pub epsy: f64,
    pub sigma_delta: f64,
    pub bunch_length: f64,
}

impl BeamState {
    pub fn new(epsx: f64, epsy: f64, sigma_delta: f64, bunch_length: f64) -> Self {
        BeamState {
            epsx,
            epsy,
            sigma_delta,
            bunch_length,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.epsx, self.epsy, self.sigma_delta, self.bunch_length]
    }
}

/// Geometric beam state at the last growth-rate computation. Only used
/// to decide when the rates are stale.
pub type ReferenceValues = BeamState;
