// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Beam
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Beam definition consumed by the analytical IBS engines.

use crate::constants::{EPSILON_0, Q_ELEMENTARY};
use crate::error::{IbsError, IbsResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Particle and bunch properties, with relativistic quantities derived
/// once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamParameters {
    /// Particle charge in elementary-charge units.
    pub particle_charge: i32,
    /// Rest mass [eV].
    pub particle_mass_ev: f64,
    /// Total energy per particle [eV].
    pub total_energy_ev: f64,
    /// Number of particles in the bunch.
    pub n_part: f64,
    gamma_rel: f64,
    beta_rel: f64,
    particle_classical_radius_m: f64,
}

impl BeamParameters {
    /// Build from charge, rest mass and total energy (both in eV).
    ///
    /// γ = E / m, β = sqrt(1 - 1/γ²), r₀ = q² e / (4π ε₀ m[eV]).
    pub fn new(
        particle_charge: i32,
        particle_mass_ev: f64,
        total_energy_ev: f64,
        n_part: f64,
    ) -> IbsResult<Self> {
        if !particle_mass_ev.is_finite() || particle_mass_ev <= 0.0 {
            return Err(IbsError::PhysicsViolation(format!(
                "particle mass must be finite and > 0, got {particle_mass_ev} eV"
            )));
        }
        if !total_energy_ev.is_finite() || total_energy_ev < particle_mass_ev {
            return Err(IbsError::PhysicsViolation(format!(
                "total energy {total_energy_ev} eV is below rest mass {particle_mass_ev} eV"
            )));
        }
        let gamma_rel = total_energy_ev / particle_mass_ev;
        let beta_rel = (1.0 - 1.0 / (gamma_rel * gamma_rel)).sqrt();
        let q = particle_charge as f64;
        let particle_classical_radius_m = q * q * Q_ELEMENTARY / (4.0 * PI * EPSILON_0 * particle_mass_ev);

        Ok(BeamParameters {
            particle_charge,
            particle_mass_ev,
            total_energy_ev,
            n_part,
            gamma_rel,
            beta_rel,
            particle_classical_radius_m,
        })
    }

    /// Build from the relativistic gamma instead of the total energy.
    pub fn from_gamma(
        particle_charge: i32,
        particle_mass_ev: f64,
        gamma_rel: f64,
        n_part: f64,
    ) -> IbsResult<Self> {
        Self::new(particle_charge, particle_mass_ev, gamma_rel * particle_mass_ev, n_part)
    }

    pub fn gamma_rel(&self) -> f64 {
        self.gamma_rel
    }

    pub fn beta_rel(&self) -> f64 {
        self.beta_rel
    }

    /// Classical particle radius r₀ [m].
    pub fn particle_classical_radius_m(&self) -> f64 {
        self.particle_classical_radius_m
    }

    /// Geometric → normalized emittance (multiply by βγ).
    pub fn normalized_emittance(&self, geometric_emittance: f64) -> f64 {
        geometric_emittance * self.beta_rel * self.gamma_rel
    }

    /// Normalized → geometric emittance (divide by βγ).
    pub fn geometric_emittance(&self, normalized_emittance: f64) -> f64 {
        normalized_emittance / (self.beta_rel * self.gamma_rel)
    }
}

/// Serializable beam definition, as found in run configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamConfig {
    pub particle_charge: i32,
    pub particle_mass_ev: f64,
    pub total_energy_ev: f64,
    pub n_part: f64,
}

impl BeamConfig {
    pub fn build(&self) -> IbsResult<BeamParameters> {
        BeamParameters::new(
            self.particle_charge,
            self.particle_mass_ev,
            self.total_energy_ev,
            self.n_part,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LEAD_208_MASS_EV, PROTON_MASS_EV};

    #[test]
    fn test_proton_classical_radius() {
        let beam = BeamParameters::from_gamma(1, PROTON_MASS_EV, 10.0, 1e11).unwrap();
        // r_p = 1.534698e-18 m
        let r0 = beam.particle_classical_radius_m();
        assert!((r0 - 1.534_698e-18).abs() / 1.534_698e-18 < 1e-5, "r0 = {r0}");
    }

    #[test]
    fn test_lead_ion_relativistic_factors() {
        let beam = BeamParameters::from_gamma(82, LEAD_208_MASS_EV, 7.33, 3.5e8).unwrap();
        assert!((beam.gamma_rel() - 7.33).abs() < 1e-12);
        assert!((beam.beta_rel() - 0.990_650_312_957).abs() < 1e-9);
        // Z² scaling of the proton-like radius with the ion mass
        assert!((beam.particle_classical_radius_m() - 4.998_945_7e-17).abs() < 1e-22);
    }

    #[test]
    fn test_energy_below_mass_rejected() {
        let err = BeamParameters::new(1, PROTON_MASS_EV, 0.5 * PROTON_MASS_EV, 1e11);
        assert!(matches!(err, Err(IbsError::PhysicsViolation(_))));
    }

    #[test]
    fn test_non_positive_mass_rejected() {
        assert!(BeamParameters::new(1, 0.0, 1e9, 1e11).is_err());
        assert!(BeamParameters::new(1, -1.0, 1e9, 1e11).is_err());
        assert!(BeamParameters::new(1, f64::NAN, 1e9, 1e11).is_err());
    }

    #[test]
    fn test_particle_at_rest() {
        let beam = BeamParameters::new(1, PROTON_MASS_EV, PROTON_MASS_EV, 1.0).unwrap();
        assert_eq!(beam.gamma_rel(), 1.0);
        assert_eq!(beam.beta_rel(), 0.0);
    }

    #[test]
    fn test_emittance_conversions() {
        let beam = BeamParameters::from_gamma(82, LEAD_208_MASS_EV, 7.33, 3.5e8).unwrap();
        let bg = beam.beta_rel() * beam.gamma_rel();
        let geom = beam.geometric_emittance(1.2612e-6);
        assert!((geom - 1.2612e-6 / bg).abs() < 1e-20);
        assert!((beam.normalized_emittance(geom) - 1.2612e-6).abs() < 1e-18);
    }
}
