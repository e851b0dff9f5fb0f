// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Formulary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Small optics and bookkeeping formulas shared by the IBS engines.

use ndarray::{Array1, Zip};

/// Dispersion phase term φ = D′ + α·D/β.
pub fn phi(beta: f64, alpha: f64, disp: f64, dpx: f64) -> f64 {
    dpx + alpha * disp / beta
}

/// Element-wise φ over aligned optics arrays.
pub fn phi_array(
    beta: &Array1<f64>,
    alpha: &Array1<f64>,
    disp: &Array1<f64>,
    dpx: &Array1<f64>,
) -> Array1<f64> {
    Zip::from(beta)
        .and(alpha)
        .and(disp)
        .and(dpx)
        .map_collect(|&b, &a, &d, &dp| phi(b, a, d, dp))
}

/// Dispersion invariant H = (D² + β²φ²)/β, element-wise.
pub fn dispersion_invariant(
    beta: &Array1<f64>,
    disp: &Array1<f64>,
    phi: &Array1<f64>,
) -> Array1<f64> {
    Zip::from(beta)
        .and(disp)
        .and(phi)
        .map_collect(|&b, &d, &p| (d * d + b * b * p * p) / b)
}

/// Relative change (new − reference)/reference.
pub fn relative_change(new: f64, reference: f64) -> f64 {
    (new - reference) / reference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_without_alpha_is_dprime() {
        assert_eq!(phi(20.0, 0.0, 2.0, 0.05), 0.05);
    }

    #[test]
    fn test_phi_array_matches_scalar() {
        let beta = Array1::from(vec![10.0, 50.0]);
        let alpha = Array1::from(vec![1.5, -2.0]);
        let disp = Array1::from(vec![2.0, 0.5]);
        let dpx = Array1::from(vec![0.1, -0.02]);
        let p = phi_array(&beta, &alpha, &disp, &dpx);
        assert!((p[0] - (0.1 + 1.5 * 2.0 / 10.0)).abs() < 1e-15);
        assert!((p[1] - (-0.02 - 2.0 * 0.5 / 50.0)).abs() < 1e-15);
    }

    #[test]
    fn test_dispersion_invariant() {
        let beta = Array1::from(vec![10.0]);
        let disp = Array1::from(vec![2.0]);
        let p = Array1::from(vec![0.1]);
        let h = dispersion_invariant(&beta, &disp, &p);
        assert!((h[0] - (4.0 + 1.0) / 10.0).abs() < 1e-15);
    }

    #[test]
    fn test_relative_change_signed() {
        assert!((relative_change(1.05, 1.0) - 0.05).abs() < 1e-15);
        assert!((relative_change(0.9, 1.0) + 0.1).abs() < 1e-15);
        assert!(relative_change(1.0, 0.0).is_infinite());
    }
}
