// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Elliptic
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Carlson symmetric elliptic integral of the second kind R_D.
//!
//! Duplication algorithm (Carlson 1995, Numerical Recipes 3rd ed. §6.12).
//! Matches `scipy.special.elliprd(x, y, z)` for real arguments.

use ndarray::{Array1, Zip};

const ERRTOL: f64 = 0.0015;
const MAX_ITERATIONS: usize = 64;

const C1: f64 = 3.0 / 14.0;
const C2: f64 = 1.0 / 6.0;
const C3: f64 = 9.0 / 22.0;
const C4: f64 = 3.0 / 26.0;
const C5: f64 = 0.25 * C3;
const C6: f64 = 1.5 * C4;

/// R_D(x, y, z) = 3/2 ∫₀^∞ (t+x)^{-1/2} (t+y)^{-1/2} (t+z)^{-3/2} dt.
///
/// Requires x, y ≥ 0 with at most one of them zero, and z > 0.
/// Relative accuracy is at the 1e-15 level. NaN arguments return NaN
/// and infinite ones terminate after a bounded number of duplications.
pub fn carlson_rd(x: f64, y: f64, z: f64) -> f64 {
    let (mut xt, mut yt, mut zt) = (x, y, z);
    let mut sum = 0.0;
    let mut fac = 1.0;
    let (mut delx, mut dely, mut delz);
    let mut ave;

    let mut iterations = 0;
    loop {
        let sqrtx = xt.sqrt();
        let sqrty = yt.sqrt();
        let sqrtz = zt.sqrt();
        let alamb = sqrtx * (sqrty + sqrtz) + sqrty * sqrtz;
        sum += fac / (sqrtz * (zt + alamb));
        fac *= 0.25;
        xt = 0.25 * (xt + alamb);
        yt = 0.25 * (yt + alamb);
        zt = 0.25 * (zt + alamb);
        ave = 0.2 * (xt + yt + 3.0 * zt);
        delx = (ave - xt) / ave;
        dely = (ave - yt) / ave;
        delz = (ave - zt) / ave;
        iterations += 1;

        let err = delx.abs().max(dely.abs()).max(delz.abs());
        if err.is_nan() || err <= ERRTOL || iterations >= MAX_ITERATIONS {
            break;
        }
    }

    let ea = delx * dely;
    let eb = delz * delz;
    let ec = ea - eb;
    let ed = ea - 6.0 * eb;
    let ee = ed + ec + ec;
    3.0 * sum
        + fac
            * (1.0
                + ed * (-C1 + C5 * ed - C6 * delz * ee)
                + delz * (C2 * ee + delz * (-C3 * ec + delz * C4 * ea)))
        / (ave * ave.sqrt())
}

/// Element-wise R_D over three aligned arrays.
pub fn carlson_rd_array(x: &Array1<f64>, y: &Array1<f64>, z: &Array1<f64>) -> Array1<f64> {
    Zip::from(x)
        .and(y)
        .and(z)
        .map_collect(|&xi, &yi, &zi| carlson_rd(xi, yi, zi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rd_reference_values() {
        // scipy.special.elliprd
        let v = carlson_rd(0.0, 2.0, 1.0);
        assert!((v - 1.797_210_352_103_388_3).abs() < 1e-13, "R_D(0,2,1) = {v}");
        let v = carlson_rd(2.0, 3.0, 4.0);
        assert!((v - 0.165_105_272_942_610_53).abs() < 1e-14, "R_D(2,3,4) = {v}");
    }

    #[test]
    fn test_rd_equal_arguments() {
        for &x in &[1e-6, 0.25, 1.0, 4.0, 1e6] {
            let v = carlson_rd(x, x, x);
            let expected = x.powf(-1.5);
            assert!((v - expected).abs() / expected < 1e-14, "x = {x}: {v} vs {expected}");
        }
    }

    #[test]
    fn test_rd_cyclic_sum_identity() {
        // R_D(x,y,z) + R_D(y,z,x) + R_D(z,x,y) = 3 / sqrt(xyz)
        let (x, y, z) = (0.3, 1.7, 5.2);
        let sum = carlson_rd(x, y, z) + carlson_rd(y, z, x) + carlson_rd(z, x, y);
        let expected = 3.0 / (x * y * z).sqrt();
        assert!((sum - expected).abs() / expected < 1e-14);
    }

    #[test]
    fn test_rd_symmetric_in_first_two() {
        let a = carlson_rd(0.7, 3.1, 2.2);
        let b = carlson_rd(3.1, 0.7, 2.2);
        assert!((a - b).abs() / a < 1e-14);
    }

    #[test]
    fn test_rd_homogeneity() {
        // R_D(kx, ky, kz) = k^{-3/2} R_D(x, y, z)
        let k: f64 = 1e4;
        let base = carlson_rd(0.5, 1.5, 2.5);
        let scaled = carlson_rd(k * 0.5, k * 1.5, k * 2.5);
        assert!((scaled - base * k.powf(-1.5)).abs() / scaled < 1e-13);
    }

    #[test]
    fn test_rd_nan_terminates() {
        assert!(carlson_rd(f64::NAN, 1.0, 1.0).is_nan());
        assert!(carlson_rd(1.0, 1.0, f64::NAN).is_nan());
        // Infinite arguments must not hang
        let _ = carlson_rd(f64::INFINITY, 1.0, 1.0);
    }

    #[test]
    fn test_rd_array_matches_scalar() {
        let x = Array1::from(vec![0.0, 2.0, 1.0]);
        let y = Array1::from(vec![2.0, 3.0, 1.0]);
        let z = Array1::from(vec![1.0, 4.0, 1.0]);
        let v = carlson_rd_array(&x, &y, &z);
        for i in 0..3 {
            assert_eq!(v[i], carlson_rd(x[i], y[i], z[i]));
        }
    }
}
