// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Property-Based Tests (proptest) for ibs-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for ibs-math using proptest.
//!
//! Covers: Carlson R_D identities, ring integration, trilinear
//! interpolation.

use ibs_math::elliptic::carlson_rd;
use ibs_math::integrate::{left_riemann, ring_average, trapezoid};
use ibs_math::interp::trilinear;
use ndarray::{Array1, Array3};
use proptest::prelude::*;

// ── Carlson R_D ──────────────────────────────────────────────────────

proptest! {
    /// R_D(x,y,z) + R_D(y,z,x) + R_D(z,x,y) = 3/sqrt(xyz).
    #[test]
    fn rd_cyclic_sum(
        x in 1e-3f64..1e3,
        y in 1e-3f64..1e3,
        z in 1e-3f64..1e3,
    ) {
        let sum = carlson_rd(x, y, z) + carlson_rd(y, z, x) + carlson_rd(z, x, y);
        let expected = 3.0 / (x * y * z).sqrt();
        prop_assert!((sum - expected).abs() / expected < 1e-12,
            "sum = {}, expected = {}", sum, expected);
    }

    /// R_D is positive and finite on its domain.
    #[test]
    fn rd_positive_finite(
        x in 0.0f64..1e4,
        y in 1e-6f64..1e4,
        z in 1e-6f64..1e4,
    ) {
        let v = carlson_rd(x, y, z);
        prop_assert!(v.is_finite() && v > 0.0, "R_D({}, {}, {}) = {}", x, y, z, v);
    }

    /// R_D decreases when any argument grows.
    #[test]
    fn rd_monotone_in_z(
        x in 0.1f64..10.0,
        y in 0.1f64..10.0,
        z in 0.1f64..10.0,
        dz in 0.01f64..5.0,
    ) {
        prop_assert!(carlson_rd(x, y, z + dz) < carlson_rd(x, y, z));
    }
}

// ── Ring Integration ─────────────────────────────────────────────────

proptest! {
    /// Constant integrands give value × length under both rules.
    #[test]
    fn constant_integrand(
        n in 2usize..200,
        length in 1.0f64..1e4,
        value in -10.0f64..10.0,
    ) {
        let s = Array1::linspace(0.0, length, n);
        let f = Array1::from_elem(n, value);
        let last = s[n - 1];
        prop_assert!((left_riemann(&f, &s) - value * last).abs() < 1e-9 * length);
        prop_assert!((trapezoid(&f, &s) - value * last).abs() < 1e-9 * length);
        prop_assert!((ring_average(&f, &s, last) - value).abs() < 1e-9);
    }
}

// ── Trilinear Interpolation ──────────────────────────────────────────

proptest! {
    /// Linear fields are reproduced exactly anywhere inside the grid.
    #[test]
    fn trilinear_linear_exact(
        a in -5.0f64..5.0,
        b in -5.0f64..5.0,
        c in -5.0f64..5.0,
        px in 0.0f64..1.0,
        py in 0.0f64..1.0,
        pz in 0.0f64..1.0,
    ) {
        let (nx, ny, nz) = (7, 5, 9);
        let origin = [-1.0, 0.5, -2.0];
        let step = [0.3, 0.7, 0.25];
        let field = Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| {
            a * (origin[0] + i as f64 * step[0])
                + b * (origin[1] + j as f64 * step[1])
                + c * (origin[2] + k as f64 * step[2])
        });
        // Stay strictly inside so rounding never pushes a point out
        let point = [
            origin[0] + 0.999 * px * (nx - 1) as f64 * step[0],
            origin[1] + 0.999 * py * (ny - 1) as f64 * step[1],
            origin[2] + 0.999 * pz * (nz - 1) as f64 * step[2],
        ];
        let v = trilinear(&field, origin, step, point);
        prop_assert!(v.is_some());
        let expected = a * point[0] + b * point[1] + c * point[2];
        prop_assert!((v.unwrap_or(f64::NAN) - expected).abs() < 1e-10);
    }
}
