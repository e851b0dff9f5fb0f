// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Integrate
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Line integration along the ring and 1D quadrature.

use ndarray::{s, Array1};

/// Left Riemann sum Σ f[i]·(s[i+1] − s[i]) over i < n−1.
///
/// The last sample never contributes. This is the convention used by the
/// reference IBS codes and is kept so growth rates compare one to one.
pub fn left_riemann(f: &Array1<f64>, s: &Array1<f64>) -> f64 {
    debug_assert_eq!(f.len(), s.len(), "integrand and positions must align");
    if s.len() < 2 {
        return 0.0;
    }
    let ds = &s.slice(s![1..]) - &s.slice(s![..-1]);
    (&f.slice(s![..-1]) * &ds).sum()
}

/// Trapezoidal rule, i.e. the exact integral of the piecewise-linear
/// interpolant through the samples.
pub fn trapezoid(f: &Array1<f64>, s: &Array1<f64>) -> f64 {
    debug_assert_eq!(f.len(), s.len(), "integrand and positions must align");
    if s.len() < 2 {
        return 0.0;
    }
    let ds = &s.slice(s![1..]) - &s.slice(s![..-1]);
    let mid = (&f.slice(s![1..]) + &f.slice(s![..-1])) * 0.5;
    (&mid * &ds).sum()
}

/// Length-weighted average of `f` over [s₀, s_last], normalised by the
/// circumference.
pub fn ring_average(f: &Array1<f64>, s: &Array1<f64>, circumference: f64) -> f64 {
    trapezoid(f, s) / circumference
}

/// Composite Simpson rule for `f` on [a, b] with `intervals` subintervals
/// (rounded up to the next even number, minimum 2).
pub fn simpson<F>(f: F, a: f64, b: f64, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = intervals.max(2).next_multiple_of(2);
    let h = (b - a) / n as f64;
    let mut odd = 0.0;
    let mut even = 0.0;
    for i in 1..n {
        let x = a + i as f64 * h;
        if i % 2 == 1 {
            odd += f(x);
        } else {
            even += f(x);
        }
    }
    h / 3.0 * (f(a) + 4.0 * odd + 2.0 * even + f(b))
}
