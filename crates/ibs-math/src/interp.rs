// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Interp
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Trilinear interpolation and finite-difference gradients on uniform
//! 3D grids.

use ndarray::{Array3, Axis, Slice};

/// Trilinear interpolation of `field` at `point`.
///
/// The grid node (i, j, k) sits at `origin + (i·step₀, j·step₁, k·step₂)`.
/// Returns `None` outside the grid box; points on the upper faces are
/// inside.
pub fn trilinear(
    field: &Array3<f64>,
    origin: [f64; 3],
    step: [f64; 3],
    point: [f64; 3],
) -> Option<f64> {
    if field.is_empty() {
        return None;
    }
    let shape = field.dim();
    let dims = [shape.0, shape.1, shape.2];

    let mut idx = [0usize; 3];
    let mut frac = [0.0f64; 3];
    for axis in 0..3 {
        let u = (point[axis] - origin[axis]) / step[axis];
        let last = (dims[axis] - 1) as f64;
        if !(0.0..=last).contains(&u) {
            return None;
        }
        if dims[axis] == 1 {
            continue;
        }
        let i = (u.floor() as usize).min(dims[axis] - 2);
        idx[axis] = i;
        frac[axis] = u - i as f64;
    }

    let upper = |axis: usize| if dims[axis] > 1 { idx[axis] + 1 } else { idx[axis] };
    let (i0, j0, k0) = (idx[0], idx[1], idx[2]);
    let (i1, j1, k1) = (upper(0), upper(1), upper(2));
    let (fx, fy, fz) = (frac[0], frac[1], frac[2]);

    let c00 = field[[i0, j0, k0]] * (1.0 - fx) + field[[i1, j0, k0]] * fx;
    let c10 = field[[i0, j1, k0]] * (1.0 - fx) + field[[i1, j1, k0]] * fx;
    let c01 = field[[i0, j0, k1]] * (1.0 - fx) + field[[i1, j0, k1]] * fx;
    let c11 = field[[i0, j1, k1]] * (1.0 - fx) + field[[i1, j1, k1]] * fx;

    let c0 = c00 * (1.0 - fy) + c10 * fy;
    let c1 = c01 * (1.0 - fy) + c11 * fy;

    Some(c0 * (1.0 - fz) + c1 * fz)
}

/// Central-difference derivative of `field` along `axis`.
///
/// Only interior nodes are filled; the two boundary planes along `axis`
/// stay zero. Axes with fewer than three nodes give an all-zero result.
pub fn central_gradient(field: &Array3<f64>, axis: usize, step: f64) -> Array3<f64> {
    let mut grad = Array3::zeros(field.raw_dim());
    if field.len_of(Axis(axis)) < 3 {
        return grad;
    }
    let forward = field.slice_axis(Axis(axis), Slice::from(2..));
    let backward = field.slice_axis(Axis(axis), Slice::from(..-2));
    let diff = (&forward - &backward) / (2.0 * step);
    grad.slice_axis_mut(Axis(axis), Slice::from(1..-1)).assign(&diff);
    grad
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_field(n: (usize, usize, usize), origin: [f64; 3], step: [f64; 3]) -> Array3<f64> {
        Array3::from_shape_fn(n, |(i, j, k)| {
            let x = origin[0] + i as f64 * step[0];
            let y = origin[1] + j as f64 * step[1];
            let z = origin[2] + k as f64 * step[2];
            2.0 * x - 3.0 * y + 0.5 * z + 1.0
        })
    }

    #[test]
    fn test_trilinear_exact_at_nodes() {
        let field = Array3::from_shape_fn((4, 5, 6), |(i, j, k)| (100 * i + 10 * j + k) as f64);
        let v = trilinear(&field, [0.0; 3], [1.0; 3], [2.0, 3.0, 4.0]).unwrap();
        assert!((v - 234.0).abs() < 1e-12);
    }

    #[test]
    fn test_trilinear_reproduces_linear_field() {
        let origin = [-1.0, -2.0, 0.5];
        let step = [0.25, 0.5, 0.1];
        let field = linear_field((9, 9, 11), origin, step);
        for &p in &[[-0.3, 0.7, 0.93], [0.99, 1.99, 1.45], [-1.0, -2.0, 0.5]] {
            let v = trilinear(&field, origin, step, p).unwrap();
            let expected = 2.0 * p[0] - 3.0 * p[1] + 0.5 * p[2] + 1.0;
            assert!((v - expected).abs() < 1e-12, "{p:?}: {v} vs {expected}");
        }
    }

    #[test]
    fn test_trilinear_upper_face_inside() {
        let origin = [0.0; 3];
        let step = [1.0; 3];
        let field = linear_field((3, 3, 3), origin, step);
        let v = trilinear(&field, origin, step, [2.0, 2.0, 2.0]).unwrap();
        assert!((v - (4.0 - 6.0 + 1.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_trilinear_outside_is_none() {
        let field = Array3::zeros((3, 3, 3));
        assert!(trilinear(&field, [0.0; 3], [1.0; 3], [-0.01, 1.0, 1.0]).is_none());
        assert!(trilinear(&field, [0.0; 3], [1.0; 3], [1.0, 2.01, 1.0]).is_none());
        assert!(trilinear(&field, [0.0; 3], [1.0; 3], [1.0, 1.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_central_gradient_linear() {
        let step = [0.25, 0.5, 0.1];
        let field = linear_field((6, 7, 8), [0.0; 3], step);
        let gx = central_gradient(&field, 0, step[0]);
        let gy = central_gradient(&field, 1, step[1]);
        let gz = central_gradient(&field, 2, step[2]);
        assert!((gx[[3, 2, 2]] - 2.0).abs() < 1e-10);
        assert!((gy[[2, 3, 2]] + 3.0).abs() < 1e-10);
        assert!((gz[[2, 2, 3]] - 0.5).abs() < 1e-10);
        // Boundary planes are left at zero
        assert_eq!(gx[[0, 2, 2]], 0.0);
        assert_eq!(gx[[5, 2, 2]], 0.0);
        assert_eq!(gz[[2, 2, 7]], 0.0);
    }

    #[test]
    fn test_central_gradient_short_axis() {
        let field = Array3::from_elem((2, 4, 4), 1.0);
        let g = central_gradient(&field, 0, 1.0);
        assert!(g.iter().all(|&v| v == 0.0));
    }
}
