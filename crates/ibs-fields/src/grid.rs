// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Field Map Grids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Uniform 1D grid axes for the interpolated field maps.

use ibs_types::error::{IbsError, IbsResult};
use ndarray::Array1;

/// Relative and absolute tolerance of the uniform-spacing check.
const SPACING_RTOL: f64 = 1e-5;
const SPACING_ATOL: f64 = 1e-8;

/// How one grid axis is specified.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSpec {
    /// Explicit node positions; must be uniformly spaced.
    Explicit(Vec<f64>),
    /// Nodes from `range.0` in steps of `step`, up to and including
    /// `range.1` (with a 10 % step tolerance on the upper end).
    Step { range: (f64, f64), step: f64 },
    /// `n` equally spaced nodes spanning `range` inclusively.
    Count { range: (f64, f64), n: usize },
}

impl GridSpec {
    /// Materialise the node positions for axis `name`.
    pub fn build(&self, name: &str) -> IbsResult<Array1<f64>> {
        let grid = match self {
            GridSpec::Explicit(nodes) => {
                if nodes.len() < 2 {
                    return Err(IbsError::GridError(format!(
                        "{name}_grid needs at least two nodes, got {}",
                        nodes.len()
                    )));
                }
                let step = nodes[1] - nodes[0];
                let uniform = nodes.windows(2).all(|w| {
                    let d = w[1] - w[0];
                    (d - step).abs() <= SPACING_ATOL + SPACING_RTOL * step.abs()
                });
                if !uniform {
                    return Err(IbsError::NotImplemented(format!(
                        "{name}_grid must be uniformly spaced"
                    )));
                }
                Array1::from(nodes.clone())
            }
            GridSpec::Step { range, step } => {
                check_range(name, *range)?;
                if !step.is_finite() || *step <= 0.0 {
                    return Err(IbsError::GridError(format!(
                        "d{name} must be finite and > 0, got {step}"
                    )));
                }
                let n = ((range.1 + 0.1 * step - range.0) / step).ceil() as usize;
                Array1::from_shape_fn(n, |i| range.0 + i as f64 * step)
            }
            GridSpec::Count { range, n } => {
                check_range(name, *range)?;
                if *n < 2 {
                    return Err(IbsError::GridError(format!(
                        "n{name} must be at least 2, got {n}"
                    )));
                }
                Array1::linspace(range.0, range.1, *n)
            }
        };
        if grid.iter().any(|v| !v.is_finite()) {
            return Err(IbsError::GridError(format!("{name}_grid has non-finite nodes")));
        }
        if grid[1] <= grid[0] {
            return Err(IbsError::GridError(format!("{name}_grid must be increasing")));
        }
        Ok(grid)
    }
}

fn check_range(name: &str, range: (f64, f64)) -> IbsResult<()> {
    if !(range.0.is_finite() && range.1.is_finite()) || range.1 <= range.0 {
        return Err(IbsError::GridError(format!(
            "{name}_range must be (min, max) with min < max, got {range:?}"
        )));
    }
    Ok(())
}
