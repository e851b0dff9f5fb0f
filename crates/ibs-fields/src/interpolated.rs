// ─────────────────────────────────────────────────────────────────────
// SCPN IBS Core — Tri-Linear Interpolated Field Map
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Charge density ρ and potential φ on a uniform 3D grid, with the
//! potential gradient kept in sync and tri-linear interpolation at
//! arbitrary points.

use crate::grid::GridSpec;
use ibs_math::interp::{central_gradient, trilinear};
use ibs_types::error::{IbsError, IbsResult};
use log::debug;
use ndarray::{Array1, Array3, Zip};

/// Computes the potential for a charge density on the map's grid.
pub trait PoissonSolver {
    fn solve(&self, rho: &Array3<f64>) -> IbsResult<Array3<f64>>;
}

/// Which quantities [`TriLinearInterpolatedFieldMap::get_values_at_points`]
/// should return. All are selected by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldQuantities {
    pub rho: bool,
    pub phi: bool,
    pub dphi_dx: bool,
    pub dphi_dy: bool,
    pub dphi_dz: bool,
}

impl Default for FieldQuantities {
    fn default() -> Self {
        FieldQuantities {
            rho: true,
            phi: true,
            dphi_dx: true,
            dphi_dy: true,
            dphi_dz: true,
        }
    }
}

/// Interpolated values at a set of points; unselected quantities are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    pub rho: Option<Array1<f64>>,
    pub phi: Option<Array1<f64>>,
    pub dphi_dx: Option<Array1<f64>>,
    pub dphi_dy: Option<Array1<f64>>,
    pub dphi_dz: Option<Array1<f64>>,
}

pub struct TriLinearInterpolatedFieldMap {
    x_grid: Array1<f64>,
    y_grid: Array1<f64>,
    z_grid: Array1<f64>,
    rho: Array3<f64>,
    phi: Array3<f64>,
    dphi_dx: Array3<f64>,
    dphi_dy: Array3<f64>,
    dphi_dz: Array3<f64>,
    updatable: bool,
    solver: Option<Box<dyn PoissonSolver>>,
}

impl TriLinearInterpolatedFieldMap {
    /// Zero-filled, updatable map on the given grids.
    pub fn new(x_grid: GridSpec, y_grid: GridSpec, z_grid: GridSpec) -> IbsResult<Self> {
        let x_grid = x_grid.build("x")?;
        let y_grid = y_grid.build("y")?;
        let z_grid = z_grid.build("z")?;
        let shape = (x_grid.len(), y_grid.len(), z_grid.len());
        debug!("Field map grid {} x {} x {}", shape.0, shape.1, shape.2);
        Ok(TriLinearInterpolatedFieldMap {
            x_grid,
            y_grid,
            z_grid,
            rho: Array3::zeros(shape),
            phi: Array3::zeros(shape),
            dphi_dx: Array3::zeros(shape),
            dphi_dy: Array3::zeros(shape),
            dphi_dz: Array3::zeros(shape),
            updatable: true,
            solver: None,
        })
    }

    /// Set the initial charge density, bypassing the updatable flag.
    pub fn with_rho(mut self, rho: Array3<f64>) -> IbsResult<Self> {
        self.update_rho(rho, true, true)?;
        Ok(self)
    }

    /// Set the initial potential, bypassing the updatable flag.
    pub fn with_phi(mut self, phi: Array3<f64>) -> IbsResult<Self> {
        self.update_phi(phi, true, true)?;
        Ok(self)
    }

    /// Freeze the map; later updates then need `force`.
    pub fn with_updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }

    /// Default solver for [`update_phi_from_rho`](Self::update_phi_from_rho).
    pub fn with_solver(mut self, solver: Box<dyn PoissonSolver>) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn x_grid(&self) -> &Array1<f64> {
        &self.x_grid
    }

    pub fn y_grid(&self) -> &Array1<f64> {
        &self.y_grid
    }

    pub fn z_grid(&self) -> &Array1<f64> {
        &self.z_grid
    }

    pub fn nx(&self) -> usize {
        self.x_grid.len()
    }

    pub fn ny(&self) -> usize {
        self.y_grid.len()
    }

    pub fn nz(&self) -> usize {
        self.z_grid.len()
    }

    pub fn dx(&self) -> f64 {
        self.x_grid[1] - self.x_grid[0]
    }

    pub fn dy(&self) -> f64 {
        self.y_grid[1] - self.y_grid[0]
    }

    pub fn dz(&self) -> f64 {
        self.z_grid[1] - self.z_grid[0]
    }

    pub fn is_updatable(&self) -> bool {
        self.updatable
    }

    pub fn rho(&self) -> &Array3<f64> {
        &self.rho
    }

    pub fn phi(&self) -> &Array3<f64> {
        &self.phi
    }

    /// (∂φ/∂x, ∂φ/∂y, ∂φ/∂z) on the grid. Boundary planes are zero.
    pub fn gradient(&self) -> (&Array3<f64>, &Array3<f64>, &Array3<f64>) {
        (&self.dphi_dx, &self.dphi_dy, &self.dphi_dz)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.nx(), self.ny(), self.nz())
    }

    fn origin(&self) -> [f64; 3] {
        [self.x_grid[0], self.y_grid[0], self.z_grid[0]]
    }

    fn step(&self) -> [f64; 3] {
        [self.dx(), self.dy(), self.dz()]
    }

    fn check_updatable(&self, force: bool) -> IbsResult<()> {
        if force || self.updatable {
            Ok(())
        } else {
            Err(IbsError::NotUpdatable(
                "map was built with updatable = false; pass force to override".to_string(),
            ))
        }
    }

    fn check_shape(&self, what: &str, values: &Array3<f64>) -> IbsResult<()> {
        if values.dim() != self.shape() {
            return Err(IbsError::GridError(format!(
                "{what} has shape {:?}, grid is {:?}",
                values.dim(),
                self.shape()
            )));
        }
        Ok(())
    }

    /// Replace the charge density. Accumulating updates (`reset = false`)
    /// are not supported.
    pub fn update_rho(&mut self, rho: Array3<f64>, reset: bool, force: bool) -> IbsResult<()> {
        self.check_updatable(force)?;
        if !reset {
            return Err(IbsError::NotImplemented(
                "non-reset charge density update".to_string(),
            ));
        }
        self.check_shape("rho", &rho)?;
        self.rho = rho;
        Ok(())
    }

    /// Replace the potential and recompute its central-difference gradient.
    pub fn update_phi(&mut self, phi: Array3<f64>, reset: bool, force: bool) -> IbsResult<()> {
        self.check_updatable(force)?;
        if !reset {
            return Err(IbsError::NotImplemented("non-reset potential update".to_string()));
        }
        self.check_shape("phi", &phi)?;
        self.phi = phi;
        self.dphi_dx = central_gradient(&self.phi, 0, self.dx());
        self.dphi_dy = central_gradient(&self.phi, 1, self.dy());
        self.dphi_dz = central_gradient(&self.phi, 2, self.dz());
        debug!("Potential updated, gradient recomputed");
        Ok(())
    }

    /// Solve for φ from the current ρ with `solver`, or with the map's
    /// own solver when `None`.
    pub fn update_phi_from_rho(&mut self, solver: Option<&dyn PoissonSolver>) -> IbsResult<()> {
        self.check_updatable(false)?;
        let solver = match solver {
            Some(solver) => solver,
            None => self.solver.as_deref().ok_or_else(|| {
                IbsError::ConfigError("no solver available to compute phi".to_string())
            })?,
        };
        let phi = solver.solve(&self.rho)?;
        self.update_phi(phi, true, false)
    }

    /// Deposit macro-particle charges on the grid. Not supported.
    pub fn update_from_particles(
        &mut self,
        _x: &Array1<f64>,
        _y: &Array1<f64>,
        _z: &Array1<f64>,
        _ncharges: &Array1<f64>,
        _q0: f64,
    ) -> IbsResult<()> {
        Err(IbsError::NotImplemented(
            "charge deposition from particles".to_string(),
        ))
    }

    /// Build a named Poisson solver for this grid. Not supported.
    pub fn generate_solver(&self, name: &str) -> IbsResult<Box<dyn PoissonSolver>> {
        Err(IbsError::NotImplemented(format!("solver generation ('{name}')")))
    }

    /// Interpolate the selected quantities at the points (x[i], y[i], z[i]).
    /// Points outside the grid get zero.
    pub fn get_values_at_points(
        &self,
        x: &Array1<f64>,
        y: &Array1<f64>,
        z: &Array1<f64>,
        quantities: FieldQuantities,
    ) -> IbsResult<FieldValues> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(IbsError::GridError(format!(
                "point coordinates differ in length: {}, {}, {}",
                x.len(),
                y.len(),
                z.len()
            )));
        }
        let origin = self.origin();
        let step = self.step();
        let sample = |field: &Array3<f64>| -> Array1<f64> {
            Zip::from(x).and(y).and(z).map_collect(|&xi, &yi, &zi| {
                trilinear(field, origin, step, [xi, yi, zi]).unwrap_or(0.0)
            })
        };
        let pick = |selected: bool, field: &Array3<f64>| selected.then(|| sample(field));

        Ok(FieldValues {
            rho: pick(quantities.rho, &self.rho),
            phi: pick(quantities.phi, &self.phi),
            dphi_dx: pick(quantities.dphi_dx, &self.dphi_dx),
            dphi_dy: pick(quantities.dphi_dy, &self.dphi_dy),
            dphi_dz: pick(quantities.dphi_dz, &self.dphi_dz),
        })
    }
}
