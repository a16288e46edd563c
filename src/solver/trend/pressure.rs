//! Stages 3–4: pressure-gradient force in sigma coordinates.
//!
//! Two terms: the surface-pressure term weighted by the local temperature
//! and the geopotential term weighted by `psg`. Centred differences.

use crate::field::{Field2D, Field3D, for_each_interior_column};
use crate::grid::LatLonGrid;

/// Thermodynamic inputs shared by both components.
#[derive(Clone, Copy)]
pub struct PressureInputs<'a> {
    pub ps: &'a Field2D,
    pub psg: &'a Field2D,
    pub tw: &'a Field3D,
    pub gp: &'a Field3D,
    pub rd: f64,
    pub t0: f64,
}

/// Zonal component `apx`.
pub fn zonal_pressure_gradient(inp: PressureInputs<'_>, grid: &LatLonGrid, apx: &mut Field3D) {
    let PressureInputs {
        ps,
        psg,
        tw,
        gp,
        rd,
        t0,
    } = inp;
    for_each_interior_column(apx, |j, k, col| {
        let dx = grid.dx[k];
        let dps = ps[(j + 1, k)] - ps[(j - 1, k)];
        let p = psg[(j, k)];
        let (t, east, west) = (tw.column(j, k), gp.column(j + 1, k), gp.column(j - 1, k));
        for l in 0..col.len() {
            col[l] = -rd * (t[l] + t0) * dps / dx / 2.0 - p * (east[l] - west[l]) / dx / 2.0;
        }
    });
}

/// Meridional component `apy`.
pub fn meridional_pressure_gradient(
    inp: PressureInputs<'_>,
    grid: &LatLonGrid,
    apy: &mut Field3D,
) {
    let PressureInputs {
        ps,
        psg,
        tw,
        gp,
        rd,
        t0,
    } = inp;
    let dy = grid.dy;
    for_each_interior_column(apy, |j, k, col| {
        let dps = ps[(j, k + 1)] - ps[(j, k - 1)];
        let p = psg[(j, k)];
        let (t, north, south) = (tw.column(j, k), gp.column(j, k + 1), gp.column(j, k - 1));
        for l in 0..col.len() {
            col[l] = -rd * (t[l] + t0) * dps / dy / 2.0 - p * (north[l] - south[l]) / dy / 2.0;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridResolution;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_fields_have_no_force() {
        let res = GridResolution::new(4, 2, 2).unwrap();
        let grid = LatLonGrid::new(&res, 6.371e6, 7.292e-5);
        let mut ps = Field2D::zeros(&res);
        ps.fill(-300.0);
        let mut psg = Field2D::zeros(&res);
        psg.fill(99_700.0);
        let mut tw = Field3D::zeros(&res);
        tw.fill(3.0);
        let mut gp = Field3D::zeros(&res);
        gp.fill(1_000.0);
        let inp = PressureInputs {
            ps: &ps,
            psg: &psg,
            tw: &tw,
            gp: &gp,
            rd: 287.0,
            t0: 250.0,
        };

        let mut apx = Field3D::zeros(&res);
        let mut apy = Field3D::zeros(&res);
        zonal_pressure_gradient(inp, &grid, &mut apx);
        meridional_pressure_gradient(inp, &grid, &mut apy);
        assert_eq!(apx.max_abs_interior(), 0.0);
        assert_eq!(apy.max_abs_interior(), 0.0);
    }

    #[test]
    fn test_zonal_surface_pressure_term() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let grid = LatLonGrid::new(&res, 1.0, 0.0);
        let mut ps = Field2D::zeros(&res);
        ps[(3, 1)] = 2.0;
        let psg = Field2D::zeros(&res);
        let tw = Field3D::zeros(&res);
        let gp = Field3D::zeros(&res);
        let inp = PressureInputs {
            ps: &ps,
            psg: &psg,
            tw: &tw,
            gp: &gp,
            rd: 1.0,
            t0: 1.0,
        };

        let mut apx = Field3D::zeros(&res);
        zonal_pressure_gradient(inp, &grid, &mut apx);
        assert_relative_eq!(apx[(2, 1, 0)], -1.0 / grid.dx[1]);
        assert_relative_eq!(apx[(4, 1, 0)], 1.0 / grid.dx[1]);
        // ghosts stay untouched
        assert_eq!(apx[(0, 1, 0)], 0.0);
    }

    #[test]
    fn test_zonal_geopotential_term() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let grid = LatLonGrid::new(&res, 1.0, 0.0);
        let ps = Field2D::zeros(&res);
        let mut psg = Field2D::zeros(&res);
        psg.fill(3.0);
        let tw = Field3D::zeros(&res);
        let mut gp = Field3D::zeros(&res);
        gp[(3, 1, 0)] = 4.0;
        let inp = PressureInputs {
            ps: &ps,
            psg: &psg,
            tw: &tw,
            gp: &gp,
            rd: 1.0,
            t0: 1.0,
        };

        let mut apx = Field3D::zeros(&res);
        zonal_pressure_gradient(inp, &grid, &mut apx);
        // psg * (east - west) / 2dx
        assert_relative_eq!(apx[(2, 1, 0)], -6.0 / grid.dx[1]);
        assert_relative_eq!(apx[(4, 1, 0)], 6.0 / grid.dx[1]);
        assert_eq!(apx[(3, 1, 0)], 0.0);
    }

    #[test]
    fn test_meridional_pressure_gradient() {
        let res = GridResolution::new(4, 4, 1).unwrap();
        let grid = LatLonGrid::new(&res, 1.0, 0.0);
        let mut ps = Field2D::zeros(&res);
        ps[(2, 3)] = 2.0;
        let mut psg = Field2D::zeros(&res);
        psg.fill(3.0);
        let tw = Field3D::zeros(&res);
        let mut gp = Field3D::zeros(&res);
        gp[(2, 3, 0)] = 4.0;
        let inp = PressureInputs {
            ps: &ps,
            psg: &psg,
            tw: &tw,
            gp: &gp,
            rd: 1.0,
            t0: 1.0,
        };

        let mut apy = Field3D::zeros(&res);
        meridional_pressure_gradient(inp, &grid, &mut apy);
        // surface pressure term 1/dy plus geopotential term 6/dy
        assert_relative_eq!(apy[(2, 2, 0)], -7.0 / grid.dy, max_relative = 1e-12);
        assert_relative_eq!(apy[(2, 4, 0)], 7.0 / grid.dy, max_relative = 1e-12);
        assert_eq!(apy[(1, 2, 0)], 0.0);
        assert_eq!(apy[(2, 3, 0)], 0.0);
    }
}
