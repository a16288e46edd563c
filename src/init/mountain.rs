use std::f64::consts::PI;

use super::InitialCondition;
use crate::config::PhysicalConstants;
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// Zonal flow over an isolated conical mountain with a warm anomaly above it.
///
/// The surface pressure balances a solid-body zonal wind `u0·cos φ`:
///
/// ```text
/// ps = −ρs·Φs − ρs·u0·RE/2·(2Ω + u0/RE)·sin²φ
/// u  = (ps + PS0)·u0·cos φ
/// t  = (ps + PS0)·(1 − r/rm)   for r < rm
/// ```
#[derive(Clone, Copy, Debug)]
pub struct IsolatedMountain {
    /// Equatorial wind speed u0 (m/s).
    pub wind: f64,
    /// Peak height (m).
    pub height: f64,
    /// Centre longitude (rad).
    pub center_lon: f64,
    /// Centre latitude (rad).
    pub center_lat: f64,
    /// Cone radius rm (rad).
    pub radius: f64,
}

impl Default for IsolatedMountain {
    fn default() -> Self {
        Self {
            wind: 20.0,
            height: 2000.0,
            center_lon: 3.0 * PI / 2.0,
            center_lat: PI / 6.0,
            radius: PI / 9.0,
        }
    }
}

impl IsolatedMountain {
    /// Cone profile `1 − r/rm` inside the radius, zero outside.
    fn cone(&self, lon: f64, lat: f64) -> f64 {
        let r = ((lon - self.center_lon).powi(2) + (lat - self.center_lat).powi(2)).sqrt();
        if r < self.radius {
            1.0 - r / self.radius
        } else {
            0.0
        }
    }
}

impl InitialCondition for IsolatedMountain {
    fn name(&self) -> &'static str {
        "isolated-mountain-flow"
    }

    fn fill(
        &self,
        grid: &Grid,
        c: &PhysicalConstants,
        fields: &mut PrognosticFields,
        phis: &mut Field2D,
    ) {
        let h = grid.horizontal();
        let u0 = self.wind;
        let balance = c.rho_surface * u0 * c.radius / 2.0 * (2.0 * c.omega + u0 / c.radius);

        for k in 1..=grid.nk() {
            let sn = h.sin_lat[k];
            for j in 1..=grid.nj() {
                let shape = self.cone(h.lon[j], h.lat[k]);
                let orography = c.gravity * self.height * shape;
                let ps = -c.rho_surface * orography - balance * sn * sn;
                let psg = ps + c.ps0;

                phis[(j, k)] = orography;
                fields.ps[(j, k)] = ps;
                fields.u.column_mut(j, k).fill(psg * u0 * h.cos_lat[k]);
                fields.t.column_mut(j, k).fill(psg * shape);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::initialize;
    use approx::assert_relative_eq;

    #[test]
    fn test_mountain_and_balanced_flow() {
        let c = PhysicalConstants::default();
        let grid = Grid::new(72, 36, 2, &c).unwrap();
        let init = initialize(&IsolatedMountain::default(), &grid, &c);

        let peak = init.phis.interior().fold(0.0_f64, |m, (_, _, v)| m.max(v));
        assert!(peak > 0.0 && peak <= c.gravity * 2000.0);

        // far from the mountain the pressure is the geostrophic balance only
        let (j, k) = (1, 10);
        assert_eq!(init.phis[(j, k)], 0.0);
        assert_eq!(init.fields.t[(j, k, 0)], 0.0);
        let sn = grid.horizontal().sin_lat[k];
        let expected = -1.3 * 20.0 * c.radius / 2.0 * (2.0 * c.omega + 20.0 / c.radius) * sn * sn;
        assert_relative_eq!(init.fields.ps[(j, k)], expected, max_relative = 1e-12);

        let psg = init.fields.ps[(j, k)] + c.ps0;
        let uw = init.fields.u[(j, k, 1)] / psg;
        assert_relative_eq!(uw, 20.0 * grid.horizontal().cos_lat[k], max_relative = 1e-12);
        assert_eq!(init.fields.v.max_abs_interior(), 0.0);
    }

    #[test]
    fn test_warm_anomaly_above_peak() {
        let c = PhysicalConstants::default();
        let grid = Grid::new(72, 36, 1, &c).unwrap();
        let init = initialize(&IsolatedMountain::default(), &grid, &c);
        for (j, k, l, t) in init.fields.t.interior() {
            assert!(t >= 0.0, "negative anomaly at ({j},{k},{l})");
            if t > 0.0 {
                assert!(init.phis[(j, k)] > 0.0);
            }
        }
    }
}
