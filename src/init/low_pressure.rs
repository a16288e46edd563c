use std::f64::consts::PI;

use super::InitialCondition;
use crate::config::PhysicalConstants;
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// Gaussian surface-pressure depression in an atmosphere at rest.
///
/// `ps = −depth · exp(−((λ − λc)² + (φ − φc)²) / width)`
#[derive(Clone, Copy, Debug)]
pub struct LowPressureAnomaly {
    /// Central pressure deficit (Pa).
    pub depth: f64,
    /// Centre longitude (rad).
    pub center_lon: f64,
    /// Centre latitude (rad).
    pub center_lat: f64,
    /// Squared e-folding radius (rad²).
    pub width: f64,
}

impl Default for LowPressureAnomaly {
    fn default() -> Self {
        Self {
            depth: 1000.0,
            center_lon: PI,
            center_lat: PI / 4.0,
            width: 0.05,
        }
    }
}

impl InitialCondition for LowPressureAnomaly {
    fn name(&self) -> &'static str {
        "low-pressure-anomaly"
    }

    fn fill(
        &self,
        grid: &Grid,
        _constants: &PhysicalConstants,
        fields: &mut PrognosticFields,
        _phis: &mut Field2D,
    ) {
        let h = grid.horizontal();
        for k in 1..=grid.nk() {
            let dphi = h.lat[k] - self.center_lat;
            for j in 1..=grid.nj() {
                let dlam = h.lon[j] - self.center_lon;
                fields.ps[(j, k)] = -self.depth * (-(dlam * dlam + dphi * dphi) / self.width).exp();
            }
        }
    }
}
