//! Regular longitude–latitude grid with metric factors.

use std::f64::consts::PI;

use crate::types::GridResolution;

/// Horizontal coordinates and metric factors, halo included.
///
/// Longitudes start at 0° and are evenly spaced over 360°; latitudes are
/// evenly spaced over 180° and offset by half a cell, so no point falls on a
/// pole. Ghost entries are filled once here: longitudes wrap, latitudes
/// clamp to the adjacent interior row.
#[derive(Clone, Debug, PartialEq)]
pub struct LatLonGrid {
    /// Longitude in degrees, `nj + 2` entries.
    pub lon_deg: Vec<f64>,
    /// Latitude in degrees, `nk + 2` entries.
    pub lat_deg: Vec<f64>,
    /// Longitude in radians.
    pub lon: Vec<f64>,
    /// Latitude in radians.
    pub lat: Vec<f64>,
    /// Longitude increment Δλ (rad).
    pub d_lon: f64,
    /// Latitude increment Δφ (rad).
    pub d_lat: f64,
    /// Zonal grid spacing RE·cos φ·Δλ per latitude row (m).
    pub dx: Vec<f64>,
    /// Meridional grid spacing RE·Δφ (m).
    pub dy: f64,
    /// cos φ per latitude row.
    pub cos_lat: Vec<f64>,
    /// sin φ per latitude row.
    pub sin_lat: Vec<f64>,
    /// Coriolis parameter 2Ω sin φ per latitude row (s⁻¹).
    pub coriolis: Vec<f64>,
}

impl LatLonGrid {
    /// Build the grid for a planet of `radius` rotating at `omega`.
    pub fn new(res: &GridResolution, radius: f64, omega: f64) -> Self {
        let (nj, nk) = (res.nj(), res.nk());

        let d_lon_deg = 360.0 / nj as f64;
        let d_lat_deg = 180.0 / nk as f64;

        let mut lon_deg = vec![0.0; nj + 2];
        for (j, lon) in lon_deg.iter_mut().enumerate().take(nj + 1).skip(1) {
            *lon = (j - 1) as f64 * d_lon_deg;
        }
        lon_deg[0] = lon_deg[nj];
        lon_deg[nj + 1] = lon_deg[1];

        let mut lat_deg = vec![0.0; nk + 2];
        for (k, lat) in lat_deg.iter_mut().enumerate().take(nk + 1).skip(1) {
            *lat = -90.0 + (k as f64 - 0.5) * d_lat_deg;
        }
        lat_deg[0] = lat_deg[1];
        lat_deg[nk + 1] = lat_deg[nk];

        let to_rad = PI / 180.0;
        let lon: Vec<f64> = lon_deg.iter().map(|&d| d * to_rad).collect();
        let lat: Vec<f64> = lat_deg.iter().map(|&d| d * to_rad).collect();
        let d_lon = d_lon_deg * to_rad;
        let d_lat = d_lat_deg * to_rad;

        let cos_lat: Vec<f64> = lat.iter().map(|p| p.cos()).collect();
        let sin_lat: Vec<f64> = lat.iter().map(|p| p.sin()).collect();
        let dx = cos_lat.iter().map(|&c| radius * c * d_lon).collect();
        let coriolis = sin_lat.iter().map(|&s| 2.0 * omega * s).collect();

        Self {
            lon_deg,
            lat_deg,
            lon,
            lat,
            d_lon,
            d_lat,
            dx,
            dy: radius * d_lat,
            cos_lat,
            sin_lat,
            coriolis,
        }
    }

    /// Interior longitudes in degrees.
    pub fn interior_lon_deg(&self) -> &[f64] {
        &self.lon_deg[1..self.lon_deg.len() - 1]
    }

    /// Interior latitudes in degrees.
    pub fn interior_lat_deg(&self) -> &[f64] {
        &self.lat_deg[1..self.lat_deg.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RE: f64 = 6.371e6;
    const OM: f64 = 7.292e-5;

    fn grid(nj: usize, nk: usize) -> LatLonGrid {
        LatLonGrid::new(&GridResolution::new(nj, nk, 1).unwrap(), RE, OM)
    }

    #[test]
    fn test_four_by_two_longitudes() {
        let g = grid(4, 2);
        assert_eq!(g.interior_lon_deg(), &[0.0, 90.0, 180.0, 270.0]);
        assert_eq!(g.lon_deg[0], g.lon_deg[4]);
        assert_eq!(g.lon_deg[5], g.lon_deg[1]);
    }

    #[test]
    fn test_latitudes_symmetric_about_equator() {
        let g = grid(4, 2);
        assert_eq!(g.interior_lat_deg(), &[-45.0, 45.0]);

        let g = grid(8, 7);
        let lat = g.interior_lat_deg();
        for k in 0..lat.len() {
            assert_relative_eq!(lat[k], -lat[lat.len() - 1 - k], epsilon = 1e-12);
        }
        assert!(lat.iter().all(|&p| p.abs() < 90.0));
    }

    #[test]
    fn test_latitude_ghosts_clamp() {
        let g = grid(8, 4);
        assert_eq!(g.lat_deg[0], g.lat_deg[1]);
        assert_eq!(g.lat_deg[5], g.lat_deg[4]);
        assert_eq!(g.cos_lat[0], g.cos_lat[1]);
    }

    #[test]
    fn test_metric_spacing() {
        let g = grid(144, 72);
        assert_relative_eq!(g.dy, RE * PI / 72.0, max_relative = 1e-14);
        let k_eq = 36; // -1.25°
        assert_relative_eq!(
            g.dx[k_eq],
            RE * g.lat[k_eq].cos() * 2.0 * PI / 144.0,
            max_relative = 1e-14
        );
        assert!(g.dx[1] < g.dx[k_eq]);
    }

    #[test]
    fn test_coriolis_sign_by_hemisphere() {
        let g = grid(8, 4);
        assert!(g.coriolis[1] < 0.0);
        assert!(g.coriolis[4] > 0.0);
        assert_relative_eq!(g.coriolis[1], -g.coriolis[4], epsilon = 1e-18);
    }
}
