//! Model grid: horizontal coordinates, metric factors and sigma levels.
//!
//! The grid is a pure function of the resolution and the physical
//! constants. It is built once at startup and shared read-only by every
//! component.
//!
//! # Example
//!
//! ```
//! use globagrim::config::PhysicalConstants;
//! use globagrim::grid::Grid;
//!
//! let grid = Grid::new(8, 4, 2, &PhysicalConstants::default()).unwrap();
//! assert_eq!(grid.horizontal().interior_lon_deg().len(), 8);
//! assert_eq!(grid.levels().n_levels(), 2);
//!
//! // odd longitude counts cannot be mapped across the poles
//! assert!(Grid::new(7, 4, 2, &PhysicalConstants::default()).is_err());
//! ```

mod horizontal;

pub use horizontal::LatLonGrid;

use crate::config::PhysicalConstants;
use crate::error::GridError;
use crate::types::GridResolution;
use crate::vertical::SigmaLevels;

/// Immutable model grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    resolution: GridResolution,
    horizontal: LatLonGrid,
    levels: SigmaLevels,
}

impl Grid {
    /// Build and validate the grid.
    pub fn new(
        nj: usize,
        nk: usize,
        nl: usize,
        constants: &PhysicalConstants,
    ) -> Result<Self, GridError> {
        let resolution = GridResolution::new(nj, nk, nl)?;
        Ok(Self::from_resolution(resolution, constants))
    }

    /// Build the grid for an already validated resolution.
    pub fn from_resolution(resolution: GridResolution, constants: &PhysicalConstants) -> Self {
        Self {
            resolution,
            horizontal: LatLonGrid::new(&resolution, constants.radius, constants.omega),
            levels: SigmaLevels::new(resolution.nl(), constants.rd, constants.t0),
        }
    }

    /// Grid resolution.
    #[inline]
    pub fn resolution(&self) -> &GridResolution {
        &self.resolution
    }

    /// Number of longitudes.
    #[inline]
    pub fn nj(&self) -> usize {
        self.resolution.nj()
    }

    /// Number of latitudes.
    #[inline]
    pub fn nk(&self) -> usize {
        self.resolution.nk()
    }

    /// Number of sigma levels.
    #[inline]
    pub fn nl(&self) -> usize {
        self.resolution.nl()
    }

    /// Longitude–latitude coordinates and metrics.
    #[inline]
    pub fn horizontal(&self) -> &LatLonGrid {
        &self.horizontal
    }

    /// Sigma levels and hydrostatic coefficients.
    #[inline]
    pub fn levels(&self) -> &SigmaLevels {
        &self.levels
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid({}, Δλ = {:.3}°, Δφ = {:.3}°, {})",
            self.resolution,
            self.horizontal.d_lon.to_degrees(),
            self.horizontal.d_lat.to_degrees(),
            self.levels
        )
    }
}
