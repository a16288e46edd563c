//! Grid resolution type.

use std::fmt;

use crate::error::GridError;

/// Resolution of the longitude–latitude–sigma grid.
///
/// Provides a strongly-typed way to specify the grid, preventing mix-ups
/// between the three integer dimensions. Construction validates the
/// constraints shared by every component:
/// - all dimensions are positive
/// - the longitude count is even (the pole mapping pairs each longitude
///   with its antipode)
///
/// # Example
///
/// ```
/// use globagrim::types::GridResolution;
///
/// let res = GridResolution::new(144, 72, 20).unwrap();
/// assert_eq!(res.nj(), 144);
/// assert_eq!(res.columns_with_halo(), 146 * 74);
///
/// assert!(GridResolution::new(7, 4, 2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridResolution {
    /// Number of longitudes (interior columns).
    nj: usize,
    /// Number of latitudes (interior rows).
    nk: usize,
    /// Number of sigma levels.
    nl: usize,
}

impl GridResolution {
    /// Create a validated resolution.
    pub fn new(nj: usize, nk: usize, nl: usize) -> Result<Self, GridError> {
        for (name, value) in [("NJ", nj), ("NK", nk), ("NL", nl)] {
            if value == 0 {
                return Err(GridError::ZeroDimension { name, value });
            }
        }
        if nj % 2 != 0 {
            return Err(GridError::OddLongitudeCount { nj });
        }
        Ok(Self { nj, nk, nl })
    }

    /// Number of longitudes.
    #[inline]
    pub fn nj(&self) -> usize {
        self.nj
    }

    /// Number of latitudes.
    #[inline]
    pub fn nk(&self) -> usize {
        self.nk
    }

    /// Number of sigma levels.
    #[inline]
    pub fn nl(&self) -> usize {
        self.nl
    }

    /// Row length including the two ghost columns.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.nj + 2
    }

    /// Number of horizontal cells including the halo.
    #[inline]
    pub fn columns_with_halo(&self) -> usize {
        (self.nj + 2) * (self.nk + 2)
    }

    /// Number of interior horizontal cells.
    #[inline]
    pub fn interior_columns(&self) -> usize {
        self.nj * self.nk
    }

    /// Return as tuple (nj, nk, nl).
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.nj, self.nk, self.nl)
    }
}

impl fmt::Display for GridResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.nj, self.nk, self.nl)
    }
}

impl TryFrom<(usize, usize, usize)> for GridResolution {
    type Error = GridError;

    fn try_from((nj, nk, nl): (usize, usize, usize)) -> Result<Self, Self::Error> {
        Self::new(nj, nk, nl)
    }
}
