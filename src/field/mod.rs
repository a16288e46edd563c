//! Halo-bearing horizontal and column fields.
//!
//! Every horizontal field carries one ghost cell on each side:
//! interior indices are `1..=nj` (longitude) and `1..=nk` (latitude),
//! indices `0` and `nj + 1` / `nk + 1` are ghost cells owned by the
//! boundary enforcer.
//!
//! # Memory Layout
//!
//! Both field types use a contiguous `Vec<f64>`, latitude outermost:
//!
//! ```text
//! Field2D:  index(j, k)    = k * (nj + 2) + j
//! Field3D:  index(j, k, l) = (k * (nj + 2) + j) * nl + l
//! ```
//!
//! so a vertical column `(j, k, ..)` is a contiguous slice and a latitude row
//! is a contiguous chunk that can be handed to a worker thread.

mod sweep;

pub use sweep::{
    for_each_column, for_each_interior_cell, for_each_interior_column, for_each_interior_pair,
};

use std::ops::{Index, IndexMut};

use crate::types::GridResolution;

/// Scalar horizontal field with a one-cell halo.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    nj: usize,
    nk: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Zero-initialized field for the given resolution.
    pub fn zeros(res: &GridResolution) -> Self {
        Self {
            nj: res.nj(),
            nk: res.nk(),
            data: vec![0.0; res.columns_with_halo()],
        }
    }

    /// Number of interior longitudes.
    #[inline]
    pub fn nj(&self) -> usize {
        self.nj
    }

    /// Number of interior latitudes.
    #[inline]
    pub fn nk(&self) -> usize {
        self.nk
    }

    /// Row length including ghost columns.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.nj + 2
    }

    #[inline]
    fn offset(&self, j: usize, k: usize) -> usize {
        debug_assert!(j <= self.nj + 1 && k <= self.nk + 1);
        k * (self.nj + 2) + j
    }

    /// Raw storage, halo included.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw storage, halo included.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Set every cell (halo included) to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Copy all values from a field of the same shape.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data.copy_from_slice(&other.data);
    }

    /// `self <- self + c * other` over every cell.
    pub fn axpy(&mut self, c: f64, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x += c * y;
        }
    }

    /// Iterate over interior cells as `(j, k, value)`.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..=self.nk).flat_map(move |k| (1..=self.nj).map(move |j| (j, k, self[(j, k)])))
    }

    /// Maximum absolute value over interior cells.
    pub fn max_abs_interior(&self) -> f64 {
        self.interior().fold(0.0, |m, (_, _, v)| m.max(v.abs()))
    }

    /// Interior values copied out row by row (`[k][j]`, ghosts dropped).
    pub fn interior_to_vec(&self) -> Vec<f64> {
        self.interior().map(|(_, _, v)| v).collect()
    }
}

impl Index<(usize, usize)> for Field2D {
    type Output = f64;

    #[inline]
    fn index(&self, (j, k): (usize, usize)) -> &f64 {
        &self.data[self.offset(j, k)]
    }
}

impl IndexMut<(usize, usize)> for Field2D {
    #[inline]
    fn index_mut(&mut self, (j, k): (usize, usize)) -> &mut f64 {
        let i = self.offset(j, k);
        &mut self.data[i]
    }
}

/// Per-level field (one value per sigma level in every column) with a
/// one-cell horizontal halo.
#[derive(Clone, Debug, PartialEq)]
pub struct Field3D {
    nj: usize,
    nk: usize,
    nl: usize,
    data: Vec<f64>,
}

impl Field3D {
    /// Zero-initialized field for the given resolution.
    pub fn zeros(res: &GridResolution) -> Self {
        Self {
            nj: res.nj(),
            nk: res.nk(),
            nl: res.nl(),
            data: vec![0.0; res.columns_with_halo() * res.nl()],
        }
    }

    /// Number of interior longitudes.
    #[inline]
    pub fn nj(&self) -> usize {
        self.nj
    }

    /// Number of interior latitudes.
    #[inline]
    pub fn nk(&self) -> usize {
        self.nk
    }

    /// Number of levels.
    #[inline]
    pub fn nl(&self) -> usize {
        self.nl
    }

    /// Row length in columns, ghost columns included.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.nj + 2
    }

    #[inline]
    fn column_offset(&self, j: usize, k: usize) -> usize {
        debug_assert!(j <= self.nj + 1 && k <= self.nk + 1);
        (k * (self.nj + 2) + j) * self.nl
    }

    /// Vertical column at `(j, k)`.
    #[inline]
    pub fn column(&self, j: usize, k: usize) -> &[f64] {
        let start = self.column_offset(j, k);
        &self.data[start..start + self.nl]
    }

    /// Mutable vertical column at `(j, k)`.
    #[inline]
    pub fn column_mut(&mut self, j: usize, k: usize) -> &mut [f64] {
        let start = self.column_offset(j, k);
        let nl = self.nl;
        &mut self.data[start..start + nl]
    }

    /// Copy the column at `(src_j, src_k)` into `(dst_j, dst_k)`, scaled by `sign`.
    #[inline]
    pub fn copy_column(&mut self, src: (usize, usize), dst: (usize, usize), sign: f64) {
        let s = self.column_offset(src.0, src.1);
        let d = self.column_offset(dst.0, dst.1);
        for l in 0..self.nl {
            self.data[d + l] = sign * self.data[s + l];
        }
    }

    /// Raw storage, halo included.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw storage, halo included.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Set every cell (halo included) to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Copy all values from a field of the same shape.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data.copy_from_slice(&other.data);
    }

    /// `self <- self + c * other` over every cell.
    pub fn axpy(&mut self, c: f64, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x += c * y;
        }
    }

    /// Iterate over interior cells as `(j, k, l, value)`.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize, usize, f64)> + '_ {
        (1..=self.nk).flat_map(move |k| {
            (1..=self.nj).flat_map(move |j| {
                self.column(j, k)
                    .iter()
                    .enumerate()
                    .map(move |(l, &v)| (j, k, l, v))
            })
        })
    }

    /// Maximum absolute value over interior cells.
    pub fn max_abs_interior(&self) -> f64 {
        self.interior().fold(0.0, |m, (_, _, _, v)| m.max(v.abs()))
    }

    /// Interior values copied out level-major (`[l][k][j]`, ghosts dropped).
    pub fn interior_level_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.nj * self.nk * self.nl);
        for l in 0..self.nl {
            for k in 1..=self.nk {
                for j in 1..=self.nj {
                    out.push(self[(j, k, l)]);
                }
            }
        }
        out
    }
}

impl Index<(usize, usize, usize)> for Field3D {
    type Output = f64;

    #[inline]
    fn index(&self, (j, k, l): (usize, usize, usize)) -> &f64 {
        debug_assert!(l < self.nl);
        &self.data[self.column_offset(j, k) + l]
    }
}

impl IndexMut<(usize, usize, usize)> for Field3D {
    #[inline]
    fn index_mut(&mut self, (j, k, l): (usize, usize, usize)) -> &mut f64 {
        debug_assert!(l < self.nl);
        let i = self.column_offset(j, k) + l;
        &mut self.data[i]
    }
}
