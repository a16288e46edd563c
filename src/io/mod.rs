//! Simulation output.
//!
//! This module provides:
//! - **Snapshots**: physical (unweighted) fields extracted from a model state
//! - **Sinks**: the [`OutputSink`] trait and its implementations
//! - **VTK output**: rectilinear-grid series for ParaView (`.vtr` + `.pvd`)
//! - **NetCDF output**: CF-conventions file (requires `netcdf` feature)
//!
//! # Snapshot layout
//!
//! All arrays hold interior cells only, longitude fastest:
//!
//! ```text
//! surface fields:  [lat][lon]           len = nk · nj
//! level fields:    [level][lat][lon]    len = nl · nk · nj
//! ```
//!
//! Level 0 is the model top.
//!
//! # Example
//!
//! ```ignore
//! use globagrim::io::{MemorySink, OutputSink, VtkSeriesWriter};
//!
//! let mut sink = VtkSeriesWriter::new("out", "globagrim")?;
//! simulation.run(&mut sink)?;
//! ```

#[cfg(feature = "netcdf")]
mod netcdf_io;
mod vtk;

#[cfg(feature = "netcdf")]
pub use netcdf_io::NetCdfWriter;
pub use vtk::VtkSeriesWriter;

use crate::config::PhysicalConstants;
use crate::error::OutputError;
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// Physical fields of one output time.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Step index of the state (0 = initial state).
    pub step: usize,
    /// Elapsed model time (s).
    pub time: f64,
    /// Longitudes (degrees east), `nj` entries.
    pub lon: Vec<f64>,
    /// Latitudes (degrees north), `nk` entries.
    pub lat: Vec<f64>,
    /// Full sigma levels, `nl` entries.
    pub sigma: Vec<f64>,
    /// Absolute surface pressure (hPa).
    pub surface_pressure: Vec<f64>,
    /// Surface elevation Φs/G (m).
    pub surface_height: Vec<f64>,
    /// Temperature (K).
    pub temperature: Vec<f64>,
    /// Zonal wind (m/s).
    pub u: Vec<f64>,
    /// Meridional wind (m/s).
    pub v: Vec<f64>,
}

impl Snapshot {
    /// Extract physical fields from a time level.
    pub fn capture(
        step: usize,
        time: f64,
        grid: &Grid,
        fields: &PrognosticFields,
        phis: &Field2D,
        constants: &PhysicalConstants,
    ) -> Self {
        let (nj, nk, nl) = (grid.nj(), grid.nk(), grid.nl());
        let psg = |j: usize, k: usize| fields.ps[(j, k)] + constants.ps0;

        let mut surface_pressure = Vec::with_capacity(nj * nk);
        let mut surface_height = Vec::with_capacity(nj * nk);
        for k in 1..=nk {
            for j in 1..=nj {
                surface_pressure.push(psg(j, k) / 100.0);
                surface_height.push(phis[(j, k)] / constants.gravity);
            }
        }

        let n3 = nj * nk * nl;
        let (mut temperature, mut u, mut v) =
            (Vec::with_capacity(n3), Vec::with_capacity(n3), Vec::with_capacity(n3));
        for l in 0..nl {
            for k in 1..=nk {
                for j in 1..=nj {
                    let p = psg(j, k);
                    temperature.push(fields.t[(j, k, l)] / p + constants.t0);
                    u.push(fields.u[(j, k, l)] / p);
                    v.push(fields.v[(j, k, l)] / p);
                }
            }
        }

        Self {
            step,
            time,
            lon: grid.horizontal().interior_lon_deg().to_vec(),
            lat: grid.horizontal().interior_lat_deg().to_vec(),
            sigma: grid.levels().sigma().to_vec(),
            surface_pressure,
            surface_height,
            temperature,
            u,
            v,
        }
    }

    /// `(nj, nk, nl)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.lon.len(), self.lat.len(), self.sigma.len())
    }

    /// Flat index of `(j, k)` in a surface field (0-based interior indices).
    #[inline]
    pub fn surface_index(&self, j: usize, k: usize) -> usize {
        k * self.lon.len() + j
    }

    /// Flat index of `(j, k, l)` in a level field (0-based interior indices).
    #[inline]
    pub fn level_index(&self, j: usize, k: usize, l: usize) -> usize {
        (l * self.lat.len() + k) * self.lon.len() + j
    }
}

/// Destination for snapshots.
pub trait OutputSink {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Store one snapshot.
    fn write(&mut self, snapshot: &Snapshot) -> Result<(), OutputError>;

    /// Flush and close. Called once after the last snapshot.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    snapshots: Vec<Snapshot>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Step indices of the received snapshots.
    pub fn steps(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.step).collect()
    }

    /// Take the recorded snapshots.
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl OutputSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), OutputError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn name(&self) -> &'static str {
        "none"
    }

    fn write(&mut self, _snapshot: &Snapshot) -> Result<(), OutputError> {
        Ok(())
    }
}
