//! CF-conventions NetCDF output.
//!
//! One file per run with an unlimited `time` dimension:
//!
//! | Variable | Dimensions | Units |
//! |----------|------------|-------|
//! | `time` | time | s |
//! | `lon`, `lat` | lon / lat | degrees |
//! | `lev` | lev | 1 (sigma) |
//! | `zs` | lat, lon | m |
//! | `ps` | time, lat, lon | hPa |
//! | `ta`, `ua`, `va` | time, lev, lat, lon | K, m s-1 |
//!
//! Requires the `netcdf` feature.

use std::path::Path;

use chrono::Utc;
use netcdf::create;
use tracing::debug;

use super::{OutputSink, Snapshot};
use crate::error::OutputError;

/// Streams snapshots into a single NetCDF file.
pub struct NetCdfWriter {
    file: netcdf::FileMut,
    shape: (usize, usize, usize),
    time_index: usize,
}

fn missing(name: &str) -> OutputError {
    OutputError::MissingVariable(name.to_string())
}

impl NetCdfWriter {
    /// Create the file; coordinates are written with the first snapshot.
    pub fn create(
        path: impl AsRef<Path>,
        nj: usize,
        nk: usize,
        nl: usize,
    ) -> Result<Self, OutputError> {
        let mut file = create(path.as_ref())?;

        file.add_unlimited_dimension("time")?;
        file.add_dimension("lev", nl)?;
        file.add_dimension("lat", nk)?;
        file.add_dimension("lon", nj)?;

        {
            let mut var = file.add_variable::<f64>("time", &["time"])?;
            var.put_attribute("standard_name", "time")?;
            var.put_attribute("long_name", "elapsed model time")?;
            var.put_attribute("units", "seconds since 1970-01-01 00:00:00")?;
        }
        {
            let mut var = file.add_variable::<f64>("lon", &["lon"])?;
            var.put_attribute("standard_name", "longitude")?;
            var.put_attribute("units", "degrees_east")?;
        }
        {
            let mut var = file.add_variable::<f64>("lat", &["lat"])?;
            var.put_attribute("standard_name", "latitude")?;
            var.put_attribute("units", "degrees_north")?;
        }
        {
            let mut var = file.add_variable::<f64>("lev", &["lev"])?;
            var.put_attribute("standard_name", "atmosphere_sigma_coordinate")?;
            var.put_attribute("positive", "down")?;
            var.put_attribute("units", "1")?;
        }
        {
            let mut var = file.add_variable::<f64>("zs", &["lat", "lon"])?;
            var.put_attribute("standard_name", "surface_altitude")?;
            var.put_attribute("units", "m")?;
        }
        {
            let mut var = file.add_variable::<f64>("ps", &["time", "lat", "lon"])?;
            var.put_attribute("standard_name", "surface_air_pressure")?;
            var.put_attribute("units", "hPa")?;
        }
        for (name, standard, units) in [
            ("ta", "air_temperature", "K"),
            ("ua", "eastward_wind", "m s-1"),
            ("va", "northward_wind", "m s-1"),
        ] {
            let mut var = file.add_variable::<f64>(name, &["time", "lev", "lat", "lon"])?;
            var.put_attribute("standard_name", standard)?;
            var.put_attribute("units", units)?;
        }

        file.add_attribute("Conventions", "CF-1.8")?;
        let now = Utc::now();
        file.add_attribute(
            "history",
            format!("{}: Created by globagrim", now.format("%Y-%m-%d %H:%M:%S UTC")).as_str(),
        )?;

        Ok(Self {
            file,
            shape: (nj, nk, nl),
            time_index: 0,
        })
    }

    /// Set the global `title` attribute.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, OutputError> {
        let title = title.into();
        self.file.add_attribute("title", title.as_str())?;
        Ok(self)
    }

    /// Get the number of timesteps written.
    pub fn n_timesteps(&self) -> usize {
        self.time_index
    }

    fn write_coordinates(&mut self, snapshot: &Snapshot) -> Result<(), OutputError> {
        for (name, data) in [
            ("lon", &snapshot.lon),
            ("lat", &snapshot.lat),
            ("lev", &snapshot.sigma),
            ("zs", &snapshot.surface_height),
        ] {
            let mut var = self.file.variable_mut(name).ok_or_else(|| missing(name))?;
            var.put_values(data.as_slice(), ..)?;
        }
        Ok(())
    }
}

impl OutputSink for NetCdfWriter {
    fn name(&self) -> &'static str {
        "netcdf"
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), OutputError> {
        if snapshot.shape() != self.shape {
            return Err(OutputError::ShapeMismatch {
                expected: format!("{:?}", self.shape),
                actual: format!("{:?}", snapshot.shape()),
            });
        }
        if self.time_index == 0 {
            self.write_coordinates(snapshot)?;
        }

        let t_idx = self.time_index;
        {
            let mut var = self.file.variable_mut("time").ok_or_else(|| missing("time"))?;
            var.put_value(snapshot.time, [t_idx])?;
        }
        {
            let mut var = self.file.variable_mut("ps").ok_or_else(|| missing("ps"))?;
            var.put_values(snapshot.surface_pressure.as_slice(), (t_idx, .., ..))?;
        }
        for (name, data) in [
            ("ta", &snapshot.temperature),
            ("ua", &snapshot.u),
            ("va", &snapshot.v),
        ] {
            let mut var = self.file.variable_mut(name).ok_or_else(|| missing(name))?;
            var.put_values(data.as_slice(), (t_idx, .., .., ..))?;
        }

        debug!(step = snapshot.step, index = t_idx, "wrote NetCDF record");
        self.time_index += 1;
        Ok(())
    }
}
