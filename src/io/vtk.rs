//! VTK output for ParaView.
//!
//! Each snapshot becomes a VTR (XML RectilinearGrid) file with longitude,
//! latitude and sigma as coordinates; a PVD collection lists them with
//! their model time so ParaView can animate the series.
//!
//! Surface fields are repeated on every level so that all arrays share the
//! point layout of the 3D grid.
//!
//! # Example
//!
//! ```ignore
//! use globagrim::io::{OutputSink, VtkSeriesWriter};
//!
//! let mut writer = VtkSeriesWriter::new("output", "globagrim")?;
//! writer.write(&snapshot)?;
//! writer.finish()?; // writes output/globagrim.pvd
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{OutputSink, Snapshot};
use crate::error::OutputError;

/// VTK XML writer helper.
struct VtkWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> VtkWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn write_header(&mut self, file_type: &str) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            self.writer,
            "<VTKFile type=\"{}\" version=\"0.1\" byte_order=\"LittleEndian\">",
            file_type
        )?;
        self.indent += 1;
        Ok(())
    }

    fn write_footer(&mut self) -> std::io::Result<()> {
        self.indent -= 1;
        writeln!(self.writer, "</VTKFile>")?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, "/>")?;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn write_data_array_f64(
        &mut self,
        name: &str,
        data: &[f64],
        components: usize,
    ) -> std::io::Result<()> {
        self.write_indent()?;
        if components > 1 {
            writeln!(
                self.writer,
                "<DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"{}\" format=\"ascii\">",
                name, components
            )?;
        } else {
            writeln!(
                self.writer,
                "<DataArray type=\"Float64\" Name=\"{}\" format=\"ascii\">",
                name
            )?;
        }

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{:.10e}", v)?;
            if i + 1 < data.len() {
                write!(self.writer, " ")?;
            }
            if (i + 1) % 6 == 0 && i + 1 < data.len() {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }
}

/// Write a single snapshot as a VTR file.
pub fn write_vtr<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), OutputError> {
    let (nj, nk, nl) = snapshot.shape();
    let file = File::create(path.as_ref())?;
    let mut w = VtkWriter::new(file);

    let extent = format!("0 {} 0 {} 0 {}", nj - 1, nk - 1, nl - 1);
    w.write_header("RectilinearGrid")?;
    w.start_element("RectilinearGrid", &[("WholeExtent", extent.as_str())])?;

    w.start_element("FieldData", &[])?;
    w.write_indent()?;
    writeln!(
        w.writer,
        "<DataArray type=\"Float64\" Name=\"TIME\" NumberOfTuples=\"1\" format=\"ascii\">{:.10e}</DataArray>",
        snapshot.time
    )?;
    w.end_element("FieldData")?;

    w.start_element("Piece", &[("Extent", extent.as_str())])?;

    w.start_element("Coordinates", &[])?;
    w.write_data_array_f64("lon", &snapshot.lon, 1)?;
    w.write_data_array_f64("lat", &snapshot.lat, 1)?;
    w.write_data_array_f64("sigma", &snapshot.sigma, 1)?;
    w.end_element("Coordinates")?;

    w.start_element("PointData", &[("Scalars", "temperature"), ("Vectors", "wind")])?;
    w.write_data_array_f64("temperature", &snapshot.temperature, 1)?;
    w.write_data_array_f64("u", &snapshot.u, 1)?;
    w.write_data_array_f64("v", &snapshot.v, 1)?;

    let wind: Vec<f64> = snapshot
        .u
        .iter()
        .zip(&snapshot.v)
        .flat_map(|(&u, &v)| [u, v, 0.0])
        .collect();
    w.write_data_array_f64("wind", &wind, 3)?;

    let per_level = |surface: &[f64]| -> Vec<f64> {
        (0..nl).flat_map(|_| surface.iter().copied()).collect()
    };
    w.write_data_array_f64("surface_pressure", &per_level(&snapshot.surface_pressure), 1)?;
    w.write_data_array_f64("surface_height", &per_level(&snapshot.surface_height), 1)?;
    w.end_element("PointData")?;

    w.end_element("Piece")?;
    w.end_element("RectilinearGrid")?;
    w.write_footer()?;
    Ok(())
}

/// Writes one VTR file per snapshot plus a PVD collection.
pub struct VtkSeriesWriter {
    dir: PathBuf,
    prefix: String,
    entries: Vec<(f64, String)>,
}

impl VtkSeriesWriter {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, OutputError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
            entries: Vec::new(),
        })
    }

    /// Path of the PVD collection file.
    pub fn collection_path(&self) -> PathBuf {
        self.dir.join(format!("{}.pvd", self.prefix))
    }

    /// Number of snapshots written.
    pub fn n_written(&self) -> usize {
        self.entries.len()
    }

    fn write_collection(&self) -> Result<(), OutputError> {
        let file = File::create(self.collection_path())?;
        let mut w = VtkWriter::new(file);
        w.write_header("Collection")?;
        w.start_element("Collection", &[])?;
        for (time, name) in &self.entries {
            let t = format!("{}", time);
            w.empty_element(
                "DataSet",
                &[("timestep", t.as_str()), ("group", ""), ("part", "0"), ("file", name.as_str())],
            )?;
        }
        w.end_element("Collection")?;
        w.write_footer()?;
        Ok(())
    }
}

impl OutputSink for VtkSeriesWriter {
    fn name(&self) -> &'static str {
        "vtk"
    }

    fn write(&mut self, snapshot: &Snapshot) -> Result<(), OutputError> {
        let name = format!("{}_{:06}.vtr", self.prefix, snapshot.step);
        let path = self.dir.join(&name);
        write_vtr(&path, snapshot)?;
        debug!(path = %path.display(), "wrote VTK snapshot");
        self.entries.push((snapshot.time, name));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.write_collection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicalConstants;
    use crate::field::Field2D;
    use crate::grid::Grid;
    use crate::solver::PrognosticFields;

    fn snapshot(step: usize) -> Snapshot {
        let c = PhysicalConstants::default();
        let grid = Grid::new(4, 2, 2, &c).unwrap();
        let res = *grid.resolution();
        Snapshot::capture(
            step,
            step as f64 * 15.0,
            &grid,
            &PrognosticFields::zeros(&res),
            &Field2D::zeros(&res),
            &c,
        )
    }

    #[test]
    fn test_vtr_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.vtr");
        write_vtr(&path, &snapshot(0)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("<VTKFile type=\"RectilinearGrid\""));
        assert!(text.contains("WholeExtent=\"0 3 0 1 0 1\""));
        assert!(text.contains("Name=\"temperature\""));
        assert!(text.contains("NumberOfComponents=\"3\""));
        assert!(text.trim_end().ends_with("</VTKFile>"));
    }

    #[test]
    fn test_series_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = VtkSeriesWriter::new(dir.path().join("out"), "run").unwrap();
        writer.write(&snapshot(0)).unwrap();
        writer.write(&snapshot(4)).unwrap();
        writer.finish().unwrap();

        assert_eq!(writer.n_written(), 2);
        assert!(dir.path().join("out/run_000004.vtr").exists());
        let pvd = fs::read_to_string(writer.collection_path()).unwrap();
        assert!(pvd.contains("file=\"run_000000.vtr\""));
        assert!(pvd.contains("timestep=\"60\""));
    }
}
