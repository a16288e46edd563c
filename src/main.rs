//! Command-line driver.
//!
//! ```text
//! globagrim --nj 144 --nk 72 --nl 20 --dt 15 --hours 0.25 \
//!     --experiment low-pressure-anomaly --format vtk --output out -v
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use globagrim::config::{Experiment, ModelConfig};
use globagrim::io::{NullSink, OutputSink, VtkSeriesWriter};
use globagrim::simulation::Simulation;

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// VTR snapshots plus a PVD collection.
    Vtk,
    /// Single CF NetCDF file (requires the `netcdf` feature).
    Netcdf,
    /// No output.
    None,
}

/// Global atmospheric grid point model.
#[derive(Parser, Debug)]
#[command(name = "globagrim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hydrostatic primitive-equation grid point model", long_about = None)]
struct Cli {
    /// Number of longitudes (must be even).
    #[arg(long, default_value_t = 144)]
    nj: usize,

    /// Number of latitudes.
    #[arg(long, default_value_t = 72)]
    nk: usize,

    /// Number of sigma levels.
    #[arg(long, default_value_t = 20)]
    nl: usize,

    /// Time step in seconds.
    #[arg(long, default_value_t = 15.0)]
    dt: f64,

    /// Simulated duration in hours.
    #[arg(long, default_value_t = 0.25)]
    hours: f64,

    /// Write output every this many steps.
    #[arg(long, default_value_t = 60)]
    output_interval: usize,

    /// Experiment name or number (1, 2, 3).
    #[arg(short, long, default_value = "low-pressure-anomaly")]
    experiment: String,

    /// Seed for the random-wind experiment.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Vtk)]
    format: Format,

    /// More logging (-v per-step debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn make_sink(cli: &Cli, config: &ModelConfig) -> anyhow::Result<Box<dyn OutputSink>> {
    match cli.format {
        Format::None => Ok(Box::new(NullSink)),
        Format::Vtk => {
            let writer = VtkSeriesWriter::new(&cli.output, "globagrim")
                .with_context(|| format!("cannot create {}", cli.output.display()))?;
            Ok(Box::new(writer))
        }
        #[cfg(feature = "netcdf")]
        Format::Netcdf => {
            std::fs::create_dir_all(&cli.output)?;
            let path = cli.output.join("globagrim.nc");
            let writer =
                globagrim::io::NetCdfWriter::create(&path, config.nj, config.nk, config.nl)?
                    .with_title(format!("globagrim {}", config.experiment))?;
            Ok(Box::new(writer))
        }
        #[cfg(not(feature = "netcdf"))]
        Format::Netcdf => {
            let _ = config;
            anyhow::bail!("NetCDF output requires building with --features netcdf")
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let experiment: Experiment = cli.experiment.parse()?;
    let config = ModelConfig::default()
        .with_resolution(cli.nj, cli.nk, cli.nl)
        .with_time_step(cli.dt)
        .with_duration_hours(cli.hours)
        .with_output_interval(cli.output_interval)
        .with_experiment(experiment)
        .with_seed(cli.seed);

    let mut sim = Simulation::new(config.clone())?;
    let mut sink = make_sink(&cli, &config)?;
    let result = sim.run(sink.as_mut())?;

    info!(
        steps = result.n_steps,
        outputs = result.n_outputs,
        min_ps_hpa = result.min_surface_pressure / 100.0,
        max_wind = result.max_wind,
        wall_time_s = result.wall_time,
        "done"
    );
    Ok(())
}
