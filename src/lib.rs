//! # globagrim
//!
//! A global atmospheric grid point model: the hydrostatic primitive
//! equations on a longitude-latitude-sigma grid, solved with centred finite
//! differences and an Euler-started leapfrog scheme.
//!
//! This crate provides:
//! - Halo-bearing fields and row-wise (optionally parallel) sweeps
//! - Horizontal grid geometry and sigma levels
//! - Periodic and polar boundary enforcement
//! - The dynamical trend engine (pressure gradient, Coriolis, flux
//!   divergence, vertical motion, adiabatic heating)
//! - Time integration and stability monitoring
//! - Analytic initial conditions for three experiments
//! - VTK and NetCDF output
//!
//! # Quick Start
//!
//! ```no_run
//! use globagrim::{Experiment, MemorySink, ModelConfig, Simulation};
//!
//! let config = ModelConfig::default()
//!     .with_resolution(36, 18, 5)
//!     .with_time_step(60.0)
//!     .with_duration_hours(1.0)
//!     .with_experiment(Experiment::IsolatedMountainFlow);
//!
//! let mut sim = Simulation::new(config)?;
//! let mut sink = MemorySink::new();
//! let result = sim.run(&mut sink)?;
//! println!("min ps = {:.1} hPa", result.min_surface_pressure / 100.0);
//! # Ok::<(), globagrim::ModelError>(())
//! ```

pub mod analysis;
pub mod boundary;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod init;
pub mod io;
pub mod simulation;
pub mod solver;
pub mod time;
pub mod types;
pub mod vertical;

// Re-export main types for convenience
pub use analysis::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
pub use boundary::{BoundaryEnforcer, FieldKind, HaloRule, PeriodicZonal, PolarReflection};
pub use config::{Experiment, ModelConfig, PhysicalConstants};
pub use error::{
    ConfigurationError, GridError, ModelError, NumericalInstabilityError, OutputError,
};
pub use field::{Field2D, Field3D};
pub use grid::{Grid, LatLonGrid};
pub use init::{InitialCondition, InitialState, initial_condition, initialize};
pub use io::{MemorySink, NullSink, OutputSink, Snapshot, VtkSeriesWriter};
#[cfg(feature = "netcdf")]
pub use io::NetCdfWriter;
pub use simulation::{Simulation, SimulationResult};
pub use solver::{
    DiagnosticFields, Diffusion, ModelState, NoDiffusion, PrognosticFields, Tendencies,
    TrendEngine,
};
pub use time::{EulerLeapfrog, Integrable, StepRegime, TimeIntegrator};
pub use types::GridResolution;
pub use vertical::SigmaLevels;
