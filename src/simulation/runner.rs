//! Simulation runner implementation.
//!
//! Owns every piece of run-time state; there are no globals.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::analysis::{StabilityMonitor, StabilityThresholds};
use crate::boundary::BoundaryEnforcer;
use crate::config::ModelConfig;
use crate::error::{GridError, ModelError};
use crate::grid::Grid;
use crate::init::{InitialState, initial_condition, initialize};
use crate::io::{OutputSink, Snapshot};
use crate::field::{Field2D, Field3D};
use crate::solver::{DiagnosticFields, ModelState, PrognosticFields, Tendencies, TrendEngine};
use crate::types::GridResolution;
use crate::time::{EulerLeapfrog, IntegratorInfo, StepRegime, TimeIntegrator};

// =============================================================================
// Simulation Result
// =============================================================================

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Final model time (s).
    pub final_time: f64,
    /// Total number of time steps taken.
    pub n_steps: usize,
    /// Number of snapshots handed to the sink.
    pub n_outputs: usize,
    /// Smallest absolute surface pressure after the last step (Pa).
    pub min_surface_pressure: f64,
    /// Largest true wind speed after the last step (m/s).
    pub max_wind: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

fn check_3d(what: &'static str, field: &Field3D, res: &GridResolution) -> Result<(), GridError> {
    let actual = (field.nj(), field.nk(), field.nl());
    if actual != res.as_tuple() {
        return Err(GridError::IncompatibleShape {
            what,
            expected: res.as_tuple(),
            actual,
        });
    }
    Ok(())
}

fn check_2d(what: &'static str, field: &Field2D, res: &GridResolution) -> Result<(), GridError> {
    let actual = (field.nj(), field.nk(), 1);
    let expected = (res.nj(), res.nk(), 1);
    if actual != expected {
        return Err(GridError::IncompatibleShape {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reject initial fields that were not built for `res`.
fn check_initial_shape(
    fields: &PrognosticFields,
    phis: &Field2D,
    res: &GridResolution,
) -> Result<(), GridError> {
    check_2d("ps", &fields.ps, res)?;
    check_2d("phis", phis, res)?;
    check_3d("u", &fields.u, res)?;
    check_3d("v", &fields.v, res)?;
    check_3d("t", &fields.t, res)
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Simulation context: grid, three-level state, workspaces and the
/// components that advance them.
pub struct Simulation {
    config: ModelConfig,
    grid: Grid,
    state: ModelState,
    diagnostics: DiagnosticFields,
    tendencies: Tendencies,
    engine: TrendEngine,
    boundary: BoundaryEnforcer,
    integrator: EulerLeapfrog,
    monitor: StabilityMonitor,
    n_steps: usize,
    steps_taken: usize,
    min_surface_pressure: f64,
    max_wind: f64,
}

impl Simulation {
    /// Validate `config`, build the grid and initialize the selected
    /// experiment.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let grid = Grid::from_resolution(config.resolution()?, &config.constants);
        let condition = initial_condition(config.experiment, config.seed);
        info!(
            experiment = condition.name(),
            grid = %grid,
            dt = config.dt,
            "initializing simulation"
        );
        let initial = initialize(condition.as_ref(), &grid, &config.constants);
        Self::from_initial(config, grid, initial)
    }

    /// Start from explicitly supplied initial fields.
    ///
    /// The grid must have the configured resolution and every initial field
    /// must have the grid's shape.
    pub fn from_initial(
        config: ModelConfig,
        grid: Grid,
        initial: InitialState,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let n_steps = config.n_steps()?;
        let res = *grid.resolution();
        let configured = config.resolution()?;
        if configured != res {
            return Err(GridError::IncompatibleShape {
                what: "grid",
                expected: configured.as_tuple(),
                actual: res.as_tuple(),
            }
            .into());
        }
        check_initial_shape(&initial.fields, &initial.phis, &res)?;

        let mut state = ModelState::from_initial(initial.fields, initial.phis);
        let boundary = BoundaryEnforcer::new();
        boundary.apply(&mut state.current, &mut state.phis);

        Ok(Self {
            grid,
            state,
            diagnostics: DiagnosticFields::zeros(&res),
            tendencies: Tendencies::zeros(&res),
            engine: TrendEngine::new(),
            boundary,
            integrator: EulerLeapfrog,
            monitor: StabilityMonitor::default(),
            n_steps,
            steps_taken: 0,
            min_surface_pressure: f64::NAN,
            max_wind: f64::NAN,
            config,
        })
    }

    /// Replace the trend engine (e.g. to plug in a diffusion operator).
    pub fn with_trend_engine(mut self, engine: TrendEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the stability thresholds.
    pub fn with_stability_thresholds(mut self, thresholds: StabilityThresholds) -> Self {
        self.monitor = StabilityMonitor::new(thresholds);
        self
    }

    /// Run configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Model grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Three time levels and orography.
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Tendencies of the most recent step.
    pub fn tendencies(&self) -> &Tendencies {
        &self.tendencies
    }

    /// Configured number of steps.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Steps completed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Model time of the current level (s).
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.config.dt
    }

    /// Physical fields of the current level.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.steps_taken,
            self.time(),
            &self.grid,
            &self.state.current,
            &self.state.phis,
            &self.config.constants,
        )
    }

    /// Advance one step: trend, update, rotation, boundaries, stability scan.
    pub fn step(&mut self) -> Result<StepRegime, ModelError> {
        let step = self.steps_taken;
        let regime = StepRegime::for_step(step);
        let constants = &self.config.constants;

        self.engine.evaluate(
            &self.state.current,
            &self.state.phis,
            &self.grid,
            constants,
            &mut self.diagnostics,
            &mut self.tendencies,
        );

        {
            let ModelState {
                past,
                current,
                future,
                ..
            } = &mut self.state;
            self.integrator
                .advance(regime, &*past, &*current, future, self.config.dt, &self.tendencies);
        }
        self.state.rotate();
        self.boundary
            .apply(&mut self.state.current, &mut self.state.phis);

        let status = self.monitor.scan(step, &self.state.current, constants.ps0)?;
        for warning in &status.warnings {
            warn!(step, %warning, "stability warning");
        }
        self.min_surface_pressure = status.min_surface_pressure;
        self.max_wind = status.max_wind;

        self.steps_taken += 1;
        debug!(
            step,
            regime = %regime,
            max_tendency = self.tendencies.max_abs_interior(),
            "step complete"
        );
        Ok(regime)
    }

    fn emit(&self, sink: &mut dyn OutputSink) -> Result<(), ModelError> {
        let snapshot = self.snapshot();
        sink.write(&snapshot)?;
        info!(
            step = snapshot.step,
            time = snapshot.time,
            sink = sink.name(),
            "output written"
        );
        Ok(())
    }

    /// Run all remaining steps, writing snapshots at step 0, every output
    /// interval and after the last step.
    pub fn run(&mut self, sink: &mut dyn OutputSink) -> Result<SimulationResult, ModelError> {
        let start_wall = Instant::now();
        let interval = self.config.output_interval;
        let mut n_outputs = 0;

        info!(
            integrator = self.integrator.name(),
            diffusion = self.engine.diffusion_name(),
            n_steps = self.n_steps,
            "starting simulation"
        );

        if self.steps_taken == 0 {
            self.emit(sink)?;
            n_outputs += 1;
        }

        while self.steps_taken < self.n_steps {
            self.step()?;
            let done = self.steps_taken;
            if done % interval == 0 || done == self.n_steps {
                self.emit(sink)?;
                n_outputs += 1;
            }
        }
        sink.finish()?;

        let result = SimulationResult {
            final_time: self.time(),
            n_steps: self.steps_taken,
            n_outputs,
            min_surface_pressure: self.min_surface_pressure,
            max_wind: self.max_wind,
            wall_time: start_wall.elapsed().as_secs_f64(),
        };
        info!(
            n_steps = result.n_steps,
            final_time = result.final_time,
            wall_time = result.wall_time,
            "simulation finished"
        );
        Ok(result)
    }
}
