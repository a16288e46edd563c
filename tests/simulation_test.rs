//! End-to-end tests for the simulation driver.
//!
//! These tests verify:
//! - the Euler start-up step and the first leapfrog step bit for bit
//! - a resting atmosphere stays exactly at rest
//! - start-up rejection of bad grids, bad experiments and bad time steps
//! - output scheduling and numerical-instability reporting
//! - shape checks on explicitly supplied initial fields
//! - pluggable diffusion and stability thresholds

use globagrim::io::Snapshot;
use globagrim::solver::trend::DiffusionTerms;
use globagrim::{
    ConfigurationError, Diffusion, Experiment, Field2D, Grid, GridError, GridResolution,
    InitialState, MemorySink, ModelConfig, ModelError, OutputSink, PrognosticFields, Simulation,
    StabilityThresholds, StepRegime, TrendEngine,
};

const DT: f64 = 15.0;

fn two_step_config() -> ModelConfig {
    ModelConfig::default()
        .with_resolution(8, 4, 2)
        .with_time_step(DT)
        .with_duration_hours(2.0 * DT / 3600.0)
        .with_output_interval(1)
        .with_experiment(Experiment::LowPressureAnomaly)
}

fn assert_interior_eq(actual: &PrognosticFields, expected: &PrognosticFields) {
    for (j, k, v) in actual.ps.interior() {
        assert_eq!(v, expected.ps[(j, k)], "ps at ({j}, {k})");
    }
    for (name, a, e) in [
        ("u", &actual.u, &expected.u),
        ("v", &actual.v, &expected.v),
        ("t", &actual.t, &expected.t),
    ] {
        for (j, k, l, v) in a.interior() {
            assert_eq!(v, e[(j, k, l)], "{name} at ({j}, {k}, {l})");
        }
    }
}

/// `base + factor * tendency` using the update formula of the scheme.
fn updated(base: &PrognosticFields, factor: f64, sim: &Simulation) -> PrognosticFields {
    let tend = sim.tendencies();
    let mut out = base.clone();
    for (j, k, x) in base.ps.interior() {
        out.ps[(j, k)] = x + factor * tend.pst[(j, k)];
    }
    for (dst, src, t) in [
        (&mut out.u, &base.u, &tend.ut),
        (&mut out.v, &base.v, &tend.vt),
        (&mut out.t, &base.t, &tend.tt),
    ] {
        for (j, k, l, x) in src.interior() {
            dst[(j, k, l)] = x + factor * t[(j, k, l)];
        }
    }
    out
}

#[test]
fn test_low_pressure_two_steps_euler_then_leapfrog() {
    let mut sim = Simulation::new(two_step_config()).unwrap();
    assert_eq!(sim.n_steps(), 2);
    let x0 = sim.state().current.clone();
    assert!(x0.ps[(5, 3)] < 0.0);

    assert_eq!(sim.step().unwrap(), StepRegime::Euler);
    let x1 = sim.state().current.clone();
    assert_interior_eq(&x1, &updated(&x0, DT, &sim));
    assert_eq!(sim.state().past, x0);
    // the pressure gradient has started moving air
    assert!(x1.u.max_abs_interior() > 0.0);

    assert_eq!(sim.step().unwrap(), StepRegime::Leapfrog);
    let x2 = sim.state().current.clone();
    assert_interior_eq(&x2, &updated(&x0, 2.0 * DT, &sim));
    assert_eq!(sim.time(), 2.0 * DT);
}

#[test]
fn test_resting_atmosphere_stays_at_rest() {
    let config = two_step_config().with_duration_hours(10.0 * DT / 3600.0);
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let res = *grid.resolution();
    let initial = InitialState {
        fields: PrognosticFields::zeros(&res),
        phis: Field2D::zeros(&res),
    };
    let mut sim = Simulation::from_initial(config, grid, initial).unwrap();

    let mut sink = MemorySink::new();
    let result = sim.run(&mut sink).unwrap();
    assert_eq!(result.n_steps, 10);
    assert_eq!(sim.state().current, PrognosticFields::zeros(&res));
    assert_eq!(result.max_wind, 0.0);
    assert_eq!(result.min_surface_pressure, 1.0e5);
}

#[test]
fn test_odd_longitudes_rejected() {
    let config = two_step_config().with_resolution(9, 4, 2);
    match Simulation::new(config) {
        Err(ModelError::Grid(GridError::OddLongitudeCount { nj })) => assert_eq!(nj, 9),
        other => panic!("expected odd longitude error, got {:?}", other.err()),
    }
}

#[test]
fn test_unknown_experiment_rejected() {
    let err = ModelConfig::default()
        .with_experiment_name("supercell")
        .unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownExperiment("supercell".into()));
}

#[test]
fn test_zero_step_run_rejected() {
    let config = two_step_config().with_duration_hours(1.0 / 3600.0);
    assert!(matches!(
        Simulation::new(config),
        Err(ModelError::Configuration(ConfigurationError::NoSteps { .. }))
    ));
}

#[test]
fn test_snapshots_follow_output_interval() {
    let config = two_step_config()
        .with_duration_hours(7.0 * DT / 3600.0)
        .with_output_interval(3)
        .with_experiment(Experiment::IsolatedMountainFlow);
    let mut sim = Simulation::new(config).unwrap();
    let mut sink = MemorySink::new();
    let result = sim.run(&mut sink).unwrap();

    assert_eq!(sink.steps(), vec![0, 3, 6, 7]);
    assert_eq!(result.n_outputs, 4);
    let last = &sink.snapshots()[3];
    assert_eq!(last.time, 7.0 * DT);
    assert_eq!(last.shape(), (8, 4, 2));
    // the mountain is visible in the surface height
    assert!(last.surface_height.iter().any(|&h| h > 100.0));
}

#[test]
fn test_non_finite_state_reports_step() {
    let config = two_step_config();
    let c = config.constants;
    let grid = Grid::new(8, 4, 2, &c).unwrap();
    let res = *grid.resolution();
    let mut fields = PrognosticFields::zeros(&res);
    fields.u[(3, 2, 1)] = f64::NAN;
    let initial = InitialState {
        fields,
        phis: Field2D::zeros(&res),
    };

    let mut sim = Simulation::from_initial(config, grid, initial).unwrap();
    match sim.step() {
        Err(ModelError::NumericalInstability(e)) => assert_eq!(e.step, 0),
        other => panic!("expected instability, got {:?}", other),
    }
}

#[test]
fn test_instability_stops_before_output() {
    struct Counting(usize);
    impl OutputSink for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn write(&mut self, _: &Snapshot) -> Result<(), globagrim::OutputError> {
            self.0 += 1;
            Ok(())
        }
    }

    let config = two_step_config();
    let c = config.constants;
    let grid = Grid::new(8, 4, 2, &c).unwrap();
    let res = *grid.resolution();
    let mut fields = PrognosticFields::zeros(&res);
    // absolute surface pressure below zero
    fields.ps[(2, 2)] = -2.0 * c.ps0;
    let initial = InitialState {
        fields,
        phis: Field2D::zeros(&res),
    };

    let mut sim = Simulation::from_initial(config, grid, initial).unwrap();
    let mut sink = Counting(0);
    assert!(matches!(
        sim.run(&mut sink),
        Err(ModelError::NumericalInstability(_))
    ));
    // only the initial snapshot went out
    assert_eq!(sink.0, 1);
}

fn rest_state(res: &GridResolution) -> InitialState {
    InitialState {
        fields: PrognosticFields::zeros(res),
        phis: Field2D::zeros(res),
    }
}

#[test]
fn test_initial_fields_must_match_grid() {
    let config = two_step_config();
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let coarse = GridResolution::new(4, 2, 1).unwrap();
    let initial = InitialState {
        fields: PrognosticFields::zeros(&coarse),
        phis: Field2D::zeros(grid.resolution()),
    };
    match Simulation::from_initial(config, grid, initial) {
        Err(ModelError::Grid(GridError::IncompatibleShape {
            what,
            expected,
            actual,
        })) => {
            assert_eq!(what, "ps");
            assert_eq!(expected, (8, 4, 1));
            assert_eq!(actual, (4, 2, 1));
        }
        other => panic!("expected shape error, got {:?}", other.err()),
    }
}

#[test]
fn test_initial_levels_must_match_grid() {
    let config = two_step_config();
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let one_level = GridResolution::new(8, 4, 1).unwrap();
    let initial = InitialState {
        fields: PrognosticFields::zeros(&one_level),
        phis: Field2D::zeros(&one_level),
    };
    match Simulation::from_initial(config, grid, initial) {
        Err(ModelError::Grid(GridError::IncompatibleShape {
            what,
            expected,
            actual,
        })) => {
            assert_eq!(what, "u");
            assert_eq!(expected, (8, 4, 2));
            assert_eq!(actual, (8, 4, 1));
        }
        other => panic!("expected shape error, got {:?}", other.err()),
    }
}

#[test]
fn test_grid_must_match_config() {
    // default config is 144x72x20
    let config = ModelConfig::default();
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let initial = rest_state(grid.resolution());
    assert!(matches!(
        Simulation::from_initial(config, grid, initial),
        Err(ModelError::Grid(GridError::IncompatibleShape { what: "grid", .. }))
    ));
}

/// Adds a constant zonal acceleration.
struct ZonalForcing(f64);

impl Diffusion for ZonalForcing {
    fn name(&self) -> &'static str {
        "zonal-forcing"
    }

    fn compute(&self, _state: &PrognosticFields, _grid: &Grid, out: DiffusionTerms<'_>) {
        out.diffu.fill(self.0);
        out.diffv.fill(0.0);
        out.difft.fill(0.0);
    }
}

#[test]
fn test_custom_diffusion_and_wind_threshold() {
    let config = two_step_config().with_duration_hours(DT / 3600.0);
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let initial = rest_state(grid.resolution());
    let mut sim = Simulation::from_initial(config, grid, initial)
        .unwrap()
        .with_trend_engine(TrendEngine::with_diffusion(Box::new(ZonalForcing(1.0))))
        .with_stability_thresholds(StabilityThresholds::default().with_max_wind(1.0e-4));

    let mut sink = MemorySink::new();
    let result = sim.run(&mut sink).unwrap();

    // one Euler step of a unit forcing from rest
    assert_eq!(sim.state().current.u[(3, 2, 1)], DT);
    assert_eq!(sim.tendencies().ut[(3, 2, 1)], 1.0);
    assert_eq!(sim.tendencies().ut[(0, 2, 1)], 0.0);
    // the wind warning does not stop the run
    assert_eq!(result.max_wind, DT / 1.0e5);

    let snapshots = sink.into_snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].u[snapshots[1].level_index(2, 1, 1)], DT / 1.0e5);
}

#[test]
fn test_surface_pressure_floor() {
    let config = two_step_config();
    let grid = Grid::new(8, 4, 2, &config.constants).unwrap();
    let initial = rest_state(grid.resolution());
    let floor = StabilityThresholds::default().with_min_surface_pressure(1.0e5);
    let mut sim = Simulation::from_initial(config, grid, initial)
        .unwrap()
        .with_stability_thresholds(floor);
    match sim.step() {
        Err(ModelError::NumericalInstability(e)) => {
            assert_eq!(e.step, 0);
            assert_eq!(e.field, "psg");
        }
        other => panic!("expected instability, got {:?}", other),
    }
}
