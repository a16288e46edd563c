//! Model configuration.
//!
//! All options have defaults and can be overridden with `with_*` builders:
//!
//! | Option | Default |
//! |---|---|
//! | NJ × NK × NL | 144 × 72 × 20 |
//! | DT | 15 s |
//! | TF | 0.25 h |
//! | output interval | 60 steps |
//! | experiment | low-pressure-anomaly |
//!
//! # Example
//!
//! ```
//! use globagrim::config::{Experiment, ModelConfig};
//!
//! let config = ModelConfig::default()
//!     .with_resolution(8, 4, 2)
//!     .with_time_step(15.0)
//!     .with_duration_hours(30.0 / 3600.0)
//!     .with_experiment(Experiment::LowPressureAnomaly);
//!
//! config.validate().unwrap();
//! assert_eq!(config.n_steps().unwrap(), 2);
//! ```

mod constants;
mod experiment;

pub use constants::PhysicalConstants;
pub use experiment::Experiment;

use crate::error::{ConfigurationError, GridError};
use crate::types::GridResolution;

/// Complete configuration of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Number of longitudes (NJ).
    pub nj: usize,
    /// Number of latitudes (NK).
    pub nk: usize,
    /// Number of sigma levels (NL).
    pub nl: usize,
    /// Time step DT in seconds.
    pub dt: f64,
    /// Total simulated duration TF in hours.
    pub duration_hours: f64,
    /// Output every this many steps (NOUT).
    pub output_interval: usize,
    /// Initial condition.
    pub experiment: Experiment,
    /// Seed for the random-wind experiment.
    pub seed: u64,
    /// Physical constants.
    pub constants: PhysicalConstants,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            nj: 144,
            nk: 72,
            nl: 20,
            dt: 15.0,
            duration_hours: 0.25,
            output_interval: 60,
            experiment: Experiment::default(),
            seed: 42,
            constants: PhysicalConstants::default(),
        }
    }
}

impl ModelConfig {
    /// Set grid resolution.
    pub fn with_resolution(mut self, nj: usize, nk: usize, nl: usize) -> Self {
        self.nj = nj;
        self.nk = nk;
        self.nl = nl;
        self
    }

    /// Set the time step in seconds.
    pub fn with_time_step(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the total simulated duration in hours.
    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Set the output interval in steps.
    pub fn with_output_interval(mut self, steps: usize) -> Self {
        self.output_interval = steps;
        self
    }

    /// Set the experiment.
    pub fn with_experiment(mut self, experiment: Experiment) -> Self {
        self.experiment = experiment;
        self
    }

    /// Set the experiment from its selector string.
    pub fn with_experiment_name(self, name: &str) -> Result<Self, ConfigurationError> {
        Ok(self.with_experiment(name.parse()?))
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set physical constants.
    pub fn with_constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Validated grid resolution.
    pub fn resolution(&self) -> Result<GridResolution, GridError> {
        GridResolution::new(self.nj, self.nk, self.nl)
    }

    /// Check time parameters and constants.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigurationError::NonPositiveTimeStep(self.dt));
        }
        if !(self.duration_hours.is_finite() && self.duration_hours > 0.0) {
            return Err(ConfigurationError::NonPositiveDuration(self.duration_hours));
        }
        if self.output_interval == 0 {
            return Err(ConfigurationError::ZeroOutputInterval);
        }
        self.constants.validate()?;
        self.n_steps().map(|_| ())
    }

    /// Number of time steps: `TF · 3600 / DT` rounded to the nearest integer.
    pub fn n_steps(&self) -> Result<usize, ConfigurationError> {
        let steps = (self.duration_hours * 3600.0 / self.dt).round();
        if !(steps.is_finite() && steps >= 1.0) {
            return Err(ConfigurationError::NoSteps {
                duration_hours: self.duration_hours,
                dt: self.dt,
            });
        }
        Ok(steps as usize)
    }

    /// Total simulated duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_hours * 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_count() {
        // 0.25 h at 15 s
        assert_eq!(ModelConfig::default().n_steps().unwrap(), 60);
    }

    #[test]
    fn test_step_count_rounds_to_nearest() {
        let config = ModelConfig::default()
            .with_time_step(7.0)
            .with_duration_hours(20.0 / 3600.0);
        assert_eq!(config.n_steps().unwrap(), 3);
    }

    #[test]
    fn test_non_positive_time_step() {
        let config = ModelConfig::default().with_time_step(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::NonPositiveTimeStep(0.0))
        );
        let config = ModelConfig::default().with_time_step(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_duration() {
        let config = ModelConfig::default().with_duration_hours(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn test_too_short_duration() {
        let config = ModelConfig::default().with_duration_hours(1.0 / 3600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::NoSteps { .. })
        ));
    }

    #[test]
    fn test_unknown_experiment_name() {
        let err = ModelConfig::default()
            .with_experiment_name("tornado")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownExperiment(_)));
    }

    #[test]
    fn test_odd_nj_is_grid_error() {
        let config = ModelConfig::default().with_resolution(9, 4, 2);
        assert_eq!(
            config.resolution(),
            Err(GridError::OddLongitudeCount { nj: 9 })
        );
    }

    #[test]
    fn test_duration_seconds() {
        assert_eq!(ModelConfig::default().duration_seconds(), 900.0);
    }

    #[test]
    fn test_constants_are_validated() {
        let low = PhysicalConstants::default().with_reference_pressure(9.0e4);
        let config = ModelConfig::default().with_constants(low);
        assert_eq!(config.constants.ps0, 9.0e4);
        assert!(config.validate().is_ok());

        let bad = PhysicalConstants::default().with_reference_pressure(0.0);
        assert!(matches!(
            ModelConfig::default().with_constants(bad).validate(),
            Err(ConfigurationError::InvalidConstant { name: "PS0", .. })
        ));
    }
}
