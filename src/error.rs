//! Error types for grid construction, configuration, and time stepping.
//!
//! Grid and configuration errors are detected once at startup. Numerical
//! instability is detected after each step and carries the failing step so
//! the caller can report it before any corrupted output is written.

use thiserror::Error;

/// Invalid or incompatible grid resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The pole mapping pairs every longitude with its antipode, which needs
    /// an even number of longitudes.
    #[error("number of longitudes must be even for the antipodal pole mapping, got NJ = {nj}")]
    OddLongitudeCount { nj: usize },

    /// A grid dimension is zero.
    #[error("grid dimension {name} must be positive, got {value}")]
    ZeroDimension { name: &'static str, value: usize },

    /// A grid or field does not match the resolution it is used with.
    /// Horizontal fields report one level.
    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    IncompatibleShape {
        what: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
}

/// Invalid model configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Experiment selector did not match any known experiment.
    #[error(
        "unknown experiment '{0}' (expected low-pressure-anomaly, isolated-mountain-flow or random-wind)"
    )]
    UnknownExperiment(String),

    /// Time step must be positive and finite.
    #[error("time step DT must be positive and finite, got {0} s")]
    NonPositiveTimeStep(f64),

    /// Total simulated duration must be positive and finite.
    #[error("total duration TF must be positive and finite, got {0} h")]
    NonPositiveDuration(f64),

    /// Output interval of zero steps.
    #[error("output interval must be at least one step")]
    ZeroOutputInterval,

    /// Duration rounds to zero steps.
    #[error("duration of {duration_hours} h is shorter than half a time step of {dt} s")]
    NoSteps { duration_hours: f64, dt: f64 },

    /// A physical constant is non-positive or non-finite.
    #[error("physical constant {name} must be positive and finite, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}

/// A prognostic field became non-finite, or absolute surface pressure
/// dropped to zero or below.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("numerical instability after step {step}: {field} = {value} at (j={j}, k={k}, l={level})")]
pub struct NumericalInstabilityError {
    /// Index of the step that produced the bad value (0 = Euler step).
    pub step: usize,
    /// Name of the offending field.
    pub field: &'static str,
    /// Longitude index.
    pub j: usize,
    /// Latitude index.
    pub k: usize,
    /// Level index (0 for 2D fields).
    pub level: usize,
    /// Offending value.
    pub value: f64,
}

/// Failure while writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during file operations.
    #[error("output I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// NetCDF library error.
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// A variable expected in the output file is missing.
    #[error("missing output variable: {0}")]
    MissingVariable(String),

    /// Snapshot shape does not match the writer's grid.
    #[error("snapshot shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Any error produced while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    NumericalInstability(#[from] NumericalInstabilityError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_message() {
        let err = GridError::OddLongitudeCount { nj: 7 };
        assert!(err.to_string().contains("NJ = 7"));
    }

    #[test]
    fn test_instability_message_names_step() {
        let err = NumericalInstabilityError {
            step: 12,
            field: "ps",
            j: 3,
            k: 4,
            level: 0,
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("step 12"));
        assert!(msg.contains("ps"));
    }

    #[test]
    fn test_model_error_from() {
        let err: ModelError = ConfigurationError::ZeroOutputInterval.into();
        assert!(matches!(err, ModelError::Configuration(_)));
    }
}
