//! Experiment selector.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Analytic initial condition to start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Experiment {
    /// Gaussian surface-pressure depression centred at 180°E, 45°N.
    #[default]
    LowPressureAnomaly,
    /// Balanced zonal flow over a cone-shaped mountain with a warm anomaly.
    IsolatedMountainFlow,
    /// Uniformly distributed random winds on every level.
    RandomWind,
}

impl Experiment {
    /// All experiments in selector order.
    pub const ALL: [Experiment; 3] = [
        Experiment::LowPressureAnomaly,
        Experiment::IsolatedMountainFlow,
        Experiment::RandomWind,
    ];

    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowPressureAnomaly => "low-pressure-anomaly",
            Self::IsolatedMountainFlow => "isolated-mountain-flow",
            Self::RandomWind => "random-wind",
        }
    }

    /// Numeric experiment number (1-based).
    pub fn number(&self) -> u8 {
        match self {
            Self::LowPressureAnomaly => 1,
            Self::IsolatedMountainFlow => 2,
            Self::RandomWind => 3,
        }
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Experiment {
    type Err = ConfigurationError;

    /// Accepts the canonical names (case-insensitive, `_` or `-`) and the
    /// experiment numbers `1`, `2`, `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "1" | "low-pressure-anomaly" | "low-pressure" => Ok(Self::LowPressureAnomaly),
            "2" | "isolated-mountain-flow" | "mountain-flow" => Ok(Self::IsolatedMountainFlow),
            "3" | "random-wind" | "random" => Ok(Self::RandomWind),
            _ => Err(ConfigurationError::UnknownExperiment(s.to_string())),
        }
    }
}
