//! Stability monitoring for the leapfrog integration.
//!
//! After every step the monitor scans the new current level. Non-finite
//! values and non-positive absolute surface pressure are fatal; an
//! implausibly strong wind only produces a warning.
//!
//! # Example
//!
//! ```ignore
//! use globagrim::analysis::{StabilityMonitor, StabilityThresholds};
//!
//! let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
//!
//! // In time stepping loop:
//! let status = monitor.scan(step, &state.current, constants.ps0)?;
//! for warning in &status.warnings {
//!     tracing::warn!(%warning);
//! }
//! ```

use crate::error::NumericalInstabilityError;
use crate::solver::PrognosticFields;

/// Thresholds for stability monitoring.
#[derive(Debug, Clone, Copy)]
pub struct StabilityThresholds {
    /// Wind speed above which a warning is raised (m/s).
    pub max_wind: f64,
    /// Absolute surface pressure at or below which the run stops (Pa).
    pub min_surface_pressure: f64,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            max_wind: 300.0,
            min_surface_pressure: 0.0,
        }
    }
}

impl StabilityThresholds {
    /// Set the wind warning threshold.
    pub fn with_max_wind(mut self, max_wind: f64) -> Self {
        self.max_wind = max_wind;
        self
    }

    /// Set the surface pressure floor.
    pub fn with_min_surface_pressure(mut self, pressure: f64) -> Self {
        self.min_surface_pressure = pressure;
        self
    }
}

/// Types of stability warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityWarning {
    /// NaN or infinity in a prognostic field.
    NonFiniteValue {
        field: &'static str,
        j: usize,
        k: usize,
        level: usize,
        value: f64,
    },
    /// Absolute surface pressure at or below the floor.
    SurfacePressureBelowMin {
        j: usize,
        k: usize,
        value: f64,
        threshold: f64,
    },
    /// True wind speed above the warning threshold.
    WindExceedsMax {
        j: usize,
        k: usize,
        level: usize,
        value: f64,
        threshold: f64,
    },
}

impl StabilityWarning {
    /// Whether the warning must stop the run.
    pub fn is_critical(&self) -> bool {
        !matches!(self, Self::WindExceedsMax { .. })
    }

    fn into_error(self, step: usize) -> Option<NumericalInstabilityError> {
        match self {
            Self::NonFiniteValue {
                field,
                j,
                k,
                level,
                value,
            } => Some(NumericalInstabilityError {
                step,
                field,
                j,
                k,
                level,
                value,
            }),
            Self::SurfacePressureBelowMin { j, k, value, .. } => Some(NumericalInstabilityError {
                step,
                field: "psg",
                j,
                k,
                level: 0,
                value,
            }),
            Self::WindExceedsMax { .. } => None,
        }
    }
}

impl std::fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteValue {
                field,
                j,
                k,
                level,
                value,
            } => write!(
                f,
                "Non-finite {} = {} at j={}, k={}, l={}",
                field, value, j, k, level
            ),
            Self::SurfacePressureBelowMin {
                j,
                k,
                value,
                threshold,
            } => write!(
                f,
                "Surface pressure below min: psg={:.2}Pa <= {:.2}Pa at j={}, k={}",
                value, threshold, j, k
            ),
            Self::WindExceedsMax {
                j,
                k,
                level,
                value,
                threshold,
            } => write!(
                f,
                "Wind exceeds max: |V|={:.2}m/s > {:.2}m/s at j={}, k={}, l={}",
                value, threshold, j, k, level
            ),
        }
    }
}

/// Result of one scan.
#[derive(Debug, Clone)]
pub struct StabilityStatus {
    /// Smallest absolute surface pressure (Pa).
    pub min_surface_pressure: f64,
    /// Largest true wind speed (m/s).
    pub max_wind: f64,
    /// Warnings found, critical ones first.
    pub warnings: Vec<StabilityWarning>,
}

impl StabilityStatus {
    /// Check if any warnings were generated.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if any warning must stop the run.
    pub fn has_critical_warnings(&self) -> bool {
        self.warnings.iter().any(StabilityWarning::is_critical)
    }
}

/// Monitor for tracking solution stability.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    thresholds: StabilityThresholds,
    total_checks: usize,
    total_warnings: usize,
}

impl Default for StabilityMonitor {
    fn default() -> Self {
        Self::new(StabilityThresholds::default())
    }
}

impl StabilityMonitor {
    /// Create a new stability monitor with the given thresholds.
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self {
            thresholds,
            total_checks: 0,
            total_warnings: 0,
        }
    }

    /// Get the thresholds being used.
    pub fn thresholds(&self) -> &StabilityThresholds {
        &self.thresholds
    }

    /// Get the total number of checks performed.
    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    /// Get the total number of warnings generated.
    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    /// Scan the interior of one time level.
    pub fn check(&mut self, fields: &PrognosticFields, ps0: f64) -> StabilityStatus {
        self.total_checks += 1;

        let mut critical = Vec::new();
        let mut soft = Vec::new();
        let mut min_psg = f64::INFINITY;
        let mut max_wind = 0.0_f64;

        for (j, k, value) in fields.ps.interior() {
            if !value.is_finite() {
                critical.push(StabilityWarning::NonFiniteValue {
                    field: "ps",
                    j,
                    k,
                    level: 0,
                    value,
                });
                continue;
            }
            let psg = value + ps0;
            min_psg = min_psg.min(psg);
            if psg <= self.thresholds.min_surface_pressure {
                critical.push(StabilityWarning::SurfacePressureBelowMin {
                    j,
                    k,
                    value: psg,
                    threshold: self.thresholds.min_surface_pressure,
                });
            }
        }

        for (name, field) in [("u", &fields.u), ("v", &fields.v), ("t", &fields.t)] {
            for (j, k, level, value) in field.interior() {
                if !value.is_finite() {
                    critical.push(StabilityWarning::NonFiniteValue {
                        field: name,
                        j,
                        k,
                        level,
                        value,
                    });
                }
            }
        }

        if critical.is_empty() {
            for (j, k, level, u) in fields.u.interior() {
                let psg = fields.ps[(j, k)] + ps0;
                let v = fields.v[(j, k, level)];
                let speed = (u * u + v * v).sqrt() / psg;
                max_wind = max_wind.max(speed);
                if speed > self.thresholds.max_wind {
                    soft.push(StabilityWarning::WindExceedsMax {
                        j,
                        k,
                        level,
                        value: speed,
                        threshold: self.thresholds.max_wind,
                    });
                }
            }
        }

        critical.extend(soft);
        self.total_warnings += critical.len();

        StabilityStatus {
            min_surface_pressure: min_psg,
            max_wind,
            warnings: critical,
        }
    }

    /// Scan after step `step`; the first critical warning becomes an error.
    pub fn scan(
        &mut self,
        step: usize,
        fields: &PrognosticFields,
        ps0: f64,
    ) -> Result<StabilityStatus, NumericalInstabilityError> {
        let status = self.check(fields, ps0);
        if let Some(first) = status.warnings.first()
            && first.is_critical()
            && let Some(err) = first.clone().into_error(step)
        {
            return Err(err);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridResolution;

    fn fields() -> PrognosticFields {
        PrognosticFields::zeros(&GridResolution::new(4, 2, 2).unwrap())
    }

    #[test]
    fn test_rest_state_is_stable() {
        let mut monitor = StabilityMonitor::default();
        let status = monitor.scan(0, &fields(), 1.0e5).unwrap();
        assert!(!status.has_warnings());
        assert_eq!(status.min_surface_pressure, 1.0e5);
        assert_eq!(monitor.total_checks(), 1);
    }

    #[test]
    fn test_nan_reports_step_and_cell() {
        let mut f = fields();
        f.t[(3, 2, 1)] = f64::NAN;
        let err = StabilityMonitor::default().scan(7, &f, 1.0e5).unwrap_err();
        assert_eq!(err.step, 7);
        assert_eq!(err.field, "t");
        assert_eq!((err.j, err.k, err.level), (3, 2, 1));
    }

    #[test]
    fn test_ghost_cells_ignored() {
        let mut f = fields();
        f.u[(0, 0, 0)] = f64::INFINITY;
        assert!(StabilityMonitor::default().scan(0, &f, 1.0e5).is_ok());
    }

    #[test]
    fn test_collapsed_surface_pressure() {
        let mut f = fields();
        f.ps[(2, 1)] = -1.0e5;
        let err = StabilityMonitor::default().scan(3, &f, 1.0e5).unwrap_err();
        assert_eq!(err.field, "psg");
        assert_eq!(err.value, 0.0);
    }

    #[test]
    fn test_strong_wind_is_only_a_warning() {
        let mut f = fields();
        f.u[(1, 1, 0)] = 1.0e5 * 400.0;
        let mut monitor = StabilityMonitor::default();
        let status = monitor.scan(0, &f, 1.0e5).unwrap();
        assert!(status.has_warnings());
        assert!(!status.has_critical_warnings());
        assert_eq!(status.max_wind, 400.0);
        assert_eq!(monitor.total_warnings(), 1);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = StabilityThresholds::default()
            .with_max_wind(10.0)
            .with_min_surface_pressure(5.0e4);
        let mut monitor = StabilityMonitor::new(thresholds);
        assert_eq!(monitor.thresholds().max_wind, 10.0);

        let mut f = fields();
        f.u[(2, 2, 1)] = 1.0e5 * 20.0;
        let status = monitor.scan(0, &f, 1.0e5).unwrap();
        assert!(matches!(
            status.warnings.as_slice(),
            [StabilityWarning::WindExceedsMax { threshold, .. }] if *threshold == 10.0
        ));

        f.ps[(1, 1)] = -6.0e4;
        let err = monitor.scan(1, &f, 1.0e5).unwrap_err();
        assert_eq!((err.field, err.j, err.k), ("psg", 1, 1));
        assert_eq!(err.value, 4.0e4);
    }
}
