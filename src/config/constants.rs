//! Physical constants of the planet and atmosphere.

use crate::error::ConfigurationError;

/// Physical constants used by the grid and the trend computation.
///
/// Defaults describe Earth's atmosphere.
///
/// # Example
///
/// ```
/// use globagrim::config::PhysicalConstants;
///
/// let c = PhysicalConstants::default().with_reference_temperature(280.0);
/// assert_eq!(c.t0, 280.0);
/// assert!((c.kappa() - 287.0 / 1005.0).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Planet radius RE (m).
    pub radius: f64,
    /// Angular velocity Ω (s⁻¹).
    pub omega: f64,
    /// Gravitational acceleration G (m s⁻²).
    pub gravity: f64,
    /// Specific gas constant of dry air RD (J kg⁻¹ K⁻¹).
    pub rd: f64,
    /// Specific heat capacity at constant pressure CP (J kg⁻¹ K⁻¹).
    pub cp: f64,
    /// Reference surface pressure PS0 (Pa).
    pub ps0: f64,
    /// Reference temperature T0 (K).
    pub t0: f64,
    /// Mean air density at the surface RHOS (kg m⁻³).
    pub rho_surface: f64,
    /// Horizontal diffusion coefficient FKD (m² s⁻¹).
    pub diffusion: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::earth()
    }
}

impl PhysicalConstants {
    /// Earth values.
    pub fn earth() -> Self {
        Self {
            radius: 6.371e6,
            omega: 7.292e-5,
            gravity: 9.81,
            rd: 287.0,
            cp: 1005.0,
            ps0: 100_000.0,
            t0: 250.0,
            rho_surface: 1.3,
            diffusion: 2.0e5,
        }
    }

    /// Heat capacity ratio κ = RD / CP.
    #[inline]
    pub fn kappa(&self) -> f64 {
        self.rd / self.cp
    }

    /// Set the planet radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the rotation rate.
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Set the reference surface pressure.
    pub fn with_reference_pressure(mut self, ps0: f64) -> Self {
        self.ps0 = ps0;
        self
    }

    /// Set the reference temperature.
    pub fn with_reference_temperature(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    /// Check that every constant that appears in a denominator or a
    /// logarithm is positive and finite.
    ///
    /// Ω may be zero (non-rotating planet).
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positive = [
            ("RE", self.radius),
            ("G", self.gravity),
            ("RD", self.rd),
            ("CP", self.cp),
            ("PS0", self.ps0),
            ("T0", self.t0),
            ("RHOS", self.rho_surface),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidConstant { name, value });
            }
        }
        for (name, value) in [("OM", self.omega), ("FKD", self.diffusion)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigurationError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}
