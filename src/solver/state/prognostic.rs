//! Prognostic variables and their three time levels.

use crate::field::{Field2D, Field3D};
use crate::time::Integrable;
use crate::types::GridResolution;

use super::Tendencies;

/// Prognostic variables at one time level.
///
/// Wind and temperature are mass-weighted: the stored value is the physical
/// value multiplied by the absolute surface pressure `ps + PS0`.
#[derive(Clone, Debug, PartialEq)]
pub struct PrognosticFields {
    /// Surface-pressure anomaly relative to PS0 (Pa).
    pub ps: Field2D,
    /// Mass-weighted zonal wind (Pa m s⁻¹).
    pub u: Field3D,
    /// Mass-weighted meridional wind (Pa m s⁻¹).
    pub v: Field3D,
    /// Mass-weighted temperature anomaly relative to T0 (Pa K).
    pub t: Field3D,
}

impl PrognosticFields {
    /// All-zero fields.
    pub fn zeros(res: &GridResolution) -> Self {
        Self {
            ps: Field2D::zeros(res),
            u: Field3D::zeros(res),
            v: Field3D::zeros(res),
            t: Field3D::zeros(res),
        }
    }

    /// Largest absolute interior value over all four variables.
    pub fn max_abs_interior(&self) -> f64 {
        self.ps
            .max_abs_interior()
            .max(self.u.max_abs_interior())
            .max(self.v.max_abs_interior())
            .max(self.t.max_abs_interior())
    }
}

impl Integrable for PrognosticFields {
    type Tendency = Tendencies;

    fn copy_from(&mut self, other: &Self) {
        self.ps.copy_from(&other.ps);
        self.u.copy_from(&other.u);
        self.v.copy_from(&other.v);
        self.t.copy_from(&other.t);
    }

    fn add_tendency(&mut self, c: f64, tendency: &Tendencies) {
        self.ps.axpy(c, &tendency.pst);
        self.u.axpy(c, &tendency.ut);
        self.v.axpy(c, &tendency.vt);
        self.t.axpy(c, &tendency.tt);
    }
}

/// Full model state: three time levels plus static orography.
///
/// Only the time integrator advances the levels; only the boundary
/// enforcer writes ghost cells of `current` and `phis`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelState {
    /// Level n − 1.
    pub past: PrognosticFields,
    /// Level n.
    pub current: PrognosticFields,
    /// Level n + 1 (scratch until the next rotation).
    pub future: PrognosticFields,
    /// Surface geopotential (m² s⁻²).
    pub phis: Field2D,
}

impl ModelState {
    /// All-zero state.
    pub fn zeros(res: &GridResolution) -> Self {
        Self {
            past: PrognosticFields::zeros(res),
            current: PrognosticFields::zeros(res),
            future: PrognosticFields::zeros(res),
            phis: Field2D::zeros(res),
        }
    }

    /// State whose current level is `initial`; past and future start as
    /// copies of it.
    pub fn from_initial(initial: PrognosticFields, phis: Field2D) -> Self {
        Self {
            past: initial.clone(),
            future: initial.clone(),
            current: initial,
            phis,
        }
    }

    /// `past <- current`, `current <- future`.
    ///
    /// Buffers are swapped rather than copied; afterwards `future` holds the
    /// stale past level and is overwritten by the next step.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.past, &mut self.current);
        std::mem::swap(&mut self.current, &mut self.future);
    }
}
