//! Halo filling for the global longitude–latitude grid.
//!
//! Ghost cells are the only place where neighbouring interior values are
//! duplicated; stencils in the trend pipeline read them and never write them.
//!
//! # Rules
//!
//! | Rule | Ghost cells | Source |
//! |------|-------------|--------|
//! | `PolarReflection` | rows `0` and `nk + 1`, `j in 1..=nj` | row `1` / `nk` at the antipodal longitude |
//! | `PeriodicZonal` | columns `0` and `nj + 1`, every row | columns `nj` / `1` |
//!
//! # Parity
//!
//! Crossing a pole reverses the local east and north directions, so the
//! wind components change sign while scalars are copied unchanged:
//!
//! | Field | Kind | Pole sign |
//! |-------|------|-----------|
//! | `ps`, `phis`, `t` | Scalar | +1 |
//! | `u`, `v` | Vector | −1 |
//!
//! # Order
//!
//! The pole rule runs first and only touches interior longitudes; the
//! periodic rule then fills the ghost columns of every row, which also
//! completes the four corner cells. The result is idempotent.
//!
//! ```ignore
//! let enforcer = BoundaryEnforcer::new();
//! enforcer.apply(&mut state.current, &mut state.phis);
//! ```

mod periodic;
mod polar;

pub use periodic::PeriodicZonal;
pub use polar::{PolarReflection, antipode};

use crate::field::{Field2D, Field3D};
use crate::solver::PrognosticFields;

/// Transformation behaviour of a field across the poles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Copied unchanged.
    Scalar,
    /// Negated.
    Vector,
}

impl FieldKind {
    /// Factor applied when reflecting across a pole.
    #[inline]
    pub fn pole_sign(self) -> f64 {
        match self {
            FieldKind::Scalar => 1.0,
            FieldKind::Vector => -1.0,
        }
    }
}

/// A rule that fills some subset of the ghost cells from interior values.
pub trait HaloRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fill ghost cells of a horizontal field.
    fn apply_2d(&self, field: &mut Field2D, kind: FieldKind);

    /// Fill ghost cells of every level of a column field.
    fn apply_3d(&self, field: &mut Field3D, kind: FieldKind);
}

/// Applies the pole rule followed by the periodic rule to a whole state.
pub struct BoundaryEnforcer {
    rules: Vec<Box<dyn HaloRule>>,
}

impl Default for BoundaryEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryEnforcer {
    /// Standard global enforcer: poles, then longitude wrap.
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(PolarReflection), Box::new(PeriodicZonal)],
        }
    }

    /// Names of the rules in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Fill all ghost cells of `fields` and of the orography `phis`.
    pub fn apply(&self, fields: &mut PrognosticFields, phis: &mut Field2D) {
        for rule in &self.rules {
            rule.apply_2d(&mut fields.ps, FieldKind::Scalar);
            rule.apply_2d(phis, FieldKind::Scalar);
            rule.apply_3d(&mut fields.u, FieldKind::Vector);
            rule.apply_3d(&mut fields.v, FieldKind::Vector);
            rule.apply_3d(&mut fields.t, FieldKind::Scalar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridResolution;

    fn filled(res: &GridResolution) -> (PrognosticFields, Field2D) {
        let mut fields = PrognosticFields::zeros(res);
        let mut phis = Field2D::zeros(res);
        for k in 1..=res.nk() {
            for j in 1..=res.nj() {
                let base = (100 * k + j) as f64;
                fields.ps[(j, k)] = base;
                phis[(j, k)] = -base;
                for l in 0..res.nl() {
                    fields.u[(j, k, l)] = base + 0.1 * l as f64;
                    fields.v[(j, k, l)] = base - 0.1 * l as f64;
                    fields.t[(j, k, l)] = 2.0 * base + l as f64;
                }
            }
        }
        (fields, phis)
    }

    #[test]
    fn test_rule_order() {
        let enforcer = BoundaryEnforcer::new();
        assert_eq!(
            enforcer.rule_names(),
            vec!["polar-reflection", "periodic-zonal"]
        );
    }

    #[test]
    fn test_periodic_and_polar() {
        let res = GridResolution::new(8, 4, 2).unwrap();
        let (mut fields, mut phis) = filled(&res);
        BoundaryEnforcer::new().apply(&mut fields, &mut phis);

        for k in 0..=5 {
            assert_eq!(fields.ps[(0, k)], fields.ps[(8, k)]);
            assert_eq!(fields.ps[(9, k)], fields.ps[(1, k)]);
            for l in 0..2 {
                assert_eq!(fields.u[(0, k, l)], fields.u[(8, k, l)]);
                assert_eq!(fields.t[(9, k, l)], fields.t[(1, k, l)]);
            }
        }
        for j in 1..=8 {
            let jo = antipode(j, 8);
            assert_eq!(fields.ps[(j, 0)], fields.ps[(jo, 1)]);
            assert_eq!(phis[(j, 5)], phis[(jo, 4)]);
            for l in 0..2 {
                assert_eq!(fields.u[(j, 0, l)], -fields.u[(jo, 1, l)]);
                assert_eq!(fields.v[(j, 5, l)], -fields.v[(jo, 4, l)]);
                assert_eq!(fields.t[(j, 0, l)], fields.t[(jo, 1, l)]);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let res = GridResolution::new(8, 4, 3).unwrap();
        let (mut fields, mut phis) = filled(&res);
        let enforcer = BoundaryEnforcer::new();
        enforcer.apply(&mut fields, &mut phis);
        let once = (fields.clone(), phis.clone());
        enforcer.apply(&mut fields, &mut phis);
        assert_eq!(fields, once.0);
        assert_eq!(phis, once.1);
    }

    #[test]
    fn test_interior_untouched() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let (mut fields, mut phis) = filled(&res);
        let before = fields.clone();
        BoundaryEnforcer::new().apply(&mut fields, &mut phis);
        for k in 1..=2 {
            for j in 1..=4 {
                assert_eq!(fields.ps[(j, k)], before.ps[(j, k)]);
                assert_eq!(fields.u[(j, k, 0)], before.u[(j, k, 0)]);
            }
        }
    }
}
