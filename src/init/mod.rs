//! Analytic initial conditions.
//!
//! Each experiment fills the interior cells of a zeroed state; ghost cells
//! are left for the boundary enforcer.
//!
//! | Experiment | Fields set |
//! |------------|------------|
//! | `LowPressureAnomaly` | `ps` |
//! | `IsolatedMountain` | `phis`, `ps`, `u`, `t` |
//! | `RandomWind` | `u`, `v` |

mod low_pressure;
mod mountain;
mod random_wind;

pub use low_pressure::LowPressureAnomaly;
pub use mountain::IsolatedMountain;
pub use random_wind::RandomWind;

use crate::config::{Experiment, PhysicalConstants};
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// An initial condition for the prognostic fields and orography.
pub trait InitialCondition: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Write interior values of `fields` and `phis`.
    fn fill(
        &self,
        grid: &Grid,
        constants: &PhysicalConstants,
        fields: &mut PrognosticFields,
        phis: &mut Field2D,
    );
}

/// Initial fields produced by an experiment.
#[derive(Clone, Debug)]
pub struct InitialState {
    pub fields: PrognosticFields,
    pub phis: Field2D,
}

/// Initial condition for `experiment`; `seed` is used by random experiments.
pub fn initial_condition(experiment: Experiment, seed: u64) -> Box<dyn InitialCondition> {
    match experiment {
        Experiment::LowPressureAnomaly => Box::new(LowPressureAnomaly::default()),
        Experiment::IsolatedMountainFlow => Box::new(IsolatedMountain::default()),
        Experiment::RandomWind => Box::new(RandomWind::new(seed)),
    }
}

/// Build the initial state on a fresh zeroed grid.
pub fn initialize(
    condition: &dyn InitialCondition,
    grid: &Grid,
    constants: &PhysicalConstants,
) -> InitialState {
    let res = grid.resolution();
    let mut fields = PrognosticFields::zeros(res);
    let mut phis = Field2D::zeros(res);
    condition.fill(grid, constants, &mut fields, &mut phis);
    InitialState { fields, phis }
}
