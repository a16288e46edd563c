//! Horizontal diffusion slot.
//!
//! The assembly adds `diffu`, `diffv` and `difft` to the tendencies. The
//! default operator contributes nothing.

use crate::field::Field3D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// Diffusion outputs written by a [`Diffusion`] operator.
pub struct DiffusionTerms<'a> {
    pub diffu: &'a mut Field3D,
    pub diffv: &'a mut Field3D,
    pub difft: &'a mut Field3D,
}

/// A horizontal diffusion operator.
pub trait Diffusion: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Write the diffusion of the mass-weighted fields.
    fn compute(&self, state: &PrognosticFields, grid: &Grid, out: DiffusionTerms<'_>);
}

/// Zero diffusion.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiffusion;

impl Diffusion for NoDiffusion {
    fn name(&self) -> &'static str {
        "none"
    }

    fn compute(&self, _state: &PrognosticFields, _grid: &Grid, out: DiffusionTerms<'_>) {
        out.diffu.fill(0.0);
        out.diffv.fill(0.0);
        out.difft.fill(0.0);
    }
}
