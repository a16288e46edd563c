//! Tendency evaluation for the primitive equations in sigma coordinates.
//!
//! The engine runs a fixed sequence of stages over the current time level.
//! Each stage is a free function with borrowed inputs and one (or two)
//! exclusively borrowed outputs from the diagnostic workspace.
//!
//! # Stages
//!
//! | # | Stage | Output | Cells |
//! |---|-------|--------|-------|
//! | 1 | true fields | `psg`, `uw`, `vw`, `tw` | all |
//! | 2 | geopotential | `gp` | all |
//! | 3–4 | pressure gradient | `apx`, `apy` | interior |
//! | 5 | Coriolis + metric | `acx`, `acy` | interior |
//! | 6–8 | horizontal flux divergence | `du`, `dv`, `dvt` | interior |
//! | 9 | mass divergence | `d` | interior |
//! | 10 | integrated divergence | `dm` | interior |
//! | 11 | sigma velocity | `dsdt` | interior |
//! | 12 | compression heating | `comp` | interior |
//! | 13 | vertical flux divergence | `vdivu`, `vdivv`, `vdivt` | interior |
//! | – | diffusion | `diffu`, `diffv`, `difft` | operator-defined |
//! | – | assembly | `ut`, `vt`, `tt`, `pst` | interior |
//!
//! Ghost cells of the tendencies are never written.

mod assemble;
mod coriolis;
mod diffusion;
mod flux;
mod heating;
mod pressure;
mod thermo;
mod vertical;

pub use assemble::assemble;
pub use coriolis::coriolis_force;
pub use diffusion::{Diffusion, DiffusionTerms, NoDiffusion};
pub use flux::{flux_divergence, mass_divergence};
pub use heating::{HeatingInputs, adiabatic_heating};
pub use pressure::{PressureInputs, meridional_pressure_gradient, zonal_pressure_gradient};
pub use thermo::{absolute_pressure, geopotential, unweight};
pub use vertical::{integrate_divergence, sigma_velocity, vertical_flux_divergence};

use crate::config::PhysicalConstants;
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::{DiagnosticFields, PrognosticFields, Tendencies};

/// Runs the stage pipeline.
pub struct TrendEngine {
    diffusion: Box<dyn Diffusion>,
}

impl Default for TrendEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendEngine {
    /// Engine without diffusion.
    pub fn new() -> Self {
        Self {
            diffusion: Box::new(NoDiffusion),
        }
    }

    /// Engine with a custom diffusion operator.
    pub fn with_diffusion(diffusion: Box<dyn Diffusion>) -> Self {
        Self { diffusion }
    }

    /// Name of the diffusion operator.
    pub fn diffusion_name(&self) -> &'static str {
        self.diffusion.name()
    }

    /// Compute tendencies of `state`.
    ///
    /// `state` and `phis` must have their ghost cells filled.
    pub fn evaluate(
        &self,
        state: &PrognosticFields,
        phis: &Field2D,
        grid: &Grid,
        constants: &PhysicalConstants,
        diag: &mut DiagnosticFields,
        out: &mut Tendencies,
    ) {
        let horizontal = grid.horizontal();
        let levels = grid.levels();
        let PrognosticFields { ps, u, v, t } = state;

        {
            let DiagnosticFields {
                psg,
                uw,
                vw,
                tw,
                gp,
                apx,
                apy,
                acx,
                acy,
                du,
                dv,
                dvt,
                d,
                dm,
                dsdt,
                comp,
                vdivu,
                vdivv,
                vdivt,
                diffu,
                diffv,
                difft,
            } = diag;

            absolute_pressure(ps, constants.ps0, psg);
            unweight(u, psg, uw);
            unweight(v, psg, vw);
            unweight(t, psg, tw);

            geopotential(tw, phis, levels.alpha(), constants.rd, gp);

            let pressure = PressureInputs {
                ps,
                psg,
                tw,
                gp,
                rd: constants.rd,
                t0: constants.t0,
            };
            zonal_pressure_gradient(pressure, horizontal, apx);
            meridional_pressure_gradient(pressure, horizontal, apy);

            coriolis_force(u, v, uw, horizontal, constants.radius, acx, acy);

            flux_divergence(u, v, uw, horizontal, du);
            flux_divergence(u, v, vw, horizontal, dv);
            flux_divergence(u, v, tw, horizontal, dvt);

            mass_divergence(u, v, horizontal, d);
            integrate_divergence(d, levels.d_sigma(), dm);
            sigma_velocity(dm, psg, levels.sigma(), dsdt);

            let heating = HeatingInputs {
                ps,
                uw,
                vw,
                tw,
                d,
                dm,
                kappa: constants.kappa(),
                t0: constants.t0,
            };
            adiabatic_heating(heating, horizontal, levels, comp);

            vertical_flux_divergence(dsdt, u, levels.d_sigma(), vdivu);
            vertical_flux_divergence(dsdt, v, levels.d_sigma(), vdivv);
            vertical_flux_divergence(dsdt, t, levels.d_sigma(), vdivt);

            self.diffusion.compute(
                state,
                grid,
                DiffusionTerms {
                    diffu,
                    diffv,
                    difft,
                },
            );
        }

        assemble(diag, out);
    }
}
