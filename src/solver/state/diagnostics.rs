//! Per-step diagnostic workspace and tendency output.

use crate::field::{Field2D, Field3D};
use crate::types::GridResolution;

/// Intermediate fields of one trend evaluation.
///
/// Recomputed from scratch every step; nothing carries over between steps.
/// Each field is written by exactly one stage.
#[derive(Clone, Debug)]
pub struct DiagnosticFields {
    /// Absolute surface pressure `ps + PS0` (Pa).
    pub psg: Field2D,
    /// True zonal wind (m s⁻¹).
    pub uw: Field3D,
    /// True meridional wind (m s⁻¹).
    pub vw: Field3D,
    /// True temperature anomaly (K).
    pub tw: Field3D,
    /// Geopotential (m² s⁻²).
    pub gp: Field3D,
    /// Zonal pressure-gradient force.
    pub apx: Field3D,
    /// Meridional pressure-gradient force.
    pub apy: Field3D,
    /// Zonal Coriolis and curvature force.
    pub acx: Field3D,
    /// Meridional Coriolis and curvature force.
    pub acy: Field3D,
    /// Horizontal flux divergence of zonal momentum.
    pub du: Field3D,
    /// Horizontal flux divergence of meridional momentum.
    pub dv: Field3D,
    /// Horizontal flux divergence of temperature.
    pub dvt: Field3D,
    /// Divergence of the mass-weighted wind.
    pub d: Field3D,
    /// Divergence integrated from the model top down to each interface.
    pub dm: Field3D,
    /// Sigma vertical velocity at the interface below each layer (s⁻¹).
    pub dsdt: Field3D,
    /// Adiabatic compression heating.
    pub comp: Field3D,
    /// Vertical flux divergence of zonal momentum.
    pub vdivu: Field3D,
    /// Vertical flux divergence of meridional momentum.
    pub vdivv: Field3D,
    /// Vertical flux divergence of temperature.
    pub vdivt: Field3D,
    /// Diffusion of zonal momentum.
    pub diffu: Field3D,
    /// Diffusion of meridional momentum.
    pub diffv: Field3D,
    /// Diffusion of temperature.
    pub difft: Field3D,
}

impl DiagnosticFields {
    /// Zero-initialized workspace.
    pub fn zeros(res: &GridResolution) -> Self {
        let f3 = || Field3D::zeros(res);
        Self {
            psg: Field2D::zeros(res),
            uw: f3(),
            vw: f3(),
            tw: f3(),
            gp: f3(),
            apx: f3(),
            apy: f3(),
            acx: f3(),
            acy: f3(),
            du: f3(),
            dv: f3(),
            dvt: f3(),
            d: f3(),
            dm: f3(),
            dsdt: f3(),
            comp: f3(),
            vdivu: f3(),
            vdivv: f3(),
            vdivt: f3(),
            diffu: f3(),
            diffv: f3(),
            difft: f3(),
        }
    }
}

/// Time tendencies of the prognostic variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Tendencies {
    /// ∂ps/∂t.
    pub pst: Field2D,
    /// ∂u/∂t (mass-weighted).
    pub ut: Field3D,
    /// ∂v/∂t (mass-weighted).
    pub vt: Field3D,
    /// ∂t/∂t (mass-weighted).
    pub tt: Field3D,
}

impl Tendencies {
    /// All-zero tendencies.
    pub fn zeros(res: &GridResolution) -> Self {
        Self {
            pst: Field2D::zeros(res),
            ut: Field3D::zeros(res),
            vt: Field3D::zeros(res),
            tt: Field3D::zeros(res),
        }
    }

    /// Largest absolute interior tendency.
    pub fn max_abs_interior(&self) -> f64 {
        self.pst
            .max_abs_interior()
            .max(self.ut.max_abs_interior())
            .max(self.vt.max_abs_interior())
            .max(self.tt.max_abs_interior())
    }

    /// True if every cell, halo included, is exactly zero.
    pub fn is_exactly_zero(&self) -> bool {
        self.pst.as_slice().iter().all(|&v| v == 0.0)
            && self.ut.as_slice().iter().all(|&v| v == 0.0)
            && self.vt.as_slice().iter().all(|&v| v == 0.0)
            && self.tt.as_slice().iter().all(|&v| v == 0.0)
    }
}
