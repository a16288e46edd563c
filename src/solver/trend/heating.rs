//! Stage 12: adiabatic compression heating.

use crate::field::{Field2D, Field3D, for_each_interior_column};
use crate::grid::LatLonGrid;
use crate::vertical::SigmaLevels;

/// Inputs of the heating term.
#[derive(Clone, Copy)]
pub struct HeatingInputs<'a> {
    pub ps: &'a Field2D,
    pub uw: &'a Field3D,
    pub vw: &'a Field3D,
    pub tw: &'a Field3D,
    pub d: &'a Field3D,
    pub dm: &'a Field3D,
    /// κ = RD / CP.
    pub kappa: f64,
    pub t0: f64,
}

/// `comp = κT·(V·∇ps) − κT·(α[l]·d[l] + (α[l] + α[l−1])·dm[l−1]/Δσ)`
/// with `T = tw + T0`.
///
/// At the top layer no mass has been integrated above, so only the
/// `α[0]·d[0]` part of the vertical term remains.
pub fn adiabatic_heating(
    inp: HeatingInputs<'_>,
    grid: &LatLonGrid,
    levels: &SigmaLevels,
    comp: &mut Field3D,
) {
    let HeatingInputs {
        ps,
        uw,
        vw,
        tw,
        d,
        dm,
        kappa,
        t0,
    } = inp;
    let alpha = levels.alpha();
    let d_sigma = levels.d_sigma();
    let dy = grid.dy;

    for_each_interior_column(comp, |j, k, col| {
        let dx = grid.dx[k];
        let dpdx = (ps[(j + 1, k)] - ps[(j - 1, k)]) / dx / 2.0;
        let dpdy = (ps[(j, k + 1)] - ps[(j, k - 1)]) / dy / 2.0;
        let (u, v, t) = (uw.column(j, k), vw.column(j, k), tw.column(j, k));
        let (dc, mc) = (d.column(j, k), dm.column(j, k));

        for l in 0..col.len() {
            let temp = kappa * (t[l] + t0);
            let vertical = if l == 0 {
                alpha[0] * dc[0]
            } else {
                alpha[l] * dc[l] + (alpha[l] + alpha[l - 1]) * mc[l - 1] / d_sigma
            };
            col[l] = temp * (u[l] * dpdx + v[l] * dpdy) - temp * vertical;
        }
    });
}
