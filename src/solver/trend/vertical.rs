//! Stages 10, 11 and 13: vertical mass flux and vertical advection.
//!
//! Recurrences run sequentially down each column; columns are independent.

use crate::field::{Field2D, Field3D, for_each_interior_column};

/// Divergence integrated from the model top down to the interface below
/// each layer: `dm[0] = d[0]·Δσ`, `dm[l] = dm[l−1] + d[l]·Δσ`.
pub fn integrate_divergence(d: &Field3D, d_sigma: f64, dm: &mut Field3D) {
    for_each_interior_column(dm, |j, k, col| {
        let dc = d.column(j, k);
        let mut acc = 0.0;
        for l in 0..col.len() {
            acc += dc[l] * d_sigma;
            col[l] = acc;
        }
    });
}

/// Sigma velocity at the interface below each layer:
/// `dsdt[l] = (σ[l]·dm[nl−1] − dm[l]) / psg`.
///
/// Vanishes at the surface because `σ[nl−1] = 1`.
pub fn sigma_velocity(dm: &Field3D, psg: &Field2D, sigma: &[f64], dsdt: &mut Field3D) {
    for_each_interior_column(dsdt, |j, k, col| {
        let m = dm.column(j, k);
        let total = m[m.len() - 1];
        let p = psg[(j, k)];
        for l in 0..col.len() {
            col[l] = (sigma[l] * total - m[l]) / p;
        }
    });
}

/// Divergence of the vertical advective flux of a mass-weighted field.
///
/// Interface values are arithmetic means of the adjacent layers. Nothing
/// crosses the model top; the surface flux is zero through `dsdt`.
pub fn vertical_flux_divergence(dsdt: &Field3D, x: &Field3D, d_sigma: f64, out: &mut Field3D) {
    for_each_interior_column(out, |j, k, col| {
        let w = dsdt.column(j, k);
        let xc = x.column(j, k);
        let bottom = col.len() - 1;
        for l in 0..col.len() {
            let lp = (l + 1).min(bottom);
            let below = w[l] * (xc[lp] + xc[l]) / 2.0;
            let above = if l == 0 {
                0.0
            } else {
                w[l - 1] * (xc[l] + xc[l - 1]) / 2.0
            };
            col[l] = (below - above) / d_sigma;
        }
    });
}
