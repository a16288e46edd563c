//! Stages 1–2: true fields and hydrostatic geopotential.
//!
//! Both stages cover every cell, halo included, because the horizontal
//! stencils of later stages read ghost values of their outputs.

use crate::field::{Field2D, Field3D, for_each_column};

/// Absolute surface pressure `psg = ps + ps0` over every cell.
pub fn absolute_pressure(ps: &Field2D, ps0: f64, psg: &mut Field2D) {
    for (out, &p) in psg.as_mut_slice().iter_mut().zip(ps.as_slice()) {
        *out = p + ps0;
    }
}

/// Divide a mass-weighted field by `psg`, column by column.
pub fn unweight(weighted: &Field3D, psg: &Field2D, out: &mut Field3D) {
    for_each_column(out, |j, k, col| {
        let p = psg[(j, k)];
        for (o, &w) in col.iter_mut().zip(weighted.column(j, k)) {
            *o = w / p;
        }
    });
}

/// Hydrostatic integration from the surface layer to the model top.
///
/// `gp[nl-1] = phis + rd·tw[nl-1]·α[nl-1]`, then
/// `gp[l] = gp[l+1] + rd·(tw[l] + tw[l+1])·α[l]`.
pub fn geopotential(tw: &Field3D, phis: &Field2D, alpha: &[f64], rd: f64, gp: &mut Field3D) {
    let nl = alpha.len();
    for_each_column(gp, |j, k, col| {
        let t = tw.column(j, k);
        let bottom = nl - 1;
        col[bottom] = phis[(j, k)] + rd * t[bottom] * alpha[bottom];
        for l in (0..bottom).rev() {
            col[l] = col[l + 1] + rd * (t[l] + t[l + 1]) * alpha[l];
        }
    });
}
