//! Summation of the stage outputs into tendencies.

use crate::field::{Field3D, for_each_interior_cell, for_each_interior_column};
use crate::solver::{DiagnosticFields, Tendencies};

/// `ut = acx + apx − du − vdivu + diffu`
/// `vt = acy + apy − dv − vdivv + diffv`
/// `tt = −dvt + comp − vdivt + difft`
/// `pst = −dm[nl−1]`
pub fn assemble(diag: &DiagnosticFields, out: &mut Tendencies) {
    momentum(&diag.acx, &diag.apx, &diag.du, &diag.vdivu, &diag.diffu, &mut out.ut);
    momentum(&diag.acy, &diag.apy, &diag.dv, &diag.vdivv, &diag.diffv, &mut out.vt);

    let (dvt, comp, vdivt, difft) = (&diag.dvt, &diag.comp, &diag.vdivt, &diag.difft);
    for_each_interior_column(&mut out.tt, |j, k, col| {
        let (a, c, v, f) = (
            dvt.column(j, k),
            comp.column(j, k),
            vdivt.column(j, k),
            difft.column(j, k),
        );
        for l in 0..col.len() {
            col[l] = -a[l] + c[l] - v[l] + f[l];
        }
    });

    let dm = &diag.dm;
    for_each_interior_cell(&mut out.pst, |j, k| {
        let m = dm.column(j, k);
        -m[m.len() - 1]
    });
}

fn momentum(
    coriolis: &Field3D,
    pressure: &Field3D,
    horizontal: &Field3D,
    vertical: &Field3D,
    diffusion: &Field3D,
    out: &mut Field3D,
) {
    for_each_interior_column(out, |j, k, col| {
        let (c, p, h, v, d) = (
            coriolis.column(j, k),
            pressure.column(j, k),
            horizontal.column(j, k),
            vertical.column(j, k),
            diffusion.column(j, k),
        );
        for l in 0..col.len() {
            col[l] = c[l] + p[l] - h[l] - v[l] + d[l];
        }
    });
}
