//! Stages 6–9: horizontal flux divergences.

use crate::field::{Field3D, for_each_interior_column};
use crate::grid::LatLonGrid;

/// Flux-form divergence of the mass-weighted wind carrying `carrier`.
///
/// ```text
/// zonal      = [(u[j+1]+u[j])(c[j+1]+c[j]) − (u[j]+u[j−1])(c[j]+c[j−1])] / (4·dx)
/// meridional = [(v·cs)[k+1]+(v·cs)[k])(c[k+1]+c[k]) − ((v·cs)[k]+(v·cs)[k−1])(c[k]+c[k−1])]
///              / (4·dy·cs[k])
/// ```
///
/// The result is `zonal + meridional`. Used for zonal momentum (`uw`),
/// meridional momentum (`vw`) and temperature (`tw`).
pub fn flux_divergence(
    u: &Field3D,
    v: &Field3D,
    carrier: &Field3D,
    grid: &LatLonGrid,
    out: &mut Field3D,
) {
    let dy = grid.dy;
    let cs = &grid.cos_lat;
    for_each_interior_column(out, |j, k, col| {
        let dx = grid.dx[k];
        let (ue, uc, uwest) = (u.column(j + 1, k), u.column(j, k), u.column(j - 1, k));
        let (vn, vc, vs) = (v.column(j, k + 1), v.column(j, k), v.column(j, k - 1));
        let (ce, cc, cwest) = (
            carrier.column(j + 1, k),
            carrier.column(j, k),
            carrier.column(j - 1, k),
        );
        let (cn, cs_) = (carrier.column(j, k + 1), carrier.column(j, k - 1));

        for l in 0..col.len() {
            let zonal = ((ue[l] + uc[l]) * (ce[l] + cc[l])
                - (uc[l] + uwest[l]) * (cc[l] + cwest[l]))
                / 4.0
                / dx;
            let meridional = ((vn[l] * cs[k + 1] + vc[l] * cs[k]) * (cn[l] + cc[l])
                - (vc[l] * cs[k] + vs[l] * cs[k - 1]) * (cc[l] + cs_[l]))
                / 4.0
                / dy
                / cs[k];
            col[l] = zonal + meridional;
        }
    });
}

/// Divergence of the mass-weighted wind (stage 9).
pub fn mass_divergence(u: &Field3D, v: &Field3D, grid: &LatLonGrid, d: &mut Field3D) {
    let dy = grid.dy;
    let cs = &grid.cos_lat;
    for_each_interior_column(d, |j, k, col| {
        let dx = grid.dx[k];
        let (ue, uwest) = (u.column(j + 1, k), u.column(j - 1, k));
        let (vn, vs) = (v.column(j, k + 1), v.column(j, k - 1));
        for l in 0..col.len() {
            col[l] = (ue[l] - uwest[l]) / 2.0 / dx
                + (vn[l] * cs[k + 1] - vs[l] * cs[k - 1]) / cs[k] / dy / 2.0;
        }
    });
}
