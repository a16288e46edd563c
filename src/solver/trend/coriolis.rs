//! Stage 5: Coriolis and metric (centrifugal) terms.

use crate::field::{Field3D, for_each_interior_pair};
use crate::grid::LatLonGrid;

/// `fe = f + uw·tan φ / RE`; `acx = fe·v`, `acy = −fe·u`.
///
/// `u` and `v` are the mass-weighted winds, `uw` the true zonal wind.
pub fn coriolis_force(
    u: &Field3D,
    v: &Field3D,
    uw: &Field3D,
    grid: &LatLonGrid,
    radius: f64,
    acx: &mut Field3D,
    acy: &mut Field3D,
) {
    for_each_interior_pair(acx, acy, |j, k, ax, ay| {
        let f = grid.coriolis[k];
        let tan = grid.sin_lat[k] / grid.cos_lat[k];
        let (uc, vc, uwc) = (u.column(j, k), v.column(j, k), uw.column(j, k));
        for l in 0..ax.len() {
            let fe = f + uwc[l] * tan / radius;
            ax[l] = fe * vc[l];
            ay[l] = -fe * uc[l];
        }
    });
}
