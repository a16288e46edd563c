//! East–west periodicity.

use super::{FieldKind, HaloRule};
use crate::field::{Field2D, Field3D};

/// Wraps the longitude direction: ghost column `0` mirrors column `nj`,
/// ghost column `nj + 1` mirrors column `1`. Applied to every row,
/// pole ghost rows included, so it must run after [`PolarReflection`].
///
/// [`PolarReflection`]: super::PolarReflection
#[derive(Clone, Copy, Debug, Default)]
pub struct PeriodicZonal;

impl HaloRule for PeriodicZonal {
    fn name(&self) -> &'static str {
        "periodic-zonal"
    }

    fn apply_2d(&self, field: &mut Field2D, _kind: FieldKind) {
        let (nj, nk) = (field.nj(), field.nk());
        for k in 0..nk + 2 {
            field[(0, k)] = field[(nj, k)];
            field[(nj + 1, k)] = field[(1, k)];
        }
    }

    fn apply_3d(&self, field: &mut Field3D, _kind: FieldKind) {
        let (nj, nk) = (field.nj(), field.nk());
        for k in 0..nk + 2 {
            field.copy_column((nj, k), (0, k), 1.0);
            field.copy_column((1, k), (nj + 1, k), 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridResolution;

    #[test]
    fn test_wrap_2d() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let mut f = Field2D::zeros(&res);
        for k in 1..=2 {
            for j in 1..=4 {
                f[(j, k)] = (10 * k + j) as f64;
            }
        }
        PeriodicZonal.apply_2d(&mut f, FieldKind::Scalar);
        assert_eq!(f[(0, 1)], 14.0);
        assert_eq!(f[(5, 2)], 21.0);
    }

    #[test]
    fn test_wrap_3d_keeps_sign_for_vectors() {
        let res = GridResolution::new(4, 2, 2).unwrap();
        let mut f = Field3D::zeros(&res);
        f.column_mut(4, 1).copy_from_slice(&[3.0, -3.0]);
        PeriodicZonal.apply_3d(&mut f, FieldKind::Vector);
        assert_eq!(f.column(0, 1), &[3.0, -3.0]);
    }
}
