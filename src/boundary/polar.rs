//! Pole condition: reflection through the antipodal meridian.

use super::{FieldKind, HaloRule};
use crate::field::{Field2D, Field3D};

/// Antipodal longitude index on the interior range `1..=nj`.
///
/// `nj` must be even.
#[inline]
pub fn antipode(j: usize, nj: usize) -> usize {
    let jo = j + nj / 2;
    if jo > nj { jo - nj } else { jo }
}

/// Fills the ghost rows beyond each pole.
///
/// A ghost point just past the south pole at longitude λ is the interior
/// point of the first row at λ + 180°. Scalars are copied; both wind
/// components change sign because the local east and north directions
/// reverse when the pole is crossed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolarReflection;

impl HaloRule for PolarReflection {
    fn name(&self) -> &'static str {
        "polar-reflection"
    }

    fn apply_2d(&self, field: &mut Field2D, kind: FieldKind) {
        let (nj, nk) = (field.nj(), field.nk());
        let sign = kind.pole_sign();
        for j in 1..=nj {
            let jo = antipode(j, nj);
            field[(j, 0)] = sign * field[(jo, 1)];
            field[(j, nk + 1)] = sign * field[(jo, nk)];
        }
    }

    fn apply_3d(&self, field: &mut Field3D, kind: FieldKind) {
        let (nj, nk) = (field.nj(), field.nk());
        let sign = kind.pole_sign();
        for j in 1..=nj {
            let jo = antipode(j, nj);
            field.copy_column((jo, 1), (j, 0), sign);
            field.copy_column((jo, nk), (j, nk + 1), sign);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridResolution;

    #[test]
    fn test_antipode_wraps() {
        assert_eq!(antipode(1, 8), 5);
        assert_eq!(antipode(4, 8), 8);
        assert_eq!(antipode(5, 8), 1);
        assert_eq!(antipode(8, 8), 4);
    }

    #[test]
    fn test_antipode_is_involution() {
        for j in 1..=12 {
            assert_eq!(antipode(antipode(j, 12), 12), j);
        }
    }

    #[test]
    fn test_vector_sign_flip() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let mut f = Field3D::zeros(&res);
        for j in 1..=4 {
            f[(j, 1, 0)] = j as f64;
            f[(j, 2, 0)] = 10.0 * j as f64;
        }
        PolarReflection.apply_3d(&mut f, FieldKind::Vector);
        assert_eq!(f[(1, 0, 0)], -3.0);
        assert_eq!(f[(3, 0, 0)], -1.0);
        assert_eq!(f[(2, 3, 0)], -40.0);
    }

    #[test]
    fn test_scalar_copy() {
        let res = GridResolution::new(4, 2, 1).unwrap();
        let mut f = Field2D::zeros(&res);
        f[(4, 1)] = 7.0;
        PolarReflection.apply_2d(&mut f, FieldKind::Scalar);
        assert_eq!(f[(2, 0)], 7.0);
    }
}
