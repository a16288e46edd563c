use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::InitialCondition;
use crate::config::PhysicalConstants;
use crate::field::Field2D;
use crate::grid::Grid;
use crate::solver::PrognosticFields;

/// Uncorrelated random wind, uniform in `[−amplitude, amplitude)` m/s.
///
/// Reproducible for a given seed.
#[derive(Clone, Copy, Debug)]
pub struct RandomWind {
    pub seed: u64,
    /// Maximum true wind speed per component (m/s).
    pub amplitude: f64,
}

impl RandomWind {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            amplitude: 30.0,
        }
    }
}

impl InitialCondition for RandomWind {
    fn name(&self) -> &'static str {
        "random-wind"
    }

    fn fill(
        &self,
        grid: &Grid,
        c: &PhysicalConstants,
        fields: &mut PrognosticFields,
        _phis: &mut Field2D,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let scale = self.amplitude * c.ps0;
        for wind in [&mut fields.u, &mut fields.v] {
            for k in 1..=grid.nk() {
                for j in 1..=grid.nj() {
                    for x in wind.column_mut(j, k) {
                        *x = rng.random_range(-1.0_f64..1.0) * scale;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::initialize;

    #[test]
    fn test_seeded_and_bounded() {
        let c = PhysicalConstants::default();
        let grid = Grid::new(8, 4, 3, &c).unwrap();
        let a = initialize(&RandomWind::new(42), &grid, &c);
        let b = initialize(&RandomWind::new(42), &grid, &c);
        let other = initialize(&RandomWind::new(43), &grid, &c);

        assert_eq!(a.fields, b.fields);
        assert_ne!(a.fields.u, other.fields.u);
        assert!(a.fields.u.max_abs_interior() <= 30.0 * c.ps0);
        assert!(a.fields.v.max_abs_interior() > 0.0);
        assert_eq!(a.fields.ps.max_abs_interior(), 0.0);
    }
}
