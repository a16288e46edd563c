//! Sigma levels and the hydrostatic coefficients derived from them.
//!
//! σ = p / p_s ranges from 0 at the model top to 1 at the surface. The
//! atmosphere is split into `NL` layers of equal thickness Δσ = 1/NL; layer
//! `l = 0` is the topmost, `l = NL - 1` touches the surface.
//!
//! ```text
//!  σ = 0        ─────────────  model top
//!  σh[0]          · layer 0
//!  σ[0]         ─────────────
//!  σh[1]          · layer 1
//!   ...
//!  σ[NL-2]      ─────────────
//!  σh[NL-1]       · layer NL-1
//!  σ[NL-1] = 1  ─────────────  surface
//! ```
//!
//! Full levels σ[l] are the interfaces below each layer; half levels σh[l]
//! sit at the layer centres where the prognostic variables live.

/// Sigma levels, hydrostatic α coefficients and the reference geopotential.
#[derive(Clone, Debug, PartialEq)]
pub struct SigmaLevels {
    /// Number of layers.
    n_levels: usize,

    /// Interface below each layer, σ[l] = (l + 1) / NL; σ[NL-1] is exactly 1.
    sigma: Vec<f64>,

    /// Layer centre, σh[l] = (l + ½) / NL.
    sigma_half: Vec<f64>,

    /// Uniform layer thickness Δσ.
    d_sigma: f64,

    /// Hydrostatic coefficient α per layer.
    alpha: Vec<f64>,

    /// Geopotential of the isothermal reference atmosphere (T = T0).
    reference_geopotential: Vec<f64>,
}

impl SigmaLevels {
    /// Build `n_levels` uniform layers and integrate the reference
    /// geopotential for gas constant `rd` and reference temperature `t0`.
    pub fn new(n_levels: usize, rd: f64, t0: f64) -> Self {
        debug_assert!(n_levels > 0);
        let nl = n_levels as f64;

        let sigma: Vec<f64> = (0..n_levels).map(|l| (l + 1) as f64 / nl).collect();
        let sigma_half: Vec<f64> = (0..n_levels).map(|l| (l as f64 + 0.5) / nl).collect();
        let alpha = compute_alpha(&sigma_half);
        let reference_geopotential = integrate_reference_geopotential(&alpha, rd, t0);

        Self {
            n_levels,
            sigma,
            sigma_half,
            d_sigma: 1.0 / nl,
            alpha,
            reference_geopotential,
        }
    }

    /// Number of layers.
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// Interfaces below each layer.
    #[inline]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    /// Layer centres.
    #[inline]
    pub fn sigma_half(&self) -> &[f64] {
        &self.sigma_half
    }

    /// Layer thickness Δσ.
    #[inline]
    pub fn d_sigma(&self) -> f64 {
        self.d_sigma
    }

    /// Hydrostatic coefficients α.
    #[inline]
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Reference geopotential gp0 per layer (m² s⁻²).
    #[inline]
    pub fn reference_geopotential(&self) -> &[f64] {
        &self.reference_geopotential
    }

    /// Index of the layer adjacent to the surface.
    #[inline]
    pub fn surface_level(&self) -> usize {
        self.n_levels - 1
    }
}

/// α[l] = ½ ln(σh[l+1] / σh[l]) between neighbouring layer centres, and
/// α = ln(1 / σh) for the surface layer, whose lower boundary is σ = 1.
fn compute_alpha(sigma_half: &[f64]) -> Vec<f64> {
    let n = sigma_half.len();
    let mut alpha = vec![0.0; n];
    for l in 0..n - 1 {
        alpha[l] = 0.5 * (sigma_half[l + 1] / sigma_half[l]).ln();
    }
    alpha[n - 1] = (1.0 / sigma_half[n - 1]).ln();
    alpha
}

/// Hydrostatic integration of the isothermal reference profile, starting at
/// the surface layer and proceeding toward the top. Sequential in `l`.
fn integrate_reference_geopotential(alpha: &[f64], rd: f64, t0: f64) -> Vec<f64> {
    let n = alpha.len();
    let mut gp0 = vec![0.0; n];
    gp0[n - 1] = rd * t0 * alpha[n - 1];
    for l in (0..n - 1).rev() {
        gp0[l] = gp0[l + 1] + 2.0 * rd * t0 * alpha[l];
    }
    gp0
}

impl std::fmt::Display for SigmaLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigmaLevels({} layers, Δσ = {:.4})", self.n_levels, self.d_sigma)
    }
}
