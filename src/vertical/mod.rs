//! Vertical sigma coordinate.
//!
//! The model uses σ = p / p_s with uniform layers. Besides the level
//! positions this module precomputes the two hydrostatic quantities the
//! trend computation needs every step:
//!
//! - α, the per-layer log-pressure coefficient
//! - gp0, the geopotential of an isothermal reference atmosphere
//!
//! # Example
//!
//! ```
//! use globagrim::vertical::SigmaLevels;
//!
//! let levels = SigmaLevels::new(20, 287.0, 250.0);
//! assert_eq!(levels.n_levels(), 20);
//! assert_eq!(levels.sigma()[19], 1.0);
//! assert!((levels.d_sigma() - 0.05).abs() < 1e-15);
//! ```

mod sigma;

pub use sigma::SigmaLevels;
