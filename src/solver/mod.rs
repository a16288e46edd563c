//! Dynamical core: model state and tendency evaluation.
//!
//! # Submodules
//!
//! - [`state`]: prognostic fields at three time levels, diagnostic
//!   workspace and tendencies
//! - [`trend`]: the stage pipeline producing tendencies from the current level

pub mod state;
pub mod trend;

pub use state::{DiagnosticFields, ModelState, PrognosticFields, Tendencies};
pub use trend::{Diffusion, NoDiffusion, TrendEngine};
