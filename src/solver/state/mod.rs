//! Model state types.
//!
//! - [`PrognosticFields`], [`ModelState`]: surface pressure, wind and
//!   temperature at past/current/future time levels
//! - [`DiagnosticFields`]: per-step intermediate fields of the trend pipeline
//! - [`Tendencies`]: time derivatives consumed by the integrator

mod diagnostics;
mod prognostic;

pub use diagnostics::{DiagnosticFields, Tendencies};
pub use prognostic::{ModelState, PrognosticFields};
