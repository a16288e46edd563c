//! Run-time diagnostics of the model state.
//!
//! - [`StabilityMonitor`]: per-step scan for blow-up, converted into
//!   [`NumericalInstabilityError`](crate::error::NumericalInstabilityError)

mod stability;

pub use stability::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
