//! Time integration methods.

mod integrator;

pub use integrator::{EulerLeapfrog, Integrable, IntegratorInfo, StepRegime, TimeIntegrator};
