//! Trait-based time integrator abstraction.
//!
//! The model advances three time levels: a single forward-Euler start-up
//! step, then leapfrog steps centred on the current level.
//!
//! ```text
//! Euler:     x(n+1) = x(n)   +  Δt · F(x(n))
//! Leapfrog:  x(n+1) = x(n−1) + 2Δt · F(x(n))
//! ```
//!
//! No time filter is applied, so the computational mode of leapfrog is
//! left undamped.

// =============================================================================
// Integrable Trait
// =============================================================================

/// Solution types that can be advanced by a tendency.
pub trait Integrable: Clone + Send + Sized {
    /// Type of the time derivative produced by the trend evaluator.
    type Tendency;

    /// Overwrite `self` with the values of `other` (same shape).
    fn copy_from(&mut self, other: &Self);

    /// `self <- self + c * tendency`
    fn add_tendency(&mut self, c: f64, tendency: &Self::Tendency);
}

// =============================================================================
// IntegratorInfo Trait (non-generic, dyn-compatible)
// =============================================================================

/// Non-generic information about a time integrator.
pub trait IntegratorInfo: Send + Sync {
    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Order of accuracy of the integrator.
    fn order(&self) -> usize;

    /// Number of past time levels the scheme reads.
    fn n_levels(&self) -> usize;
}

// =============================================================================
// Step regime
// =============================================================================

/// Which update formula a given step uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepRegime {
    /// First step: no valid past level yet.
    Euler,
    /// All later steps.
    Leapfrog,
}

impl StepRegime {
    /// Regime of step number `step` (0-based).
    pub fn for_step(step: usize) -> Self {
        if step == 0 {
            StepRegime::Euler
        } else {
            StepRegime::Leapfrog
        }
    }

    /// Multiplier of the tendency for time step `dt`.
    #[inline]
    pub fn factor(self, dt: f64) -> f64 {
        match self {
            StepRegime::Euler => dt,
            StepRegime::Leapfrog => 2.0 * dt,
        }
    }
}

impl std::fmt::Display for StepRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepRegime::Euler => write!(f, "euler"),
            StepRegime::Leapfrog => write!(f, "leapfrog"),
        }
    }
}

// =============================================================================
// TimeIntegrator Trait
// =============================================================================

/// Explicit three-level integrator.
///
/// The tendency is evaluated by the caller at the current level; the
/// integrator only combines levels.
pub trait TimeIntegrator<S: Integrable>: IntegratorInfo {
    /// Write level n+1 into `future`.
    fn advance(
        &self,
        regime: StepRegime,
        past: &S,
        current: &S,
        future: &mut S,
        dt: f64,
        tendency: &S::Tendency,
    );
}

// =============================================================================
// Euler start, leapfrog afterwards
// =============================================================================

/// Forward Euler on the first step, leapfrog on every later step.
#[derive(Clone, Copy, Debug, Default)]
pub struct EulerLeapfrog;

impl IntegratorInfo for EulerLeapfrog {
    fn name(&self) -> &'static str {
        "euler-leapfrog"
    }

    fn order(&self) -> usize {
        2
    }

    fn n_levels(&self) -> usize {
        3
    }
}

impl<S: Integrable> TimeIntegrator<S> for EulerLeapfrog {
    fn advance(
        &self,
        regime: StepRegime,
        past: &S,
        current: &S,
        future: &mut S,
        dt: f64,
        tendency: &S::Tendency,
    ) {
        let base = match regime {
            StepRegime::Euler => current,
            StepRegime::Leapfrog => past,
        };
        future.copy_from(base);
        future.add_tendency(regime.factor(dt), tendency);
    }
}
