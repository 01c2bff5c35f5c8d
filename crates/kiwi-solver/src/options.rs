//! Solver configuration.

/// Options for a [`Solver`](crate::Solver).
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Maximum number of pivots in a single optimization pass. `None` leaves
    /// the simplex loops unbounded.
    pub max_iterations: Option<usize>,
}

impl SolverOptions {
    /// Options with a pivot ceiling.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations: Some(max_iterations),
        }
    }
}
