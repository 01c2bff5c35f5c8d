//! Error types for the kiwi constraint solver.

use thiserror::Error;

/// Top-level error type for the kiwi crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KiwiError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors while building expressions from operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("Product of two non-constant expressions is not linear")]
    NonLinear,

    #[error("Divisor must be a constant expression")]
    NonConstantDivisor,
}

/// Errors raised by solver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("The constraint has already been added to the solver")]
    DuplicateConstraint,

    #[error("The constraint has not been added to the solver")]
    UnknownConstraint,

    #[error("The constraint cannot be satisfied")]
    UnsatisfiableConstraint,

    #[error("The edit variable has already been added to the solver")]
    DuplicateEditVariable,

    #[error("The edit variable has not been added to the solver")]
    UnknownEditVariable,

    #[error("A required strength cannot be used for an edit variable")]
    RequiredFailure,

    /// A tableau invariant was violated. This signals a bug in the solver.
    #[error("Internal solver error: {0}")]
    InternalSolverError(&'static str),
}
