//! Core value types for the kiwi constraint solver.
//!
//! This crate provides:
//! - [`Variable`] and [`Term`], the unknowns and their scaled uses
//! - [`Expression`] and [`Constraint`], linear relations against zero
//! - [`Strength`], the three-tier constraint priority
//! - [`symbolics`], mixed-operand arithmetic and comparisons
//!
//! # Example
//!
//! ```
//! use kiwi_core::{symbolics, Strength, Variable};
//!
//! let x = Variable::new("x");
//! let constraint = symbolics::less_or_equal(&x + 2.0, 20.0).with_strength(Strength::WEAK);
//! assert_eq!(constraint.strength(), Strength::WEAK);
//! ```

pub mod errors;
pub mod expression;
pub mod strength;
pub mod symbolics;
pub mod types;

pub use errors::{ExpressionError, KiwiError, SolverError};
pub use expression::{Constraint, Expression, RelationalOperator};
pub use strength::Strength;
pub use symbolics::Operand;
pub use types::{Term, Variable};
