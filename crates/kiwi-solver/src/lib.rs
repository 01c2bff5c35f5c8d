//! Incremental linear constraint solving.
//!
//! This crate implements the Cassowary algorithm on top of the value types
//! of `kiwi-core`:
//! - required constraints are satisfied exactly
//! - weaker constraints are satisfied as well as their strength allows
//! - constraints and edit variables can be added and removed at any time
//!   without re-solving from scratch
//!
//! # Example
//!
//! ```
//! use kiwi_solver::{symbolics, Solver, Strength, Variable};
//!
//! let mut solver = Solver::new();
//! let x = Variable::new("x");
//!
//! solver.add_constraint(&symbolics::less_or_equal(&x, 100.0).with_strength(Strength::WEAK))?;
//! solver.add_constraint(&symbolics::less_or_equal(&x, 10.0))?;
//! solver.update_variables();
//! assert_eq!(x.value(), 10.0);
//!
//! solver.add_edit_variable(&x, Strength::STRONG)?;
//! solver.suggest_value(&x, 5.0)?;
//! solver.update_variables();
//! assert_eq!(x.value(), 5.0);
//! # Ok::<(), kiwi_solver::SolverError>(())
//! ```

mod options;
mod row;
mod solver;
mod symbol;
mod tag;
mod util;

pub use options::SolverOptions;
pub use solver::Solver;

pub use kiwi_core::{
    symbolics, Constraint, Expression, ExpressionError, KiwiError, Operand, RelationalOperator,
    SolverError, Strength, Term, Variable,
};
