//! Edit variables and suggested values.

use kiwi_solver::{symbolics, Solver, SolverError, Strength, Variable};

const EPSILON: f64 = 1.0e-8;

fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_suggest_free_variable() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    solver.add_edit_variable(&x, Strength::STRONG).unwrap();
    assert!(solver.has_edit_variable(&x));

    solver.suggest_value(&x, 10.0).unwrap();
    solver.update_variables();
    assert_near(x.value(), 10.0);

    solver.suggest_value(&x, -4.5).unwrap();
    solver.update_variables();
    assert_near(x.value(), -4.5);
}

#[test]
fn test_suggest_is_clamped_by_required_bound() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    solver.add_constraint(&symbolics::less_or_equal(&x, 15.0)).unwrap();
    solver.add_edit_variable(&x, Strength::STRONG).unwrap();

    solver.suggest_value(&x, 20.0).unwrap();
    solver.update_variables();
    assert_near(x.value(), 15.0);

    solver.suggest_value(&x, 10.0).unwrap();
    solver.update_variables();
    assert_near(x.value(), 10.0);
}

#[test]
fn test_suggest_moves_dependent_variables() {
    let mut solver = Solver::new();
    let left = Variable::new("left");
    let right = Variable::new("right");

    solver
        .add_constraint(&symbolics::equal(&right, &left + 100.0))
        .unwrap();
    solver.add_edit_variable(&left, Strength::STRONG).unwrap();

    solver.suggest_value(&left, 50.0).unwrap();
    solver.update_variables();
    assert_near(left.value(), 50.0);
    assert_near(right.value(), 150.0);

    // A required bound on the dependent side wins over the suggestion.
    solver
        .add_constraint(&symbolics::less_or_equal(&right, 120.0))
        .unwrap();
    solver.update_variables();
    assert_near(left.value(), 20.0);
    assert_near(right.value(), 120.0);

    solver.suggest_value(&left, 10.0).unwrap();
    solver.update_variables();
    assert_near(left.value(), 10.0);
    assert_near(right.value(), 110.0);
}

#[test]
fn test_stronger_edit_wins() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    solver
        .add_constraint(&symbolics::equal(&x, 40.0).with_strength(Strength::MEDIUM))
        .unwrap();
    solver.add_edit_variable(&x, Strength::STRONG).unwrap();
    solver.suggest_value(&x, 75.0).unwrap();
    solver.update_variables();
    assert_near(x.value(), 75.0);

    solver.remove_edit_variable(&x).unwrap();
    solver.update_variables();
    assert_near(x.value(), 40.0);
}

#[test]
fn test_remove_edit_variable() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    solver.add_edit_variable(&x, Strength::MEDIUM).unwrap();
    solver.remove_edit_variable(&x).unwrap();
    assert!(!solver.has_edit_variable(&x));

    assert_eq!(
        solver.suggest_value(&x, 1.0),
        Err(SolverError::UnknownEditVariable)
    );

    // The variable can be made editable again.
    solver.add_edit_variable(&x, Strength::WEAK).unwrap();
    solver.suggest_value(&x, 3.0).unwrap();
    solver.update_variables();
    assert_near(x.value(), 3.0);
}

#[test]
fn test_edit_errors() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    assert_eq!(
        solver.remove_edit_variable(&x),
        Err(SolverError::UnknownEditVariable)
    );
    assert_eq!(
        solver.suggest_value(&x, 1.0),
        Err(SolverError::UnknownEditVariable)
    );
    assert_eq!(
        solver.add_edit_variable(&x, Strength::REQUIRED),
        Err(SolverError::RequiredFailure)
    );
    assert!(!solver.has_edit_variable(&x));

    solver.add_edit_variable(&x, Strength::STRONG).unwrap();
    assert_eq!(
        solver.add_edit_variable(&x, Strength::WEAK),
        Err(SolverError::DuplicateEditVariable)
    );
}

#[test]
fn test_strength_above_required_is_clipped() {
    let mut solver = Solver::new();
    let x = Variable::new("x");

    assert_eq!(
        solver.add_edit_variable(&x, Strength::from(Strength::REQUIRED.value() * 2.0)),
        Err(SolverError::RequiredFailure)
    );
}
