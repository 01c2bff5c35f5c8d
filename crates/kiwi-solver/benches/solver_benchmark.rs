//! Solver benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiwi_solver::{symbolics, Constraint, Solver, Strength, Variable};

/// A row of `count` boxes laid out left to right with a fixed gap.
fn chain(count: usize) -> (Vec<Variable>, Vec<Constraint>) {
    let lefts: Vec<Variable> = (0..count).map(|i| Variable::new(format!("left{i}"))).collect();
    let mut constraints = vec![symbolics::greater_or_equal(&lefts[0], 0.0)];
    for pair in lefts.windows(2) {
        constraints.push(symbolics::greater_or_equal(&pair[1], &pair[0] + 10.0));
        constraints.push(symbolics::equal(&pair[1], &pair[0] + 20.0).with_strength(Strength::WEAK));
    }
    (lefts, constraints)
}

fn add_constraints(c: &mut Criterion) {
    let (_, constraints) = chain(100);
    c.bench_function("add_100_boxes", |b| {
        b.iter(|| {
            let mut solver = Solver::new();
            solver.add_constraints(black_box(&constraints)).ok();
            solver
        })
    });
}

fn add_remove_constraint(c: &mut Criterion) {
    let (lefts, constraints) = chain(100);
    let mut solver = Solver::new();
    solver.add_constraints(&constraints).ok();
    let bound = symbolics::less_or_equal(&lefts[99], 1500.0);

    c.bench_function("add_remove_bound", |b| {
        b.iter(|| {
            solver.add_constraint(black_box(&bound)).ok();
            solver.remove_constraint(black_box(&bound)).ok();
        })
    });
}

fn suggest_value(c: &mut Criterion) {
    let (lefts, constraints) = chain(100);
    let mut solver = Solver::new();
    solver.add_constraints(&constraints).ok();
    solver.add_edit_variable(&lefts[0], Strength::STRONG).ok();

    let mut value = 0.0;
    c.bench_function("suggest_value", |b| {
        b.iter(|| {
            value = (value + 7.0) % 500.0;
            solver.suggest_value(&lefts[0], black_box(value)).ok();
            solver.update_variables();
        })
    });
}

criterion_group!(benches, add_constraints, add_remove_constraint, suggest_value);
criterion_main!(benches);
