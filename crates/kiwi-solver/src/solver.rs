//! Incremental Cassowary solver.
//!
//! This is an implementation of the Cassowary linear constraint solving algorithm,
//! as described in "The Cassowary Linear Arithmetic Constraint Solving Algorithm"
//! by Greg J. Badros and Alan Borning.
//!
//! Constraints are turned into tableau rows as they are added. Required
//! constraints are kept exactly satisfied; the error symbols of non-required
//! constraints are weighted by strength in the objective, which the primal
//! simplex keeps minimal. Suggesting a value for an edit variable shifts row
//! constants and lets the dual simplex repair feasibility.

use std::fmt;

use indexmap::IndexMap;
use kiwi_core::{Constraint, Expression, RelationalOperator, SolverError, Strength, Variable};
use tracing::{debug, error, trace, warn};

use crate::options::SolverOptions;
use crate::row::Row;
use crate::symbol::{Symbol, SymbolTable};
use crate::tag::{ConstraintInfo, EditInfo, Tag};
use crate::util::near_zero;

/// Which objective row a primal optimization pass minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Objective {
    Primary,
    Artificial,
}

/// The Cassowary constraint solver.
#[derive(Debug, Default)]
pub struct Solver {
    options: SolverOptions,
    symbols: SymbolTable,
    /// Tracked constraints and the symbols they introduced
    constraints: IndexMap<Constraint, ConstraintInfo>,
    /// The tableau rows, keyed by their basic symbol
    rows: IndexMap<Symbol, Row>,
    /// External symbol of every variable seen in a constraint
    variables: IndexMap<Variable, Symbol>,
    edits: IndexMap<Variable, EditInfo>,
    /// Basic symbols whose rows may have a negative constant
    infeasible_rows: Vec<Symbol>,
    objective: Row,
    /// Objective of the artificial phase, only set while adding a constraint
    artificial: Option<Row>,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with the given options.
    pub fn with_options(options: SolverOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this solver was created with.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Add a constraint to the solver.
    ///
    /// Fails with `DuplicateConstraint` if it is already tracked and with
    /// `UnsatisfiableConstraint` if it is required and conflicts with the
    /// required constraints already present. A failed add leaves the
    /// solution unchanged.
    pub fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), SolverError> {
        if self.constraints.contains_key(constraint) {
            return Err(SolverError::DuplicateConstraint);
        }

        // Symbols reserved here for unseen variables outlive a failed add.
        // They carry no tableau entries.
        let strength = constraint.strength();
        let (mut row, tag) = self.create_row(constraint, strength);
        let mut subject = choose_subject(&row, &tag);

        // A row made only of dummies is either redundant (zero constant) or
        // contradicts the required equalities already present.
        if subject.is_none() && row.all_dummies() {
            if !near_zero(row.constant()) {
                warn!(%constraint, "required constraint is unsatisfiable");
                return Err(SolverError::UnsatisfiableConstraint);
            }
            subject = Some(tag.marker);
        }

        self.add_constraint_effects(&tag, strength);

        match subject {
            Some(subject) => {
                row.solve_for_symbol(subject);
                self.substitute(subject, &row);
                self.rows.insert(subject, row);
            }
            None => {
                if !self.add_with_artificial_variable(&row)? {
                    // The artificial phase moved to another vertex of the old system.
                    self.optimize(Objective::Primary)?;
                    warn!(%constraint, "required constraint is unsatisfiable");
                    return Err(SolverError::UnsatisfiableConstraint);
                }
            }
        }

        self.constraints
            .insert(constraint.clone(), ConstraintInfo { tag, strength });
        debug!(%constraint, rows = self.rows.len(), "added constraint");

        self.optimize(Objective::Primary)
    }

    /// Add several constraints, stopping at the first failure.
    pub fn add_constraints<'a>(
        &mut self,
        constraints: impl IntoIterator<Item = &'a Constraint>,
    ) -> Result<(), SolverError> {
        for constraint in constraints {
            self.add_constraint(constraint)?;
        }
        Ok(())
    }

    /// Remove a constraint from the solver.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), SolverError> {
        let ConstraintInfo { tag, strength } = self
            .constraints
            .shift_remove(constraint)
            .ok_or(SolverError::UnknownConstraint)?;

        // The objective must be corrected before any pivot.
        self.remove_constraint_effects(&tag, strength);

        if self.rows.shift_remove(&tag.marker).is_none() {
            let (leaving, mut row) = self
                .marker_leaving_symbol(tag.marker)
                .and_then(|leaving| self.rows.shift_remove(&leaving).map(|row| (leaving, row)))
                .ok_or(SolverError::InternalSolverError("failed to find leaving row"))?;
            row.solve_for_symbols(leaving, tag.marker);
            self.substitute(tag.marker, &row);
        }

        debug!(%constraint, rows = self.rows.len(), "removed constraint");
        self.optimize(Objective::Primary)
    }

    /// Whether the constraint is currently tracked by the solver.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains_key(constraint)
    }

    /// Make `variable` suggestible with a non-required strength.
    pub fn add_edit_variable(
        &mut self,
        variable: &Variable,
        strength: Strength,
    ) -> Result<(), SolverError> {
        if self.edits.contains_key(variable) {
            return Err(SolverError::DuplicateEditVariable);
        }
        let strength = strength.clip();
        if strength.is_required() {
            return Err(SolverError::RequiredFailure);
        }

        let constraint =
            Constraint::new(Expression::from(variable), RelationalOperator::Equal, strength);

        // The constraint is fresh and has error symbols to pivot on, so it can
        // be neither a duplicate nor unsatisfiable.
        match self.add_constraint(&constraint) {
            Ok(()) => {}
            Err(err @ (SolverError::DuplicateConstraint | SolverError::UnsatisfiableConstraint)) => {
                error!(%variable, %err, "edit constraint was rejected");
                debug_assert!(false, "edit constraint was rejected: {err}");
            }
            Err(err) => return Err(err),
        }

        let tag = self
            .constraints
            .get(&constraint)
            .map(|info| info.tag)
            .ok_or(SolverError::InternalSolverError("edit constraint is not tracked"))?;
        self.edits.insert(
            variable.clone(),
            EditInfo {
                constraint,
                tag,
                constant: 0.0,
            },
        );
        debug!(%variable, strength = strength.value(), "added edit variable");
        Ok(())
    }

    /// Stop editing `variable` and drop its edit constraint.
    ///
    /// Fails with `UnknownEditVariable` if the variable is not being edited.
    pub fn remove_edit_variable(&mut self, variable: &Variable) -> Result<(), SolverError> {
        let constraint = self
            .edits
            .get(variable)
            .map(|info| info.constraint.clone())
            .ok_or(SolverError::UnknownEditVariable)?;

        // Edit constraints are only removed through here.
        match self.remove_constraint(&constraint) {
            Ok(()) => {}
            Err(err @ SolverError::UnknownConstraint) => {
                error!(%variable, %err, "edit constraint was not tracked");
                debug_assert!(false, "edit constraint was not tracked");
            }
            Err(err) => return Err(err),
        }

        self.edits.shift_remove(variable);
        debug!(%variable, "removed edit variable");
        Ok(())
    }

    /// Whether `variable` is currently an edit variable.
    pub fn has_edit_variable(&self, variable: &Variable) -> bool {
        self.edits.contains_key(variable)
    }

    /// Suggest a value for an edit variable.
    pub fn suggest_value(&mut self, variable: &Variable, value: f64) -> Result<(), SolverError> {
        let info = self
            .edits
            .get_mut(variable)
            .ok_or(SolverError::UnknownEditVariable)?;
        let delta = value - info.constant;
        info.constant = value;
        let tag = info.tag;
        trace!(%variable, value, delta, "suggest value");

        if self.rows.contains_key(&tag.marker) {
            self.shift_row_constant(tag.marker, -delta);
        } else if let Some(other) = tag.other.filter(|other| self.rows.contains_key(other)) {
            self.shift_row_constant(other, delta);
        } else {
            for (&symbol, row) in self.rows.iter_mut() {
                let coefficient = row.coefficient_for(tag.marker);
                if coefficient != 0.0
                    && row.add(delta * coefficient) < 0.0
                    && !symbol.is_external()
                {
                    self.infeasible_rows.push(symbol);
                }
            }
        }

        self.dual_optimize()
    }

    /// Write the solved value of every tracked variable into it.
    pub fn update_variables(&self) {
        for (variable, symbol) in &self.variables {
            variable.set_value(self.rows.get(symbol).map_or(0.0, Row::constant));
        }
    }

    /// The solved value of a single variable, without updating it.
    pub fn value_of(&self, variable: &Variable) -> f64 {
        self.variables
            .get(variable)
            .and_then(|symbol| self.rows.get(symbol))
            .map_or(0.0, Row::constant)
    }

    /// Forget every constraint, edit variable and tableau row.
    pub fn reset(&mut self) {
        *self = Self::with_options(self.options.clone());
        debug!("solver reset");
    }

    /// The external symbol for a variable, created on first sight.
    fn var_symbol(&mut self, variable: &Variable) -> Symbol {
        if let Some(&symbol) = self.variables.get(variable) {
            return symbol;
        }
        let symbol = self.symbols.external();
        self.variables.insert(variable.clone(), symbol);
        symbol
    }

    /// Create the row for a constraint, with basic variables substituted out.
    ///
    /// The objective is left untouched; see `add_constraint_effects`.
    fn create_row(&mut self, constraint: &Constraint, strength: Strength) -> (Row, Tag) {
        let expression = constraint.expression();
        let mut row = Row::new(expression.constant());

        for term in expression.terms() {
            if near_zero(term.coefficient()) {
                continue;
            }
            let symbol = self.var_symbol(term.variable());
            match self.rows.get(&symbol) {
                Some(basic) => row.insert_row(basic, term.coefficient()),
                None => row.insert_symbol(symbol, term.coefficient()),
            }
        }

        let tag = match constraint.operator() {
            RelationalOperator::LessOrEqual | RelationalOperator::GreaterOrEqual => {
                let coefficient = if constraint.operator() == RelationalOperator::LessOrEqual {
                    1.0
                } else {
                    -1.0
                };
                let slack = self.symbols.slack();
                row.insert_symbol(slack, coefficient);
                if strength.is_required() {
                    Tag::new(slack)
                } else {
                    let error = self.symbols.error();
                    row.insert_symbol(error, -coefficient);
                    Tag::with_other(slack, error)
                }
            }
            RelationalOperator::Equal => {
                if strength.is_required() {
                    let dummy = self.symbols.dummy();
                    row.insert_symbol(dummy, 1.0);
                    Tag::new(dummy)
                } else {
                    let errplus = self.symbols.error();
                    let errminus = self.symbols.error();
                    row.insert_symbol(errplus, -1.0);
                    row.insert_symbol(errminus, 1.0);
                    Tag::with_other(errplus, errminus)
                }
            }
        };

        // Keep the constant non-negative.
        if row.constant() < 0.0 {
            row.reverse_sign();
        }

        (row, tag)
    }

    /// Weight the constraint's error symbols by its strength in the objective.
    fn add_constraint_effects(&mut self, tag: &Tag, strength: Strength) {
        for symbol in std::iter::once(tag.marker).chain(tag.other) {
            if symbol.is_error() {
                self.objective.insert_symbol(symbol, strength.value());
            }
        }
    }

    fn remove_constraint_effects(&mut self, tag: &Tag, strength: Strength) {
        if let Some(marker) = tag.error_symbol() {
            self.remove_marker_effects(marker, strength);
        }
    }

    fn remove_marker_effects(&mut self, marker: Symbol, strength: Strength) {
        match self.rows.get(&marker) {
            Some(row) => self.objective.insert_row(row, -strength.value()),
            None => self.objective.insert_symbol(marker, -strength.value()),
        }
    }

    /// Add a row that has no usable subject by means of an artificial variable.
    ///
    /// Returns whether the row could be made feasible. On failure the tableau
    /// still describes the previously added constraints, though possibly at
    /// another vertex; the caller has to re-minimize the objective.
    fn add_with_artificial_variable(&mut self, row: &Row) -> Result<bool, SolverError> {
        let art = self.symbols.slack();
        self.rows.insert(art, row.clone());
        self.artificial = Some(row.clone());

        let optimized = self.optimize(Objective::Artificial);
        let success = self
            .artificial
            .take()
            .is_some_and(|artificial| near_zero(artificial.constant()));
        if let Err(err) = optimized {
            self.remove_artificial(art);
            return Err(err);
        }

        if let Some(art_row) = self.rows.shift_remove(&art) {
            // While basic, the artificial symbol appears in no other row.
            if art_row.is_constant() || !success {
                return Ok(success);
            }
            let Some(entering) = art_row.cells().map(|(symbol, _)| symbol).find(Symbol::is_pivotable)
            else {
                return Ok(false);
            };
            self.pivot(art, art_row, entering);
        }

        self.remove_artificial(art);
        Ok(success)
    }

    /// Drop the artificial symbol's row and column.
    fn remove_artificial(&mut self, art: Symbol) {
        self.rows.shift_remove(&art);
        for row in self.rows.values_mut() {
            row.remove(art);
        }
        self.objective.remove(art);
    }

    /// Replace `symbol` by `row` in every row and objective.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for (&basic, basic_row) in self.rows.iter_mut() {
            basic_row.substitute(symbol, row);
            if !basic.is_external() && basic_row.constant() < 0.0 {
                self.infeasible_rows.push(basic);
            }
        }
        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    /// Exchange `leaving` (basic, defined by `row`) for `entering`.
    fn pivot(&mut self, leaving: Symbol, mut row: Row, entering: Symbol) {
        trace!(?leaving, ?entering, "pivot");
        row.solve_for_symbols(leaving, entering);
        self.substitute(entering, &row);
        self.rows.insert(entering, row);
    }

    fn count_iteration(&self, iterations: &mut usize) -> Result<(), SolverError> {
        *iterations += 1;
        match self.options.max_iterations {
            Some(max) if *iterations > max => {
                Err(SolverError::InternalSolverError("iteration limit exceeded"))
            }
            _ => Ok(()),
        }
    }

    /// Primal simplex: minimize the objective while keeping rows feasible.
    fn optimize(&mut self, objective: Objective) -> Result<(), SolverError> {
        let mut iterations = 0;
        loop {
            let Some(entering) = self.entering_symbol(objective) else {
                return Ok(());
            };
            let leaving = self
                .leaving_symbol(entering)
                .ok_or(SolverError::InternalSolverError("the objective is unbounded"))?;
            self.count_iteration(&mut iterations)?;
            let row = self
                .rows
                .shift_remove(&leaving)
                .ok_or(SolverError::InternalSolverError("leaving row is not basic"))?;
            self.pivot(leaving, row, entering);
        }
    }

    /// Dual simplex: drive the queued infeasible rows back to feasibility.
    fn dual_optimize(&mut self) -> Result<(), SolverError> {
        let mut iterations = 0;
        while let Some(leaving) = self.infeasible_rows.pop() {
            let Some(row) = self.rows.get(&leaving) else {
                continue;
            };
            if near_zero(row.constant()) || row.constant() >= 0.0 {
                continue;
            }
            let entering = self
                .dual_entering_symbol(row)
                .ok_or(SolverError::InternalSolverError("dual optimize failed"))?;
            self.count_iteration(&mut iterations)?;
            if let Some(row) = self.rows.shift_remove(&leaving) {
                self.pivot(leaving, row, entering);
            }
        }
        Ok(())
    }

    fn shift_row_constant(&mut self, symbol: Symbol, delta: f64) {
        if let Some(row) = self.rows.get_mut(&symbol) {
            if row.add(delta) < 0.0 {
                self.infeasible_rows.push(symbol);
            }
        }
    }

    /// First non-dummy symbol with a negative coefficient in the objective.
    fn entering_symbol(&self, objective: Objective) -> Option<Symbol> {
        let row = match objective {
            Objective::Primary => &self.objective,
            Objective::Artificial => self.artificial.as_ref()?,
        };
        row.cells()
            .find(|&(symbol, coefficient)| !symbol.is_dummy() && coefficient < 0.0)
            .map(|(symbol, _)| symbol)
    }

    /// The symbol that keeps the objective dual-feasible when it enters in
    /// place of the basic symbol of `row`.
    fn dual_entering_symbol(&self, row: &Row) -> Option<Symbol> {
        let mut ratio = f64::MAX;
        let mut entering = None;
        for (symbol, coefficient) in row.cells() {
            if coefficient > 0.0 && !symbol.is_dummy() {
                let candidate = self.objective.coefficient_for(symbol) / coefficient;
                if candidate < ratio {
                    ratio = candidate;
                    entering = Some(symbol);
                }
            }
        }
        entering
    }

    /// The basic symbol whose row has the tightest ratio for `entering`.
    fn leaving_symbol(&self, entering: Symbol) -> Option<Symbol> {
        let mut ratio = f64::MAX;
        let mut found = None;
        for (&symbol, row) in &self.rows {
            if symbol.is_external() {
                continue;
            }
            let coefficient = row.coefficient_for(entering);
            if coefficient < 0.0 {
                let candidate = -row.constant() / coefficient;
                if candidate < ratio {
                    ratio = candidate;
                    found = Some(symbol);
                }
            }
        }
        found
    }

    /// The basic symbol to exchange for a non-basic marker being removed.
    ///
    /// Restricted rows where the marker has a negative coefficient win, then
    /// restricted rows with a positive coefficient, then any external row.
    fn marker_leaving_symbol(&self, marker: Symbol) -> Option<Symbol> {
        let mut first: Option<(Symbol, f64)> = None;
        let mut second: Option<(Symbol, f64)> = None;
        let mut third = None;

        for (&symbol, row) in &self.rows {
            let coefficient = row.coefficient_for(marker);
            if near_zero(coefficient) {
                continue;
            }
            if symbol.is_external() {
                third = Some(symbol);
            } else if coefficient < 0.0 {
                let ratio = -row.constant() / coefficient;
                if first.map_or(true, |(_, best)| ratio < best) {
                    first = Some((symbol, ratio));
                }
            } else {
                let ratio = row.constant() / coefficient;
                if second.map_or(true, |(_, best)| ratio < best) {
                    second = Some((symbol, ratio));
                }
            }
        }

        first.or(second).map(|(symbol, _)| symbol).or(third)
    }
}

/// Pick the symbol to solve a new row for.
///
/// An external symbol is always preferred. Otherwise a slack or error symbol of
/// the constraint itself qualifies if its coefficient is negative, since it can
/// then enter the basis with a non-negative value.
fn choose_subject(row: &Row, tag: &Tag) -> Option<Symbol> {
    if let Some((symbol, _)) = row.cells().find(|(symbol, _)| symbol.is_external()) {
        return Some(symbol);
    }
    std::iter::once(tag.marker)
        .chain(tag.other)
        .find(|symbol| symbol.is_pivotable() && row.coefficient_for(*symbol) < 0.0)
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective\n---------\n{}\n", self.objective)?;
        writeln!(f, "Tableau\n-------")?;
        for (symbol, row) in &self.rows {
            writeln!(f, "{symbol:?} | {row}")?;
        }
        writeln!(f, "\nInfeasible\n----------")?;
        for symbol in &self.infeasible_rows {
            writeln!(f, "{symbol:?}")?;
        }
        writeln!(f, "\nVariables\n---------")?;
        for (variable, symbol) in &self.variables {
            writeln!(f, "{variable} = {symbol:?}")?;
        }
        writeln!(f, "\nEdit variables\n--------------")?;
        for (variable, info) in &self.edits {
            writeln!(f, "{variable} = {}", info.constant)?;
        }
        writeln!(f, "\nConstraints\n-----------")?;
        for constraint in self.constraints.keys() {
            writeln!(f, "{constraint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwi_core::symbolics;

    fn near(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    #[test]
    fn test_choose_subject_prefers_external() {
        let mut row = Row::new(5.0);
        row.insert_symbol(Symbol::Slack(1), -1.0);
        row.insert_symbol(Symbol::External(0), 2.0);
        let tag = Tag::new(Symbol::Slack(1));
        assert_eq!(choose_subject(&row, &tag), Some(Symbol::External(0)));
    }

    #[test]
    fn test_choose_subject_needs_negative_marker() {
        let mut row = Row::new(5.0);
        row.insert_symbol(Symbol::Slack(1), 1.0);
        row.insert_symbol(Symbol::Error(2), -1.0);
        let tag = Tag::with_other(Symbol::Slack(1), Symbol::Error(2));
        assert_eq!(choose_subject(&row, &tag), Some(Symbol::Error(2)));

        let tag = Tag::new(Symbol::Slack(1));
        assert_eq!(choose_subject(&row, &tag), None);

        let mut dummies = Row::new(0.0);
        dummies.insert_symbol(Symbol::Dummy(3), -1.0);
        assert_eq!(choose_subject(&dummies, &Tag::new(Symbol::Dummy(3))), None);
    }

    #[test]
    fn test_marker_leaving_symbol_tiers() {
        let marker = Symbol::Slack(100);
        let mut solver = Solver::new();

        let mut external = Row::new(1.0);
        external.insert_symbol(marker, -1.0);
        solver.rows.insert(Symbol::External(1), external);
        assert_eq!(solver.marker_leaving_symbol(marker), Some(Symbol::External(1)));

        let mut positive_far = Row::new(8.0);
        positive_far.insert_symbol(marker, 2.0);
        let mut positive_near = Row::new(3.0);
        positive_near.insert_symbol(marker, 1.0);
        solver.rows.insert(Symbol::Slack(2), positive_far);
        solver.rows.insert(Symbol::Slack(3), positive_near);
        assert_eq!(solver.marker_leaving_symbol(marker), Some(Symbol::Slack(3)));

        let mut negative = Row::new(50.0);
        negative.insert_symbol(marker, -1.0);
        solver.rows.insert(Symbol::Error(4), negative);
        assert_eq!(solver.marker_leaving_symbol(marker), Some(Symbol::Error(4)));

        assert_eq!(solver.marker_leaving_symbol(Symbol::Slack(999)), None);
    }

    #[test]
    fn test_entering_symbol_skips_dummies() {
        let mut solver = Solver::new();
        solver.objective.insert_symbol(Symbol::Dummy(1), -5.0);
        solver.objective.insert_symbol(Symbol::Error(2), 3.0);
        assert_eq!(solver.entering_symbol(Objective::Primary), None);

        solver.objective.insert_symbol(Symbol::Error(3), -1.0);
        solver.objective.insert_symbol(Symbol::Error(4), -10.0);
        assert_eq!(solver.entering_symbol(Objective::Primary), Some(Symbol::Error(3)));
        assert_eq!(solver.entering_symbol(Objective::Artificial), None);
    }

    #[test]
    fn test_dual_entering_symbol_uses_objective_ratio() {
        let mut solver = Solver::new();
        solver.objective.insert_symbol(Symbol::Error(1), 4.0);
        solver.objective.insert_symbol(Symbol::Error(2), 1.0);

        let mut row = Row::new(-5.0);
        row.insert_symbol(Symbol::Error(1), 1.0);
        row.insert_symbol(Symbol::Error(2), 0.5);
        row.insert_symbol(Symbol::Slack(3), -1.0);
        row.insert_symbol(Symbol::Dummy(4), 1.0);
        assert_eq!(solver.dual_entering_symbol(&row), Some(Symbol::Error(2)));
    }

    #[test]
    fn test_required_equality_uses_dummy_marker() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        let constraint = symbolics::equal(&x, 10.0);
        solver.add_constraint(&constraint).unwrap();

        let info = solver.constraints[&constraint];
        assert!(info.tag.marker.is_dummy());
        assert_eq!(info.tag.other, None);
        assert!(solver.objective.is_constant());
    }

    #[test]
    fn test_weak_equality_adds_two_error_symbols() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        let constraint = symbolics::equal(&x, 10.0).with_strength(Strength::WEAK);
        solver.add_constraint(&constraint).unwrap();

        let info = solver.constraints[&constraint];
        assert!(info.tag.marker.is_error());
        assert!(info.tag.other.is_some_and(|other| other.is_error()));
        assert_eq!(solver.objective.coefficient_for(info.tag.marker), 1.0);
    }

    #[test]
    fn test_redundant_equality_is_accepted() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        solver.add_constraint(&symbolics::equal(&x, 10.0)).unwrap();
        solver.add_constraint(&symbolics::equal(&x, 10.0)).unwrap();
        solver.update_variables();
        assert!(near(x.value(), 10.0));
    }

    #[test]
    fn test_failed_add_keeps_tableau() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        let y = Variable::new("y");
        solver.add_constraint(&symbolics::greater_or_equal(&x, 10.0)).unwrap();
        solver.add_constraint(&symbolics::greater_or_equal(&y, &x)).unwrap();
        let rows = solver.rows.len();
        let before = solver.value_of(&y);

        let conflict = symbolics::less_or_equal(&y, 4.0);
        assert_eq!(
            solver.add_constraint(&conflict),
            Err(SolverError::UnsatisfiableConstraint)
        );
        assert_eq!(solver.rows.len(), rows);
        assert!(!solver.has_constraint(&conflict));
        assert!(near(solver.value_of(&y), before));
        assert!(solver.artificial.is_none());
    }

    #[test]
    fn test_failed_add_keeps_soft_optimum() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        let y = Variable::new("y");
        solver
            .add_constraints([
                &symbolics::equal(&x, 30.0).with_strength(Strength::WEAK),
                &symbolics::equal(&y, 30.0).with_strength(Strength::WEAK),
                &symbolics::greater_or_equal(&x, 0.0),
                &symbolics::less_or_equal(&x, 50.0),
                &symbolics::greater_or_equal(&y, 0.0),
                &symbolics::less_or_equal(&y, 50.0),
            ])
            .unwrap();
        assert!(near(solver.value_of(&x), 30.0));
        assert!(near(solver.value_of(&y), 30.0));

        assert_eq!(
            solver.add_constraint(&symbolics::greater_or_equal(&x + &y, 200.0)),
            Err(SolverError::UnsatisfiableConstraint)
        );
        assert!(near(solver.value_of(&x), 30.0));
        assert!(near(solver.value_of(&y), 30.0));
    }

    #[test]
    fn test_contradicting_equalities_fail_on_dummy_row() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        solver.add_constraint(&symbolics::equal(&x, 10.0)).unwrap();
        assert_eq!(
            solver.add_constraint(&symbolics::equal(&x, 11.0)),
            Err(SolverError::UnsatisfiableConstraint)
        );
    }

    #[test]
    fn test_iteration_limit() {
        let mut solver = Solver::with_options(SolverOptions::with_max_iterations(0));
        let x = Variable::new("x");
        solver
            .add_constraint(&symbolics::equal(&x, 100.0).with_strength(Strength::WEAK))
            .unwrap();
        assert_eq!(
            solver.add_constraint(&symbolics::less_or_equal(&x, 10.0)),
            Err(SolverError::InternalSolverError("iteration limit exceeded"))
        );
        // The artificial row does not outlive the failed add.
        assert_eq!(solver.rows.len(), 1);
        assert!(solver.rows.keys().all(|symbol| !symbol.is_slack()));
    }

    #[test]
    fn test_iteration_limit_keeps_leaving_row() {
        let mut solver = Solver::with_options(SolverOptions::with_max_iterations(0));
        let x = Variable::new("x");
        let weak = symbolics::equal(&x, 100.0).with_strength(Strength::WEAK);
        let medium = symbolics::equal(&x, 50.0).with_strength(Strength::MEDIUM);
        solver.add_constraint(&weak).unwrap();

        // Minimizing after the add needs one pivot.
        assert_eq!(
            solver.add_constraint(&medium),
            Err(SolverError::InternalSolverError("iteration limit exceeded"))
        );
        assert_eq!(solver.rows.len(), 2);
        for info in solver.constraints.values() {
            let marker = info.tag.marker;
            assert!(
                solver.rows.contains_key(&marker)
                    || solver.rows.values().any(|row| row.coefficient_for(marker) != 0.0),
                "{marker:?} dropped out of the tableau"
            );
        }

        solver.remove_constraint(&medium).unwrap();
        assert!(near(solver.value_of(&x), 100.0));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut solver = Solver::new();
        let x = Variable::new("x");
        let constraint = symbolics::equal(&x, 3.0);
        solver.add_constraint(&constraint).unwrap();
        solver.add_edit_variable(&Variable::new("y"), Strength::STRONG).unwrap();
        solver.reset();
        assert!(!solver.has_constraint(&constraint));
        assert!(solver.rows.is_empty());
        assert!(solver.edits.is_empty());
        assert!(solver.objective.is_constant());
    }

    #[test]
    fn test_display_lists_constraints() {
        let mut solver = Solver::new();
        let x = Variable::new("left");
        solver.add_constraint(&symbolics::equal(&x, 3.0)).unwrap();
        let dump = solver.to_string();
        assert!(dump.contains("Tableau"));
        assert!(dump.contains("left"));
    }
}
