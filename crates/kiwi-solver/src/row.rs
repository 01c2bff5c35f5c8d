//! Sparse tableau rows.

use std::fmt;

use indexmap::IndexMap;

use crate::symbol::Symbol;
use crate::util::near_zero;

/// A row of the tableau: `basic = constant + Σ coefficient * symbol`.
///
/// No cell ever holds a near-zero coefficient; inserting a coefficient that
/// cancels an existing one removes the cell. Cells keep insertion order so
/// that pivot selection is deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Row {
    constant: f64,
    cells: IndexMap<Symbol, f64>,
}

impl Row {
    pub(crate) fn new(constant: f64) -> Self {
        Self {
            constant,
            cells: IndexMap::new(),
        }
    }

    pub(crate) fn constant(&self) -> f64 {
        self.constant
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
        self.cells.iter().map(|(&symbol, &coefficient)| (symbol, coefficient))
    }

    pub(crate) fn is_constant(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is a dummy symbol (also for an empty row).
    pub(crate) fn all_dummies(&self) -> bool {
        self.cells.keys().all(Symbol::is_dummy)
    }

    /// Add a value to the constant and return the new constant.
    pub(crate) fn add(&mut self, value: f64) -> f64 {
        self.constant += value;
        self.constant
    }

    /// Add `coefficient` to the symbol's cell, dropping the cell if the sum
    /// is near zero.
    pub(crate) fn insert_symbol(&mut self, symbol: Symbol, coefficient: f64) {
        let entry = self.cells.entry(symbol).or_insert(0.0);
        *entry += coefficient;
        if near_zero(*entry) {
            self.cells.shift_remove(&symbol);
        }
    }

    /// Add `other * coefficient` to this row.
    pub(crate) fn insert_row(&mut self, other: &Row, coefficient: f64) {
        self.constant += other.constant * coefficient;
        for (&symbol, &cell) in &other.cells {
            self.insert_symbol(symbol, cell * coefficient);
        }
    }

    pub(crate) fn remove(&mut self, symbol: Symbol) {
        self.cells.shift_remove(&symbol);
    }

    pub(crate) fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for coefficient in self.cells.values_mut() {
            *coefficient = -*coefficient;
        }
    }

    /// Solve the row for `symbol`.
    ///
    /// The row is read as `0 = constant + a * symbol + rest` and rewritten as
    /// `symbol = -constant / a - rest / a`. The symbol must have a cell.
    pub(crate) fn solve_for_symbol(&mut self, symbol: Symbol) {
        debug_assert!(self.cells.contains_key(&symbol), "symbol is not in the row");
        let Some(cell) = self.cells.shift_remove(&symbol) else {
            return;
        };
        let coefficient = -1.0 / cell;
        self.constant *= coefficient;
        for value in self.cells.values_mut() {
            *value *= coefficient;
        }
    }

    /// Turn a row defining `basic` into one defining `entering`.
    ///
    /// `basic` must not have a cell in the row and `entering` must.
    pub(crate) fn solve_for_symbols(&mut self, basic: Symbol, entering: Symbol) {
        self.insert_symbol(basic, -1.0);
        self.solve_for_symbol(entering);
    }

    pub(crate) fn coefficient_for(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Replace `symbol` by its definition `row`, scaled by its coefficient here.
    pub(crate) fn substitute(&mut self, symbol: Symbol, row: &Row) {
        if let Some(coefficient) = self.cells.shift_remove(&symbol) {
            self.insert_row(row, coefficient);
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constant)?;
        for (symbol, coefficient) in &self.cells {
            write!(f, " + {coefficient} * {symbol:?}")?;
        }
        Ok(())
    }
}
