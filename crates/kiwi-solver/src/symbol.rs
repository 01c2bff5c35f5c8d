//! Tableau unknowns.

/// An unknown of the tableau.
///
/// Every symbol carries a unique id handed out by its solver, so two symbols
/// of the same kind never compare equal. "Not found" is expressed as
/// `Option<Symbol>::None` rather than a sentinel kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Symbol {
    /// A user variable
    External(usize),
    /// Turns an inequality into an equality; also used for artificial variables
    Slack(usize),
    /// Measures the violation of a non-required constraint
    Error(usize),
    /// Marker for a required equality
    Dummy(usize),
}

impl Symbol {
    pub(crate) fn is_external(&self) -> bool {
        matches!(self, Symbol::External(_))
    }

    pub(crate) fn is_slack(&self) -> bool {
        matches!(self, Symbol::Slack(_))
    }

    pub(crate) fn is_error(&self) -> bool {
        matches!(self, Symbol::Error(_))
    }

    pub(crate) fn is_dummy(&self) -> bool {
        matches!(self, Symbol::Dummy(_))
    }

    /// Slack and error symbols are restricted to be non-negative and may be
    /// pivoted freely.
    pub(crate) fn is_pivotable(&self) -> bool {
        self.is_slack() || self.is_error()
    }
}

/// Hands out symbols with monotonically increasing ids.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    next_id: usize,
}

impl SymbolTable {
    fn next(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn external(&mut self) -> Symbol {
        Symbol::External(self.next())
    }

    pub(crate) fn slack(&mut self) -> Symbol {
        Symbol::Slack(self.next())
    }

    pub(crate) fn error(&mut self) -> Symbol {
        Symbol::Error(self.next())
    }

    pub(crate) fn dummy(&mut self) -> Symbol {
        Symbol::Dummy(self.next())
    }
}
