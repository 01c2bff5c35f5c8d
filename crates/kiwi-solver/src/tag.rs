//! Per-constraint bookkeeping.

use kiwi_core::{Constraint, Strength};

use crate::symbol::Symbol;

/// The symbols a constraint introduced into the tableau.
///
/// `marker` is the slack, error or dummy symbol used to locate the
/// constraint's row when it is removed. `other` is the second error symbol of
/// a non-required constraint, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tag {
    pub(crate) marker: Symbol,
    pub(crate) other: Option<Symbol>,
}

impl Tag {
    pub(crate) fn new(marker: Symbol) -> Self {
        Self {
            marker,
            other: None,
        }
    }

    pub(crate) fn with_other(marker: Symbol, other: Symbol) -> Self {
        Self {
            marker,
            other: Some(other),
        }
    }

    /// The first error symbol of the tag, marker before other.
    pub(crate) fn error_symbol(&self) -> Option<Symbol> {
        if self.marker.is_error() {
            return Some(self.marker);
        }
        self.other.filter(Symbol::is_error)
    }
}

/// A tracked constraint: its tag plus the strength it was added with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConstraintInfo {
    pub(crate) tag: Tag,
    pub(crate) strength: Strength,
}

/// An edit variable's synthetic equality constraint and the last suggested value.
#[derive(Debug, Clone)]
pub(crate) struct EditInfo {
    pub(crate) constraint: Constraint,
    pub(crate) tag: Tag,
    pub(crate) constant: f64,
}
