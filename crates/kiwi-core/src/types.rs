//! Variables and terms.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// A user-facing unknown.
///
/// Cloning a `Variable` yields another handle to the same unknown: equality and
/// hashing follow identity, never the name or the value. The value is written
/// by the solver when it updates its variables.
#[derive(Clone)]
pub struct Variable(Rc<VariableData>);

struct VariableData {
    id: usize,
    name: String,
    value: Cell<f64>,
}

impl Variable {
    /// Create a new variable. The name is only used for diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(VariableData {
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            value: Cell::new(0.0),
        }))
    }

    /// Unique identifier of this variable.
    pub fn id(&self) -> usize {
        self.0.id
    }

    /// The diagnostic name given at creation.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The last solved value, or 0.0 before the first update.
    pub fn value(&self) -> f64 {
        self.0.value.get()
    }

    /// Overwrite the value.
    ///
    /// The solver calls this from `update_variables`; callers that change it
    /// by hand will see it overwritten on the next update.
    pub fn set_value(&self, value: f64) {
        self.0.value.set(value);
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("value", &self.value())
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A variable scaled by a coefficient.
#[derive(Debug, Clone)]
pub struct Term {
    variable: Variable,
    coefficient: f64,
}

impl Term {
    /// Create the term `coefficient * variable`.
    pub fn new(variable: Variable, coefficient: f64) -> Self {
        Self {
            variable,
            coefficient,
        }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Current value: coefficient times the variable's value.
    pub fn value(&self) -> f64 {
        self.coefficient * self.variable.value()
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::new(variable, 1.0)
    }
}

impl From<&Variable> for Term {
    fn from(variable: &Variable) -> Self {
        Term::new(variable.clone(), 1.0)
    }
}
