//! Linear expressions and constraints.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::strength::Strength;
use crate::types::{Term, Variable};

static NEXT_CONSTRAINT_ID: AtomicUsize = AtomicUsize::new(0);

/// Tolerance used when checking whether a constraint holds.
const SATISFACTION_EPSILON: f64 = 1e-8;

/// A linear expression: constant + Σ terms.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    pub(crate) terms: SmallVec<[Term; 4]>,
    pub(crate) constant: f64,
}

impl Expression {
    pub fn new(terms: impl IntoIterator<Item = Term>, constant: f64) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant,
        }
    }

    /// Create a constant expression.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: SmallVec::new(),
            constant,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// True when the expression has no terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate against the variables' current values.
    pub fn value(&self) -> f64 {
        self.constant + self.terms.iter().map(Term::value).sum::<f64>()
    }

    /// Multiply every term and the constant by `scalar`.
    pub(crate) fn scaled(mut self, scalar: f64) -> Self {
        self.constant *= scalar;
        for term in &mut self.terms {
            *term = Term::new(term.variable().clone(), term.coefficient() * scalar);
        }
        self
    }

    /// Merge terms so each variable appears once, keeping first-seen order.
    fn reduce(&self) -> Expression {
        let mut merged: IndexMap<Variable, f64> = IndexMap::new();
        for term in &self.terms {
            *merged.entry(term.variable().clone()).or_insert(0.0) += term.coefficient();
        }
        Expression {
            terms: merged
                .into_iter()
                .map(|(variable, coefficient)| Term::new(variable, coefficient))
                .collect(),
            constant: self.constant,
        }
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Self {
        Expression::from_constant(constant)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::new([term], 0.0)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::from(Term::from(variable))
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Expression::from(Term::from(variable))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            write!(f, "{} * {} + ", term.coefficient(), term.variable())?;
        }
        write!(f, "{}", self.constant)
    }
}

/// The relation between a constraint's expression and zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationalOperator {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationalOperator::LessOrEqual => f.write_str("<="),
            RelationalOperator::Equal => f.write_str("=="),
            RelationalOperator::GreaterOrEqual => f.write_str(">="),
        }
    }
}

/// A linear constraint `expression <op> 0` with a strength.
///
/// Like [`Variable`], a constraint is a shared handle compared by identity:
/// two constraints built from the same expression are distinct, while clones
/// refer to the same constraint.
#[derive(Clone)]
pub struct Constraint(Rc<ConstraintData>);

struct ConstraintData {
    id: usize,
    expression: Expression,
    operator: RelationalOperator,
    strength: Cell<Strength>,
}

impl Constraint {
    /// Create a constraint. The expression is reduced so that every variable
    /// appears at most once, and the strength is clipped.
    pub fn new(expression: Expression, operator: RelationalOperator, strength: Strength) -> Self {
        Self(Rc::new(ConstraintData {
            id: NEXT_CONSTRAINT_ID.fetch_add(1, Ordering::Relaxed),
            expression: expression.reduce(),
            operator,
            strength: Cell::new(strength.clip()),
        }))
    }

    /// Create a required constraint.
    pub fn required(expression: Expression, operator: RelationalOperator) -> Self {
        Self::new(expression, operator, Strength::REQUIRED)
    }

    /// A new, distinct constraint with the same expression and operator.
    pub fn with_strength(&self, strength: Strength) -> Self {
        Self::new(self.0.expression.clone(), self.0.operator, strength)
    }

    pub fn id(&self) -> usize {
        self.0.id
    }

    pub fn expression(&self) -> &Expression {
        &self.0.expression
    }

    pub fn operator(&self) -> RelationalOperator {
        self.0.operator
    }

    pub fn strength(&self) -> Strength {
        self.0.strength.get()
    }

    /// Change the strength. A solver that already tracks this constraint keeps
    /// using the strength it was added with.
    pub fn set_strength(&self, strength: Strength) {
        self.0.strength.set(strength.clip());
    }

    /// Whether the constraint holds for the variables' current values.
    pub fn is_satisfied(&self) -> bool {
        let value = self.0.expression.value();
        match self.0.operator {
            RelationalOperator::LessOrEqual => value <= SATISFACTION_EPSILON,
            RelationalOperator::Equal => value.abs() < SATISFACTION_EPSILON,
            RelationalOperator::GreaterOrEqual => value >= -SATISFACTION_EPSILON,
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("id", &self.0.id)
            .field("expression", &self.0.expression)
            .field("operator", &self.0.operator)
            .field("strength", &self.strength())
            .finish()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} 0 | strength = {}",
            self.0.expression,
            self.0.operator,
            self.strength().value()
        )
    }
}
