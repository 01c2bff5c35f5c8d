//! Building expressions and constraints from mixed operands.
//!
//! Every combination function accepts anything convertible into an
//! [`Operand`], so `f64`, [`Variable`], [`Term`] and [`Expression`] values can
//! be mixed freely. The `std::ops` overloads at the bottom of this module
//! delegate to these functions.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::errors::ExpressionError;
use crate::expression::{Constraint, Expression, RelationalOperator};
use crate::types::{Term, Variable};

/// One side of an arithmetic or comparison operation.
#[derive(Debug, Clone)]
pub enum Operand {
    Constant(f64),
    Variable(Variable),
    Term(Term),
    Expression(Expression),
}

impl Operand {
    /// Widen to an expression.
    pub fn into_expression(self) -> Expression {
        match self {
            Operand::Constant(constant) => Expression::from_constant(constant),
            Operand::Variable(variable) => Expression::from(variable),
            Operand::Term(term) => Expression::from(term),
            Operand::Expression(expression) => expression,
        }
    }

    /// The constant value, if this operand has no variables.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Operand::Constant(constant) => Some(*constant),
            Operand::Expression(expression) if expression.is_constant() => {
                Some(expression.constant())
            }
            _ => None,
        }
    }

    fn scaled(self, scalar: f64) -> Operand {
        match self {
            Operand::Constant(constant) => Operand::Constant(constant * scalar),
            Operand::Variable(variable) => Operand::Term(Term::new(variable, scalar)),
            Operand::Term(term) => {
                Operand::Term(Term::new(term.variable().clone(), term.coefficient() * scalar))
            }
            Operand::Expression(expression) => Operand::Expression(expression.scaled(scalar)),
        }
    }
}

impl From<f64> for Operand {
    fn from(constant: f64) -> Self {
        Operand::Constant(constant)
    }
}

impl From<Variable> for Operand {
    fn from(variable: Variable) -> Self {
        Operand::Variable(variable)
    }
}

impl From<&Variable> for Operand {
    fn from(variable: &Variable) -> Self {
        Operand::Variable(variable.clone())
    }
}

impl From<Term> for Operand {
    fn from(term: Term) -> Self {
        Operand::Term(term)
    }
}

impl From<&Term> for Operand {
    fn from(term: &Term) -> Self {
        Operand::Term(term.clone())
    }
}

impl From<Expression> for Operand {
    fn from(expression: Expression) -> Self {
        Operand::Expression(expression)
    }
}

impl From<&Expression> for Operand {
    fn from(expression: &Expression) -> Self {
        Operand::Expression(expression.clone())
    }
}

impl From<Operand> for Expression {
    fn from(operand: Operand) -> Self {
        operand.into_expression()
    }
}

/// `lhs + rhs`
pub fn add(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Expression {
    let mut sum = lhs.into().into_expression();
    match rhs.into() {
        Operand::Constant(constant) => sum.constant += constant,
        Operand::Variable(variable) => sum.terms.push(Term::from(variable)),
        Operand::Term(term) => sum.terms.push(term),
        Operand::Expression(expression) => {
            sum.terms.extend(expression.terms);
            sum.constant += expression.constant;
        }
    }
    sum
}

/// `lhs - rhs`
pub fn subtract(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Expression {
    add(lhs, negate(rhs))
}

/// `-operand`, keeping the operand's shape (a variable becomes a term).
pub fn negate(operand: impl Into<Operand>) -> Operand {
    operand.into().scaled(-1.0)
}

/// `lhs * rhs`. At least one side must be constant.
pub fn multiply(
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> Result<Operand, ExpressionError> {
    let (lhs, rhs) = (lhs.into(), rhs.into());
    if let Some(scalar) = rhs.as_constant() {
        return Ok(lhs.scaled(scalar));
    }
    if let Some(scalar) = lhs.as_constant() {
        return Ok(rhs.scaled(scalar));
    }
    Err(ExpressionError::NonLinear)
}

/// `lhs / rhs`. The divisor must be constant.
pub fn divide(
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> Result<Operand, ExpressionError> {
    let rhs = rhs.into();
    let divisor = rhs.as_constant().ok_or(ExpressionError::NonConstantDivisor)?;
    Ok(lhs.into().scaled(1.0 / divisor))
}

fn compare(
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
    operator: RelationalOperator,
) -> Constraint {
    Constraint::required(subtract(lhs, rhs), operator)
}

/// Required constraint `lhs == rhs`.
pub fn equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Constraint {
    compare(lhs, rhs, RelationalOperator::Equal)
}

/// Required constraint `lhs <= rhs`.
pub fn less_or_equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Constraint {
    compare(lhs, rhs, RelationalOperator::LessOrEqual)
}

/// Required constraint `lhs >= rhs`.
pub fn greater_or_equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Constraint {
    compare(lhs, rhs, RelationalOperator::GreaterOrEqual)
}

macro_rules! impl_linear_ops {
    ($($lhs:ty => $scaled:ty, $into:expr;)*) => {
        $(
            impl<R: Into<Operand>> Add<R> for $lhs {
                type Output = Expression;

                fn add(self, rhs: R) -> Expression {
                    add(self, rhs)
                }
            }

            impl<R: Into<Operand>> Sub<R> for $lhs {
                type Output = Expression;

                fn sub(self, rhs: R) -> Expression {
                    subtract(self, rhs)
                }
            }

            impl Mul<f64> for $lhs {
                type Output = $scaled;

                fn mul(self, rhs: f64) -> $scaled {
                    $into(self, rhs)
                }
            }

            impl Mul<$lhs> for f64 {
                type Output = $scaled;

                fn mul(self, rhs: $lhs) -> $scaled {
                    $into(rhs, self)
                }
            }

            impl Div<f64> for $lhs {
                type Output = $scaled;

                fn div(self, rhs: f64) -> $scaled {
                    $into(self, 1.0 / rhs)
                }
            }

            impl Neg for $lhs {
                type Output = $scaled;

                fn neg(self) -> $scaled {
                    $into(self, -1.0)
                }
            }

            impl Add<$lhs> for f64 {
                type Output = Expression;

                fn add(self, rhs: $lhs) -> Expression {
                    add(self, rhs)
                }
            }

            impl Sub<$lhs> for f64 {
                type Output = Expression;

                fn sub(self, rhs: $lhs) -> Expression {
                    subtract(self, rhs)
                }
            }
        )*
    };
}

fn scale_variable(variable: impl Into<Term>, scalar: f64) -> Term {
    let term = variable.into();
    Term::new(term.variable().clone(), term.coefficient() * scalar)
}

impl_linear_ops! {
    Variable => Term, scale_variable;
    &Variable => Term, scale_variable;
    Term => Term, scale_variable;
    Expression => Expression, Expression::scaled;
}
