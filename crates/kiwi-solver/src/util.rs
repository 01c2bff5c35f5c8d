//! Numeric tolerance shared by the tableau.

/// Coefficients and constants closer to zero than this are treated as zero.
pub(crate) const EPSILON: f64 = 1.0e-8;

/// Near-zero check for floating point values.
pub(crate) fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
