//! Symbolic constraint strengths.
//!
//! A strength packs three priority tiers into one float so that any amount of
//! violation at a higher tier outweighs the lower tiers. Required constraints
//! must be satisfied; the others are satisfied with declining priority.

/// Upper bound for a single tier (and for a tier times its weight).
const TIER_MAX: f64 = 1000.0;

/// Constraint strength.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strength(f64);

impl Strength {
    pub const REQUIRED: Strength = Strength(1_001_001_000.0);
    pub const STRONG: Strength = Strength(1_000_000.0);
    pub const MEDIUM: Strength = Strength(1_000.0);
    pub const WEAK: Strength = Strength(1.0);

    /// Create a strength from a raw value, clipped to `[0, required]`.
    pub fn new(value: f64) -> Self {
        Strength(value).clip()
    }

    pub fn required() -> Self {
        Self::create(TIER_MAX, TIER_MAX, TIER_MAX)
    }

    pub fn strong() -> Self {
        Self::create(1.0, 0.0, 0.0)
    }

    pub fn medium() -> Self {
        Self::create(0.0, 1.0, 0.0)
    }

    pub fn weak() -> Self {
        Self::create(0.0, 0.0, 1.0)
    }

    /// Create a symbolic strength from its three tiers.
    pub fn create(a: f64, b: f64, c: f64) -> Self {
        Self::create_weighted(a, b, c, 1.0)
    }

    /// Create a symbolic strength whose tiers are scaled by `weight`.
    ///
    /// Each weighted tier is clamped to `[0, 1000]` before the tiers are
    /// combined, so no tier can spill into the one above it.
    pub fn create_weighted(a: f64, b: f64, c: f64, weight: f64) -> Self {
        let tier = |value: f64| (value * weight).clamp(0.0, TIER_MAX);
        Strength(tier(a) * 1_000_000.0 + tier(b) * 1_000.0 + tier(c))
    }

    /// Clamp to the allowed range `[0, required]`.
    pub fn clip(self) -> Self {
        Strength(self.0.clamp(0.0, Self::REQUIRED.0))
    }

    /// The raw weight used in the objective function.
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl From<f64> for Strength {
    fn from(value: f64) -> Self {
        Strength::new(value)
    }
}
