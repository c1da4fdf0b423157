//! Shopping-list quantity arithmetic.

use serde::{Deserialize, Serialize};

/// A shopping-list quantity, always at least 1.
///
/// Deltas can be negative (the UI has a decrement button), but applying one
/// never takes the quantity below the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// The smallest representable quantity.
    pub const MIN: Self = Self(1);

    /// Create a quantity, clamping values below 1 up to the floor.
    #[must_use]
    pub const fn clamped(value: i32) -> Self {
        if value < 1 { Self(1) } else { Self(value) }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Apply a signed delta, clamping the result to the floor of 1.
    #[must_use]
    pub const fn apply_delta(&self, delta: i32) -> Self {
        Self::clamped(self.0.saturating_add(delta))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_floors_at_one() {
        assert_eq!(Quantity::clamped(0).get(), 1);
        assert_eq!(Quantity::clamped(-5).get(), 1);
        assert_eq!(Quantity::clamped(1).get(), 1);
        assert_eq!(Quantity::clamped(7).get(), 7);
    }

    #[test]
    fn test_apply_delta_clamps() {
        let q = Quantity::clamped(3);
        assert_eq!(q.apply_delta(2).get(), 5);
        assert_eq!(q.apply_delta(-2).get(), 1);
        assert_eq!(q.apply_delta(-10).get(), 1);
    }

    #[test]
    fn test_apply_delta_saturates() {
        let q = Quantity::clamped(i32::MAX);
        assert_eq!(q.apply_delta(1).get(), i32::MAX);
    }
}
