//! Bounded integer stats.
//!
//! Every survival resource (health, stamina, hunger, thirst, sleep) is a
//! `Stat`: a current value clamped to `[0, max]` after every mutation.

use serde::{Deserialize, Serialize};

/// A bounded stat with a current value and a maximum.
///
/// The invariant `value <= max` holds after every mutation, including
/// mutations of `max` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    value: u32,
    max: u32,
}

impl Stat {
    /// Create a stat at the given value, clamped to `[0, max]`.
    pub fn new(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Create a stat at its maximum.
    pub fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    /// The current value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The maximum value.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Increase the value by `amount`, clamping to `max`.
    pub fn restore(&mut self, amount: u32) {
        self.value = self.value.saturating_add(amount).min(self.max);
    }

    /// Decrease the value by `amount`, clamping to 0.
    pub fn deplete(&mut self, amount: u32) {
        self.value = self.value.saturating_sub(amount);
    }

    /// Set the value directly, clamped to `[0, max]`.
    pub fn set(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    /// Change the maximum. The current value is re-clamped.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.value = self.value.min(max);
    }

    /// Raise the maximum by `amount` without touching the current value.
    pub fn raise_max(&mut self, amount: u32) {
        self.max = self.max.saturating_add(amount);
    }

    /// Current value as a fraction of the maximum (0.0 when `max` is 0).
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.value) / f64::from(self.max)
        }
    }

    /// Whether the value has reached 0.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Whether the value is at the maximum.
    pub fn is_full(&self) -> bool {
        self.value == self.max
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_clamps_to_max() {
        let s = Stat::new(150, 100);
        assert_eq!(s.value(), 100);
        assert_eq!(s.max(), 100);
    }

    #[test]
    fn restore_clamps_at_max() {
        let mut s = Stat::new(90, 100);
        s.restore(50);
        assert_eq!(s.value(), 100);
        assert!(s.is_full());
    }

    #[test]
    fn deplete_clamps_at_zero() {
        let mut s = Stat::new(10, 100);
        s.deplete(50);
        assert_eq!(s.value(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn lowering_max_reclamps_value() {
        let mut s = Stat::full(100);
        s.set_max(60);
        assert_eq!(s.value(), 60);
        assert_eq!(s.max(), 60);
    }

    #[test]
    fn raise_max_keeps_value() {
        let mut s = Stat::full(100);
        s.raise_max(20);
        assert_eq!(s.value(), 100);
        assert_eq!(s.max(), 120);
        assert!(!s.is_full());
    }

    #[test]
    fn ratio() {
        let s = Stat::new(25, 100);
        assert!((s.ratio() - 0.25).abs() < f64::EPSILON);
        assert!((Stat::new(0, 0).ratio()).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(Stat::new(42, 100).to_string(), "42/100");
    }

    #[test]
    fn serde_roundtrip() {
        let s = Stat::new(7, 10);
        let json = serde_json::to_string(&s).unwrap();
        let s2: Stat = serde_json::from_str(&json).unwrap();
        assert_eq!(s, s2);
    }

    proptest! {
        #[test]
        fn value_never_exceeds_max(start in 0u32..500, max in 0u32..500, ops in prop::collection::vec((0u8..4, 0u32..500), 0..64)) {
            let mut s = Stat::new(start, max);
            prop_assert!(s.value() <= s.max());
            for (op, amount) in ops {
                match op {
                    0 => s.restore(amount),
                    1 => s.deplete(amount),
                    2 => s.set(amount),
                    _ => s.set_max(amount),
                }
                prop_assert!(s.value() <= s.max());
            }
        }
    }
}
