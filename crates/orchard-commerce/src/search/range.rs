//! Inclusive value ranges shared by facets and filters.

use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range.
///
/// Ranges built with [`ValueRange::ordered`] always satisfy `min <= max`.
/// [`ValueRange::new`] keeps the bounds as given; a reversed range contains
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Build a range from two bounds in either order.
    pub fn ordered(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// A range holding exactly one value.
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Widen the range so it covers `value`.
    pub fn include(&mut self, value: T) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// True when this range cuts off part of `bounds` on either side.
    pub fn is_narrower_than(&self, bounds: &ValueRange<T>) -> bool {
        self.min > bounds.min || self.max < bounds.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let r = ValueRange::new(100, 1000);
        assert!(r.contains(100));
        assert!(r.contains(1000));
        assert!(!r.contains(99));
        assert!(!r.contains(1001));
    }

    #[test]
    fn test_reversed_range_contains_nothing() {
        let r = ValueRange::new(10.0, 5.0);
        assert!(!r.contains(7.0));
        assert!(!r.contains(10.0));
    }

    #[test]
    fn test_ordered_swaps() {
        assert_eq!(ValueRange::ordered(9, 3), ValueRange::new(3, 9));
        assert_eq!(ValueRange::ordered(3, 9), ValueRange::new(3, 9));
    }

    #[test]
    fn test_include_widens() {
        let mut r = ValueRange::point(50);
        r.include(10);
        r.include(80);
        r.include(60);
        assert_eq!(r, ValueRange::new(10, 80));
    }

    #[test]
    fn test_narrower_than() {
        let bounds = ValueRange::new(0, 100);
        assert!(!ValueRange::new(0, 100).is_narrower_than(&bounds));
        assert!(!ValueRange::new(-5, 200).is_narrower_than(&bounds));
        assert!(ValueRange::new(1, 100).is_narrower_than(&bounds));
        assert!(ValueRange::new(0, 99).is_narrower_than(&bounds));
    }
}
