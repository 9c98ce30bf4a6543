// Copyright 2025 Cowboy AI, LLC.

//! Comparison semantics for tracked values
//!
//! A value "reached" a probe when its comparator says it is not less than the
//! probe. Payloads with a natural ordering compare by it; everything else falls
//! back to the weak-equality comparator, where equal values compare as
//! `Equal` and unequal values compare as `Less`. The weak comparator is not a
//! total order: two different values never reach each other.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A shareable comparison function over `T`
pub struct Comparator<T> {
    compare: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
    kind: &'static str,
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            kind: self.kind,
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comparator({})", self.kind)
    }
}

impl<T: 'static> Comparator<T> {
    /// Build a comparator from an arbitrary ordering function
    pub fn from_fn<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
            kind: "custom",
        }
    }

    /// Compare `left` against `right`
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.compare)(left, right)
    }

    /// Whether `held` is at least as large as `probe`
    pub fn reached(&self, held: &T, probe: &T) -> bool {
        self.compare(held, probe) != Ordering::Less
    }

    /// Short name of the comparison strategy, for diagnostics
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl<T: Ord + 'static> Comparator<T> {
    /// Natural total ordering of `T`
    pub fn natural() -> Self {
        Self {
            compare: Arc::new(|left: &T, right: &T| left.cmp(right)),
            kind: "natural",
        }
    }
}

impl<T: PartialOrd + 'static> Comparator<T> {
    /// Partial ordering of `T`; unordered pairs compare as `Less`
    pub fn partial() -> Self {
        Self {
            compare: Arc::new(|left: &T, right: &T| {
                left.partial_cmp(right).unwrap_or(Ordering::Less)
            }),
            kind: "partial",
        }
    }
}

impl<T: PartialEq + 'static> Comparator<T> {
    /// Weak equality: equal values are `Equal`, anything else is `Less`
    pub fn weak() -> Self {
        Self {
            compare: Arc::new(|left: &T, right: &T| {
                if left == right {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            }),
            kind: "weak",
        }
    }
}

/// A payload that can be held by a property value
///
/// Implementors choose how they compare and whether a zero exists to seed
/// current values when a property declares no default. The defaults are the
/// weak-equality comparator and no zero, which suits plain enums:
///
/// ```rust
/// use cim_progress::PropertyValue;
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// enum Stage {
///     Alpha,
///     Beta,
/// }
///
/// impl PropertyValue for Stage {}
///
/// let comparator = Stage::default_comparator();
/// assert!(comparator.reached(&Stage::Alpha, &Stage::Alpha));
/// assert!(!comparator.reached(&Stage::Beta, &Stage::Alpha));
/// assert!(Stage::zero().is_none());
/// ```
pub trait PropertyValue: Clone + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Comparator attached to values of this kind unless one is supplied
    fn default_comparator() -> Comparator<Self> {
        Comparator::weak()
    }

    /// Zero-equivalent used to seed current values without a declared default
    fn zero() -> Option<Self> {
        None
    }
}

macro_rules! ordered_property_value {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn default_comparator() -> Comparator<Self> {
                    Comparator::natural()
                }

                fn zero() -> Option<Self> {
                    Some($zero)
                }
            }
        )*
    };
}

ordered_property_value! {
    bool => false,
    char => '\0',
    i8 => 0,
    i16 => 0,
    i32 => 0,
    i64 => 0,
    i128 => 0,
    isize => 0,
    u8 => 0,
    u16 => 0,
    u32 => 0,
    u64 => 0,
    u128 => 0,
    usize => 0,
    String => String::new(),
    BigInt => BigInt::from(0),
    BigDecimal => BigDecimal::from(0),
}

impl PropertyValue for f32 {
    fn default_comparator() -> Comparator<Self> {
        Comparator::partial()
    }

    fn zero() -> Option<Self> {
        Some(0.0)
    }
}

impl PropertyValue for f64 {
    fn default_comparator() -> Comparator<Self> {
        Comparator::partial()
    }

    fn zero() -> Option<Self> {
        Some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    enum Stage {
        Alpha,
        Beta,
    }

    impl PropertyValue for Stage {}

    #[test_case(5, 5, true ; "equal is reached")]
    #[test_case(6, 5, true ; "greater is reached")]
    #[test_case(4, 5, false ; "less is not reached")]
    fn test_natural_reached(held: i32, probe: i32, expected: bool) {
        assert_eq!(i32::default_comparator().reached(&held, &probe), expected);
    }

    #[test]
    fn test_weak_comparator() {
        let comparator = Stage::default_comparator();
        assert_eq!(comparator.kind(), "weak");
        assert_eq!(
            comparator.compare(&Stage::Alpha, &Stage::Alpha),
            Ordering::Equal
        );
        assert_eq!(comparator.compare(&Stage::Alpha, &Stage::Beta), Ordering::Less);
        assert_eq!(comparator.compare(&Stage::Beta, &Stage::Alpha), Ordering::Less);
    }

    #[test]
    fn test_partial_comparator_treats_nan_as_not_reached() {
        let comparator = f64::default_comparator();
        assert!(comparator.reached(&1.5, &1.0));
        assert!(!comparator.reached(&f64::NAN, &1.0));
        assert!(!comparator.reached(&1.0, &f64::NAN));
    }

    #[test]
    fn test_custom_comparator() {
        // reversed: smaller is "larger"
        let comparator = Comparator::<u32>::from_fn(|a, b| b.cmp(a));
        assert!(comparator.reached(&1, &10));
        assert!(!comparator.reached(&10, &1));
        assert_eq!(format!("{comparator:?}"), "Comparator(custom)");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(bool::zero(), Some(false));
        assert_eq!(i64::zero(), Some(0));
        assert_eq!(f32::zero(), Some(0.0));
        assert_eq!(String::zero(), Some(String::new()));
        assert_eq!(<BigInt as PropertyValue>::zero(), Some(BigInt::from(0)));
        assert_eq!(
            <BigDecimal as PropertyValue>::zero(),
            Some(BigDecimal::from(0))
        );
    }

    #[test]
    fn test_big_number_ordering() {
        let comparator = BigDecimal::default_comparator();
        let held: BigDecimal = "10.50".parse().unwrap();
        let probe: BigDecimal = "10.5".parse().unwrap();
        assert!(comparator.reached(&held, &probe));
        assert!(!comparator.reached(&probe, &"10.51".parse().unwrap()));
    }
}
