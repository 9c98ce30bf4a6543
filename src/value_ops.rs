// Copyright 2025 Cowboy AI, LLC.

//! Operators for mutating current values
//!
//! Every function here returns a pure operator; nothing changes until the
//! operator reaches a [`CurrentValue`] through [`CurrentValue::apply`] or the
//! [`apply`] adapter. Fixed-width integer increments wrap on overflow.

use crate::comparator::PropertyValue;
use crate::value::CurrentValue;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::ops::Add;

/// Turn `op` into a consumer that applies it to a current value
pub fn apply<T, F>(op: F) -> impl Fn(&CurrentValue<T>)
where
    T: PropertyValue,
    F: Fn(T) -> T,
{
    move |current: &CurrentValue<T>| current.apply(&op)
}

/// Boolean negation
pub fn negate_bool() -> impl Fn(bool) -> bool + Clone + Send + Sync {
    |value: bool| !value
}

/// Add `n` using the payload's own addition
pub fn increment_by<T>(n: T) -> impl Fn(T) -> T + Clone + Send + Sync
where
    T: Add<Output = T> + Clone + Send + Sync,
{
    move |value| value + n.clone()
}

macro_rules! wrapping_increments {
    ($($ty:ty => $one:ident, $by:ident);* $(;)?) => {
        $(
            #[doc = concat!("Add one to a `", stringify!($ty), "`, wrapping on overflow")]
            pub fn $one() -> impl Fn($ty) -> $ty + Clone + Send + Sync {
                $by(1)
            }

            #[doc = concat!("Add `n` to a `", stringify!($ty), "`, wrapping on overflow")]
            pub fn $by(n: $ty) -> impl Fn($ty) -> $ty + Clone + Send + Sync {
                move |value: $ty| value.wrapping_add(n)
            }
        )*
    };
}

wrapping_increments! {
    i8 => increment_i8, increment_i8_by;
    i16 => increment_i16, increment_i16_by;
    i32 => increment_i32, increment_i32_by;
    i64 => increment_i64, increment_i64_by;
    i128 => increment_i128, increment_i128_by;
    isize => increment_isize, increment_isize_by;
    u8 => increment_u8, increment_u8_by;
    u16 => increment_u16, increment_u16_by;
    u32 => increment_u32, increment_u32_by;
    u64 => increment_u64, increment_u64_by;
    u128 => increment_u128, increment_u128_by;
    usize => increment_usize, increment_usize_by;
}

/// Add one to an `f32`
pub fn increment_f32() -> impl Fn(f32) -> f32 + Clone + Send + Sync {
    increment_f32_by(1.0)
}

/// Add `n` to an `f32`
pub fn increment_f32_by(n: f32) -> impl Fn(f32) -> f32 + Clone + Send + Sync {
    move |value| value + n
}

/// Add one to an `f64`
pub fn increment_f64() -> impl Fn(f64) -> f64 + Clone + Send + Sync {
    increment_f64_by(1.0)
}

/// Add `n` to an `f64`
pub fn increment_f64_by(n: f64) -> impl Fn(f64) -> f64 + Clone + Send + Sync {
    move |value| value + n
}

/// Advance a `char` to the next code point
pub fn increment_char() -> impl Fn(char) -> char + Clone + Send + Sync {
    increment_char_by(1)
}

/// Advance a `char` by `n` code points
///
/// Left unchanged when the result would not be a valid `char`.
pub fn increment_char_by(n: u32) -> impl Fn(char) -> char + Clone + Send + Sync {
    move |value: char| {
        (value as u32)
            .checked_add(n)
            .and_then(char::from_u32)
            .unwrap_or(value)
    }
}

/// Add one to a `BigInt`
pub fn increment_big_int() -> impl Fn(BigInt) -> BigInt + Clone + Send + Sync {
    increment_big_int_by(BigInt::from(1))
}

/// Add `n` to a `BigInt`
pub fn increment_big_int_by(n: BigInt) -> impl Fn(BigInt) -> BigInt + Clone + Send + Sync {
    move |value| value + &n
}

/// Add one to a `BigDecimal`
pub fn increment_big_decimal() -> impl Fn(BigDecimal) -> BigDecimal + Clone + Send + Sync {
    increment_big_decimal_by(BigDecimal::from(1))
}

/// Add `n` to a `BigDecimal`
pub fn increment_big_decimal_by(
    n: BigDecimal,
) -> impl Fn(BigDecimal) -> BigDecimal + Clone + Send + Sync {
    move |value| value + &n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyFactory;
    use test_case::test_case;

    #[test_case(0, 1 ; "from zero")]
    #[test_case(-1, 0 ; "to zero")]
    #[test_case(i32::MAX, i32::MIN ; "wraps")]
    fn test_increment_i32(start: i32, expected: i32) {
        assert_eq!(increment_i32()(start), expected);
    }

    #[test]
    fn test_increment_by_n() {
        assert_eq!(increment_i8_by(3)(4), 7);
        assert_eq!(increment_u8_by(10)(250), 4);
        assert_eq!(increment_i64_by(-5)(5), 0);
        assert_eq!(increment_u128()(u128::MAX - 1), u128::MAX);
        assert_eq!(increment_f64_by(0.5)(1.0), 1.5);
        assert_eq!(increment_f32()(1.5), 2.5);
        assert_eq!(increment_by(2u16)(40), 42);
    }

    #[test]
    fn test_increment_char() {
        assert_eq!(increment_char()('a'), 'b');
        assert_eq!(increment_char_by(2)('x'), 'z');
        // U+D7FF + 1 is a surrogate
        assert_eq!(increment_char()('\u{D7FF}'), '\u{D7FF}');
        assert_eq!(increment_char()(char::MAX), char::MAX);
    }

    #[test]
    fn test_increment_big_numbers() {
        let big: BigInt = "99999999999999999999999999".parse().unwrap();
        let expected: BigInt = "100000000000000000000000000".parse().unwrap();
        assert_eq!(increment_big_int()(big), expected);

        let step: BigDecimal = "0.25".parse().unwrap();
        let result = increment_big_decimal_by(step)("1.5".parse().unwrap());
        assert_eq!(result, "1.75".parse::<BigDecimal>().unwrap());
        assert_eq!(
            increment_big_decimal()(BigDecimal::from(1)),
            BigDecimal::from(2)
        );
    }

    #[test]
    fn test_negate_bool() {
        let negate = negate_bool();
        assert!(negate(false));
        assert!(!negate(true));
    }

    #[test]
    fn test_operators_do_not_mutate_until_applied() {
        let users = PropertyFactory::new()
            .create_with_value("users", 0i32)
            .unwrap();
        let current = CurrentValue::new(users, 0);

        let consumer = apply(increment_i32_by(3));
        assert_eq!(current.get(), 0);

        consumer(&current);
        consumer(&current);
        assert_eq!(current.get(), 6);
    }

    #[test]
    fn test_apply_negation() {
        let online = PropertyFactory::new()
            .create::<bool>("online", None)
            .unwrap();
        let current = CurrentValue::seeded(online).unwrap();

        apply(negate_bool())(&current);
        assert!(current.get());
    }
}
