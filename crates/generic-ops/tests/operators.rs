//! Integration tests for the public operator facade.

use chrono::{Duration, Utc};
use generic_ops::{
    add, add_alternative, bitwise_and, bitwise_not, bitwise_or, bitwise_xor, convert, divide,
    divide_alternative, divide_int, equal, greater_than, greater_than_or_equal, less_than,
    less_than_or_equal, multiply, multiply_alternative, negate, not_equal, subtract,
    subtract_alternative, zero, OpError,
};

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn add_i32() {
    assert_eq!(add(270, 54), Ok(270 + 54));
}

#[test]
fn subtract_i32() {
    assert_eq!(subtract(270, 54), Ok(270 - 54));
}

#[test]
fn multiply_i32() {
    assert_eq!(multiply(270, 54), Ok(270 * 54));
}

#[test]
fn divide_f64() {
    assert_eq!(divide(14514.7, 45.2), Ok(14514.7 / 45.2));
}

#[test]
fn negate_i32() {
    assert_eq!(negate(270), Ok(-270));
}

#[test]
fn negate_unsigned_is_unsupported() {
    let err = negate(270u32).unwrap_err();
    assert!(matches!(err, OpError::Unsupported { .. }));
    assert!(err.to_string().contains("u32"), "got: {err}");
}

#[test]
fn multiply_string_is_unsupported() {
    let err = multiply("abc".to_string(), "def".to_string()).unwrap_err();
    assert!(matches!(err, OpError::Unsupported { .. }));
}

#[test]
fn negate_string_is_unsupported() {
    assert!(negate("abc".to_string()).is_err());
}

// ============================================================================
// Bitwise
// ============================================================================

#[test]
fn or_i32() {
    assert_eq!(bitwise_or(270, 54), Ok(270 | 54));
}

#[test]
fn and_i32() {
    assert_eq!(bitwise_and(270, 54), Ok(270 & 54));
}

#[test]
fn xor_i32() {
    assert_eq!(bitwise_xor(270, 54), Ok(270 ^ 54));
}

#[test]
fn not_i32() {
    assert_eq!(bitwise_not(270), Ok(!270));
}

#[test]
fn bool_logic() {
    assert_eq!(bitwise_or(true, false), Ok(true));
    assert_eq!(bitwise_and(true, false), Ok(false));
    assert_eq!(bitwise_xor(true, true), Ok(false));
    assert_eq!(bitwise_not(true), Ok(false));
}

#[test]
fn bitwise_on_floats_is_unsupported() {
    assert!(bitwise_or(1.5f64, 2.5f64).is_err());
    assert!(bitwise_not(1.5f64).is_err());
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn equal_i32() {
    assert_eq!(equal(54, 54), Ok(true));
    assert_eq!(equal(54, 270), Ok(false));
}

#[test]
fn not_equal_i32() {
    assert_eq!(not_equal(270, 54), Ok(true));
    assert_eq!(not_equal(270, 270), Ok(false));
}

#[test]
fn less_than_i32() {
    assert_eq!(less_than(54, 270), Ok(true));
    assert_eq!(less_than(270, 270), Ok(false));
    assert_eq!(less_than(270, 54), Ok(false));
}

#[test]
fn less_than_or_equal_i32() {
    assert_eq!(less_than_or_equal(54, 270), Ok(true));
    assert_eq!(less_than_or_equal(270, 270), Ok(true));
    assert_eq!(less_than_or_equal(270, 54), Ok(false));
}

#[test]
fn greater_than_i32() {
    assert_eq!(greater_than(54, 270), Ok(false));
    assert_eq!(greater_than(270, 270), Ok(false));
    assert_eq!(greater_than(270, 54), Ok(true));
}

#[test]
fn greater_than_or_equal_i32() {
    assert_eq!(greater_than_or_equal(54, 270), Ok(false));
    assert_eq!(greater_than_or_equal(270, 270), Ok(true));
    assert_eq!(greater_than_or_equal(270, 54), Ok(true));
}

#[test]
fn string_ordering() {
    assert_eq!(less_than("abc".to_string(), "abd".to_string()), Ok(true));
    assert_eq!(equal("abc".to_string(), "abc".to_string()), Ok(true));
}

#[test]
fn nan_compares_false() {
    assert_eq!(equal(f64::NAN, f64::NAN), Ok(false));
    assert_eq!(less_than(f64::NAN, 1.0), Ok(false));
    assert_eq!(greater_than(f64::NAN, 1.0), Ok(false));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn convert_i32_to_f64_round_trips() {
    let from = 280;
    let wide: f64 = convert(from).unwrap();
    let back: i32 = convert(wide).unwrap();
    assert_eq!(back, from);
    assert_eq!(wide, back as f64);
}

#[test]
fn convert_narrows_like_a_cast() {
    assert_eq!(convert::<i64, i8>(300), Ok(300i64 as i8));
    assert_eq!(convert::<f64, i32>(2.9), Ok(2));
}

#[test]
fn convert_without_a_cast_is_unsupported() {
    assert!(convert::<String, i32>("7".to_string()).is_err());
    assert!(convert::<i32, String>(7).is_err());
}

// ============================================================================
// Zero values
// ============================================================================

#[test]
fn zero_values() {
    assert_eq!(zero::<i32>(), Ok(0));
    assert_eq!(zero::<f32>(), Ok(0.0));
    assert_eq!(zero::<bool>(), Ok(false));
    assert_eq!(zero::<String>(), Ok(String::new()));
}

// ============================================================================
// Mixed-type operators
// ============================================================================

#[test]
fn add_timestamp_duration() {
    let from = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap();
    let delta = Duration::minutes(4410); // 73.5 hours
    assert_eq!(add_alternative(from, delta), Ok(from + delta));
}

#[test]
fn subtract_timestamp_duration() {
    let from = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap();
    let delta = Duration::minutes(4410);
    assert_eq!(subtract_alternative(from, delta), Ok(from - delta));
}

#[test]
fn add_utc_timestamp_duration() {
    let from = Utc::now();
    let delta = Duration::seconds(90);
    assert_eq!(add_alternative(from, delta), Ok(from + delta));
}

#[test]
fn duration_arithmetic() {
    let a = Duration::seconds(5);
    let b = Duration::seconds(7);
    assert_eq!(add(a, b), Ok(Duration::seconds(12)));
    assert_eq!(subtract(b, a), Ok(Duration::seconds(2)));
    assert_eq!(negate(a), Ok(Duration::seconds(-5)));
    assert_eq!(zero::<Duration>(), Ok(Duration::zero()));
    assert_eq!(less_than(a, b), Ok(true));
}

#[test]
fn multiply_f32_by_i32() {
    let from = 123.43f32;
    let factor = 12;
    assert_eq!(multiply_alternative(from, factor), Ok(from * factor as f32));
}

#[test]
fn divide_f32_by_i32() {
    let from = 123.43f32;
    let divisor = 12;
    assert_eq!(divide_alternative(from, divisor), Ok(from / divisor as f32));
    assert_eq!(divide_int(from, divisor), Ok(from / divisor as f32));
}

#[test]
fn divide_f64_by_i32() {
    assert_eq!(divide_int(14514.7, 45), Ok(14514.7 / 45.0));
}

#[test]
fn mixed_pair_with_no_conversion_is_unsupported() {
    let err = add_alternative(7i32, "x".to_string()).unwrap_err();
    assert!(matches!(err, OpError::Unsupported { .. }));
}
