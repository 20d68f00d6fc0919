//! Integration tests for operator lifting over `Option` operands.

use chrono::{Duration, Utc};
use generic_ops::{
    add, add_alternative, bitwise_not, convert, divide_int, equal, greater_than, less_than,
    multiply, negate, not_equal, subtract, zero, OpError,
};

// ============================================================================
// Null propagation for value-producing operators
// ============================================================================

#[test]
fn add_propagates_absence() {
    assert_eq!(add(Some(3), Some(5)), Ok(Some(8)));
    assert_eq!(add(None::<i32>, Some(5)), Ok(None));
    assert_eq!(add(Some(3), None::<i32>), Ok(None));
    assert_eq!(add(None::<i32>, None), Ok(None));
}

#[test]
fn subtract_propagates_absence() {
    assert_eq!(subtract(Some(270), Some(54)), Ok(Some(216)));
    assert_eq!(subtract(None::<i32>, Some(54)), Ok(None));
}

#[test]
fn unary_operators_lift() {
    assert_eq!(negate(Some(5)), Ok(Some(-5)));
    assert_eq!(negate(None::<i32>), Ok(None));
    assert_eq!(bitwise_not(Some(0b1010u8)), Ok(Some(!0b1010u8)));
    assert_eq!(bitwise_not(None::<u8>), Ok(None));
}

#[test]
fn zero_of_optional_is_absent() {
    assert_eq!(zero::<Option<i32>>(), Ok(None));
    assert_eq!(zero::<Option<String>>(), Ok(None));
}

// ============================================================================
// Lifted comparisons
// ============================================================================

#[test]
fn equality_is_structural() {
    assert_eq!(equal(None::<i32>, None), Ok(true));
    assert_eq!(equal(None::<i32>, Some(1)), Ok(false));
    assert_eq!(equal(Some(1), None::<i32>), Ok(false));
    assert_eq!(equal(Some(1), Some(1)), Ok(true));
    assert_eq!(equal(Some(1), Some(2)), Ok(false));
}

#[test]
fn inequality_is_structural() {
    assert_eq!(not_equal(None::<i32>, None), Ok(false));
    assert_eq!(not_equal(None::<i32>, Some(1)), Ok(true));
    assert_eq!(not_equal(Some(1), Some(2)), Ok(true));
}

#[test]
fn ordered_comparisons_with_absent_operand_are_never_true() {
    assert_eq!(less_than(None::<i32>, Some(1)), Ok(false));
    assert_eq!(less_than(Some(1), None::<i32>), Ok(false));
    assert_eq!(greater_than(None::<i32>, None), Ok(false));
    assert_eq!(less_than(Some(0), Some(1)), Ok(true));
}

// ============================================================================
// Lifted conversion
// ============================================================================

#[test]
fn conversion_lifts_over_optionals() {
    assert_eq!(convert::<Option<i32>, Option<f64>>(Some(3)), Ok(Some(3.0)));
    assert_eq!(convert::<Option<i32>, Option<f64>>(None), Ok(None));
    assert_eq!(convert::<i32, Option<f64>>(3), Ok(Some(3.0)));
}

#[test]
fn conversion_cannot_drop_the_wrapper() {
    assert!(convert::<Option<i32>, f64>(Some(3)).is_err());
}

// ============================================================================
// Lifted mixed-type operators
// ============================================================================

#[test]
fn mixed_operators_lift_on_the_left() {
    let from = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap();
    let delta = Duration::minutes(4410);
    assert_eq!(add_alternative(Some(from), delta), Ok(Some(from + delta)));
    assert_eq!(add_alternative(None::<chrono::NaiveDateTime>, delta), Ok(None));
}

#[test]
fn lifting_composes_with_operand_coercion() {
    assert_eq!(divide_int(Some(10.0f64), 4), Ok(Some(2.5)));
    assert_eq!(divide_int(None::<f64>, 4), Ok(None));
}

// ============================================================================
// Failure reporting
// ============================================================================

#[test]
fn inner_failure_names_wrapper_and_inner_type() {
    let err = multiply(Some("a".to_string()), Some("b".to_string())).unwrap_err();
    assert!(err.is_lifted());
    assert!(err.to_string().contains("Option"), "got: {err}");

    let source = std::error::Error::source(&err).expect("inner reason");
    assert!(source.to_string().contains("String"), "got: {source}");
}

#[test]
fn plain_failure_is_not_reported_as_lifted() {
    let err = multiply("a".to_string(), "b".to_string()).unwrap_err();
    assert!(!err.is_lifted());
    assert!(matches!(err, OpError::Unsupported { .. }));
}

#[test]
#[should_panic(expected = "nested optional")]
fn nested_optionals_are_rejected() {
    let _ = add(Some(Some(1)), Some(Some(2)));
}
